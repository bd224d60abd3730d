//! Range checks for movement tuning, run before any body is built.

use super::resources::MovementTuning;

/// A tuning value outside the range the simulation can run with.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningError {
    pub field: &'static str,
    pub reason: String,
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "movement tuning '{}' {}", self.field, self.reason)
    }
}

impl std::error::Error for TuningError {}

macro_rules! check {
    ($errors:expr, $cond:expr, $field:expr, $($reason:tt)+) => {
        if !$cond {
            $errors.push(TuningError {
                field: $field,
                reason: format!($($reason)+),
            });
        }
    };
}

/// Validate every tunable. Returns all violations, empty if the tuning is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<TuningError> {
    let mut errors = Vec::new();

    let non_negative = [
        ("max_speed", tuning.max_speed),
        ("max_acceleration", tuning.max_acceleration),
        ("max_air_acceleration", tuning.max_air_acceleration),
        ("jump_input_leeway", tuning.jump_input_leeway),
        ("jump_off_platform_leeway", tuning.jump_off_platform_leeway),
        ("min_time_between_jumps", tuning.min_time_between_jumps),
        ("jump_force", tuning.jump_force),
        ("vertical_jump_resistance", tuning.vertical_jump_resistance),
        ("air_jump_hold", tuning.air_jump_hold),
        ("wall_jump_force_x", tuning.wall_jump_force_x),
        ("wall_jump_force_y", tuning.wall_jump_force_y),
        ("horizontal_jump_resistance", tuning.horizontal_jump_resistance),
        ("wall_slide_speed", tuning.wall_slide_speed),
        ("wall_slide_start_leeway", tuning.wall_slide_start_leeway),
        ("wall_slide_stop_leeway", tuning.wall_slide_stop_leeway),
        ("raycast_offset", tuning.raycast_offset),
        ("ray_skin", tuning.ray_skin),
        ("respawn_delay", tuning.respawn_delay),
        ("fade_speed", tuning.fade_speed),
    ];
    for (field, value) in non_negative {
        check!(
            errors,
            value.is_finite() && value >= 0.0,
            field,
            "must be a finite value >= 0, got {}",
            value
        );
    }

    check!(
        errors,
        tuning.gravity.is_finite() && tuning.gravity < 0.0,
        "gravity",
        "must be negative, got {}",
        tuning.gravity
    );

    check!(
        errors,
        tuning.vertical_rays >= 1,
        "vertical_rays",
        "must cast at least one ray"
    );
    check!(
        errors,
        tuning.horizontal_rays >= 1,
        "horizontal_rays",
        "must cast at least one ray"
    );

    for (field, extent) in [
        ("half_width", tuning.half_width),
        ("half_height", tuning.half_height),
    ] {
        check!(
            errors,
            extent.is_finite() && extent > 0.0,
            field,
            "must be > 0, got {}",
            extent
        );
    }

    let smallest_extent = tuning.half_width.min(tuning.half_height);
    if smallest_extent > 0.0 && tuning.raycast_offset >= smallest_extent {
        errors.push(TuningError {
            field: "raycast_offset",
            reason: format!(
                "must be smaller than the smallest half extent ({}), got {}",
                smallest_extent, tuning.raycast_offset
            ),
        });
    }

    errors
}
