//! Movement domain: step-loop scenarios for jumps, wall slides and respawn.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use super::jump;
use super::{
    Facing, MovementEvent, MovementEvents, MovementMode, MovementTuning, PlayerBody, PlayerState,
    RectMask, StepInput,
};

const DT: f32 = 1.0 / 64.0;

fn floor() -> Aabb2d {
    Aabb2d::new(Vec2::new(0.0, -0.5), Vec2::new(100.0, 0.5))
}

/// Tall wall whose left face sits at `x`.
fn wall_right_at(x: f32) -> Aabb2d {
    Aabb2d::new(Vec2::new(x + 0.5, 5.0), Vec2::new(0.5, 50.0))
}

fn run(
    body: &mut PlayerBody,
    tuning: &MovementTuning,
    horizontal: f32,
    jump_pressed: bool,
    level: &RectMask,
) -> Vec<MovementEvent> {
    let mut events = MovementEvents::default();
    body.advance(
        tuning,
        StepInput {
            horizontal,
            jump_pressed,
            dt: DT,
        },
        level,
        &mut events,
    );
    events.drain().collect()
}

fn idle(body: &mut PlayerBody, tuning: &MovementTuning, level: &RectMask, steps: usize) {
    for _ in 0..steps {
        run(body, tuning, 0.0, false, level);
    }
}

/// A body resting on the floor, one step into the simulation.
fn grounded(tuning: &MovementTuning, level: &RectMask) -> PlayerBody {
    let mut body = PlayerBody::spawn(Vec2::new(0.0, 1.0), tuning).unwrap();
    let events = run(&mut body, tuning, 0.0, false, level);
    assert_eq!(events, vec![MovementEvent::Landed]);
    assert!(body.on_ground());
    body
}

// =============================================================================
// Construction and step guards
// =============================================================================

#[test]
fn test_spawn_rejects_invalid_tuning() {
    let tuning = MovementTuning {
        vertical_rays: 0,
        gravity: 5.0,
        ..default()
    };
    let errors = PlayerBody::spawn(Vec2::ZERO, &tuning).unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert!(fields.contains(&"vertical_rays"));
    assert!(fields.contains(&"gravity"));
}

#[test]
fn test_step_ignores_non_positive_dt() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![floor()]);
    let mut body = PlayerBody::spawn(Vec2::new(0.0, 5.0), &tuning).unwrap();
    let mut events = MovementEvents::default();

    for dt in [0.0, -DT, f32::NAN] {
        let input = StepInput {
            horizontal: 1.0,
            jump_pressed: true,
            dt,
        };
        body.advance(&tuning, input, &level, &mut events);
    }

    assert_eq!(body.position, Vec2::new(0.0, 5.0));
    assert_eq!(body.clock.now(), 0.0);
    assert!(events.is_empty());
}

#[test]
fn test_missing_level_lets_body_fall() {
    let tuning = MovementTuning::default();
    let mut body = PlayerBody::spawn(Vec2::new(0.0, 5.0), &tuning).unwrap();
    let mut events = MovementEvents::default();
    let nothing: Option<RectMask> = None;

    for _ in 0..4 {
        let input = StepInput {
            dt: DT,
            ..default()
        };
        body.advance(&tuning, input, &nothing, &mut events);
    }

    assert_eq!(body.position, Vec2::new(0.0, 5.0 - 4.0 * 20.0 * DT));
    assert!(!body.on_ground());
}

// =============================================================================
// Motor
// =============================================================================

#[test]
fn test_turning_around_publishes_direction_once() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![floor()]);
    let mut body = grounded(&tuning, &level);

    let mut flips = Vec::new();
    for _ in 0..10 {
        for event in run(&mut body, &tuning, -1.0, false, &level) {
            if let MovementEvent::DirectionChanged(facing) = event {
                flips.push(facing);
            }
        }
    }

    assert_eq!(flips, vec![Facing::Left]);
    assert_eq!(body.facing, Facing::Left);
    assert_eq!(body.state, PlayerState::Run);
    assert_eq!(body.velocity.x, -tuning.max_speed);
}

// =============================================================================
// Ground jump, buffer and coyote time
// =============================================================================

#[test]
fn test_ground_jump_applies_full_impulse() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![floor()]);
    let mut body = grounded(&tuning, &level);

    let events = run(&mut body, &tuning, 0.0, true, &level);

    assert_eq!(body.jump_velocity.y, tuning.jump_force);
    assert!(!body.on_ground());
    assert_eq!(
        events,
        vec![
            MovementEvent::Jumped(Facing::Right),
            MovementEvent::StateChanged(PlayerState::Jump),
        ]
    );

    // Rising and falling both read as Jump; it is published once.
    let mut published = 0;
    for _ in 0..20 {
        published += run(&mut body, &tuning, 0.0, false, &level)
            .iter()
            .filter(|e| matches!(e, MovementEvent::StateChanged(_)))
            .count();
    }
    assert_eq!(published, 0);
    assert_eq!(body.state, PlayerState::Jump);
}

#[test]
fn test_buffered_press_fires_on_landing() {
    let tuning = MovementTuning {
        max_air_jumps: 0,
        ..default()
    };
    let level = RectMask::new(vec![floor()]);

    // Starting 10 fall steps above the floor: lands during step 10.
    for (press_step, expect_jump) in [(6, true), (1, false)] {
        let mut body = PlayerBody::spawn(Vec2::new(0.0, 1.0 + 10.0 * 20.0 * DT), &tuning).unwrap();

        let mut jumped_at = None;
        for step in 1..=11 {
            let events = run(&mut body, &tuning, 0.0, step == press_step, &level);
            if events.contains(&MovementEvent::Jumped(Facing::Right)) {
                jumped_at = Some(step);
            }
            if step == 10 {
                assert!(body.on_ground());
            }
        }

        if expect_jump {
            assert_eq!(jumped_at, Some(11));
            assert_eq!(body.jump_velocity.y, tuning.jump_force);
        } else {
            assert_eq!(jumped_at, None);
            assert!(body.on_ground());
        }
    }
}

#[test]
fn test_coyote_window_after_walking_off() {
    let tuning = MovementTuning {
        max_air_jumps: 0,
        ..default()
    };
    let empty = RectMask::default();

    // Leaves the ground during step 1. The window is 0.1s, i.e. 6.4 steps.
    for (extra_steps, expect_jump) in [(5, true), (6, false)] {
        let mut body = PlayerBody::spawn(Vec2::new(0.0, 1.0), &tuning).unwrap();
        body.contacts.ground = true;
        run(&mut body, &tuning, 1.0, false, &empty);
        assert_eq!(body.stamps.left_ground, Some(f64::from(DT)));

        idle(&mut body, &tuning, &empty, extra_steps);
        let events = run(&mut body, &tuning, 0.0, true, &empty);

        if expect_jump {
            assert!(events.contains(&MovementEvent::Jumped(Facing::Right)));
            assert_eq!(body.jump_velocity.y, tuning.jump_force);
            // Consumed: one walk-off grants one jump.
            assert_eq!(body.stamps.left_ground, None);
        } else {
            assert!(!events.contains(&MovementEvent::Jumped(Facing::Right)));
            assert_eq!(body.jump_velocity, Vec2::ZERO);
        }
    }
}

// =============================================================================
// Air jumps
// =============================================================================

/// Steps between presses so `min_time_between_jumps` (0.2s) has elapsed.
const JUMP_SPACING: usize = 13;

#[test]
fn test_air_jump_then_exhausted() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![floor()]);
    let mut body = grounded(&tuning, &level);

    run(&mut body, &tuning, 0.0, true, &level);
    idle(&mut body, &tuning, &level, JUMP_SPACING - 1);

    let events = run(&mut body, &tuning, 0.0, true, &level);
    assert_eq!(
        events,
        vec![
            MovementEvent::StateChanged(PlayerState::AirJump),
            MovementEvent::AirJumped,
        ]
    );
    assert_eq!(body.air_jumps_remaining, 0);
    assert_eq!(body.jump_velocity.y, tuning.jump_force);

    idle(&mut body, &tuning, &level, JUMP_SPACING - 1);
    let impulse_before = body.jump_velocity;
    let events = run(&mut body, &tuning, 0.0, true, &level);
    assert!(!events.contains(&MovementEvent::AirJumped));
    assert!(body.jump_velocity.y < impulse_before.y);
    assert!(!body.on_ground());
}

#[test]
fn test_air_jump_count_matches_tuning() {
    for max_air_jumps in 0..=3u8 {
        let tuning = MovementTuning {
            max_air_jumps,
            ..default()
        };
        let level = RectMask::new(vec![floor()]);
        let mut body = grounded(&tuning, &level);
        run(&mut body, &tuning, 0.0, true, &level);

        let mut air_jumps = 0;
        for _ in 0..=max_air_jumps {
            idle(&mut body, &tuning, &level, JUMP_SPACING - 1);
            air_jumps += run(&mut body, &tuning, 0.0, true, &level)
                .iter()
                .filter(|e| **e == MovementEvent::AirJumped)
                .count();
        }

        assert_eq!(air_jumps, max_air_jumps as usize);
        assert_eq!(body.air_jumps_remaining, 0);
    }
}

#[test]
fn test_air_jump_state_is_held() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![floor()]);
    let mut body = grounded(&tuning, &level);

    run(&mut body, &tuning, 0.0, true, &level);
    idle(&mut body, &tuning, &level, JUMP_SPACING - 1);
    run(&mut body, &tuning, 0.0, true, &level);
    assert_eq!(body.state, PlayerState::AirJump);

    // 0.3s hold is 19.2 steps.
    idle(&mut body, &tuning, &level, 19);
    assert_eq!(body.state, PlayerState::AirJump);

    let events = run(&mut body, &tuning, 0.0, false, &level);
    assert_eq!(events, vec![MovementEvent::StateChanged(PlayerState::Jump)]);
}

#[test]
fn test_landing_restores_jump_counters() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![floor()]);
    let mut body = grounded(&tuning, &level);

    run(&mut body, &tuning, 0.0, true, &level);
    idle(&mut body, &tuning, &level, JUMP_SPACING - 1);
    run(&mut body, &tuning, 0.0, true, &level);
    assert_eq!(body.air_jumps_remaining, 0);
    body.wall_jumps_remaining = 0;

    let mut landed = false;
    for _ in 0..600 {
        if run(&mut body, &tuning, 0.0, false, &level).contains(&MovementEvent::Landed) {
            landed = true;
            break;
        }
    }

    assert!(landed);
    assert_eq!(body.air_jumps_remaining, tuning.max_air_jumps);
    assert_eq!(body.wall_jumps_remaining, tuning.max_wall_jumps);
    assert_eq!(body.jump_velocity, Vec2::ZERO);
    assert_eq!(body.mode, MovementMode::Grounded);
}

// =============================================================================
// Impulse decay
// =============================================================================

#[test]
fn test_horizontal_impulse_decays_to_exactly_zero() {
    let tuning = MovementTuning::default();
    let mut body = PlayerBody::spawn(Vec2::ZERO, &tuning).unwrap();
    body.jump_velocity = Vec2::new(tuning.wall_jump_force_x, 0.0);
    body.jump_direction = Facing::Right;

    let mut previous = body.jump_velocity.x;
    for _ in 0..64 {
        jump::decay(&mut body, &tuning, DT);
        let x = body.jump_velocity.x;
        assert!(x <= previous);
        assert!(x >= 0.0);
        previous = x;
    }
    assert_eq!(body.jump_velocity.x, 0.0);
}

#[test]
fn test_horizontal_impulse_against_locked_direction_is_dropped() {
    let tuning = MovementTuning::default();
    let mut body = PlayerBody::spawn(Vec2::ZERO, &tuning).unwrap();
    body.jump_velocity = Vec2::new(-tuning.wall_jump_force_x, 10.0);
    body.jump_direction = Facing::Right;

    jump::decay(&mut body, &tuning, DT);

    assert_eq!(body.jump_velocity.x, 0.0);
    assert_eq!(
        body.jump_velocity.y,
        10.0 - tuning.vertical_jump_resistance * DT
    );
}

// =============================================================================
// Walls
// =============================================================================

/// Airborne body touching a wall on its right.
fn against_wall(tuning: &MovementTuning) -> PlayerBody {
    PlayerBody::spawn(Vec2::new(0.5, 5.0), tuning).unwrap()
}

#[test]
fn test_wall_slide_grabs_then_slides() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![wall_right_at(1.0)]);
    let mut body = against_wall(&tuning);

    let events = run(&mut body, &tuning, 1.0, false, &level);
    assert!(body.wall_sliding());
    assert!(events.contains(&MovementEvent::StateChanged(PlayerState::WallSlide)));
    let grabbed_at = body.position;
    assert_eq!(grabbed_at, Vec2::new(0.5, 5.0 - 20.0 * DT));

    // Start leeway (0.08s) holds the body still through step 6.
    for _ in 2..=6 {
        let events = run(&mut body, &tuning, 1.0, false, &level);
        assert!(events.is_empty());
        assert_eq!(body.position, grabbed_at);
    }

    let events = run(&mut body, &tuning, 1.0, false, &level);
    assert_eq!(events, vec![MovementEvent::WallSlid(Facing::Right)]);
    assert_eq!(body.motion.y, -tuning.wall_slide_speed);
    assert_eq!(
        body.position.y,
        grabbed_at.y - tuning.wall_slide_speed * DT
    );
}

#[test]
fn test_wall_jump_launches_away_from_wall() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![wall_right_at(1.0)]);
    let mut body = against_wall(&tuning);

    run(&mut body, &tuning, 1.0, false, &level);
    run(&mut body, &tuning, 1.0, false, &level);
    let events = run(&mut body, &tuning, 1.0, true, &level);

    assert_eq!(
        body.jump_velocity,
        Vec2::new(-tuning.wall_jump_force_x, tuning.wall_jump_force_y)
    );
    assert_eq!(body.wall_jumps_remaining, tuning.max_wall_jumps - 1);
    assert_eq!(body.air_jumps_remaining, tuning.max_air_jumps);
    assert!(!body.on_wall());
    assert!(events.contains(&MovementEvent::StateChanged(PlayerState::WallJump)));
    assert!(events.contains(&MovementEvent::Jumped(Facing::Left)));
    assert!(events.contains(&MovementEvent::DirectionChanged(Facing::Left)));
}

#[test]
fn test_wall_jumps_run_out_unless_unlimited() {
    for unlimited_wall_jumps in [false, true] {
        let tuning = MovementTuning {
            max_wall_jumps: 0,
            max_air_jumps: 0,
            unlimited_wall_jumps,
            ..default()
        };
        let level = RectMask::new(vec![wall_right_at(1.0)]);
        let mut body = against_wall(&tuning);

        run(&mut body, &tuning, 1.0, false, &level);
        let events = run(&mut body, &tuning, 1.0, true, &level);

        let jumped = events.contains(&MovementEvent::Jumped(Facing::Left));
        assert_eq!(jumped, unlimited_wall_jumps);
        assert_eq!(body.wall_jumps_remaining, 0);
    }
}

#[test]
fn test_wall_slide_flicker_is_debounced() {
    let tuning = MovementTuning::default();
    let wall = RectMask::new(vec![wall_right_at(1.0)]);
    let empty = RectMask::default();
    let mut body = against_wall(&tuning);

    let mut sliding = false;
    let mut changes = Vec::new();
    for step in 1..=64 {
        let level = if step % 2 == 1 { &wall } else { &empty };
        run(&mut body, &tuning, 1.0, false, level);
        if body.wall_sliding() != sliding {
            sliding = body.wall_sliding();
            changes.push(body.clock.now());
        }
    }

    assert!(changes.len() >= 2, "changes: {changes:?}");
    let min_gap = f64::from(
        tuning
            .wall_slide_start_leeway
            .min(tuning.wall_slide_stop_leeway),
    );
    for pair in changes.windows(2) {
        assert!(
            pair[1] - pair[0] >= min_gap - 1e-6,
            "slide toggled after {}s",
            pair[1] - pair[0]
        );
    }
}

// =============================================================================
// Collision post-condition over a scripted run
// =============================================================================

#[test]
fn test_scripted_run_never_penetrates_level() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![
        floor(),
        Aabb2d::new(Vec2::new(4.5, 10.0), Vec2::new(0.5, 12.0)),
        Aabb2d::new(Vec2::new(-4.5, 10.0), Vec2::new(0.5, 12.0)),
    ]);
    let mut body = PlayerBody::spawn(Vec2::new(0.0, 1.0), &tuning).unwrap();

    for step in 0..400 {
        let horizontal = match step {
            0..100 => 1.0,
            100..200 => -1.0,
            200..260 => 1.0,
            260..300 => 0.0,
            _ => -0.6,
        };
        let jump_pressed = step % 17 == 0 || step == 125;
        run(&mut body, &tuning, horizontal, jump_pressed, &level);

        assert!(
            !level.penetrates(&body.bounds(), 1e-4),
            "step {step}: box {:?} inside level",
            body.bounds()
        );
    }
}

// =============================================================================
// Death and respawn
// =============================================================================

#[test]
fn test_death_freezes_then_respawns_at_checkpoint() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![floor()]);
    let mut body = grounded(&tuning, &level);
    for _ in 0..10 {
        run(&mut body, &tuning, 1.0, false, &level);
    }
    let died_at = body.position;

    let mut events = MovementEvents::default();
    assert!(body.kill(&tuning, &mut events));
    assert_eq!(
        events.as_slice(),
        &[
            MovementEvent::StateChanged(PlayerState::Die),
            MovementEvent::DeathEffect(Facing::Right),
        ]
    );
    assert_eq!(body.mode, MovementMode::Dead);

    // Input is ignored while dead.
    for _ in 0..63 {
        let events = run(&mut body, &tuning, 1.0, true, &level);
        assert!(events.is_empty());
        assert_eq!(body.position, died_at);
    }
    assert!(body.is_dead());
    assert!(body.fade_alpha > 0.0 && body.fade_alpha < 1.0);

    let events = run(&mut body, &tuning, 0.0, false, &level);
    assert_eq!(events, vec![MovementEvent::StateChanged(PlayerState::Idle)]);
    assert!(!body.is_dead());
    assert_eq!(body.position, Vec2::new(0.0, 1.0));
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(body.jump_velocity, Vec2::ZERO);
    assert_eq!(body.fade_alpha, 1.0);
}

#[test]
fn test_repeated_death_signal_is_ignored() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![floor()]);
    let mut body = grounded(&tuning, &level);
    let mut events = MovementEvents::default();

    assert!(body.kill(&tuning, &mut events));
    idle(&mut body, &tuning, &level, 10);
    events.clear();

    assert!(!body.kill(&tuning, &mut events));
    assert!(events.is_empty());
    assert_eq!(
        body.respawn.map(|r| r.remaining),
        Some(tuning.respawn_delay - 10.0 * DT)
    );
}

#[test]
fn test_checkpoint_during_respawn_delay_is_honored() {
    let tuning = MovementTuning::default();
    let level = RectMask::new(vec![floor()]);
    let mut body = grounded(&tuning, &level);
    let mut events = MovementEvents::default();

    body.kill(&tuning, &mut events);
    idle(&mut body, &tuning, &level, 10);
    body.set_checkpoint(Vec2::new(5.0, 0.0));
    idle(&mut body, &tuning, &level, 54);

    assert!(!body.is_dead());
    assert_eq!(body.position, Vec2::new(5.0, 1.0));
}
