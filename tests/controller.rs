//! Drives the controller systems on a headless world, one step at a time.

use std::time::Duration;

use avian2d::prelude::LinearVelocity;
use bevy::ecs::message::Messages;
use bevy::ecs::schedule::{ExecutorKind, ScheduleConfigs};
use bevy::ecs::system::{RunSystemOnce, ScheduleSystem};
use bevy::prelude::*;
use skybound::player::input::{DashPressed, InteractPressed, JumpHeld, JumpPressed};
use skybound::player::*;

const FIXED_DT: Duration = Duration::from_millis(20);

fn world() -> World {
    let mut world = World::new();
    world.insert_resource(Time::<()>::default());
    world.init_resource::<Messages<PlayerMessage>>();
    world
}

fn advance(world: &mut World, delta: Duration) {
    world.resource_mut::<Time>().advance_by(delta);
}

fn spawn_test_player(world: &mut World, state: MovementState, input: FrameInput) -> Entity {
    world
        .spawn((
            Player,
            PlayerConfig::default(),
            state,
            input,
            Contacts::default(),
            LinearVelocity::default(),
            MoveInput::default(),
            JumpPressed::default(),
            JumpHeld::default(),
            DashPressed::default(),
            InteractPressed::default(),
        ))
        .id()
}

fn schedule(systems: ScheduleConfigs<ScheduleSystem>) -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(systems);
    schedule
}

fn frame(world: &mut World, schedule: &mut Schedule, delta: Duration) {
    advance(world, delta);
    schedule.run(world);
}

fn physics_step(world: &mut World) {
    world.run_system_once(update_grounded_state).unwrap();
    world.run_system_once(handle_jump).unwrap();
    world.run_system_once(horizontal_movement).unwrap();
    world.run_system_once(apply_gravity).unwrap();
    world.run_system_once(apply_velocity).unwrap();
}

fn drain_messages(world: &mut World) -> Vec<PlayerMessage> {
    world
        .resource_mut::<Messages<PlayerMessage>>()
        .drain()
        .collect()
}

#[test]
fn grounded_step_accelerates_and_commits_velocity() {
    let mut world = world();
    let player = spawn_test_player(
        &mut world,
        MovementState::default(),
        FrameInput {
            move_axes: Vec2::X,
            ..default()
        },
    );
    world.get_mut::<Contacts>(player).unwrap().ground = true;
    advance(&mut world, FIXED_DT);

    physics_step(&mut world);

    let state = world.get::<MovementState>(player).unwrap();
    assert!(state.grounded);
    assert!((state.velocity.x - 2.4).abs() < 1e-4, "vx={}", state.velocity.x);
    assert_eq!(state.velocity.y, PlayerConfig::default().grounding_force);

    let body = world.get::<LinearVelocity>(player).unwrap();
    assert_eq!(body.0, state.velocity);

    assert_eq!(
        drain_messages(&mut world),
        vec![PlayerMessage::GroundedChanged {
            grounded: true,
            impact_speed: 0.0
        }]
    );
}

#[test]
fn queued_jump_fires_once_with_message() {
    let mut world = world();
    let player = spawn_test_player(
        &mut world,
        MovementState::default(),
        FrameInput {
            jump_held: true,
            ..default()
        },
    );
    world.get_mut::<Contacts>(player).unwrap().ground = true;
    advance(&mut world, FIXED_DT);
    physics_step(&mut world);
    drain_messages(&mut world);

    world.get_mut::<MovementState>(player).unwrap().queue_jump();
    physics_step(&mut world);

    let state = world.get::<MovementState>(player).unwrap();
    let config = PlayerConfig::default();
    // Jump overwrites vy, then one tick of gravity is applied on top
    let expected = config.jump_power - config.fall_acceleration * 0.02;
    assert!(
        (state.velocity.y - expected).abs() < 1e-3,
        "vy={}",
        state.velocity.y
    );
    assert_eq!(drain_messages(&mut world), vec![PlayerMessage::Jumped]);

    // No new press: nothing else happens
    physics_step(&mut world);
    assert!(drain_messages(&mut world).is_empty());
}

#[test]
fn gather_input_snaps_and_queues_jump() {
    let mut world = world();
    let player = spawn_test_player(&mut world, MovementState::default(), FrameInput::default());
    world.get_mut::<MoveInput>(player).unwrap().0 = Vec2::new(-0.05, 0.5);
    world.get_mut::<JumpPressed>(player).unwrap().0 = true;
    world.get_mut::<JumpHeld>(player).unwrap().0 = true;
    advance(&mut world, Duration::from_millis(16));

    world.run_system_once(gather_input).unwrap();

    let input = world.get::<FrameInput>(player).unwrap();
    assert_eq!(input.move_axes, Vec2::new(0.0, 1.0));
    assert!(input.jump_pressed);
    assert!(input.jump_held);

    let state = world.get::<MovementState>(player).unwrap();
    assert!(state.jump_queued);
    assert!((state.time - 0.016).abs() < 1e-6);
    assert_eq!(state.time_jump_pressed, state.time);
    assert!(!world.get::<JumpPressed>(player).unwrap().0);
}

#[test]
fn dash_sets_velocity_and_expires() {
    let mut world = world();
    let player = spawn_test_player(
        &mut world,
        MovementState::default(),
        FrameInput {
            move_axes: Vec2::new(0.0, 1.0),
            ..default()
        },
    );
    world.get_mut::<DashPressed>(player).unwrap().0 = true;

    world.run_system_once(trigger_dash).unwrap();

    let config = PlayerConfig::default();
    assert!(world.get::<Dashing>(player).is_some());
    assert_eq!(
        world.get::<LinearVelocity>(player).unwrap().0,
        Vec2::new(0.0, config.dash_velocity)
    );
    assert!(!world.get::<MovementState>(player).unwrap().can_dash);
    assert_eq!(
        drain_messages(&mut world),
        vec![PlayerMessage::Dashed {
            direction: Vec2::Y
        }]
    );

    advance(&mut world, Duration::from_millis(50));
    world.run_system_once(finish_dash).unwrap();
    assert!(world.get::<Dashing>(player).is_some());

    advance(&mut world, Duration::from_millis(60));
    world.run_system_once(finish_dash).unwrap();
    assert!(world.get::<Dashing>(player).is_none());
}

#[test]
fn dash_end_stops_horizontal_motion() {
    let mut world = world();
    let player = spawn_test_player(
        &mut world,
        MovementState::default(),
        FrameInput {
            move_axes: Vec2::X,
            ..default()
        },
    );
    world.get_mut::<DashPressed>(player).unwrap().0 = true;
    world.run_system_once(trigger_dash).unwrap();

    advance(&mut world, Duration::from_millis(120));
    world.run_system_once(finish_dash).unwrap();

    assert_eq!(world.get::<LinearVelocity>(player).unwrap().x, 0.0);
    assert_eq!(world.get::<MovementState>(player).unwrap().velocity.x, 0.0);
}

#[test]
fn dashing_skips_movement_resolution() {
    let mut world = world();
    let player = spawn_test_player(
        &mut world,
        MovementState::default(),
        FrameInput {
            move_axes: Vec2::new(-1.0, 0.0),
            jump_held: true,
            ..default()
        },
    );
    world.get_mut::<DashPressed>(player).unwrap().0 = true;
    world.run_system_once(trigger_dash).unwrap();
    drain_messages(&mut world);

    let before = *world.get::<MovementState>(player).unwrap();
    let body_before = world.get::<LinearVelocity>(player).unwrap().0;

    world.get_mut::<Contacts>(player).unwrap().ground = true;
    world.get_mut::<MovementState>(player).unwrap().queue_jump();
    let queued = *world.get::<MovementState>(player).unwrap();
    advance(&mut world, FIXED_DT);
    physics_step(&mut world);

    assert_eq!(*world.get::<MovementState>(player).unwrap(), queued);
    assert_eq!(queued.velocity, before.velocity);
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, body_before);
    assert!(drain_messages(&mut world).is_empty());
}

#[test]
fn second_dash_waits_for_ground() {
    let mut world = world();
    let player = spawn_test_player(&mut world, MovementState::default(), FrameInput::default());

    world.get_mut::<DashPressed>(player).unwrap().0 = true;
    world.run_system_once(trigger_dash).unwrap();
    advance(&mut world, Duration::from_millis(150));
    world.run_system_once(finish_dash).unwrap();
    drain_messages(&mut world);

    // Airborne: no recharge, press is swallowed
    world.run_system_once(restore_dash).unwrap();
    world.get_mut::<DashPressed>(player).unwrap().0 = true;
    world.run_system_once(trigger_dash).unwrap();
    assert!(world.get::<Dashing>(player).is_none());
    assert!(drain_messages(&mut world).is_empty());

    world.get_mut::<Contacts>(player).unwrap().ground = true;
    world.run_system_once(update_grounded_state).unwrap();
    world.run_system_once(restore_dash).unwrap();
    assert!(world.get::<MovementState>(player).unwrap().can_dash);
}

#[test]
fn dash_recharge_waits_for_fresh_ground_contacts() {
    let mut world = world();
    let player = spawn_test_player(
        &mut world,
        MovementState {
            grounded: true,
            ..default()
        },
        FrameInput::default(),
    );
    world.get_mut::<DashPressed>(player).unwrap().0 = true;
    world.run_system_once(trigger_dash).unwrap();
    advance(&mut world, Duration::from_millis(120));
    world.run_system_once(finish_dash).unwrap();

    // `grounded` is still the value from before the dash
    world.run_system_once(restore_dash).unwrap();
    assert!(!world.get::<MovementState>(player).unwrap().can_dash);

    world.get_mut::<Contacts>(player).unwrap().ground = true;
    world.run_system_once(update_grounded_state).unwrap();
    world.run_system_once(restore_dash).unwrap();
    assert!(world.get::<MovementState>(player).unwrap().can_dash);
}

#[test]
fn dash_is_not_recharged_mid_dash() {
    let mut world = world();
    let player = spawn_test_player(
        &mut world,
        MovementState {
            grounded: true,
            ..default()
        },
        FrameInput::default(),
    );
    world.get_mut::<DashPressed>(player).unwrap().0 = true;
    world.run_system_once(trigger_dash).unwrap();

    world.run_system_once(restore_dash).unwrap();
    assert!(!world.get::<MovementState>(player).unwrap().can_dash);
}

#[test]
fn locked_player_is_not_resolved() {
    let mut world = world();
    let player = spawn_test_player(
        &mut world,
        MovementState {
            velocity: Vec2::new(4.0, 10.0),
            ..default()
        },
        FrameInput {
            move_axes: Vec2::X,
            ..default()
        },
    );
    world.entity_mut(player).insert(MovementLocked);
    advance(&mut world, FIXED_DT);

    physics_step(&mut world);

    let state = world.get::<MovementState>(player).unwrap();
    assert_eq!(state.velocity, Vec2::new(4.0, 10.0));
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::ZERO);
}

#[test]
fn dash_lasts_its_full_time_at_60_fps() {
    let mut world = world();
    let player = spawn_test_player(&mut world, MovementState::default(), FrameInput::default());
    world.get_mut::<MoveInput>(player).unwrap().0 = Vec2::X;
    world.get_mut::<DashPressed>(player).unwrap().0 = true;
    let mut sampling = schedule(sampling_systems());
    let frame_time = Duration::from_millis(16);

    frame(&mut world, &mut sampling, frame_time);

    let dashing = world.get::<Dashing>(player).unwrap();
    assert_eq!(dashing.timer.elapsed(), Duration::ZERO);
    let dash_velocity = PlayerConfig::default().dash_velocity;
    assert_eq!(
        world.get::<LinearVelocity>(player).unwrap().0,
        Vec2::new(dash_velocity, 0.0)
    );

    // 96 ms of dash
    for _ in 0..6 {
        frame(&mut world, &mut sampling, frame_time);
    }
    assert!(world.get::<Dashing>(player).is_some());

    frame(&mut world, &mut sampling, frame_time);
    assert!(world.get::<Dashing>(player).is_none());
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().x, 0.0);
}

#[test]
fn dash_survives_a_long_start_frame() {
    let mut world = world();
    let player = spawn_test_player(&mut world, MovementState::default(), FrameInput::default());
    world.get_mut::<MoveInput>(player).unwrap().0 = Vec2::X;
    world.get_mut::<DashPressed>(player).unwrap().0 = true;
    let mut sampling = schedule(sampling_systems());

    frame(&mut world, &mut sampling, Duration::from_millis(100));

    let dashing = world.get::<Dashing>(player).unwrap();
    assert_eq!(dashing.timer.elapsed(), Duration::ZERO);
    assert_eq!(
        world.get::<LinearVelocity>(player).unwrap().0,
        Vec2::new(PlayerConfig::default().dash_velocity, 0.0)
    );

    frame(&mut world, &mut sampling, Duration::from_millis(120));
    assert!(world.get::<Dashing>(player).is_none());
}

#[test]
fn presses_while_locked_do_not_fire_after_unlock() {
    let mut world = world();
    let player = spawn_test_player(&mut world, MovementState::default(), FrameInput::default());
    world.entity_mut(player).insert(MovementLocked);
    world.get_mut::<JumpPressed>(player).unwrap().0 = true;
    world.get_mut::<DashPressed>(player).unwrap().0 = true;
    world.get_mut::<InteractPressed>(player).unwrap().0 = true;
    let mut sampling = schedule(sampling_systems());

    frame(&mut world, &mut sampling, Duration::from_millis(16));
    world.entity_mut(player).remove::<MovementLocked>();
    frame(&mut world, &mut sampling, Duration::from_millis(16));

    let state = world.get::<MovementState>(player).unwrap();
    assert!(!state.jump_queued);
    assert!(state.can_dash);
    assert!(world.get::<Dashing>(player).is_none());
    assert!(!world.get::<InteractPressed>(player).unwrap().0);
    assert!(drain_messages(&mut world).is_empty());
}

#[test]
fn landing_resolves_before_a_queued_jump() {
    let mut world = world();
    let player = spawn_test_player(
        &mut world,
        MovementState {
            velocity: Vec2::new(0.0, -8.0),
            ..default()
        },
        FrameInput {
            jump_held: true,
            ..default()
        },
    );
    world.get_mut::<MovementState>(player).unwrap().queue_jump();
    world.get_mut::<Contacts>(player).unwrap().ground = true;
    let mut resolution = schedule(resolution_systems());

    frame(&mut world, &mut resolution, FIXED_DT);

    let config = PlayerConfig::default();
    let state = world.get::<MovementState>(player).unwrap();
    let expected = config.jump_power - config.fall_acceleration * 0.02;
    assert!((state.velocity.y - expected).abs() < 1e-3, "vy={}", state.velocity.y);
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, state.velocity);
    assert_eq!(
        drain_messages(&mut world),
        vec![
            PlayerMessage::GroundedChanged {
                grounded: true,
                impact_speed: 8.0
            },
            PlayerMessage::Jumped
        ]
    );
}
