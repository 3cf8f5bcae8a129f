use avian2d::prelude::*;
use bevy::ecs::schedule::ScheduleConfigs;
use bevy::ecs::system::ScheduleSystem;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::climb::*;
use super::dash::*;
use super::input::*;
use super::jump::*;
use super::messages::PlayerMessage;
use super::movement::*;
use super::state::*;
use crate::game::Interactor;
use crate::physics::GameLayer;

/// Ordering labels for the two halves of the controller tick
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSet {
    /// Per-frame input sampling, wall probe, dash start/stop (`Update`)
    Sample,
    /// Fixed-step movement resolution (`FixedUpdate`)
    Resolve,
}

/// Draw debug gizmos for probes and rays
#[derive(Resource, Default, Clone, Copy, PartialEq, Eq)]
pub struct DebugGizmos(pub bool);

/// Plugin for the 2D platformer player controller
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EnhancedInputPlugin);

        // Register input context for player
        app.add_input_context::<Player>();

        app.add_message::<PlayerMessage>();
        app.init_resource::<DebugGizmos>();

        // Input observers
        app.add_observer(handle_move_input);
        app.add_observer(handle_move_end);
        app.add_observer(handle_jump_start);
        app.add_observer(handle_jump_end);
        app.add_observer(handle_dash_start);
        app.add_observer(handle_interact_start);

        // Sampling phase, once per frame
        app.add_systems(
            Update,
            (detect_wall, update_climb_state, sampling_systems())
                .chain()
                .in_set(PlayerSet::Sample),
        );

        app.add_systems(
            Update,
            draw_wall_check
                .after(PlayerSet::Sample)
                .run_if(resource_equals(DebugGizmos(true))),
        );

        // Physics phase, once per fixed step
        app.add_systems(
            FixedUpdate,
            (probe_contacts, resolution_systems())
                .chain()
                .in_set(PlayerSet::Resolve),
        );
    }
}

/// Input and dash half of the sampling phase, after the wall probe.
///
/// Running `finish_dash` ahead of `trigger_dash` means a new dash timer is
/// first ticked on the frame after the press.
pub fn sampling_systems() -> ScheduleConfigs<ScheduleSystem> {
    (
        discard_locked_input,
        gather_input,
        finish_dash,
        restore_dash,
        trigger_dash,
    )
        .chain()
}

/// Movement resolution after the contact probe
pub fn resolution_systems() -> ScheduleConfigs<ScheduleSystem> {
    (
        update_grounded_state,
        handle_jump,
        horizontal_movement,
        apply_gravity,
        apply_velocity,
    )
        .chain()
}

/// Spawns the player entity with all required components
pub fn spawn_player(commands: &mut Commands, config: PlayerConfig, position: Vec2) -> Entity {
    commands
        .spawn((
            Player,
            Name::new("Player"),
            config,
            MovementState::default(),
            FrameInput::default(),
            Contacts::default(),
            Interactor::default(),
        ))
        .insert((
            // Input state
            MoveInput::default(),
            JumpPressed::default(),
            JumpHeld::default(),
            DashPressed::default(),
            InteractPressed::default(),
        ))
        .insert((
            // Physics - Dynamic body with locked rotation, let Avian handle collisions
            RigidBody::Dynamic,
            Collider::capsule(config.radius, config.capsule_length),
            CollisionLayers::new(GameLayer::Player, [GameLayer::World, GameLayer::Hazard]),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            TranslationInterpolation,
            Friction::new(0.0),    // No friction - we handle movement ourselves
            Restitution::new(0.0), // No bounce
            GravityScale(0.0),     // We handle gravity ourselves for more control
        ))
        .insert((
            Sprite::from_color(
                Color::srgb(0.95, 0.75, 0.3),
                Vec2::new(config.radius * 2.0, config.capsule_length + config.radius * 2.0),
            ),
            Transform::from_translation(position.extend(1.0)),
            Visibility::default(),
        ))
        .insert(
            // Input bindings
            actions!(Player[
                (
                    Action::<MoveAction>::new(),
                    bindings![
                        KeyCode::KeyD,
                        (KeyCode::KeyA, Negate::all()),
                        (KeyCode::KeyW, SwizzleAxis::YXZ),
                        (KeyCode::KeyS, SwizzleAxis::YXZ, Negate::all()),
                        KeyCode::ArrowRight,
                        (KeyCode::ArrowLeft, Negate::all()),
                        (KeyCode::ArrowUp, SwizzleAxis::YXZ),
                        (KeyCode::ArrowDown, SwizzleAxis::YXZ, Negate::all()),
                        GamepadAxis::LeftStickX,
                        (GamepadAxis::LeftStickY, SwizzleAxis::YXZ),
                    ],
                ),
                (
                    Action::<JumpAction>::new(),
                    bindings![KeyCode::Space, KeyCode::Period, GamepadButton::South],
                ),
                (
                    Action::<DashAction>::new(),
                    bindings![KeyCode::ShiftLeft, GamepadButton::West],
                ),
                (
                    Action::<InteractAction>::new(),
                    bindings![KeyCode::Enter, GamepadButton::North],
                ),
            ]),
        )
        .id()
}
