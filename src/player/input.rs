use bevy::ecs::observer::On;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::state::*;

/// Move left/right and climb up/down
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct MoveAction;

/// Jump action
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct JumpAction;

/// Dash action
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct DashAction;

/// Interact with whatever the player is facing
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct InteractAction;

/// Stores the raw movement input vector
#[derive(Component, Default, Deref, DerefMut)]
pub struct MoveInput(pub Vec2);

/// Stores whether jump was pressed since the last sample
#[derive(Component, Default)]
pub struct JumpPressed(pub bool);

/// Stores whether jump is currently held
#[derive(Component, Default, Deref, DerefMut)]
pub struct JumpHeld(pub bool);

/// Stores whether dash was pressed since the last sample
#[derive(Component, Default)]
pub struct DashPressed(pub bool);

/// Stores whether interact was pressed since the last sample
#[derive(Component, Default)]
pub struct InteractPressed(pub bool);

/// Snaps an axis to -1, 0 or 1.
///
/// Values with a magnitude below `dead_zone` become 0, everything else
/// becomes its sign.
pub fn snap_axis(value: f32, dead_zone: f32) -> f32 {
    if value.abs() < dead_zone {
        0.0
    } else {
        value.signum()
    }
}

/// Applies the configured snapping to a raw movement vector
pub fn snap_move(raw: Vec2, config: &PlayerConfig) -> Vec2 {
    if !config.snap_input {
        return raw;
    }
    Vec2::new(
        snap_axis(raw.x, config.horizontal_dead_zone),
        snap_axis(raw.y, config.vertical_dead_zone),
    )
}

/// Builds this frame's `FrameInput`, advances the controller clock and
/// queues jump presses
pub fn gather_input(
    mut query: Query<
        (
            &PlayerConfig,
            &MoveInput,
            &mut JumpPressed,
            &JumpHeld,
            &mut FrameInput,
            &mut MovementState,
        ),
        Without<MovementLocked>,
    >,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (config, move_input, mut jump_pressed, jump_held, mut frame, mut state) in &mut query {
        state.time += dt;

        *frame = FrameInput {
            jump_pressed: jump_pressed.0,
            jump_held: jump_held.0,
            move_axes: snap_move(move_input.0, config),
        };
        jump_pressed.0 = false;

        if frame.move_axes.x != 0.0 {
            state.facing = frame.move_axes.x.signum();
        }

        if frame.jump_pressed {
            state.queue_jump();
        }
    }
}

/// Drops presses made while movement is locked so they don't fire on unlock
pub fn discard_locked_input(
    mut query: Query<
        (&mut JumpPressed, &mut DashPressed, &mut InteractPressed),
        With<MovementLocked>,
    >,
) {
    for (mut jump, mut dash, mut interact) in &mut query {
        jump.0 = false;
        dash.0 = false;
        interact.0 = false;
    }
}

/// System to handle move input via observer
pub fn handle_move_input(trigger: On<Fire<MoveAction>>, mut query: Query<&mut MoveInput>) {
    if let Ok(mut move_input) = query.get_mut(trigger.event_target()) {
        move_input.0 = trigger.value;
    }
}

/// Clear move input when all movement keys are released
pub fn handle_move_end(trigger: On<Complete<MoveAction>>, mut query: Query<&mut MoveInput>) {
    if let Ok(mut move_input) = query.get_mut(trigger.event_target()) {
        move_input.0 = Vec2::ZERO;
    }
}

/// Handle jump press
pub fn handle_jump_start(
    trigger: On<Start<JumpAction>>,
    mut pressed_query: Query<&mut JumpPressed>,
    mut held_query: Query<&mut JumpHeld>,
) {
    let entity = trigger.event_target();
    if let Ok(mut jump) = pressed_query.get_mut(entity) {
        jump.0 = true;
    }
    if let Ok(mut held) = held_query.get_mut(entity) {
        held.0 = true;
    }
}

/// Handle jump release
pub fn handle_jump_end(trigger: On<Complete<JumpAction>>, mut query: Query<&mut JumpHeld>) {
    if let Ok(mut held) = query.get_mut(trigger.event_target()) {
        held.0 = false;
    }
}

/// Handle dash press
pub fn handle_dash_start(trigger: On<Start<DashAction>>, mut query: Query<&mut DashPressed>) {
    if let Ok(mut dash) = query.get_mut(trigger.event_target()) {
        dash.0 = true;
    }
}

/// Handle interact press
pub fn handle_interact_start(
    trigger: On<Start<InteractAction>>,
    mut query: Query<&mut InteractPressed>,
) {
    if let Ok(mut interact) = query.get_mut(trigger.event_target()) {
        interact.0 = true;
    }
}
