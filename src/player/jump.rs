use bevy::prelude::*;

use super::messages::PlayerMessage;
use super::movement::Resolving;
use super::state::*;

/// Resolves the jump for one physics step.
///
/// A jump executes when a press is queued (or a buffered press is still
/// fresh) and the player is grounded or inside the coyote window. Returns
/// `true` if the jump executed.
pub fn resolve_jump(state: &mut MovementState, config: &PlayerConfig, jump_held: bool) -> bool {
    if !state.jump_ended_early && !state.grounded && !jump_held && state.velocity.y > 0.0 {
        state.jump_ended_early = true;
    }

    if !state.jump_queued && !state.has_buffered_jump(config) {
        return false;
    }

    let jumped = state.grounded || state.can_use_coyote(config);
    if jumped {
        execute_jump(state, config);
    }

    state.jump_queued = false;
    jumped
}

fn execute_jump(state: &mut MovementState, config: &PlayerConfig) {
    state.jump_ended_early = false;
    state.time_jump_pressed = f32::NEG_INFINITY;
    state.buffered_jump_usable = false;
    state.coyote_usable = false;
    state.velocity.y = config.jump_power;
}

/// Handles jump input with coyote time and jump buffering
pub fn handle_jump(
    mut query: Query<(&PlayerConfig, &FrameInput, &mut MovementState), Resolving>,
    mut writer: MessageWriter<PlayerMessage>,
) {
    for (config, input, mut state) in &mut query {
        if resolve_jump(&mut state, config, input.jump_held) {
            writer.write(PlayerMessage::Jumped);
        }
    }
}
