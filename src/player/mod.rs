mod climb;
mod dash;
pub mod input;
mod jump;
mod messages;
mod movement;
mod plugin;
mod state;

pub use climb::{detect_wall, is_climbing, update_climb_state, wall_check_center};
pub use dash::{dash_direction, finish_dash, restore_dash, start_dash, trigger_dash};
pub use input::{gather_input, snap_axis, snap_move, MoveInput};
pub use jump::{handle_jump, resolve_jump};
pub use messages::PlayerMessage;
pub use movement::{
    apply_gravity, apply_velocity, body_velocity, horizontal_movement, move_towards,
    resolve_contacts, resolve_gravity, resolve_horizontal, update_grounded_state, Resolving,
};
pub use plugin::{
    resolution_systems, sampling_systems, spawn_player, DebugGizmos, PlayerPlugin, PlayerSet,
};
pub use state::*;
