use bevy::prelude::*;

/// Notifications emitted by the movement state machine.
///
/// Consumers subscribe with `MessageReader<PlayerMessage>` to drive
/// animation, sound effects, particles, or other feedback.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum PlayerMessage {
    /// Touched down (`grounded: true`, with the vertical impact speed) or
    /// left the ground (`grounded: false`, `impact_speed` is 0)
    GroundedChanged { grounded: bool, impact_speed: f32 },
    Jumped,
    Dashed { direction: Vec2 },
}
