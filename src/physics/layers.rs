use avian2d::prelude::*;

/// Collision layers for the physics simulation
#[derive(PhysicsLayer, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Player character
    Player,
    /// Static level geometry the player stands on and bumps into
    World,
    /// Walls the player can climb (usually also `World`)
    Climbable,
    /// Spikes and other colliders that kill the player on contact
    Hazard,
    /// Objects that respond to the interaction ray
    Interactable,
}
