mod ground;
mod layers;
mod plugin;

pub use ground::*;
pub use layers::GameLayer;
pub use plugin::{PhysicsPlugin, FIXED_HZ};
