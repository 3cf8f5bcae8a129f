pub mod config;
pub mod game;
pub mod physics;
pub mod player;

pub use game::GamePlugin;
pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;

use bevy::prelude::*;

/// Unified plugin that adds physics, the player controller, and game flow.
pub struct SkyboundPlugin;

impl Plugin for SkyboundPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PhysicsPlugin>() {
            app.add_plugins(PhysicsPlugin);
        }
        if !app.is_plugin_added::<PlayerPlugin>() {
            app.add_plugins(PlayerPlugin);
        }
        if !app.is_plugin_added::<GamePlugin>() {
            app.add_plugins(GamePlugin);
        }
    }
}

pub mod prelude {
    pub use crate::config::{load_player_config, ConfigError};
    pub use crate::game::{
        GamePlugin, GameScene, Hazard, Interactable, Interacted, KillPlayer, LevelContext,
        LevelSet, SceneRequest, SpawnPoint,
    };
    pub use crate::physics::{GameLayer, PhysicsPlugin};
    pub use crate::player::{
        spawn_player, Contacts, DebugGizmos, Dashing, FrameInput, MovementLocked, MovementState,
        Player, PlayerConfig, PlayerMessage, PlayerPlugin, PlayerSet,
    };
    pub use crate::SkyboundPlugin;
}
