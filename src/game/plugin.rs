use bevy::prelude::*;

use super::hazard::*;
use super::interact::*;
use super::respawn::*;
use super::scene::*;
use crate::player::{DebugGizmos, PlayerSet};

/// Ordering of level startup work in `OnEnter(GameScene::Level)`
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelSet {
    /// Spawn the level's entities (player, spawn point, geometry)
    Spawn,
    /// Resolve the `LevelContext` from what was spawned
    Resolve,
}

/// Plugin for game flow around the player: scenes, hazards, respawning and
/// interaction
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameScene>();

        app.add_message::<KillPlayer>();
        app.add_message::<SceneRequest>();
        app.init_resource::<DebugGizmos>();

        app.configure_sets(
            OnEnter(GameScene::Level),
            (LevelSet::Spawn, LevelSet::Resolve).chain(),
        );
        app.add_systems(
            OnEnter(GameScene::Level),
            resolve_level_context.in_set(LevelSet::Resolve),
        );
        app.add_systems(OnExit(GameScene::Level), cancel_pending_respawns);

        app.add_observer(on_hazard_contact);

        app.add_systems(Update, handle_scene_requests);
        app.add_systems(
            Update,
            (kill_player, respawn_player)
                .chain()
                .run_if(in_state(GameScene::Level)),
        );
        app.add_systems(
            Update,
            (
                track_interact_direction,
                update_interact_focus,
                trigger_interaction,
            )
                .chain()
                .after(PlayerSet::Sample),
        );
        app.add_systems(
            Update,
            draw_interact_ray
                .after(PlayerSet::Sample)
                .run_if(resource_equals(DebugGizmos(true))),
        );
    }
}
