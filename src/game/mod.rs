mod hazard;
mod interact;
mod plugin;
mod respawn;
mod scene;

pub use hazard::{on_hazard_contact, Hazard};
pub use interact::{
    next_interact_direction, track_interact_direction, trigger_interaction, update_interact_focus,
    Interactable, Interacted, Interactor,
};
pub use plugin::{GamePlugin, LevelSet};
pub use respawn::*;
pub use scene::{handle_scene_requests, GameScene, SceneRequest};
