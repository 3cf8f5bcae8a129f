use bevy::prelude::*;

/// Top-level scenes of the game
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameScene {
    #[default]
    MainMenu,
    Level,
}

/// Ask the game to switch scene or quit
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneRequest {
    MainMenu,
    Level,
    Quit,
}

/// Applies scene requests; the last one written this frame wins
pub fn handle_scene_requests(
    mut reader: MessageReader<SceneRequest>,
    mut next_scene: ResMut<NextState<GameScene>>,
    mut exit: MessageWriter<AppExit>,
) {
    for request in reader.read() {
        info!("Scene request: {request:?}");
        match request {
            SceneRequest::MainMenu => next_scene.set(GameScene::MainMenu),
            SceneRequest::Level => next_scene.set(GameScene::Level),
            SceneRequest::Quit => {
                exit.write(AppExit::Success);
            }
        }
    }
}
