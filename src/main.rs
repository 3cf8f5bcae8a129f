use std::path::Path;

use avian2d::prelude::*;
use bevy::prelude::*;
use skybound::prelude::*;

const TUNING_PATH: &str = "assets/player.toml";

/// Below this height the player has fallen out of the level
const KILL_PLANE_Y: f32 = -25.0;

/// Movement tuning used when the level spawns the player
#[derive(Resource, Deref)]
struct Tuning(PlayerConfig);

/// Text shown when interacting with a sign
#[derive(Component)]
struct Sign(&'static str);

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Skybound".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(SkyboundPlugin)
        .add_systems(Startup, (load_tuning, spawn_camera))
        .add_systems(OnEnter(GameScene::MainMenu), spawn_menu)
        .add_systems(OnEnter(GameScene::Level), spawn_level.in_set(LevelSet::Spawn))
        .add_systems(
            Update,
            (
                menu_input.run_if(in_state(GameScene::MainMenu)),
                (level_input, kill_fallen_players).run_if(in_state(GameScene::Level)),
                log_player_messages,
            ),
        )
        .add_observer(read_sign)
        .run();
}

fn load_tuning(mut commands: Commands) {
    let config = match load_player_config(Path::new(TUNING_PATH)) {
        Ok(config) => {
            info!("Loaded movement tuning from {TUNING_PATH}");
            config
        }
        Err(e) => {
            warn!("Using default movement tuning: {e}");
            PlayerConfig::default()
        }
    };
    commands.insert_resource(Tuning(config));
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / 32.0,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(8.0, 4.0, 0.0),
    ));
}

// ── Main menu ───────────────────────────────────────────────────────

fn spawn_menu(mut commands: Commands) {
    commands.spawn((
        DespawnOnExit(GameScene::MainMenu),
        Text::new("SKYBOUND\n\nEnter - play\nEsc - quit"),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(40.0),
            left: Val::Px(40.0),
            ..default()
        },
    ));
}

fn menu_input(keys: Res<ButtonInput<KeyCode>>, mut requests: MessageWriter<SceneRequest>) {
    if keys.just_pressed(KeyCode::Enter) {
        requests.write(SceneRequest::Level);
    } else if keys.just_pressed(KeyCode::Escape) {
        requests.write(SceneRequest::Quit);
    }
}

// ── Test level ──────────────────────────────────────────────────────

fn level_scoped() -> DespawnOnExit<GameScene> {
    DespawnOnExit(GameScene::Level)
}

fn spawn_level(mut commands: Commands, tuning: Res<Tuning>) {
    let spawn = Vec2::new(0.0, 2.0);

    commands.spawn((
        level_scoped(),
        SpawnPoint,
        Transform::from_translation(spawn.extend(0.0)),
    ));

    let player = spawn_player(&mut commands, **tuning, spawn);
    commands.entity(player).insert(level_scoped());

    // Floor and a floating ledge
    for (center, size) in [
        (Vec2::new(4.0, -0.5), Vec2::new(24.0, 1.0)),
        (Vec2::new(10.0, 4.0), Vec2::new(4.0, 0.5)),
    ] {
        commands.spawn((
            level_scoped(),
            Name::new("Platform"),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(GameLayer::World, [GameLayer::Player]),
            Sprite::from_color(Color::srgb(0.3, 0.35, 0.4), size),
            Transform::from_translation(center.extend(0.0)),
        ));
    }

    // Climbable wall
    let wall = Vec2::new(1.0, 8.0);
    commands.spawn((
        level_scoped(),
        Name::new("Wall"),
        RigidBody::Static,
        Collider::rectangle(wall.x, wall.y),
        CollisionLayers::new([GameLayer::World, GameLayer::Climbable], [GameLayer::Player]),
        Sprite::from_color(Color::srgb(0.4, 0.3, 0.25), wall),
        Transform::from_xyz(15.5, 4.0, 0.0),
    ));

    // Spikes
    let spikes = Vec2::new(2.0, 0.4);
    commands.spawn((
        level_scoped(),
        Name::new("Spikes"),
        Hazard,
        RigidBody::Static,
        Collider::rectangle(spikes.x, spikes.y),
        CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player]),
        CollisionEventsEnabled,
        Sprite::from_color(Color::srgb(0.8, 0.15, 0.15), spikes),
        Transform::from_xyz(6.0, 0.2, 0.0),
    ));

    // Sign
    commands.spawn((
        level_scoped(),
        Name::new("Sign"),
        Sign("Climb the wall: hold up while touching it."),
        Interactable::default(),
        Collider::rectangle(0.6, 0.8),
        Sensor,
        CollisionLayers::new(GameLayer::Interactable, LayerMask::NONE),
        Sprite::from_color(Color::srgb(0.6, 0.5, 0.2), Vec2::new(0.6, 0.8)),
        Transform::from_xyz(2.0, 0.4, 0.0),
    ));
}

fn level_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut gizmos: ResMut<DebugGizmos>,
    mut requests: MessageWriter<SceneRequest>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        requests.write(SceneRequest::MainMenu);
    }
    if keys.just_pressed(KeyCode::F1) {
        gizmos.0 = !gizmos.0;
    }
}

fn kill_fallen_players(
    query: Query<(Entity, &Transform), (With<Player>, Without<MovementLocked>)>,
    mut kills: MessageWriter<KillPlayer>,
) {
    for (player, transform) in &query {
        if transform.translation.y < KILL_PLANE_Y {
            kills.write(KillPlayer { player });
        }
    }
}

fn read_sign(event: On<Interacted>, signs: Query<&Sign>) {
    if let Ok(sign) = signs.get(event.entity) {
        info!("Sign: {}", sign.0);
    }
}

fn log_player_messages(mut reader: MessageReader<PlayerMessage>) {
    for message in reader.read() {
        debug!("{message:?}");
    }
}
