use avian2d::prelude::*;
use bevy::prelude::*;
use thiserror::Error;

use crate::player::{Dashing, MovementLocked, MovementState, Player};

/// Seconds between a kill and the respawn
pub const RESPAWN_DELAY: f32 = 2.0;

/// Marker for the entity whose position the player respawns at
#[derive(Component, Default)]
pub struct SpawnPoint;

/// Entities the running level depends on, resolved once when it starts
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelContext {
    pub player: Entity,
    pub spawn_point: Entity,
}

/// Failures resolving the level context
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level needs exactly one player: {0}")]
    MissingPlayer(String),

    #[error("level needs exactly one spawn point: {0}")]
    MissingSpawnPoint(String),
}

/// Request to kill a player (hazard contact, falling out of the level, ...)
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct KillPlayer {
    pub player: Entity,
}

/// A scheduled respawn; removing the component cancels it
#[derive(Component, Debug)]
#[component(storage = "SparseSet")]
pub struct RespawnPending {
    pub timer: Timer,
}

impl RespawnPending {
    pub fn new(delay: f32) -> Self {
        Self {
            timer: Timer::from_seconds(delay, TimerMode::Once),
        }
    }
}

/// Looks up the player and spawn point for the level that just started.
///
/// Missing either one is a broken level, so the error is left to Bevy's
/// error handler.
pub fn resolve_level_context(
    mut commands: Commands,
    players: Query<Entity, With<Player>>,
    spawn_points: Query<Entity, With<SpawnPoint>>,
) -> Result {
    let player = players
        .single()
        .map_err(|e| LevelError::MissingPlayer(e.to_string()))?;
    let spawn_point = spawn_points
        .single()
        .map_err(|e| LevelError::MissingSpawnPoint(e.to_string()))?;

    info!("Level context resolved: player {player}, spawn point {spawn_point}");
    commands.insert_resource(LevelContext {
        player,
        spawn_point,
    });
    Ok(())
}

/// Hides and freezes the level's player and schedules the respawn.
///
/// Kills outside a level, for entities other than the level's player, or for
/// a player already waiting to respawn are ignored.
pub fn kill_player(
    mut commands: Commands,
    mut reader: MessageReader<KillPlayer>,
    context: Option<Res<LevelContext>>,
    mut query: Query<
        (&mut MovementState, &mut LinearVelocity, &mut Visibility),
        (With<Player>, Without<RespawnPending>),
    >,
) {
    let Some(context) = context else {
        reader.clear();
        return;
    };

    for KillPlayer { player } in reader.read() {
        if *player != context.player {
            warn!("Ignoring kill for {player}, the level's player is {}", context.player);
            continue;
        }
        let Ok((mut state, mut lin_vel, mut visibility)) = query.get_mut(*player) else {
            continue;
        };
        // Same-frame duplicate, RespawnPending is not inserted yet
        if *visibility == Visibility::Hidden {
            continue;
        }

        state.velocity = Vec2::ZERO;
        lin_vel.0 = Vec2::ZERO;
        *visibility = Visibility::Hidden;

        commands
            .entity(*player)
            .remove::<Dashing>()
            .insert((
                MovementLocked,
                RigidBodyDisabled,
                ColliderDisabled,
                RespawnPending::new(RESPAWN_DELAY),
            ));

        info!("Player {player} killed, respawning in {RESPAWN_DELAY}s");
    }
}

/// Moves players whose respawn timer ran out back to the spawn point
pub fn respawn_player(
    mut commands: Commands,
    context: Option<Res<LevelContext>>,
    spawn_points: Query<&Transform, (With<SpawnPoint>, Without<Player>)>,
    mut query: Query<
        (
            Entity,
            &mut RespawnPending,
            &mut Transform,
            &mut MovementState,
            &mut LinearVelocity,
            &mut Visibility,
        ),
        With<Player>,
    >,
    time: Res<Time>,
) {
    let Some(context) = context else {
        return;
    };
    let Ok(spawn) = spawn_points.get(context.spawn_point) else {
        warn!("Spawn point {} is gone, respawn postponed", context.spawn_point);
        return;
    };

    for (entity, mut pending, mut transform, mut state, mut lin_vel, mut visibility) in &mut query {
        if !pending.timer.tick(time.delta()).just_finished() {
            continue;
        }

        let z = transform.translation.z;
        transform.translation = spawn.translation.truncate().extend(z);
        *state = MovementState::default();
        lin_vel.0 = Vec2::ZERO;
        *visibility = Visibility::Inherited;

        commands.entity(entity).remove::<(
            RespawnPending,
            MovementLocked,
            RigidBodyDisabled,
            ColliderDisabled,
        )>();

        info!("Player {entity} respawned at {}", transform.translation.truncate());
    }
}

/// Drops pending respawns and the level context when the level ends
pub fn cancel_pending_respawns(
    mut commands: Commands,
    query: Query<Entity, With<RespawnPending>>,
) {
    for entity in &query {
        commands.entity(entity).try_remove::<RespawnPending>();
        debug!("Cancelled pending respawn for {entity}");
    }
    commands.remove_resource::<LevelContext>();
}
