use avian2d::prelude::*;
use bevy::prelude::*;

use super::respawn::KillPlayer;
use crate::player::Player;

/// Collider that kills the player on contact (spikes, lava, ...).
///
/// Spawn it with `CollisionEventsEnabled` so Avian reports contacts.
#[derive(Component, Default)]
pub struct Hazard;

/// Turns a hazard touching a player into a `KillPlayer` request
pub fn on_hazard_contact(
    event: On<CollisionStart>,
    hazards: Query<(), With<Hazard>>,
    players: Query<(), With<Player>>,
    mut writer: MessageWriter<KillPlayer>,
) {
    let (a, b) = (event.collider1, event.collider2);

    let victim = if hazards.contains(a) && players.contains(b) {
        b
    } else if hazards.contains(b) && players.contains(a) {
        a
    } else {
        return;
    };

    debug!("Hazard contact with player {victim}");
    writer.write(KillPlayer { player: victim });
}
