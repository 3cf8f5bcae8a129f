use avian2d::prelude::*;
use bevy::prelude::*;

use super::input::MoveInput;
use super::state::*;
use crate::physics::{overlaps_box, GameLayer};

/// Climbing happens exactly when there is vertical input and a wall to hold
pub fn is_climbing(climb_input: f32, touching_wall: bool) -> bool {
    climb_input != 0.0 && touching_wall
}

/// Center of the wall-check box, mirrored to the side the player faces
pub fn wall_check_center(position: Vec2, facing: f32, config: &PlayerConfig) -> Vec2 {
    position + Vec2::new(config.wall_check_offset.x * facing, config.wall_check_offset.y)
}

/// Probes for a climbable wall beside the player.
///
/// Walls must be on `GameLayer::Climbable`.
pub fn detect_wall(
    spatial_query: SpatialQuery,
    mut query: Query<
        (Entity, &Transform, &PlayerConfig, &MovementState, &mut Contacts),
        (With<Player>, Without<MovementLocked>),
    >,
) {
    let mask = LayerMask::from(GameLayer::Climbable);

    for (entity, transform, config, state, mut contacts) in &mut query {
        let center = wall_check_center(transform.translation.truncate(), state.facing, config);
        contacts.wall = overlaps_box(&spatial_query, center, config.wall_check_size, mask, entity);
    }
}

/// Enters or leaves the climb from the raw vertical axis and the wall probe
pub fn update_climb_state(
    mut query: Query<(&MoveInput, &Contacts, &mut MovementState), Without<MovementLocked>>,
) {
    for (move_input, contacts, mut state) in &mut query {
        state.climb_input = move_input.y;
        state.climbing = is_climbing(state.climb_input, contacts.wall);
    }
}

/// Draws the wall-check box (green) when debug gizmos are enabled
pub fn draw_wall_check(
    mut gizmos: Gizmos,
    query: Query<(&Transform, &PlayerConfig, &MovementState), With<Player>>,
) {
    for (transform, config, state) in &query {
        let center = wall_check_center(transform.translation.truncate(), state.facing, config);
        gizmos.rect_2d(
            Isometry2d::from_translation(center),
            config.wall_check_size,
            Color::srgb(0.0, 1.0, 0.0),
        );
    }
}
