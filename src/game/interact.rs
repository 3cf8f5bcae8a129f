use avian2d::prelude::*;
use bevy::prelude::*;

use crate::physics::GameLayer;
use crate::player::input::InteractPressed;
use crate::player::{FrameInput, MovementLocked};

/// Casts the interaction ray for the player.
///
/// The ray follows the last non-zero movement direction, so releasing the
/// stick keeps pointing where the player was heading.
#[derive(Component, Debug, Clone, Copy)]
pub struct Interactor {
    /// Ray length
    pub reach: f32,
    /// Current ray direction (not necessarily normalized)
    pub direction: Vec2,
    /// First interactable-layer entity along the ray, refreshed every frame
    pub focus: Option<Entity>,
}

impl Default for Interactor {
    fn default() -> Self {
        Self {
            reach: 1.5,
            direction: Vec2::X,
            focus: None,
        }
    }
}

/// Something the player can interact with (signs, NPCs, levers).
///
/// Needs a collider on `GameLayer::Interactable`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Interactable {
    pub enabled: bool,
}

impl Default for Interactable {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Triggered on an `Interactable` when a player interacts with it
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct Interacted {
    pub entity: Entity,
    pub interactor: Entity,
}

/// Keeps the previous direction when there is no input
pub fn next_interact_direction(current: Vec2, input: Vec2) -> Vec2 {
    if input == Vec2::ZERO { current } else { input }
}

/// Follows the movement input
pub fn track_interact_direction(mut query: Query<(&FrameInput, &mut Interactor)>) {
    for (input, mut interactor) in &mut query {
        interactor.direction = next_interact_direction(interactor.direction, input.move_axes);
    }
}

/// Casts each interactor's ray against the `Interactable` layer
pub fn update_interact_focus(
    spatial_query: SpatialQuery,
    mut query: Query<(Entity, &Transform, &mut Interactor)>,
) {
    for (entity, transform, mut interactor) in &mut query {
        let Ok(direction) = Dir2::new(interactor.direction) else {
            interactor.focus = None;
            continue;
        };
        let filter = SpatialQueryFilter::default()
            .with_mask(GameLayer::Interactable)
            .with_excluded_entities([entity]);

        interactor.focus = spatial_query
            .cast_ray(
                transform.translation.truncate(),
                direction,
                interactor.reach,
                true,
                &filter,
            )
            .map(|hit| hit.entity);
    }
}

/// On an interact press, triggers `Interacted` on the focused entity if it
/// is an enabled interactable
pub fn trigger_interaction(
    mut commands: Commands,
    mut query: Query<(Entity, &Interactor, &mut InteractPressed), Without<MovementLocked>>,
    interactables: Query<&Interactable>,
) {
    for (entity, interactor, mut pressed) in &mut query {
        if !pressed.0 {
            continue;
        }
        pressed.0 = false;

        let Some(target) = interactor.focus else {
            debug!("Interaction ray hit nothing");
            continue;
        };

        debug!("Interaction ray hit {target}");

        if interactables.get(target).is_ok_and(|i| i.enabled) {
            commands.trigger(Interacted {
                entity: target,
                interactor: entity,
            });
        }
    }
}

/// Draws the interaction ray, green on hit and red on miss
pub fn draw_interact_ray(mut gizmos: Gizmos, query: Query<(&Transform, &Interactor)>) {
    for (transform, interactor) in &query {
        let color = if interactor.focus.is_some() {
            Color::srgb(0.0, 1.0, 0.0)
        } else {
            Color::srgb(1.0, 0.0, 0.0)
        };
        gizmos.ray_2d(
            transform.translation.truncate(),
            interactor.direction.normalize_or_zero() * interactor.reach,
            color,
        );
    }
}
