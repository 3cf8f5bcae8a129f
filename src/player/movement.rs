use avian2d::prelude::*;
use bevy::prelude::*;

use super::messages::PlayerMessage;
use super::state::*;
use crate::physics::{hits_ceiling, is_on_ground, GameLayer};

/// Players whose movement is resolved this physics step
pub type Resolving = (With<Player>, Without<Dashing>, Without<MovementLocked>);

/// Moves `current` toward `target` by at most `max_delta`
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Applies ceiling bumps and grounded transitions.
///
/// Returns the `GroundedChanged` message when the grounded state flips.
pub fn resolve_contacts(state: &mut MovementState, contacts: &Contacts) -> Option<PlayerMessage> {
    state.ground_checked = true;

    if contacts.ceiling {
        state.velocity.y = state.velocity.y.min(0.0);
    }

    if !state.grounded && contacts.ground {
        state.grounded = true;
        state.coyote_usable = true;
        state.buffered_jump_usable = true;
        state.jump_ended_early = false;
        Some(PlayerMessage::GroundedChanged {
            grounded: true,
            impact_speed: state.velocity.y.abs(),
        })
    } else if state.grounded && !contacts.ground {
        state.grounded = false;
        state.time_left_ground = state.time;
        Some(PlayerMessage::GroundedChanged {
            grounded: false,
            impact_speed: 0.0,
        })
    } else {
        None
    }
}

/// Rate-limited approach of the horizontal velocity toward the input target
pub fn resolve_horizontal(
    velocity_x: f32,
    input_x: f32,
    grounded: bool,
    config: &PlayerConfig,
    dt: f32,
) -> f32 {
    if input_x == 0.0 {
        let deceleration = if grounded {
            config.ground_deceleration
        } else {
            config.air_deceleration
        };
        move_towards(velocity_x, 0.0, deceleration * dt)
    } else {
        move_towards(velocity_x, input_x * config.max_speed, config.acceleration * dt)
    }
}

/// Climbing cancels gravity, grounded bodies get pinned with the grounding
/// force, everything else falls toward terminal velocity.
pub fn resolve_gravity(state: &mut MovementState, config: &PlayerConfig, dt: f32) {
    if state.climbing {
        state.velocity.y = 0.0;
        return;
    }

    if state.grounded && state.velocity.y <= 0.0 {
        state.velocity.y = config.grounding_force;
        return;
    }

    let mut in_air_gravity = config.fall_acceleration;
    if state.jump_ended_early && state.velocity.y > 0.0 {
        in_air_gravity *= config.jump_end_early_gravity_modifier;
    }
    state.velocity.y = move_towards(state.velocity.y, -config.max_fall_speed, in_air_gravity * dt);
}

/// Velocity to hand to the physics body.
///
/// While climbing the body keeps its horizontal velocity and moves vertically
/// at the climb speed instead of the resolved velocity.
pub fn body_velocity(state: &MovementState, config: &PlayerConfig, current: Vec2) -> Vec2 {
    if state.climbing {
        Vec2::new(current.x, state.climb_input * config.climb_speed)
    } else {
        state.velocity
    }
}

/// Casts the player's collider a short distance down and up
pub fn probe_contacts(
    spatial_query: SpatialQuery,
    mut query: Query<(Entity, &Transform, &Collider, &PlayerConfig, &mut Contacts), Resolving>,
) {
    let mask = LayerMask::from(GameLayer::World);

    for (entity, transform, collider, config, mut contacts) in &mut query {
        let position = transform.translation.truncate();
        contacts.ground = is_on_ground(
            &spatial_query,
            collider,
            position,
            config.grounder_distance,
            mask,
            entity,
        );
        contacts.ceiling = hits_ceiling(
            &spatial_query,
            collider,
            position,
            config.grounder_distance,
            mask,
            entity,
        );
    }
}

/// Updates grounded state from the latest probe
pub fn update_grounded_state(
    mut query: Query<(&Contacts, &mut MovementState), Resolving>,
    mut writer: MessageWriter<PlayerMessage>,
) {
    for (contacts, mut state) in &mut query {
        if let Some(message) = resolve_contacts(&mut state, contacts) {
            writer.write(message);
        }
    }
}

/// Accelerates toward the input direction, decelerates without input
pub fn horizontal_movement(
    mut query: Query<(&FrameInput, &PlayerConfig, &mut MovementState), Resolving>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (input, config, mut state) in &mut query {
        state.velocity.x =
            resolve_horizontal(state.velocity.x, input.move_axes.x, state.grounded, config, dt);
    }
}

/// Applies gravity, grounding force or climb suspension
pub fn apply_gravity(
    mut query: Query<(&PlayerConfig, &mut MovementState), Resolving>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (config, mut state) in &mut query {
        resolve_gravity(&mut state, config, dt);
    }
}

/// Syncs the resolved velocity to Avian's LinearVelocity
pub fn apply_velocity(
    mut query: Query<(&MovementState, &PlayerConfig, &mut LinearVelocity), Resolving>,
) {
    for (state, config, mut lin_vel) in &mut query {
        lin_vel.0 = body_velocity(state, config, lin_vel.0);
    }
}
