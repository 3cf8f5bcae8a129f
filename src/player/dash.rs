use avian2d::prelude::*;
use bevy::prelude::*;

use super::input::DashPressed;
use super::messages::PlayerMessage;
use super::state::*;

/// Dash direction: the input axes, or the facing direction without input
pub fn dash_direction(input: Vec2, facing: f32) -> Vec2 {
    if input == Vec2::ZERO {
        Vec2::new(facing, 0.0).normalize_or_zero()
    } else {
        input.normalize_or_zero()
    }
}

/// Starts a dash if one is available, returning the component to insert
pub fn start_dash(
    state: &mut MovementState,
    config: &PlayerConfig,
    input: Vec2,
) -> Option<Dashing> {
    if !state.can_dash {
        return None;
    }

    let direction = dash_direction(input, state.facing);
    state.velocity = direction * config.dash_velocity;
    state.can_dash = false;
    state.ground_checked = false;

    Some(Dashing {
        direction,
        timer: Timer::from_seconds(config.dash_time, TimerMode::Once),
    })
}

/// Starts a dash on a dash press
pub fn trigger_dash(
    mut commands: Commands,
    mut query: Query<
        (
            Entity,
            &PlayerConfig,
            &FrameInput,
            &mut DashPressed,
            &mut MovementState,
            &mut LinearVelocity,
        ),
        (With<Player>, Without<Dashing>, Without<MovementLocked>),
    >,
    mut writer: MessageWriter<PlayerMessage>,
) {
    for (entity, config, input, mut pressed, mut state, mut lin_vel) in &mut query {
        if !pressed.0 {
            continue;
        }
        pressed.0 = false;

        let Some(dashing) = start_dash(&mut state, config, input.move_axes) else {
            continue;
        };

        lin_vel.0 = state.velocity;
        writer.write(PlayerMessage::Dashed {
            direction: dashing.direction,
        });
        commands.entity(entity).insert(dashing);
    }
}

/// Ticks dash timers and ends expired dashes, stopping horizontal motion
pub fn finish_dash(
    mut commands: Commands,
    mut query: Query<(Entity, &mut Dashing, &mut MovementState, &mut LinearVelocity)>,
    time: Res<Time>,
) {
    for (entity, mut dashing, mut state, mut lin_vel) in &mut query {
        if !dashing.timer.tick(time.delta()).just_finished() {
            continue;
        }

        state.velocity.x = 0.0;
        lin_vel.x = 0.0;
        commands.entity(entity).remove::<Dashing>();
    }
}

/// Recharges the dash while standing on the ground.
///
/// Waits for contacts to be resolved after the dash, otherwise a frame without a
/// fixed step would recharge from the pre-dash `grounded`.
pub fn restore_dash(mut query: Query<&mut MovementState, (With<Player>, Without<Dashing>)>) {
    for mut state in &mut query {
        if state.grounded && state.ground_checked && !state.can_dash {
            state.can_dash = true;
        }
    }
}
