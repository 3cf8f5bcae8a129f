use bevy::prelude::*;
use serde::Deserialize;

/// Marker component for the player entity (also used as input context)
#[derive(Component, Default)]
pub struct Player;

/// Player movement tuning.
///
/// Every field has a default, so a tuning file only needs to list the values
/// it overrides. See [`crate::config`] for loading and validation.
#[derive(Component, Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Snap each input axis to -1, 0 or 1 so gamepads and keyboards behave alike
    pub snap_input: bool,
    /// Minimum vertical input before it counts in `FrameInput`. Climbing reads
    /// the raw axis and ignores it.
    pub vertical_dead_zone: f32,
    /// Minimum horizontal input before it counts (avoids stick drift)
    pub horizontal_dead_zone: f32,
    /// Top horizontal speed
    pub max_speed: f32,
    /// Rate at which horizontal speed is gained
    pub acceleration: f32,
    /// Rate at which the player stops on the ground
    pub ground_deceleration: f32,
    /// Rate at which the player stops in the air once input is released
    pub air_deceleration: f32,
    /// Constant downward velocity while grounded, keeps the body glued to slopes
    pub grounding_force: f32,
    /// Cast distance for ground and ceiling detection
    pub grounder_distance: f32,
    /// Vertical velocity set when a jump executes
    pub jump_power: f32,
    /// Terminal fall speed
    pub max_fall_speed: f32,
    /// In-air gravity
    pub fall_acceleration: f32,
    /// Gravity multiplier while rising after the jump was released early
    pub jump_end_early_gravity_modifier: f32,
    /// Grace period after leaving a ledge during which a jump still works
    pub coyote_time: f32,
    /// How long a jump press is remembered before landing
    pub jump_buffer: f32,
    /// Vertical speed while climbing a wall
    pub climb_speed: f32,
    /// Offset of the wall-check box from the body center, x mirrored by facing
    pub wall_check_offset: Vec2,
    /// Size of the wall-check box
    pub wall_check_size: Vec2,
    /// Dash duration in seconds
    pub dash_time: f32,
    /// Dash speed
    pub dash_velocity: f32,
    /// Capsule collider radius
    pub radius: f32,
    /// Capsule collider segment length (total height minus both caps)
    pub capsule_length: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            snap_input: true,
            vertical_dead_zone: 0.3,
            horizontal_dead_zone: 0.1,
            max_speed: 14.0,
            acceleration: 120.0,
            ground_deceleration: 60.0,
            air_deceleration: 30.0,
            grounding_force: -1.5,
            grounder_distance: 0.25,
            jump_power: 36.0,
            max_fall_speed: 40.0,
            fall_acceleration: 110.0,
            jump_end_early_gravity_modifier: 3.0,
            coyote_time: 0.15,
            jump_buffer: 0.2,
            climb_speed: 3.0,
            wall_check_offset: Vec2::new(0.45, 0.0),
            wall_check_size: Vec2::new(0.2, 1.2),
            dash_time: 0.1,
            dash_velocity: 15.0,
            radius: 0.4,
            capsule_length: 1.0,
        }
    }
}

/// Input sampled for the current frame
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Jump went down this frame
    pub jump_pressed: bool,
    /// Jump is held
    pub jump_held: bool,
    /// Movement axes, snapped when `PlayerConfig::snap_input` is set
    pub move_axes: Vec2,
}

/// Movement state machine for one player
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MovementState {
    /// Velocity the controller wants the body to have
    pub velocity: Vec2,
    pub grounded: bool,
    /// Contacts were resolved since the last dash started. Resolution is
    /// skipped while dashing, so `grounded` is stale until this is set.
    pub ground_checked: bool,
    pub climbing: bool,
    pub can_dash: bool,
    /// 1.0 facing right, -1.0 facing left
    pub facing: f32,
    /// Raw vertical axis, drives climb speed
    pub climb_input: f32,
    /// Seconds since the controller started
    pub time: f32,
    pub time_left_ground: f32,
    pub time_jump_pressed: f32,
    /// A jump press waiting to be consumed by the next physics step
    pub jump_queued: bool,
    /// Jump released while still rising
    pub jump_ended_early: bool,
    pub coyote_usable: bool,
    pub buffered_jump_usable: bool,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            grounded: false,
            ground_checked: true,
            climbing: false,
            can_dash: true,
            facing: 1.0,
            climb_input: 0.0,
            time: 0.0,
            time_left_ground: f32::NEG_INFINITY,
            time_jump_pressed: f32::NEG_INFINITY,
            jump_queued: false,
            jump_ended_early: false,
            coyote_usable: false,
            buffered_jump_usable: false,
        }
    }
}

impl MovementState {
    /// Records a jump press at the current time
    pub fn queue_jump(&mut self) {
        self.jump_queued = true;
        self.time_jump_pressed = self.time;
    }

    /// A press made shortly before landing is still usable
    pub fn has_buffered_jump(&self, config: &PlayerConfig) -> bool {
        self.buffered_jump_usable && self.time < self.time_jump_pressed + config.jump_buffer
    }

    /// Airborne, but left the ground recently enough to still jump
    pub fn can_use_coyote(&self, config: &PlayerConfig) -> bool {
        self.coyote_usable && !self.grounded && self.time < self.time_left_ground + config.coyote_time
    }
}

/// Latest collision probe results
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Contacts {
    pub ground: bool,
    pub ceiling: bool,
    pub wall: bool,
}

/// Player is dashing; removing this component ends (or cancels) the dash
#[derive(Component, Debug)]
#[component(storage = "SparseSet")]
pub struct Dashing {
    pub direction: Vec2,
    pub timer: Timer,
}

/// Marker: movement resolution is suspended (dialogue, pause, death)
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct MovementLocked;
