use avian2d::prelude::*;
use bevy::prelude::*;

/// Fixed simulation rate in Hz (0.02 s steps)
pub const FIXED_HZ: f64 = 50.0;

/// Plugin that sets up the Avian2D physics engine
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            PhysicsPlugins::default()
                .with_length_unit(1.0), // 1 unit = 1 tile
        );

        app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ));

        // The player integrates its own gravity; this only affects loose props
        app.insert_resource(Gravity(Vec2::NEG_Y * 30.0));
    }
}
