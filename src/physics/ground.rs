use avian2d::prelude::*;
use bevy::prelude::*;

/// Sweeps `shape` from `position` along `direction` for `distance` units.
///
/// Overlaps at the start position are ignored so a body resting against a
/// surface only reports hits in the swept direction.
pub fn cast_body(
    spatial_query: &SpatialQuery,
    shape: &Collider,
    position: Vec2,
    direction: Dir2,
    distance: f32,
    mask: LayerMask,
    exclude: Entity,
) -> Option<ShapeHitData> {
    let filter = SpatialQueryFilter::default()
        .with_mask(mask)
        .with_excluded_entities([exclude]);

    let config = ShapeCastConfig {
        max_distance: distance,
        ignore_origin_penetration: true,
        ..default()
    };

    spatial_query.cast_shape(shape, position, 0.0, direction, &config, &filter)
}

/// Checks whether there is ground within `distance` below the body
pub fn is_on_ground(
    spatial_query: &SpatialQuery,
    shape: &Collider,
    position: Vec2,
    distance: f32,
    mask: LayerMask,
    exclude: Entity,
) -> bool {
    cast_body(spatial_query, shape, position, Dir2::NEG_Y, distance, mask, exclude).is_some()
}

/// Checks whether there is a ceiling within `distance` above the body
pub fn hits_ceiling(
    spatial_query: &SpatialQuery,
    shape: &Collider,
    position: Vec2,
    distance: f32,
    mask: LayerMask,
    exclude: Entity,
) -> bool {
    cast_body(spatial_query, shape, position, Dir2::Y, distance, mask, exclude).is_some()
}

/// Box overlap used for wall-climb detection
pub fn overlaps_box(
    spatial_query: &SpatialQuery,
    center: Vec2,
    size: Vec2,
    mask: LayerMask,
    exclude: Entity,
) -> bool {
    let shape = Collider::rectangle(size.x, size.y);
    let filter = SpatialQueryFilter::default()
        .with_mask(mask)
        .with_excluded_entities([exclude]);

    !spatial_query
        .shape_intersections(&shape, center, 0.0, &filter)
        .is_empty()
}
