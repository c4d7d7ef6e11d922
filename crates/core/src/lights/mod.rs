use glam::Vec3;

use crate::{
    animation::OscillationDriver,
    config::{LightRigConfig, SpotLightConfig},
    layout::FrameBoundingBox,
    scene::{AmbientLight, Light, LightId, Scene, SpotLight},
};

/// Places a spot light relative to the frame bounding box.
pub fn spot_position(spot: &SpotLightConfig, bbox: FrameBoundingBox) -> Vec3 {
    Vec3::new(
        bbox.width * spot.placement.x_factor,
        bbox.height * spot.placement.y_factor,
        spot.placement.z,
    )
}

/// Adds the ambient light and every configured spot light, then registers the
/// spots with a fresh oscillation driver.
pub fn add_lights(
    scene: &mut Scene,
    bbox: FrameBoundingBox,
    config: &LightRigConfig,
) -> (Vec<LightId>, OscillationDriver) {
    scene.add_light(Light::Ambient(AmbientLight {
        color: config.ambient_color,
        intensity: config.ambient_intensity,
    }));

    let mut driver = OscillationDriver::new(config.oscillation_bound, config.oscillation_policy);
    let mut spots = Vec::with_capacity(config.spots.len());

    for spot in &config.spots {
        let position = spot_position(spot, bbox);
        let id = scene.add_light(Light::Spot(SpotLight {
            color: spot.color,
            intensity: spot.intensity,
            distance: spot.distance,
            decay: spot.decay,
            angle: spot.angle_radians,
            penumbra: spot.penumbra,
            position,
            cast_shadow: true,
            shadow_map_size: (config.shadow_map_size, config.shadow_map_size),
        }));
        tracing::debug!(color = ?spot.color, ?position, speed = spot.speed, "spot light added");

        driver.register(id, spot.direction, spot.speed);
        spots.push(id);
    }

    (spots, driver)
}
