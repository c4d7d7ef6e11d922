use std::{f32::consts::PI, fs, path::Path};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    animation::{Direction, OscillationPolicy},
    render::ShadowMapType,
    scene::Color,
    FrameSceneError, Result,
};

/// Top-level configuration structure for the application.
///
/// Every section defaults to the constants of the reference scene, so an empty
/// JSON object is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub frame: FrameConfig,
    pub wall: WallConfig,
    pub lights: LightRigConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub renderer: RendererSettings,
}

impl AppConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(FrameSceneError::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(FrameSceneError::serialize("configuration"))
    }

    /// Rejects values that would stall the animation or break the camera and
    /// control limits.
    pub fn validate(&self) -> Result<()> {
        let bound = self.lights.oscillation_bound;
        if !(bound.is_finite() && bound > 0.0) {
            return Err(invalid(format!(
                "lights.oscillation_bound must be positive and finite, got {bound}"
            )));
        }

        for (i, spot) in self.lights.spots.iter().enumerate() {
            if !(spot.speed.is_finite() && spot.speed > 0.0) {
                return Err(invalid(format!(
                    "lights.spots[{i}].speed must be positive and finite, got {}",
                    spot.speed
                )));
            }
        }

        let controls = &self.controls;
        let azimuth = (controls.min_azimuth_degrees, controls.max_azimuth_degrees);
        if !(azimuth.0.is_finite() && azimuth.1.is_finite()) || azimuth.0 > azimuth.1 {
            return Err(invalid(format!(
                "controls azimuth range [{}, {}] is empty or not finite",
                azimuth.0, azimuth.1
            )));
        }

        let polar = (controls.min_polar_degrees, controls.max_polar_degrees);
        if !(0.0..=180.0).contains(&polar.0) || !(0.0..=180.0).contains(&polar.1) || polar.0 > polar.1
        {
            return Err(invalid(format!(
                "controls polar range [{}, {}] must be ordered and within [0, 180]",
                polar.0, polar.1
            )));
        }

        let camera = &self.camera;
        if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
            return Err(invalid(format!(
                "camera.fov_y_degrees must be within (0, 180), got {}",
                camera.fov_y_degrees
            )));
        }
        if !(camera.near > 0.0 && camera.far > camera.near && camera.far.is_finite()) {
            return Err(invalid(format!(
                "camera clip planes need 0 < near < far, got near {} far {}",
                camera.near, camera.far
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> FrameSceneError {
    FrameSceneError::InvalidConfig(message)
}

/// Picture frame geometry and colours.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Thickness of the white board along z.
    pub frame_depth: f32,
    /// Width of each border strip along x (or y).
    pub border_width: f32,
    /// Borders are thicker than the board so they cast shadows onto it.
    pub border_depth_factor: f32,
    pub border_color: Color,
    pub board_color: Color,
    /// Fraction of the board covered by the picture.
    pub picture_scale: f32,
    /// Negative values pull the picture towards the camera.
    pub picture_polygon_offset_units: f32,
}

impl FrameConfig {
    pub fn border_depth(&self) -> f32 {
        self.frame_depth * self.border_depth_factor
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_depth: 0.01,
            border_width: 0.05,
            border_depth_factor: 4.0,
            border_color: Color(0x222222),
            board_color: Color(0xffffff),
            picture_scale: 0.8,
            picture_polygon_offset_units: -10.0,
        }
    }
}

/// Wall plane and the box that wraps the scene as a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    pub size: f32,
    pub color: Color,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            size: 100.0,
            color: Color(0xaa6666),
        }
    }
}

/// Ambient light plus the animated spot lights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightRigConfig {
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub shadow_map_size: u32,
    /// Spot lights reverse once their x position leaves `[-bound, bound]`.
    pub oscillation_bound: f32,
    pub oscillation_policy: OscillationPolicy,
    pub spots: Vec<SpotLightConfig>,
}

impl Default for LightRigConfig {
    fn default() -> Self {
        Self {
            ambient_color: Color(0xffffff),
            ambient_intensity: 0.3,
            shadow_map_size: 1024,
            oscillation_bound: 4.0,
            oscillation_policy: OscillationPolicy::default(),
            spots: vec![
                SpotLightConfig {
                    color: Color(0xffff00),
                    intensity: 0.4,
                    distance: 0.0,
                    decay: 1.0,
                    placement: LightPlacement {
                        x_factor: -2.0,
                        y_factor: 6.0,
                        z: 7.0,
                    },
                    direction: Direction::Positive,
                    speed: 0.03,
                    ..SpotLightConfig::default()
                },
                SpotLightConfig {
                    color: Color(0x00ffff),
                    placement: LightPlacement {
                        x_factor: 3.0,
                        y_factor: 6.0,
                        z: 2.0,
                    },
                    direction: Direction::Positive,
                    speed: 0.05,
                    ..SpotLightConfig::default()
                },
                SpotLightConfig {
                    color: Color(0xff00ff),
                    placement: LightPlacement {
                        x_factor: 0.0,
                        y_factor: 6.0,
                        z: 2.0,
                    },
                    direction: Direction::Negative,
                    speed: 0.04,
                    ..SpotLightConfig::default()
                },
            ],
        }
    }
}

/// A single animated spot light.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotLightConfig {
    pub color: Color,
    pub intensity: f32,
    /// Zero means unlimited range.
    pub distance: f32,
    pub decay: f32,
    pub angle_radians: f32,
    pub penumbra: f32,
    pub placement: LightPlacement,
    pub direction: Direction,
    /// Scene units travelled per frame.
    pub speed: f32,
}

impl Default for SpotLightConfig {
    fn default() -> Self {
        Self {
            color: Color(0xffffff),
            intensity: 5.0,
            distance: 14.0,
            decay: 2.0,
            angle_radians: PI / 40.0,
            penumbra: 1.0,
            placement: LightPlacement::default(),
            direction: Direction::Positive,
            speed: 0.04,
        }
    }
}

/// Light position expressed relative to the frame bounding box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LightPlacement {
    /// Multiplier applied to the bounding box width.
    pub x_factor: f32,
    /// Multiplier applied to the bounding box height.
    pub y_factor: f32,
    /// Absolute distance from the wall.
    pub z: f32,
}

impl Default for LightPlacement {
    fn default() -> Self {
        Self {
            x_factor: 0.0,
            y_factor: 6.0,
            z: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.01,
            far: 100.0,
            position: Vec3::new(-0.3, -0.5, 0.8),
            target: Vec3::ZERO,
        }
    }
}

/// Angle limits for the orbit controls, in degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub min_azimuth_degrees: f32,
    pub max_azimuth_degrees: f32,
    pub min_polar_degrees: f32,
    pub max_polar_degrees: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            min_azimuth_degrees: -60.0,
            max_azimuth_degrees: 60.0,
            min_polar_degrees: 20.0,
            max_polar_degrees: 160.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    pub shadows_enabled: bool,
    pub shadow_map_type: ShadowMapType,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            shadows_enabled: true,
            shadow_map_type: ShadowMapType::Pcf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_reference_scene() {
        let config = AppConfig::from_json_str("{}").unwrap();

        assert_eq!(config.frame.border_width, 0.05);
        assert_eq!(config.wall.color, Color(0xaa6666));
        assert_eq!(config.lights.spots.len(), 3);
        assert_eq!(config.renderer.shadow_map_type, ShadowMapType::Pcf);
        assert_eq!(config.controls.max_polar_degrees, 160.0);
    }

    #[test]
    fn reference_light_speeds_and_directions() {
        let rig = LightRigConfig::default();
        let speeds: Vec<f32> = rig.spots.iter().map(|s| s.speed).collect();
        let directions: Vec<Direction> = rig.spots.iter().map(|s| s.direction).collect();

        assert_eq!(speeds, vec![0.03, 0.05, 0.04]);
        assert_eq!(
            directions,
            vec![Direction::Positive, Direction::Positive, Direction::Negative]
        );
        assert_eq!(rig.spots[0].intensity, 0.4);
        assert_eq!(rig.spots[0].decay, 1.0);
        assert_eq!(rig.spots[0].distance, 0.0);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = AppConfig::from_json_str(
            r#"{ "frame": { "border_width": 0.1 }, "renderer": { "shadow_map_type": "pcf_soft" } }"#,
        )
        .unwrap();

        assert_eq!(config.frame.border_width, 0.1);
        assert_eq!(config.frame.picture_scale, 0.8);
        assert_eq!(config.renderer.shadow_map_type, ShadowMapType::PcfSoft);
        assert!(config.renderer.shadows_enabled);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = AppConfig::from_json_str("{ frame: }").unwrap_err();
        assert!(format!("{err}").starts_with("invalid configuration"));
    }

    fn rejected(json: &str) -> String {
        match AppConfig::from_json_str(json) {
            Err(err @ FrameSceneError::InvalidConfig(_)) => format!("{err}"),
            other => panic!("expected invalid configuration for {json}, got {other:?}"),
        }
    }

    #[test]
    fn default_config_is_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_non_positive_oscillation_bound() {
        assert!(rejected(r#"{"lights":{"oscillation_bound":-1.0}}"#).contains("oscillation_bound"));
        assert!(rejected(r#"{"lights":{"oscillation_bound":0.0}}"#).contains("oscillation_bound"));
    }

    #[test]
    fn rejects_stalled_spot_speed() {
        let message = rejected(r#"{"lights":{"spots":[{"speed":0.0}]}}"#);
        assert!(message.contains("spots[0].speed"));
        assert!(rejected(r#"{"lights":{"spots":[{"speed":0.02},{"speed":-0.0}]}}"#)
            .contains("spots[1].speed"));
    }

    #[test]
    fn rejects_non_finite_spot_speed() {
        let mut config = AppConfig::default();
        config.lights.spots[2].speed = f32::NAN;
        assert!(matches!(config.validate(), Err(FrameSceneError::InvalidConfig(_))));

        config.lights.spots[2].speed = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_swapped_azimuth_limits() {
        let message =
            rejected(r#"{"controls":{"min_azimuth_degrees":60,"max_azimuth_degrees":-60}}"#);
        assert!(message.contains("azimuth"));
    }

    #[test]
    fn rejects_swapped_or_out_of_range_polar_limits() {
        assert!(rejected(r#"{"controls":{"min_polar_degrees":160,"max_polar_degrees":20}}"#)
            .contains("polar"));
        assert!(rejected(r#"{"controls":{"min_polar_degrees":-10}}"#).contains("polar"));
        assert!(rejected(r#"{"controls":{"max_polar_degrees":190}}"#).contains("polar"));
    }

    #[test]
    fn rejects_degenerate_camera() {
        assert!(rejected(r#"{"camera":{"near":0.0}}"#).contains("clip planes"));
        assert!(rejected(r#"{"camera":{"near":5.0,"far":1.0}}"#).contains("clip planes"));
        assert!(rejected(r#"{"camera":{"fov_y_degrees":180.0}}"#).contains("fov"));
    }

    #[test]
    fn load_validates_file_contents() {
        let path = std::env::temp_dir().join(format!("spotlit-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"lights":{"oscillation_bound":-4.0}}"#).unwrap();

        let result = AppConfig::load(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(FrameSceneError::InvalidConfig(_))));
    }

    #[test]
    fn border_depth_scales_with_frame_depth() {
        let frame = FrameConfig::default();
        assert!((frame.border_depth() - 0.04).abs() < 1e-6);
    }
}
