use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::{
    camera::PerspectiveCamera,
    config::RendererSettings,
    scene::{Light, Scene},
    Result,
};

/// Shadow filtering quality. Each level costs a fixed multiple of the basic
/// shadow pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowMapType {
    Basic,
    #[default]
    Pcf,
    PcfSoft,
}

impl ShadowMapType {
    pub fn cost_multiplier(self) -> u32 {
        match self {
            ShadowMapType::Basic => 1,
            ShadowMapType::Pcf => 2,
            ShadowMapType::PcfSoft => 4,
        }
    }
}

/// Bookkeeping produced for every rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FrameStats {
    pub frame: u64,
    pub width: u32,
    pub height: u32,
    pub meshes: usize,
    /// Meshes whose origin falls inside the camera frustum.
    pub visible_meshes: usize,
    pub lights: usize,
    pub shadow_casters: usize,
    /// Shadow-map texels written this frame, weighted by filter quality.
    pub shadow_cost: u64,
}

/// Drawing backend. The scene and camera are only read.
pub trait Renderer {
    fn set_size(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<FrameStats>;
}

/// Renderer without a GPU surface. It walks the scene every frame and reports
/// what a real backend would have to draw.
#[derive(Debug)]
pub struct HeadlessRenderer {
    settings: RendererSettings,
    width: u32,
    height: u32,
    frames_rendered: u64,
    last_stats: Option<FrameStats>,
}

impl HeadlessRenderer {
    pub fn new(settings: RendererSettings, width: u32, height: u32) -> Self {
        tracing::debug!(
            width,
            height,
            shadows = settings.shadows_enabled,
            shadow_map_type = ?settings.shadow_map_type,
            "headless renderer created"
        );
        Self {
            settings,
            width,
            height,
            frames_rendered: 0,
            last_stats: None,
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn last_stats(&self) -> Option<&FrameStats> {
        self.last_stats.as_ref()
    }

    fn shadow_cost(&self, scene: &Scene) -> u64 {
        if !self.settings.shadows_enabled {
            return 0;
        }

        let multiplier = self.settings.shadow_map_type.cost_multiplier() as u64;
        scene
            .lights()
            .iter()
            .filter_map(|light| match light {
                Light::Spot(spot) if spot.cast_shadow => {
                    let (w, h) = spot.shadow_map_size;
                    Some(w as u64 * h as u64 * multiplier)
                }
                _ => None,
            })
            .sum()
    }
}

fn in_frustum(view_projection: Mat4, point: Vec3) -> bool {
    let clip = view_projection * point.extend(1.0);
    clip.w > 0.0 && clip.x.abs() <= clip.w && clip.y.abs() <= clip.w && clip.z.abs() <= clip.w
}

impl Renderer for HeadlessRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<FrameStats> {
        if !camera.aspect.is_finite() || camera.aspect <= 0.0 {
            return Err(format!("camera aspect {} cannot be rendered", camera.aspect).into());
        }

        let shadow_casters = if self.settings.shadows_enabled {
            scene.lights().iter().filter(|light| light.casts_shadow()).count()
        } else {
            0
        };

        let view_projection = camera.view_projection();
        let visible_meshes = scene
            .meshes()
            .iter()
            .filter(|mesh| in_frustum(view_projection, mesh.position))
            .count();

        let stats = FrameStats {
            frame: self.frames_rendered,
            width: self.width,
            height: self.height,
            meshes: scene.meshes().len(),
            visible_meshes,
            lights: scene.lights().len(),
            shadow_casters,
            shadow_cost: self.shadow_cost(scene),
        };

        tracing::trace!(?stats, "frame rendered");
        self.frames_rendered += 1;
        self.last_stats = Some(stats);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AmbientLight, Color, Geometry, Material, Mesh, SpotLight};

    fn scene_with_spots(count: usize) -> Scene {
        let mut scene = Scene::new();
        scene.add_light(Light::Ambient(AmbientLight {
            color: Color::WHITE,
            intensity: 0.3,
        }));
        for i in 0..count {
            scene.add_light(Light::Spot(SpotLight {
                color: Color::WHITE,
                intensity: 1.0,
                distance: 0.0,
                decay: 1.0,
                angle: 0.1,
                penumbra: 1.0,
                position: Vec3::new(i as f32, 5.0, 2.0),
                cast_shadow: true,
                shadow_map_size: (1024, 1024),
            }));
        }
        scene
    }

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 1.5, 0.01, 100.0)
    }

    #[test]
    fn cost_multipliers_follow_quality() {
        assert_eq!(ShadowMapType::Basic.cost_multiplier(), 1);
        assert_eq!(ShadowMapType::Pcf.cost_multiplier(), 2);
        assert_eq!(ShadowMapType::PcfSoft.cost_multiplier(), 4);
    }

    #[test]
    fn counts_frames_and_shadow_work() {
        let mut renderer = HeadlessRenderer::new(RendererSettings::default(), 640, 480);
        let scene = scene_with_spots(3);

        let first = renderer.render(&scene, &camera()).unwrap();
        let second = renderer.render(&scene, &camera()).unwrap();

        assert_eq!(first.frame, 0);
        assert_eq!(second.frame, 1);
        assert_eq!(renderer.frames_rendered(), 2);
        assert_eq!(second.lights, 4);
        assert_eq!(second.shadow_casters, 3);
        assert_eq!(second.shadow_cost, 3 * 1024 * 1024 * 2);
        assert_eq!((second.width, second.height), (640, 480));
    }

    #[test]
    fn disabled_shadows_cost_nothing() {
        let settings = RendererSettings {
            shadows_enabled: false,
            shadow_map_type: ShadowMapType::PcfSoft,
        };
        let mut renderer = HeadlessRenderer::new(settings, 640, 480);

        let stats = renderer.render(&scene_with_spots(2), &camera()).unwrap();
        assert_eq!(stats.shadow_casters, 0);
        assert_eq!(stats.shadow_cost, 0);
    }

    #[test]
    fn rejects_degenerate_aspect() {
        let mut renderer = HeadlessRenderer::new(RendererSettings::default(), 640, 480);
        let mut camera = camera();
        camera.aspect = f32::INFINITY;

        assert!(renderer.render(&Scene::new(), &camera).is_err());
        assert!(renderer.last_stats().is_none());
    }

    #[test]
    fn only_meshes_in_front_of_camera_are_visible() {
        let mut scene = Scene::new();
        let plane = || Geometry::Plane {
            width: 1.0,
            height: 1.0,
        };
        scene.add_mesh(Mesh::new("ahead", plane(), Material::phong(Color::WHITE)));
        scene.add_mesh(Mesh::new("behind", plane(), Material::phong(Color::WHITE)).at(Vec3::new(0.0, 0.0, 5.0)));
        scene.add_mesh(Mesh::new("far-left", plane(), Material::phong(Color::WHITE)).at(Vec3::new(-50.0, 0.0, 0.0)));

        let mut camera = camera();
        camera.position = Vec3::new(0.0, 0.0, 2.0);
        camera.target = Vec3::ZERO;

        let mut renderer = HeadlessRenderer::new(RendererSettings::default(), 640, 480);
        let stats = renderer.render(&scene, &camera).unwrap();

        assert_eq!(stats.meshes, 3);
        assert_eq!(stats.visible_meshes, 1);
        assert_eq!(renderer.last_stats(), Some(&stats));
    }
}
