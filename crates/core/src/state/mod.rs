//! Everything the frame loop mutates, owned in one place.

use crate::{
    animation::OscillationDriver,
    assembly,
    assets::Texture,
    camera::{OrbitControls, PerspectiveCamera},
    config::AppConfig,
    layout::FrameBoundingBox,
    lights,
    render::{FrameStats, Renderer},
    scene::{LightId, Scene},
    timeline::{FrameClock, ViewportEvent},
    viewport::{Viewport, ViewportController},
    FrameSceneError, Result,
};

#[derive(Debug)]
pub struct SceneState {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub clock: FrameClock,
    frame_bbox: FrameBoundingBox,
    spot_lights: Vec<LightId>,
    oscillation: OscillationDriver,
}

impl SceneState {
    /// Builds the full scene around an already loaded picture.
    pub fn build(texture: Texture, config: &AppConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        let aspect = viewport.aspect().ok_or_else(|| {
            FrameSceneError::msg(format!(
                "initial viewport {}x{} is empty",
                viewport.width, viewport.height
            ))
        })?;

        let mut scene = Scene::new();
        assembly::add_wall(&mut scene, &config.wall);
        let frame_bbox = assembly::add_frame(&mut scene, texture, &config.frame);
        let (spot_lights, oscillation) = lights::add_lights(&mut scene, frame_bbox, &config.lights);

        let mut camera = PerspectiveCamera::from_config(&config.camera, aspect);
        let mut controls = OrbitControls::new(config.camera.target, &config.controls);
        controls.update(&mut camera);

        tracing::info!(
            meshes = scene.meshes().len(),
            lights = scene.lights().len(),
            bbox_width = frame_bbox.width,
            bbox_height = frame_bbox.height,
            "scene assembled"
        );

        Ok(Self {
            scene,
            camera,
            controls,
            clock: FrameClock::default(),
            frame_bbox,
            spot_lights,
            oscillation,
        })
    }

    pub fn frame_bbox(&self) -> FrameBoundingBox {
        self.frame_bbox
    }

    pub fn spot_lights(&self) -> &[LightId] {
        &self.spot_lights
    }

    pub fn oscillation(&self) -> &OscillationDriver {
        &self.oscillation
    }

    /// Renders one frame, then moves the lights for the next one.
    pub fn tick(&mut self, renderer: &mut dyn Renderer) -> Result<FrameStats> {
        let stats = renderer.render(&self.scene, &self.camera)?;
        self.oscillation.advance(&mut self.scene);
        self.clock.advance();
        Ok(stats)
    }

    pub fn resize(&mut self, renderer: &mut dyn Renderer, viewport: Viewport) -> bool {
        ViewportController::resize(&mut self.camera, renderer, viewport)
    }

    pub fn handle(&mut self, renderer: &mut dyn Renderer, event: ViewportEvent) {
        match event {
            ViewportEvent::Resize { width, height } => {
                self.resize(renderer, Viewport::new(width, height));
            }
        }
    }
}
