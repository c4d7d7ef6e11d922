//! Core library for the Spotlit Frame scene.
//!
//! A picture is laid out as a framed board on a wall, lit by an ambient light
//! and three spot lights that bob left and right. Each module owns one piece:
//! layout arithmetic, scene construction, the light rig and its animation,
//! camera and viewport handling, and a renderer abstraction with a headless
//! implementation.

pub mod animation;
pub mod assembly;
pub mod assets;
pub mod camera;
pub mod config;
pub mod error;
pub mod layout;
pub mod lights;
pub mod record;
pub mod render;
pub mod scene;
pub mod state;
pub mod timeline;
pub mod viewport;

pub use animation::{Direction, OscillationDriver, OscillationPolicy};
pub use assets::{load_texture, Texture, TextureFilter};
pub use camera::{OrbitControls, PerspectiveCamera};
pub use config::AppConfig;
pub use error::{FrameSceneError, Result};
pub use layout::{compute_frame_dimensions, FrameBoundingBox, FrameDimensions, FrameLayout};
pub use record::{Recorder, RecordingSettings, TraceSample};
pub use render::{FrameStats, HeadlessRenderer, Renderer, ShadowMapType};
pub use scene::{Color, Light, LightId, Scene};
pub use state::SceneState;
pub use timeline::{FrameClock, ScheduledEvent, Scheduler, ViewportEvent};
pub use viewport::{Viewport, ViewportController};
