use std::{fs, path::PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{scene::Scene, FrameSceneError, Result};

/// Configuration options for the light trace recorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSettings {
    pub output_path: PathBuf,
    /// Keep one sample every `stride` frames.
    pub stride: u64,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("light-trace.json"),
            stride: 1,
        }
    }
}

/// Positions of every positioned light at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSample {
    pub frame: u64,
    pub lights: Vec<Vec3>,
}

/// Collects light positions while recording and writes them out as JSON.
#[derive(Debug, Default)]
pub struct Recorder {
    settings: RecordingSettings,
    is_recording: bool,
    samples: Vec<TraceSample>,
}

impl Recorder {
    pub fn new(settings: RecordingSettings) -> Self {
        Self {
            settings,
            is_recording: false,
            samples: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.is_recording = true;
    }

    pub fn stop(&mut self) {
        self.is_recording = false;
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn capture(&mut self, frame: u64, scene: &Scene) {
        if !self.is_recording || frame % self.settings.stride.max(1) != 0 {
            return;
        }
        self.samples.push(TraceSample {
            frame,
            lights: scene.light_positions(),
        });
    }

    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    /// Stops recording and writes the collected samples to the output path.
    pub fn finish(&mut self) -> Result<()> {
        self.stop();
        let json = serde_json::to_string_pretty(&self.samples)
            .map_err(FrameSceneError::serialize("light trace"))?;
        fs::write(&self.settings.output_path, json)?;
        tracing::info!(
            path = %self.settings.output_path.display(),
            samples = self.samples.len(),
            "light trace written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Color, Light, SpotLight};

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_light(Light::Spot(SpotLight {
            color: Color::WHITE,
            intensity: 1.0,
            distance: 0.0,
            decay: 1.0,
            angle: 0.1,
            penumbra: 1.0,
            position: Vec3::new(0.5, 1.0, 2.0),
            cast_shadow: true,
            shadow_map_size: (512, 512),
        }));
        scene
    }

    #[test]
    fn captures_only_while_recording() {
        let mut recorder = Recorder::new(RecordingSettings::default());
        recorder.capture(0, &scene());
        assert!(recorder.samples().is_empty());

        recorder.start();
        recorder.capture(1, &scene());
        recorder.stop();
        recorder.capture(2, &scene());

        assert_eq!(recorder.samples().len(), 1);
        assert_eq!(recorder.samples()[0].lights, vec![Vec3::new(0.5, 1.0, 2.0)]);
    }

    #[test]
    fn stride_skips_frames() {
        let mut recorder = Recorder::new(RecordingSettings {
            stride: 3,
            ..RecordingSettings::default()
        });
        recorder.start();
        for frame in 0..7 {
            recorder.capture(frame, &scene());
        }

        let frames: Vec<u64> = recorder.samples().iter().map(|s| s.frame).collect();
        assert_eq!(frames, vec![0, 3, 6]);
    }

    #[test]
    fn finish_writes_json_trace() {
        let path = std::env::temp_dir().join(format!("spotlit-trace-{}.json", std::process::id()));
        let mut recorder = Recorder::new(RecordingSettings {
            output_path: path.clone(),
            stride: 1,
        });
        recorder.start();
        recorder.capture(0, &scene());
        recorder.finish().unwrap();

        let written: Vec<TraceSample> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(!recorder.is_recording());
        assert_eq!(written, recorder.samples());
    }
}
