//! Per-frame bobbing of the spot lights along the x axis.

use serde::{Deserialize, Serialize};

use crate::scene::{Light, LightId, Scene};

/// Sign of a light's horizontal motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

/// What happens when a proposed position leaves `[-bound, bound]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OscillationPolicy {
    /// Accept the out-of-range position and flip the direction for the next
    /// frame. The light may sit up to one step past the bound.
    Overshoot,
    /// Mirror the excess back inside the bound and head back inwards. A light
    /// already outside the bound is clamped onto it.
    #[default]
    Reflect,
}

/// Motion state of one light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub light: LightId,
    pub direction: Direction,
    /// Units per frame, always positive.
    pub speed: f32,
}

/// Advances a single coordinate by one frame and returns the new position and
/// direction.
pub fn step(
    x: f32,
    direction: Direction,
    speed: f32,
    bound: f32,
    policy: OscillationPolicy,
) -> (f32, Direction) {
    let proposed = x + direction.sign() * speed;

    match policy {
        OscillationPolicy::Overshoot => {
            if proposed > bound || proposed < -bound {
                (proposed, direction.reversed())
            } else {
                (proposed, direction)
            }
        }
        OscillationPolicy::Reflect => {
            // A light that starts outside the range is pulled onto the edge.
            if x > bound {
                (bound, Direction::Negative)
            } else if x < -bound {
                (-bound, Direction::Positive)
            } else if proposed > bound {
                let reflected = (2.0 * bound - proposed).clamp(-bound, bound);
                (reflected, Direction::Negative)
            } else if proposed < -bound {
                let reflected = (-2.0 * bound - proposed).clamp(-bound, bound);
                (reflected, Direction::Positive)
            } else {
                (proposed, direction)
            }
        }
    }
}

/// Drives every registered light once per frame. Lights move independently of
/// each other.
#[derive(Debug, Clone)]
pub struct OscillationDriver {
    bound: f32,
    policy: OscillationPolicy,
    oscillators: Vec<Oscillator>,
}

impl OscillationDriver {
    pub fn new(bound: f32, policy: OscillationPolicy) -> Self {
        Self {
            bound,
            policy,
            oscillators: Vec::new(),
        }
    }

    /// Registers a light. Non-positive speeds are stored as their magnitude.
    pub fn register(&mut self, light: LightId, direction: Direction, speed: f32) {
        self.oscillators.push(Oscillator {
            light,
            direction,
            speed: speed.abs(),
        });
    }

    pub fn oscillators(&self) -> &[Oscillator] {
        &self.oscillators
    }

    pub fn bound(&self) -> f32 {
        self.bound
    }

    pub fn policy(&self) -> OscillationPolicy {
        self.policy
    }

    /// Moves each tracked light by one step. Only the x coordinate is touched.
    pub fn advance(&mut self, scene: &mut Scene) {
        for oscillator in &mut self.oscillators {
            let Some(position) = scene.light_mut(oscillator.light).and_then(Light::position_mut)
            else {
                tracing::warn!(light = ?oscillator.light, "oscillating light has no position");
                continue;
            };

            let (x, direction) = step(
                position.x,
                oscillator.direction,
                oscillator.speed,
                self.bound,
                self.policy,
            );
            if direction != oscillator.direction {
                tracing::trace!(light = ?oscillator.light, x, "light reversed");
            }
            position.x = x;
            oscillator.direction = direction;
        }
    }
}
