#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

/// State of a single boid as handed to a host for rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoidSnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl BoidSnapshot {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self { x, y, vx, vy }
    }
}

/// Flocking behavior settings exchanged with hosts (settings files, UI panels)
///
/// Missing fields fall back to the defaults, so a host may send only the
/// behaviors it changed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub separation_radius: f32,
    pub separation_strength: f32,
    pub alignment_radius: f32,
    pub alignment_strength: f32,
    pub cohesion_radius: f32,
    pub cohesion_strength: f32,
    pub avoidance_distance: f32,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self {
            separation_radius: 25.0,
            separation_strength: 1.5,
            alignment_radius: 50.0,
            alignment_strength: 1.0,
            cohesion_radius: 50.0,
            cohesion_strength: 1.0,
            avoidance_distance: 100.0,
        }
    }
}

#[cfg(feature = "std")]
impl FlockSettings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
