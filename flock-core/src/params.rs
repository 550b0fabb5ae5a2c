use flock_shared::FlockSettings;

/// Radii and strengths for the flocking behaviors
///
/// Values are taken as given. Zero or negative radii and strengths are not
/// rejected; a negative strength simply inverts the corresponding force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub separation_radius: f32,
    pub separation_strength: f32,
    pub alignment_radius: f32,
    pub alignment_strength: f32,
    pub cohesion_radius: f32,
    pub cohesion_strength: f32,
    pub avoidance_distance: f32,
}

impl Default for SimulationParams {
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

impl SimulationParams {
    /// Largest neighbor radius of the three flocking behaviors
    pub fn max_radius(&self) -> f32 {
        self.separation_radius
            .max(self.alignment_radius)
            .max(self.cohesion_radius)
    }
}

impl From<FlockSettings> for SimulationParams {
    fn from(settings: FlockSettings) -> Self {
        Self {
            separation_radius: settings.separation_radius,
            separation_strength: settings.separation_strength,
            alignment_radius: settings.alignment_radius,
            alignment_strength: settings.alignment_strength,
            cohesion_radius: settings.cohesion_radius,
            cohesion_strength: settings.cohesion_strength,
            avoidance_distance: settings.avoidance_distance,
        }
    }
}

impl From<SimulationParams> for FlockSettings {
    fn from(params: SimulationParams) -> Self {
        Self {
            separation_radius: params.separation_radius,
            separation_strength: params.separation_strength,
            alignment_radius: params.alignment_radius,
            alignment_strength: params.alignment_strength,
            cohesion_radius: params.cohesion_radius,
            cohesion_strength: params.cohesion_strength,
            avoidance_distance: params.avoidance_distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SimulationParams::default();
        assert_eq!(params.separation_radius, 25.0);
        assert_eq!(params.separation_strength, 1.5);
        assert_eq!(params.alignment_radius, 50.0);
        assert_eq!(params.cohesion_radius, 50.0);
        assert_eq!(params.avoidance_distance, 100.0);
        assert_eq!(params.max_radius(), 50.0);
    }

    #[test]
    fn test_defaults_match_shared_settings() {
        assert_eq!(
            SimulationParams::from(FlockSettings::default()),
            SimulationParams::default()
        );
    }

    #[test]
    fn test_settings_conversion_keeps_negative_values() {
        let settings = FlockSettings {
            cohesion_strength: -1.0,
            separation_radius: -5.0,
            ..FlockSettings::default()
        };
        let params = SimulationParams::from(settings);
        assert_eq!(params.cohesion_strength, -1.0);
        assert_eq!(params.separation_radius, -5.0);
        assert_eq!(FlockSettings::from(params), settings);
    }
}
