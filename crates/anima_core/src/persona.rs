use serde::{Deserialize, Serialize};

#[inline]
fn clamp01(v: f64) -> f64 {
    crate::state::clamp(v, 0.0, 1.0)
}

/// Personality: seven stable traits that scale how bio pressure is felt as drive urgency.
///
/// Values are expected in [0, 1]; 0.5 is neutral for every trait.
/// They are clamped whenever consumed, so config files may be sloppy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personality {
    pub stress_sensitivity: f64,
    pub energy_resilience: f64,
    pub curiosity: f64,
    pub self_observation: f64,
    pub frustration_tolerance: f64,
    pub risk_aversion: f64,
    pub social_factor: f64,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            stress_sensitivity: 0.5,
            energy_resilience: 0.5,
            curiosity: 0.5,
            self_observation: 0.5,
            frustration_tolerance: 0.5,
            risk_aversion: 0.5,
            social_factor: 0.5,
        }
    }
}

impl Personality {
    pub fn clamped(&self) -> Self {
        Self {
            stress_sensitivity: clamp01(self.stress_sensitivity),
            energy_resilience: clamp01(self.energy_resilience),
            curiosity: clamp01(self.curiosity),
            self_observation: clamp01(self.self_observation),
            frustration_tolerance: clamp01(self.frustration_tolerance),
            risk_aversion: clamp01(self.risk_aversion),
            social_factor: clamp01(self.social_factor),
        }
    }
}

/// Long-horizon pressure that biases drives. Optional; defaults to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChronicState {
    pub threat_load: f64,
    pub isolation_load: f64,
    pub identity_strain: f64,
    pub fatigue_pressure: f64,
}

impl ChronicState {
    pub fn clamped(&self) -> Self {
        Self {
            threat_load: clamp01(self.threat_load),
            isolation_load: clamp01(self.isolation_load),
            identity_strain: clamp01(self.identity_strain),
            fatigue_pressure: clamp01(self.fatigue_pressure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personality_clamped() {
        let p = Personality {
            curiosity: 3.0,
            risk_aversion: -1.0,
            ..Default::default()
        }
        .clamped();
        assert_eq!(p.curiosity, 1.0);
        assert_eq!(p.risk_aversion, 0.0);
        assert_eq!(p.social_factor, 0.5);
    }

    #[test]
    fn test_chronic_defaults_to_zero() {
        let c = ChronicState::default();
        assert_eq!(c, ChronicState::default().clamped());
        assert_eq!(c.threat_load, 0.0);
    }
}
