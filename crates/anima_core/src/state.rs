//! Biological State
//!
//! Eight continuous variables describe the body at any instant:
//! - Unit-range drives: energy, stress, cognitive_capacity, mood,
//!   physical_tension, hunger, social_deficit (all in [0, 1])
//! - Core temperature: body_temp in Celsius, [25, 43], baseline 36.6
//!
//! These are proxies calibrated for drive pressure, not physiological
//! measurements. Every mutating stage works on `&mut BioState` and leaves
//! range enforcement to [`clamp_all`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Baseline core temperature in Celsius.
pub const BODY_TEMP_BASELINE: f64 = 36.6;

/// Guard against NaN and Infinity in state values.
/// Non-finite values fall back to the field's baseline.
#[inline]
fn sanitize(field: BioField, v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        let fallback = field.baseline();
        tracing::warn!(
            field = field.as_str(),
            "NaN/Inf detected in bio state, resetting to baseline {}",
            fallback
        );
        fallback
    }
}

// =============================================================================
// Fields & Ranges
// =============================================================================

/// Closed set of bio variables. Every `Delta`, rate and pulse names one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BioField {
    Energy,
    Stress,
    CognitiveCapacity,
    Mood,
    PhysicalTension,
    Hunger,
    SocialDeficit,
    BodyTemp,
}

impl BioField {
    /// All fields in canonical order (also the noise draw order).
    pub const ALL: [BioField; 8] = [
        BioField::Energy,
        BioField::Stress,
        BioField::CognitiveCapacity,
        BioField::Mood,
        BioField::PhysicalTension,
        BioField::Hunger,
        BioField::SocialDeficit,
        BioField::BodyTemp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BioField::Energy => "energy",
            BioField::Stress => "stress",
            BioField::CognitiveCapacity => "cognitive_capacity",
            BioField::Mood => "mood",
            BioField::PhysicalTension => "physical_tension",
            BioField::Hunger => "hunger",
            BioField::SocialDeficit => "social_deficit",
            BioField::BodyTemp => "body_temp",
        }
    }

    /// Valid range for this field.
    pub fn range(self) -> VarRange {
        match self {
            BioField::BodyTemp => VarRange::new(25.0, 43.0),
            _ => VarRange::UNIT,
        }
    }

    /// Start-of-session value for this field.
    pub fn baseline(self) -> f64 {
        match self {
            BioField::Energy => 0.80,
            BioField::Stress => 0.10,
            BioField::CognitiveCapacity => 1.00,
            BioField::Mood => 0.50,
            BioField::PhysicalTension => 0.05,
            BioField::Hunger => 0.10,
            BioField::SocialDeficit => 0.00,
            BioField::BodyTemp => BODY_TEMP_BASELINE,
        }
    }
}

impl fmt::Display for BioField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bio field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for BioField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        BioField::ALL
            .into_iter()
            .find(|f| f.as_str() == name)
            .ok_or(UnknownFieldError(name))
    }
}

/// Inclusive [min, max] range of a bio variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarRange {
    pub min: f64,
    pub max: f64,
}

impl VarRange {
    pub const UNIT: VarRange = VarRange { min: 0.0, max: 1.0 };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Constrain `v` to `[lo, hi]`.
#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

// =============================================================================
// BioState
// =============================================================================

/// The 8-variable biological record of one simulated person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BioState {
    /// 1 = fully rested, 0 = exhausted. Decays toward 0.
    pub energy: f64,
    /// 0 = calm, 1 = overwhelmed. No autonomous decay.
    pub stress: f64,
    /// 1 = fresh, 0 = depleted. Decays toward 0.
    pub cognitive_capacity: f64,
    /// 0 = dysphoric, 0.5 = neutral, 1 = euphoric. Decays toward 0.
    pub mood: f64,
    /// 0 = relaxed, 1 = tense. No autonomous decay.
    pub physical_tension: f64,
    /// 0 = satiated, 1 = starving. Rises toward 1.
    pub hunger: f64,
    /// 0 = connected, 1 = isolated. Rises toward 1.
    pub social_deficit: f64,
    /// Celsius, 25-43. No autonomous decay.
    pub body_temp: f64,

    /// Unix timestamp (milliseconds) of last engine tick
    pub last_updated: i64,
}

impl Default for BioState {
    fn default() -> Self {
        Self {
            energy: BioField::Energy.baseline(),
            stress: BioField::Stress.baseline(),
            cognitive_capacity: BioField::CognitiveCapacity.baseline(),
            mood: BioField::Mood.baseline(),
            physical_tension: BioField::PhysicalTension.baseline(),
            hunger: BioField::Hunger.baseline(),
            social_deficit: BioField::SocialDeficit.baseline(),
            body_temp: BioField::BodyTemp.baseline(),
            last_updated: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl BioState {
    /// Read one field.
    pub fn get(&self, field: BioField) -> f64 {
        match field {
            BioField::Energy => self.energy,
            BioField::Stress => self.stress,
            BioField::CognitiveCapacity => self.cognitive_capacity,
            BioField::Mood => self.mood,
            BioField::PhysicalTension => self.physical_tension,
            BioField::Hunger => self.hunger,
            BioField::SocialDeficit => self.social_deficit,
            BioField::BodyTemp => self.body_temp,
        }
    }

    /// Mutable access to one field. This is the only field dispatch in the crate.
    pub fn field_mut(&mut self, field: BioField) -> &mut f64 {
        match field {
            BioField::Energy => &mut self.energy,
            BioField::Stress => &mut self.stress,
            BioField::CognitiveCapacity => &mut self.cognitive_capacity,
            BioField::Mood => &mut self.mood,
            BioField::PhysicalTension => &mut self.physical_tension,
            BioField::Hunger => &mut self.hunger,
            BioField::SocialDeficit => &mut self.social_deficit,
            BioField::BodyTemp => &mut self.body_temp,
        }
    }

    /// Add a delta to its target field. Does not clamp.
    #[inline]
    pub fn apply(&mut self, delta: Delta) {
        *self.field_mut(delta.field) += delta.amount;
    }

    /// Values in canonical field order, without the timestamp.
    pub fn values(&self) -> [f64; 8] {
        BioField::ALL.map(|f| self.get(f))
    }

    /// True when every field lies within its declared range.
    pub fn in_range(&self) -> bool {
        BioField::ALL
            .into_iter()
            .all(|f| f.range().contains(self.get(f)))
    }

    pub fn touch(&mut self) {
        self.last_updated = chrono::Utc::now().timestamp_millis();
    }
}

/// Enforce all variable ranges in place. Total and idempotent.
pub fn clamp_all(state: &mut BioState) {
    for field in BioField::ALL {
        let range = field.range();
        let slot = state.field_mut(field);
        *slot = clamp(sanitize(field, *slot), range.min, range.max);
    }
}

// =============================================================================
// Deltas & Feedback
// =============================================================================

/// A signed change to one bio field, the universal unit of state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub field: BioField,
    pub amount: f64,
}

impl Delta {
    pub const fn new(field: BioField, amount: f64) -> Self {
        Self { field, amount }
    }
}

/// A dt-scaled effect: `per_second` is multiplied by dt at commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BioRate {
    pub field: BioField,
    pub per_second: f64,
}

impl BioRate {
    pub const fn new(field: BioField, per_second: f64) -> Self {
        Self { field, per_second }
    }
}

/// A one-shot effect: `amount` is applied as-is and never dt-scaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BioPulse {
    pub field: BioField,
    pub amount: f64,
}

impl BioPulse {
    pub const fn new(field: BioField, amount: f64) -> Self {
        Self { field, amount }
    }
}

/// Feedback effects collected during a tick and committed together:
/// rates first (dt-scaled), then pulses (absolute), then clamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEnvelope {
    pub rates: Vec<BioRate>,
    pub pulses: Vec<BioPulse>,
}

impl FeedbackEnvelope {
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty() && self.pulses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_baseline() {
        let s = BioState::default();
        assert_eq!(s.energy, 0.80);
        assert_eq!(s.cognitive_capacity, 1.0);
        assert_eq!(s.body_temp, 36.6);
        assert!(s.in_range());
    }

    #[test]
    fn test_field_roundtrip_names() {
        for field in BioField::ALL {
            assert_eq!(field.as_str().parse::<BioField>().unwrap(), field);
        }
        assert!("spleen".parse::<BioField>().is_err());
        assert_eq!(" Body_Temp ".parse::<BioField>().unwrap(), BioField::BodyTemp);
    }

    #[test]
    fn test_apply_targets_single_field() {
        let mut s = BioState::default();
        let before = s.clone();
        s.apply(Delta::new(BioField::Hunger, 0.25));
        assert!((s.hunger - 0.35).abs() < 1e-12);
        for field in BioField::ALL.into_iter().filter(|f| *f != BioField::Hunger) {
            assert_eq!(s.get(field), before.get(field));
        }
    }

    #[test]
    fn test_clamp_all_bounds_every_field() {
        let mut s = BioState {
            energy: -3.0,
            stress: 4.0,
            cognitive_capacity: -0.1,
            mood: 1.1,
            physical_tension: 9.0,
            hunger: -9.0,
            social_deficit: 2.0,
            body_temp: 60.0,
            last_updated: 0,
        };
        clamp_all(&mut s);
        assert!(s.in_range());
        assert_eq!(s.energy, 0.0);
        assert_eq!(s.stress, 1.0);
        assert_eq!(s.body_temp, 43.0);

        s.body_temp = 10.0;
        clamp_all(&mut s);
        assert_eq!(s.body_temp, 25.0);
    }

    #[test]
    fn test_clamp_all_sanitizes_nan() {
        let mut s = BioState::default();
        s.mood = f64::NAN;
        s.body_temp = f64::INFINITY;
        clamp_all(&mut s);
        assert_eq!(s.mood, 0.5);
        assert_eq!(s.body_temp, BODY_TEMP_BASELINE);
    }

    #[test]
    fn test_field_serializes_snake_case() {
        let json = serde_json::to_string(&Delta::new(BioField::SocialDeficit, 0.1)).unwrap();
        assert!(json.contains("\"social_deficit\""));
    }
}
