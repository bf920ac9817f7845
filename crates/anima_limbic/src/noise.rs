//! Gaussian jitter on every variable.
//!
//! Standard deviation scales with sqrt(dt) so accumulated variance over a
//! fixed wall-clock span does not depend on tick granularity.

use anima_core::{BioField, BioState, NoiseConfig};
use rand::Rng;
use rand_distr::StandardNormal;

/// body_temp spans ~18 degrees, not 0-1, so it gets a tenth of the jitter.
const BODY_TEMP_NOISE_SCALE: f64 = 0.1;

/// Add one standard-normal sample per variable, drawn in canonical field order.
/// No-op unless `dt` is finite and positive. Does not clamp.
pub fn apply_noise<R: Rng + ?Sized>(state: &mut BioState, rng: &mut R, cfg: &NoiseConfig, dt: f64) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }

    let sigma = cfg.sigma * dt.sqrt();
    for field in BioField::ALL {
        let sample: f64 = rng.sample(StandardNormal);
        let scale = match field {
            BioField::BodyTemp => sigma * BODY_TEMP_NOISE_SCALE,
            _ => sigma,
        };
        *state.field_mut(field) += sample * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_noise_zero_dt_is_strict_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut s = BioState::default();
        let before = s.values();
        apply_noise(&mut s, &mut rng, &NoiseConfig { sigma: 0.5 }, 0.0);
        apply_noise(&mut s, &mut rng, &NoiseConfig { sigma: 0.5 }, -1.0);
        assert_eq!(s.values(), before);

        // The generator must not have been consumed either.
        let mut fresh = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(rng.gen::<u64>(), fresh.gen::<u64>());
    }

    #[test]
    fn test_noise_non_finite_dt_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut s = BioState::default();
        let before = s.values();
        apply_noise(&mut s, &mut rng, &NoiseConfig::default(), f64::NAN);
        apply_noise(&mut s, &mut rng, &NoiseConfig::default(), f64::INFINITY);
        assert_eq!(s.values(), before);
    }

    #[test]
    fn test_noise_perturbs_all_fields() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut s = BioState::default();
        let before = s.clone();
        apply_noise(&mut s, &mut rng, &NoiseConfig { sigma: 0.01 }, 1.0);
        for field in BioField::ALL {
            assert_ne!(s.get(field), before.get(field), "{} unchanged", field);
        }
    }

    #[test]
    fn test_noise_same_seed_same_result() {
        let mut a = BioState::default();
        let mut b = BioState::default();
        apply_noise(&mut a, &mut ChaCha8Rng::seed_from_u64(99), &NoiseConfig::default(), 2.0);
        apply_noise(&mut b, &mut ChaCha8Rng::seed_from_u64(99), &NoiseConfig::default(), 2.0);
        assert_eq!(a.values(), b.values());
    }

    #[test]
    fn test_noise_variance_scales_with_dt() {
        // Sum of squared jitter over many draws: dt=4 should be ~4x dt=1.
        let cfg = NoiseConfig { sigma: 0.01 };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut var = |dt: f64| {
            let mut acc = 0.0;
            for _ in 0..2000 {
                let mut s = BioState::default();
                apply_noise(&mut s, &mut rng, &cfg, dt);
                acc += (s.mood - 0.5).powi(2);
            }
            acc / 2000.0
        };
        let v1 = var(1.0);
        let v4 = var(4.0);
        let ratio = v4 / v1;
        assert!(ratio > 3.0 && ratio < 5.3, "variance ratio {}", ratio);
    }

    #[test]
    fn test_body_temp_gets_smaller_jitter() {
        let cfg = NoiseConfig { sigma: 0.05 };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let (mut temp_dev, mut stress_dev) = (0.0, 0.0);
        for _ in 0..1000 {
            let mut s = BioState::default();
            apply_noise(&mut s, &mut rng, &cfg, 1.0);
            temp_dev += (s.body_temp - 36.6).abs();
            stress_dev += (s.stress - 0.1).abs();
        }
        assert!(temp_dev < stress_dev * 0.2);
    }
}
