//! # p2psim-engine::sampler
//!
//! Latency samplers. Each variant draws one delay per recipient from the
//! simulation's shared RNG, independent of every other recipient, then
//! clamps to `[min, max]`. A negative `min` is treated as `0`; a negative
//! `max` is treated as `+infinity`. The reserved `zipf` distribution and an
//! unparseable numeric parameter are ordinary configuration errors and
//! surface as `Result`s through `Simulation::from_config`; a parameter-count
//! mismatch is a programmer error in the caller assembling the config and
//! panics instead, matching `Sched::schedule`'s treatment of a negative
//! delay.

use crate::errors::SimError;
use p2psim_types::time::SimTime;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy)]
pub enum Sampler {
    Exponential { mean: f64, min: f64, max: f64 },
    Uniform { min: f64, max: f64 },
    Normal { mean: f64, stddev: f64, min: f64, max: f64 },
}

fn normalize_min(min: f64) -> f64 {
    if min < 0.0 {
        0.0
    } else {
        min
    }
}

fn normalize_max(max: f64) -> f64 {
    if max < 0.0 {
        f64::INFINITY
    } else {
        max
    }
}

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

fn parse_params(name: &str, raw: &[String], expected: usize) -> Result<Vec<f64>, SimError> {
    assert!(
        raw.len() == expected,
        "distribution {name:?} expects {expected} parameters, got {}",
        raw.len()
    );
    raw.iter()
        .map(|s| {
            s.parse::<f64>().map_err(|e| {
                SimError::Sampler(format!("distribution {name:?}: invalid parameter {s:?}: {e}"))
            })
        })
        .collect()
}

impl Sampler {
    pub fn from_config(name: &str, params: &[String]) -> Result<Self, SimError> {
        match name {
            "exponential" => {
                let p = parse_params(name, params, 3)?;
                Ok(Sampler::Exponential {
                    mean: p[0],
                    min: normalize_min(p[1]),
                    max: normalize_max(p[2]),
                })
            }
            "uniform" => {
                let p = parse_params(name, params, 2)?;
                Ok(Sampler::Uniform {
                    min: normalize_min(p[0]),
                    max: normalize_max(p[1]),
                })
            }
            "normal" => {
                let p = parse_params(name, params, 4)?;
                Ok(Sampler::Normal {
                    mean: p[0],
                    stddev: p[1],
                    min: normalize_min(p[2]),
                    max: normalize_max(p[3]),
                })
            }
            "zipf" => Err(SimError::Sampler(
                "the zipf distribution is reserved and not implemented".to_string(),
            )),
            other => Err(SimError::Sampler(format!("unknown distribution {other:?}"))),
        }
    }

    pub fn sample(&self, rng: &mut ChaCha20Rng) -> SimTime {
        match *self {
            Sampler::Exponential { mean, min, max } => {
                let u: f64 = rng.gen_range(f64::EPSILON..1.0);
                clamp(-mean * u.ln(), min, max)
            }
            Sampler::Uniform { min, max } => {
                if min >= max {
                    min
                } else {
                    rng.gen_range(min..=max)
                }
            }
            Sampler::Normal { mean, stddev, min, max } => {
                let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
                let u2: f64 = rng.gen_range(0.0..1.0);
                let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
                clamp(z * stddev + mean, min, max)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_equal_max_is_exact() {
        let sampler = Sampler::Exponential {
            mean: 1.0,
            min: 0.5,
            max: 0.5,
        };
        let mut rng = crate::rng::seeded_rng(0);
        for _ in 0..20 {
            assert_eq!(sampler.sample(&mut rng), 0.5);
        }
    }

    #[test]
    fn uniform_stays_in_bounds() {
        let sampler = Sampler::Uniform { min: 0.01, max: 0.5 };
        let mut rng = crate::rng::seeded_rng(7);
        for _ in 0..200 {
            let v = sampler.sample(&mut rng);
            assert!((0.01..=0.5).contains(&v));
        }
    }

    #[test]
    fn negative_min_and_max_normalize() {
        let sampler = Sampler::from_config(
            "exponential",
            &["0.109".to_string(), "0.01".to_string(), "-1.0".to_string()],
        )
        .unwrap();
        match sampler {
            Sampler::Exponential { min, max, .. } => {
                assert_eq!(min, 0.01);
                assert!(max.is_infinite());
            }
            _ => panic!("expected exponential"),
        }
    }

    #[test]
    fn zipf_is_rejected() {
        assert!(Sampler::from_config("zipf", &[]).is_err());
    }

    #[test]
    #[should_panic(expected = "expects 2 parameters")]
    fn wrong_param_count_panics() {
        let _ = Sampler::from_config("uniform", &["0.1".to_string()]);
    }
}
