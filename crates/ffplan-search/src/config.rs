//! Driver configuration and its validation.

use std::error::Error;
use std::fmt;
use std::time::Duration;

// ── ConfigError ────────────────────────────────────────────────────

/// Rejected driver configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The best-first timeout is zero.
    ZeroTimeout,
    /// The progress logging interval is zero.
    ZeroProgressInterval,
    /// A temperature is NaN, infinite, zero or negative.
    InvalidTemperature {
        /// Which setting.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The cooling ratio is not strictly between 0 and 1.
    InvalidCoolingRatio {
        /// The rejected value.
        value: f64,
    },
    /// The annealing trace may not hold any action.
    ZeroTraceLength,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTimeout => write!(f, "search timeout must be non-zero"),
            Self::ZeroProgressInterval => write!(f, "progress_interval must be at least 1"),
            Self::InvalidTemperature { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::InvalidCoolingRatio { value } => {
                write!(f, "cooling_ratio must lie in (0, 1), got {value}")
            }
            Self::ZeroTraceLength => write!(f, "max_trace_len must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── SearchConfig ───────────────────────────────────────────────────

/// Settings of [`BestFirstSearch`](crate::BestFirstSearch).
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Wall-clock budget, checked once per expanded state. Default: 20 minutes.
    pub timeout: Duration,
    /// Expansions between two progress log lines. Default: 10 000.
    pub progress_interval: u64,
}

impl SearchConfig {
    /// Default wall-clock budget.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20 * 60);
    /// Default expansions between progress lines.
    pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::ZeroProgressInterval);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            progress_interval: Self::DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

// ── AnnealConfig ───────────────────────────────────────────────────

/// Settings of [`SimulatedAnnealing`](crate::SimulatedAnnealing).
///
/// The temperature starts at `initial_temperature` and is multiplied by
/// `cooling_ratio` after every iteration; the run stops once it is no
/// longer above `temperature_floor`.
#[derive(Clone, Debug)]
pub struct AnnealConfig {
    /// Starting temperature. Default: 10 000.
    pub initial_temperature: f64,
    /// Per-iteration cooling factor. Default: 0.995.
    pub cooling_ratio: f64,
    /// Stop temperature. Default: 1.
    pub temperature_floor: f64,
    /// RNG seed. Default: 0.
    pub seed: u64,
    /// Longest action trace a run may build. Default: 65 536.
    pub max_trace_len: usize,
}

impl AnnealConfig {
    /// Default starting temperature.
    pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 10_000.0;
    /// Default cooling factor.
    pub const DEFAULT_COOLING_RATIO: f64 = 0.995;
    /// Default stop temperature.
    pub const DEFAULT_TEMPERATURE_FLOOR: f64 = 1.0;
    /// Default trace bound.
    pub const DEFAULT_MAX_TRACE_LEN: usize = 1 << 16;

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("initial_temperature", self.initial_temperature),
            ("temperature_floor", self.temperature_floor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTemperature { name, value });
            }
        }
        // `!(x > 0 && x < 1)` also rejects NaN.
        if !(self.cooling_ratio > 0.0 && self.cooling_ratio < 1.0) {
            return Err(ConfigError::InvalidCoolingRatio {
                value: self.cooling_ratio,
            });
        }
        if self.max_trace_len == 0 {
            return Err(ConfigError::ZeroTraceLength);
        }
        Ok(())
    }

    /// Number of iterations a run lasts unless it finds a plan first.
    pub fn iteration_budget(&self) -> u64 {
        if self.initial_temperature <= self.temperature_floor {
            return 0;
        }
        let mut t = self.initial_temperature;
        let mut n = 0u64;
        while t > self.temperature_floor {
            t *= self.cooling_ratio;
            n += 1;
        }
        n
    }
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: Self::DEFAULT_INITIAL_TEMPERATURE,
            cooling_ratio: Self::DEFAULT_COOLING_RATIO,
            temperature_floor: Self::DEFAULT_TEMPERATURE_FLOOR,
            seed: 0,
            max_trace_len: Self::DEFAULT_MAX_TRACE_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SearchConfig::default().validate().is_ok());
        assert!(AnnealConfig::default().validate().is_ok());
        assert_eq!(SearchConfig::default().timeout, Duration::from_secs(1200));
    }

    #[test]
    fn zero_timeout_rejected() {
        let cfg = SearchConfig {
            timeout: Duration::ZERO,
            ..SearchConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn zero_progress_interval_rejected() {
        let cfg = SearchConfig {
            progress_interval: 0,
            ..SearchConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroProgressInterval));
    }

    #[test]
    fn bad_temperatures_rejected() {
        for t in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = AnnealConfig {
                initial_temperature: t,
                ..AnnealConfig::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::InvalidTemperature {
                    name: "initial_temperature",
                    ..
                })
            ));
        }
        let cfg = AnnealConfig {
            temperature_floor: 0.0,
            ..AnnealConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bad_cooling_ratio_rejected() {
        for r in [0.0, 1.0, 1.5, -0.5, f64::NAN] {
            let cfg = AnnealConfig {
                cooling_ratio: r,
                ..AnnealConfig::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::InvalidCoolingRatio { .. })
            ));
        }
    }

    #[test]
    fn zero_trace_rejected() {
        let cfg = AnnealConfig {
            max_trace_len: 0,
            ..AnnealConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTraceLength));
    }

    #[test]
    fn default_budget_is_about_1840_iterations() {
        let n = AnnealConfig::default().iteration_budget();
        assert!((1830..=1845).contains(&n), "budget {n}");
        let cold = AnnealConfig {
            initial_temperature: 1.0,
            ..AnnealConfig::default()
        };
        assert_eq!(cold.iteration_budget(), 0);
    }

    #[test]
    fn display_names_the_setting() {
        let e = ConfigError::InvalidTemperature {
            name: "temperature_floor",
            value: -2.0,
        };
        assert_eq!(
            e.to_string(),
            "temperature_floor must be finite and positive, got -2"
        );
    }
}
