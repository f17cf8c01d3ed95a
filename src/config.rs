//! How a search runs: worker count, read from code or from `LAZORS_WORKERS`.

use std::env;

use crate::error::ConfigError;

const ENV_WORKERS: &str = "LAZORS_WORKERS";

/// How a search should be run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SearchConfig {
    /// Worker threads. `0` and `1` both mean the sequential search, which always returns the same solution.
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

impl SearchConfig {
    /// A configuration using `workers` threads.
    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }

    /// Whether candidates will be spread over several threads.
    pub fn is_parallel(&self) -> bool {
        self.workers > 1
    }

    /// Read `LAZORS_WORKERS`, falling back to [`Default`] when it is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(ENV_WORKERS) {
            Ok(value) if !value.trim().is_empty() => Ok(Self::with_workers(parse_workers(&value)?)),
            _ => Ok(Self::default()),
        }
    }
}

/// Parse a worker count: a plain number, or `auto` for one per logical CPU.
pub fn parse_workers(value: &str) -> Result<usize, ConfigError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
        return Ok(num_cpus::get());
    }
    value.parse().map_err(|_| ConfigError::InvalidWorkers(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sequential() {
        assert!(!SearchConfig::default().is_parallel());
        assert!(!SearchConfig::with_workers(0).is_parallel());
        assert!(SearchConfig::with_workers(4).is_parallel());
    }

    #[test]
    fn worker_counts() {
        assert_eq!(parse_workers("3"), Ok(3));
        assert_eq!(parse_workers(" 8 "), Ok(8));
        assert_eq!(parse_workers("AUTO"), Ok(num_cpus::get()));
        assert_eq!(parse_workers("many"), Err(ConfigError::InvalidWorkers("many".to_string())));
        assert!(parse_workers("-2").is_err());
    }

    #[test]
    fn from_env_roundtrip() {
        let original = env::var(ENV_WORKERS).ok();

        env::remove_var(ENV_WORKERS);
        assert_eq!(SearchConfig::from_env(), Ok(SearchConfig::default()));

        env::set_var(ENV_WORKERS, "6");
        assert_eq!(SearchConfig::from_env(), Ok(SearchConfig::with_workers(6)));

        env::set_var(ENV_WORKERS, "lots");
        assert!(SearchConfig::from_env().is_err());

        match original {
            Some(value) => env::set_var(ENV_WORKERS, value),
            None => env::remove_var(ENV_WORKERS),
        }
    }
}
