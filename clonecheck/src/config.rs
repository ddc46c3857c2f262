//! Tuning for the built-in generators and mutators.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Verifier configuration (TOML).
///
/// Missing fields take their defaults, which reproduce the standard value
/// sequences used by the built-in handlers.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerifierConfig {
    /// Factor the built-in mutators multiply numbers by.
    pub mutation_factor: i32,

    /// Initial string counter and slice-length multiplier of the built-in
    /// generators.
    pub seed: usize,
}

/// Largest accepted `seed`; sequence lengths and string sizes grow with it.
pub const MAX_SEED: usize = 64;

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            mutation_factor: 2,
            seed: 2,
        }
    }
}

impl VerifierConfig {
    pub fn validate(&self) -> Result<()> {
        if matches!(self.mutation_factor, -1..=1) {
            return Err(anyhow!(
                "mutation_factor must not be -1, 0 or 1 (got {})",
                self.mutation_factor
            ));
        }
        if self.seed == 0 || self.seed > MAX_SEED {
            return Err(anyhow!(
                "seed must be in 1..={MAX_SEED} (got {})",
                self.seed
            ));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `VerifierConfig::default()`.
pub fn load_config(path: &Path) -> Result<VerifierConfig> {
    if !path.exists() {
        let cfg = VerifierConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: VerifierConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, VerifierConfig::default());
    }

    /// Unset keys keep their defaults.
    #[test]
    fn load_partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("clonecheck.toml");
        fs::write(&path, "mutation_factor = 3\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(
            cfg,
            VerifierConfig {
                mutation_factor: 3,
                seed: 2,
            }
        );
    }

    /// A unit factor would make every mutation a no-op.
    #[test]
    fn load_rejects_unit_factor() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("clonecheck.toml");
        fs::write(&path, "mutation_factor = 1\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(format!("{err:#}").contains("mutation_factor"));
    }

    #[test]
    fn validate_rejects_zero_seed() {
        let cfg = VerifierConfig {
            seed: 0,
            ..VerifierConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_seed() {
        let cfg = VerifierConfig {
            seed: 1 << 62,
            ..VerifierConfig::default()
        };
        let err = cfg.validate().expect_err("seed too large");
        assert!(err.to_string().contains("seed"));

        let cfg = VerifierConfig {
            seed: MAX_SEED,
            ..VerifierConfig::default()
        };
        cfg.validate().expect("largest seed is accepted");
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("broken.toml");
        fs::write(&path, "seed = \"many\"\n").expect("write");
        let err = load_config(&path).expect_err("parse");
        assert!(format!("{err:#}").contains("broken.toml"));
    }
}
