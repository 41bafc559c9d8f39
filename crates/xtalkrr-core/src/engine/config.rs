//! Model configuration.
//!
//! Two configuration shapes cover the three model variants: both
//! Coulomb-matrix models take `{lambda, sigma}`, the PRDF model additionally
//! takes `{cutoff, n_bins}`. Every parameter is validated before any
//! computation proceeds; invalid values are never silently corrected.
//! Configurations can be assembled through the builders or loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter '{name}' must be positive (got {value})")]
    NotPositive { name: &'static str, value: f64 },

    #[error("Parameter 'n_bins' must be at least 1")]
    ZeroBins,

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

const DEFAULT_SIGMA: f64 = 1.0;
const DEFAULT_CUTOFF: f64 = 7.0; // Angstroms
const DEFAULT_N_BINS: usize = 25;

fn default_sigma() -> f64 {
    DEFAULT_SIGMA
}

fn default_cutoff() -> f64 {
    DEFAULT_CUTOFF
}

fn default_n_bins() -> usize {
    DEFAULT_N_BINS
}

/// Configuration for the sine-matrix and Ewald-matrix KRR models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoulombConfig {
    /// Ridge regularization added to the kernel-matrix diagonal.
    pub lambda: f64,
    /// Width of the Laplacian eigenvalue kernel.
    #[serde(default = "default_sigma")]
    pub sigma: f64,
}

impl CoulombConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("lambda", self.lambda)?;
        require_positive("sigma", self.sigma)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

/// Configuration for the PRDF KRR model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrdfConfig {
    /// Ridge regularization added to the kernel-matrix diagonal.
    pub lambda: f64,
    /// Width of the PRDF squared-difference kernel.
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    /// PRDF interaction distance cutoff, in Angstroms.
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    /// PRDF histogram resolution.
    #[serde(default = "default_n_bins")]
    pub n_bins: usize,
}

impl PrdfConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("lambda", self.lambda)?;
        require_positive("sigma", self.sigma)?;
        require_positive("cutoff", self.cutoff)?;
        if self.n_bins == 0 {
            return Err(ConfigError::ZeroBins);
        }
        Ok(())
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

#[derive(Default)]
pub struct CoulombConfigBuilder {
    lambda: Option<f64>,
    sigma: Option<f64>,
}

impl CoulombConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lambda(mut self, lambda: f64) -> Self {
        self.lambda = Some(lambda);
        self
    }

    pub fn sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }

    pub fn build(self) -> Result<CoulombConfig, ConfigError> {
        let config = CoulombConfig {
            lambda: self.lambda.ok_or(ConfigError::MissingParameter("lambda"))?,
            sigma: self.sigma.unwrap_or(DEFAULT_SIGMA),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Default)]
pub struct PrdfConfigBuilder {
    lambda: Option<f64>,
    sigma: Option<f64>,
    cutoff: Option<f64>,
    n_bins: Option<usize>,
}

impl PrdfConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lambda(mut self, lambda: f64) -> Self {
        self.lambda = Some(lambda);
        self
    }

    pub fn sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn n_bins(mut self, n_bins: usize) -> Self {
        self.n_bins = Some(n_bins);
        self
    }

    pub fn build(self) -> Result<PrdfConfig, ConfigError> {
        let config = PrdfConfig {
            lambda: self.lambda.ok_or(ConfigError::MissingParameter("lambda"))?,
            sigma: self.sigma.unwrap_or(DEFAULT_SIGMA),
            cutoff: self.cutoff.unwrap_or(DEFAULT_CUTOFF),
            n_bins: self.n_bins.unwrap_or(DEFAULT_N_BINS),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn coulomb_builder_requires_lambda() {
        let result = CoulombConfigBuilder::new().sigma(1.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingParameter("lambda"))
        ));
    }

    #[test]
    fn coulomb_builder_defaults_sigma_to_one() {
        let config = CoulombConfigBuilder::new().lambda(0.01).build().unwrap();
        assert_eq!(config.sigma, 1.0);
    }

    #[test]
    fn non_positive_parameters_are_rejected() {
        assert!(matches!(
            CoulombConfigBuilder::new().lambda(0.0).build(),
            Err(ConfigError::NotPositive { name: "lambda", .. })
        ));
        assert!(matches!(
            CoulombConfigBuilder::new().lambda(0.1).sigma(-2.0).build(),
            Err(ConfigError::NotPositive { name: "sigma", .. })
        ));
        assert!(matches!(
            PrdfConfigBuilder::new().lambda(0.1).cutoff(0.0).build(),
            Err(ConfigError::NotPositive { name: "cutoff", .. })
        ));
    }

    #[test]
    fn zero_bins_are_rejected() {
        let result = PrdfConfigBuilder::new().lambda(0.1).n_bins(0).build();
        assert!(matches!(result, Err(ConfigError::ZeroBins)));
    }

    #[test]
    fn prdf_builder_applies_the_documented_defaults() {
        let config = PrdfConfigBuilder::new().lambda(0.01).build().unwrap();
        assert_eq!(config.sigma, 1.0);
        assert_eq!(config.cutoff, 7.0);
        assert_eq!(config.n_bins, 25);
    }

    #[test]
    fn prdf_config_parses_from_toml() {
        let config = PrdfConfig::from_toml_str(
            r#"
            lambda = 0.01
            sigma = 2.0
            cutoff = 6.5
            n_bins = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.lambda, 0.01);
        assert_eq!(config.sigma, 2.0);
        assert_eq!(config.cutoff, 6.5);
        assert_eq!(config.n_bins, 30);
    }

    #[test]
    fn toml_defaults_fill_missing_optional_fields() {
        let config = CoulombConfig::from_toml_str("lambda = 0.5").unwrap();
        assert_eq!(config.sigma, 1.0);
    }

    #[test]
    fn invalid_toml_values_fail_validation() {
        assert!(matches!(
            CoulombConfig::from_toml_str("lambda = -1.0"),
            Err(ConfigError::NotPositive { name: "lambda", .. })
        ));
        assert!(matches!(
            CoulombConfig::from_toml_str("sigma = 1.0"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn config_loads_from_a_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "lambda = 0.02\nsigma = 0.5").unwrap();

        let config = CoulombConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.lambda, 0.02);
        assert_eq!(config.sigma, 0.5);

        assert!(matches!(
            CoulombConfig::from_toml_file(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
