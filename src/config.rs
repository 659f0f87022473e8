//! Configuration
//!
//! All settings have defaults, so an empty YAML document (or no file at all)
//! yields a usable configuration.

use crate::attributes::DEFAULT_SKILLS;
use crate::error::{ConfigError, GenerationError, GenerationResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive `[min, max]` count range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: usize) -> bool {
        self.min <= value && value <= self.max
    }

    fn validate(&self, field: &str) -> GenerationResult<()> {
        if self.min > self.max {
            return Err(GenerationError::InvalidParameter(format!(
                "{}: min {} exceeds max {}",
                field, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Graph generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of users to generate
    pub population_size: usize,
    pub min_out_degree: usize,
    pub max_out_degree: usize,
    /// Skill catalog users draw from
    pub skills: Vec<String>,
    pub skills_per_user: CountRange,
    pub positions_per_user: CountRange,
    pub education_per_user: CountRange,
    /// Name draws allowed per requested user before giving up
    pub max_draws_per_user: usize,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            population_size: 10_000,
            min_out_degree: 5,
            max_out_degree: 20,
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            skills_per_user: CountRange::new(1, 10),
            positions_per_user: CountRange::new(1, 3),
            education_per_user: CountRange::new(1, 1),
            max_draws_per_user: 32,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Check the graph bounds and resume shape settings
    pub fn validate(&self) -> GenerationResult<()> {
        validate_bounds(self.population_size, self.min_out_degree, self.max_out_degree)?;
        self.validate_resume_shape()
    }

    /// Check everything except the graph bounds
    pub fn validate_resume_shape(&self) -> GenerationResult<()> {
        if self.skills.is_empty() {
            return Err(GenerationError::InvalidParameter(
                "skills: catalog must not be empty".to_string(),
            ));
        }
        self.skills_per_user.validate("skills_per_user")?;
        if self.skills_per_user.min == 0 {
            return Err(GenerationError::InvalidParameter(
                "skills_per_user: every user needs at least one skill".to_string(),
            ));
        }
        self.positions_per_user.validate("positions_per_user")?;
        self.education_per_user.validate("education_per_user")?;
        if self.education_per_user.min == 0 {
            return Err(GenerationError::InvalidParameter(
                "education_per_user: every user needs at least one education record".to_string(),
            ));
        }
        if self.max_draws_per_user == 0 {
            return Err(GenerationError::InvalidParameter(
                "max_draws_per_user must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Check `population_size >= 2` and `min <= max < population_size`
pub fn validate_bounds(
    population_size: usize,
    min_out_degree: usize,
    max_out_degree: usize,
) -> GenerationResult<()> {
    if population_size < 2 {
        return Err(GenerationError::InvalidParameter(format!(
            "population_size must be at least 2, got {}",
            population_size
        )));
    }
    if min_out_degree > max_out_degree {
        return Err(GenerationError::InvalidParameter(format!(
            "min_out_degree {} exceeds max_out_degree {}",
            min_out_degree, max_out_degree
        )));
    }
    if max_out_degree >= population_size {
        return Err(GenerationError::InvalidParameter(format!(
            "max_out_degree {} must be below population_size {}",
            max_out_degree, population_size
        )));
    }
    Ok(())
}

/// Bulk load settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Records per batch handed to the backend
    pub batch_size: usize,
    /// Full purge-and-reload attempts before a load failure is returned
    pub max_load_attempts: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 1_000,
            max_load_attempts: 3,
        }
    }
}

/// Analytics settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Threshold for the influential-followers report
    pub min_followers: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { min_followers: 12 }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub generator: GeneratorConfig,
    pub loader: LoaderConfig,
    pub analytics: AnalyticsConfig,
}

impl SocialConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SocialConfig::default();
        assert_eq!(config.generator.population_size, 10_000);
        assert_eq!(config.generator.min_out_degree, 5);
        assert_eq!(config.generator.max_out_degree, 20);
        assert_eq!(config.generator.skills.len(), 17);
        assert_eq!(config.analytics.min_followers, 12);
        assert!(config.generator.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
generator:
  population_size: 500
  max_out_degree: 8
  skills_per_user: { min: 3, max: 7 }
analytics:
  min_followers: 4
"#;
        let config = SocialConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.generator.population_size, 500);
        assert_eq!(config.generator.min_out_degree, 5);
        assert_eq!(config.generator.max_out_degree, 8);
        assert_eq!(config.generator.skills_per_user, CountRange::new(3, 7));
        assert_eq!(config.analytics.min_followers, 4);
        assert_eq!(config.loader, LoaderConfig::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(SocialConfig::from_yaml_str("  \n").unwrap(), SocialConfig::default());
    }

    #[test]
    fn test_bad_yaml() {
        let result = SocialConfig::from_yaml_str("generator: [1, 2");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SocialConfig::from_path("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("social.yaml");
        std::fs::write(&path, "loader:\n  batch_size: 64\n").unwrap();

        let config = SocialConfig::from_path(&path).unwrap();
        assert_eq!(config.loader.batch_size, 64);
        assert_eq!(config.loader.max_load_attempts, 3);
    }

    #[test]
    fn test_bounds_validation() {
        assert!(validate_bounds(2, 0, 1).is_ok());
        assert!(matches!(validate_bounds(1, 0, 0), Err(GenerationError::InvalidParameter(_))));
        assert!(matches!(validate_bounds(10, 5, 4), Err(GenerationError::InvalidParameter(_))));
        assert!(matches!(validate_bounds(10, 1, 10), Err(GenerationError::InvalidParameter(_))));
    }

    #[test]
    fn test_resume_shape_validation() {
        let mut config = GeneratorConfig::default();
        config.education_per_user = CountRange::new(0, 1);
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.skills.clear();
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.positions_per_user = CountRange::new(3, 1);
        assert!(config.validate().is_err());
    }
}
