//! Synthetic social graph generation
//!
//! Users are created first (names, keys, resumes), then every user samples
//! its followees from the complete key set. Randomness is derived from a
//! single seed so two runs with the same configuration produce the same
//! graph, independent of how rayon schedules the per-user work.

pub mod follows;
pub mod resume;

use crate::attributes::{AttributeKind, AttributeSource, CatalogSource};
use crate::config::{validate_bounds, GeneratorConfig};
use crate::error::{GenerationError, GenerationResult};
use crate::graph::{SocialGraph, User, UserKey};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Independent random streams carved out of one seed
#[derive(Debug, Clone, Copy)]
pub(crate) enum Stream {
    Names = 1,
    Resume = 2,
    Follows = 3,
}

/// Derive the seed of one per-user random stream (splitmix64 finalizer)
pub(crate) fn derive_seed(seed: u64, stream: Stream, index: u64) -> u64 {
    let mut z = seed
        .wrapping_add((stream as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(index.wrapping_mul(0xD1B5_4A32_D192_ED03));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub(crate) fn stream_rng(seed: u64, stream: Stream, index: u64) -> StdRng {
    StdRng::seed_from_u64(derive_seed(seed, stream, index))
}

/// Builds users and follow edges from an attribute source
pub struct GraphGenerator {
    config: GeneratorConfig,
    source: Arc<dyn AttributeSource>,
    /// Deduplicated skill catalog, in configured order
    catalog: Vec<String>,
}

impl GraphGenerator {
    /// Generator using the built-in word lists
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_source(config, Arc::new(CatalogSource::new()))
    }

    pub fn with_source(config: GeneratorConfig, source: Arc<dyn AttributeSource>) -> Self {
        let mut seen = HashSet::new();
        let catalog = config
            .skills
            .iter()
            .filter(|s| seen.insert(s.as_str()))
            .cloned()
            .collect();
        Self {
            config,
            source,
            catalog,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a graph using the configured population and degree bounds
    pub fn generate(&self) -> GenerationResult<SocialGraph> {
        self.generate_graph(
            self.config.population_size,
            self.config.min_out_degree,
            self.config.max_out_degree,
        )
    }

    /// Generate `population_size` users, each following between
    /// `min_out_degree` and `max_out_degree` distinct other users.
    pub fn generate_graph(
        &self,
        population_size: usize,
        min_out_degree: usize,
        max_out_degree: usize,
    ) -> GenerationResult<SocialGraph> {
        validate_bounds(population_size, min_out_degree, max_out_degree)?;
        self.config.validate_resume_shape()?;

        info!(
            "Generating social graph: {} users, out-degree {}..={}, seed {}",
            population_size, min_out_degree, max_out_degree, self.config.seed
        );

        let names = self.draw_names(population_size)?;
        let users = self.build_users(names);
        let keys: Vec<UserKey> = users.iter().map(|u| u.key).collect();
        let follows = follows::sample_follows(&keys, min_out_degree, max_out_degree, self.config.seed)?;

        info!(
            "Generated {} users and {} follow relationships",
            users.len(),
            follows.len()
        );

        Ok(SocialGraph { users, follows })
    }

    /// Draw distinct names until `count` are collected, resampling on collision
    fn draw_names(&self, count: usize) -> GenerationResult<Vec<String>> {
        let max_attempts = count.saturating_mul(self.config.max_draws_per_user);
        let mut rng = stream_rng(self.config.seed, Stream::Names, 0);
        let mut seen: HashSet<String> = HashSet::with_capacity(count);
        let mut names = Vec::with_capacity(count);
        let mut attempts = 0;

        while names.len() < count {
            if attempts >= max_attempts {
                return Err(GenerationError::GenerationExhausted {
                    requested: count,
                    produced: names.len(),
                    attempts,
                });
            }
            attempts += 1;

            let name = self.source.next_value(AttributeKind::Name, &mut rng);
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }

        debug!(
            "Drew {} distinct names in {} attempts ({} collisions)",
            count,
            attempts,
            attempts - count
        );
        Ok(names)
    }

    /// Assign sequential keys and fill in each resume in parallel
    fn build_users(&self, names: Vec<String>) -> Vec<User> {
        names
            .into_par_iter()
            .enumerate()
            .map(|(idx, name)| {
                let key = UserKey::new(idx as u64 + 1);
                let mut rng = stream_rng(self.config.seed, Stream::Resume, key.as_u64());
                resume::fill_resume(
                    User::new(key, name),
                    self.source.as_ref(),
                    &self.config,
                    &self.catalog,
                    &mut rng,
                )
            })
            .collect()
    }
}

/// Generate a graph with the built-in attribute source
pub fn generate_graph(
    population_size: usize,
    min_out_degree: usize,
    max_out_degree: usize,
) -> GenerationResult<SocialGraph> {
    GraphGenerator::new(GeneratorConfig::default()).generate_graph(
        population_size,
        min_out_degree,
        max_out_degree,
    )
}
