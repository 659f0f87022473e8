//! Snapshot load pipeline
//!
//! purge -> vertex batches -> edge batches -> seal. Batches of one kind are
//! submitted concurrently; edges only start once every vertex batch has
//! landed. A load failure purges and reloads the whole snapshot.

use crate::backend::BulkLoader;
use crate::config::LoaderConfig;
use crate::error::{LoaderError, LoaderResult, Result};
use crate::generator::GraphGenerator;
use crate::graph::{GraphStats, SocialGraph};
use futures::future::try_join_all;
use tracing::{info, warn};

/// Load `graph` into `backend` as a fresh sealed snapshot.
///
/// Retries the full purge-and-load up to `config.max_load_attempts` times;
/// the last failure is returned unchanged.
pub async fn load_snapshot<B>(
    backend: &B,
    graph: &SocialGraph,
    config: &LoaderConfig,
) -> LoaderResult<GraphStats>
where
    B: BulkLoader + ?Sized,
{
    let max_attempts = config.max_load_attempts.max(1);
    let mut attempt = 1;

    loop {
        match load_once(backend, graph, config.batch_size).await {
            Ok(stats) => {
                info!(
                    "Loaded snapshot: {} users, {} follows (attempt {})",
                    stats.users, stats.follows, attempt
                );
                return Ok(stats);
            }
            Err(err) if attempt < max_attempts => {
                warn!(
                    "Snapshot load attempt {}/{} failed: {}; purging and retrying",
                    attempt, max_attempts, err
                );
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn load_once<B>(backend: &B, graph: &SocialGraph, batch_size: usize) -> LoaderResult<GraphStats>
where
    B: BulkLoader + ?Sized,
{
    let batch_size = batch_size.max(1);

    let removed = backend.purge_all().await?;
    if removed != GraphStats::default() {
        info!(
            "Purged previous snapshot: {} users, {} follows",
            removed.users, removed.follows
        );
    }

    let users: usize = try_join_all(
        graph
            .users
            .chunks(batch_size)
            .map(|chunk| backend.load_vertices(chunk)),
    )
    .await?
    .into_iter()
    .sum();

    let follows: usize = try_join_all(
        graph
            .follows
            .chunks(batch_size)
            .map(|chunk| backend.load_edges(chunk)),
    )
    .await?
    .into_iter()
    .sum();

    if users != graph.user_count() || follows != graph.follow_count() {
        return Err(LoaderError::Storage(format!(
            "backend accepted {} of {} users and {} of {} follows",
            users,
            graph.user_count(),
            follows,
            graph.follow_count()
        )));
    }

    backend.seal().await?;
    Ok(GraphStats { users, follows })
}

/// Generate a fresh graph and load it, replacing whatever the backend held
pub async fn regenerate<B>(
    generator: &GraphGenerator,
    backend: &B,
    config: &LoaderConfig,
) -> Result<SocialGraph>
where
    B: BulkLoader + ?Sized,
{
    let graph = generator.generate()?;
    load_snapshot(backend, &graph, config).await?;
    Ok(graph)
}
