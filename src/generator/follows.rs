//! Follow edge sampling

use super::{stream_rng, Stream};
use crate::error::{GenerationError, GenerationResult};
use crate::graph::{Follow, UserKey};
use rand::seq::index;
use rand::Rng;
use rayon::prelude::*;

/// Sample follow edges for every user.
///
/// Each user draws an out-degree uniformly from `[min_out_degree,
/// max_out_degree]`, clamped to `keys.len() - 1`, then picks that many
/// distinct followees among the other users without replacement. Edges are
/// returned grouped by follower in key order.
///
/// Fails with `InvalidParameter` when `min_out_degree > max_out_degree`.
pub fn sample_follows(
    keys: &[UserKey],
    min_out_degree: usize,
    max_out_degree: usize,
    seed: u64,
) -> GenerationResult<Vec<Follow>> {
    if min_out_degree > max_out_degree {
        return Err(GenerationError::InvalidParameter(format!(
            "min_out_degree {} exceeds max_out_degree {}",
            min_out_degree, max_out_degree
        )));
    }
    let population = keys.len();
    if population < 2 {
        return Ok(Vec::new());
    }
    let cap = population - 1;

    let per_user: Vec<Vec<Follow>> = (0..population)
        .into_par_iter()
        .map(|self_idx| {
            let follower = keys[self_idx];
            let mut rng = stream_rng(seed, Stream::Follows, follower.as_u64());
            let degree = rng.gen_range(min_out_degree..=max_out_degree).min(cap);

            // sample positions among the other users, then skip over self
            index::sample(&mut rng, cap, degree)
                .into_iter()
                .map(|i| if i >= self_idx { i + 1 } else { i })
                .map(|target_idx| Follow {
                    follower,
                    followee: keys[target_idx],
                })
                .collect()
        })
        .collect();

    Ok(per_user.into_iter().flatten().collect())
}
