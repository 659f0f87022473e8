use proptest::prelude::*;
use socialgraph::algo::{build_view_from_graph, friends_of_friends, view_index};
use socialgraph::{GeneratorConfig, GraphGenerator, SocialGraph, UserKey};
use std::collections::{BTreeMap, BTreeSet, HashSet};

fn generate(population: usize, min: usize, max: usize, seed: u64) -> SocialGraph {
    let config = GeneratorConfig {
        population_size: population,
        min_out_degree: min,
        max_out_degree: max,
        seed,
        ..GeneratorConfig::default()
    };
    GraphGenerator::new(config).generate().unwrap()
}

/// (population, min, max) with 0 <= min <= max < population
fn bounds() -> impl Strategy<Value = (usize, usize, usize)> {
    (2usize..60).prop_flat_map(|n| {
        (0..n).prop_flat_map(move |max| (Just(n), 0..=max, Just(max)))
    })
}

fn adjacency(graph: &SocialGraph) -> BTreeMap<UserKey, BTreeSet<UserKey>> {
    let mut out: BTreeMap<UserKey, BTreeSet<UserKey>> = BTreeMap::new();
    for edge in &graph.follows {
        out.entry(edge.follower).or_default().insert(edge.followee);
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn edges_are_simple((n, min, max) in bounds(), seed in any::<u64>()) {
        let graph = generate(n, min, max, seed);
        prop_assert_eq!(graph.user_count(), n);

        let mut pairs = HashSet::new();
        for edge in &graph.follows {
            prop_assert_ne!(edge.follower, edge.followee);
            prop_assert!(pairs.insert(edge.as_pair()));
        }

        let degrees = graph.out_degrees();
        for user in &graph.users {
            let degree = degrees.get(&user.key).copied().unwrap_or(0);
            prop_assert!(degree >= min && degree <= max.min(n - 1));
        }
    }

    #[test]
    fn users_are_well_formed((n, min, max) in bounds(), seed in any::<u64>()) {
        let graph = generate(n, min, max, seed);
        let keys: HashSet<UserKey> = graph.users.iter().map(|u| u.key).collect();
        prop_assert_eq!(keys.len(), n);

        let catalog: HashSet<String> = GeneratorConfig::default().skills.into_iter().collect();
        for user in &graph.users {
            prop_assert!(!user.skills.is_empty() && user.skills.len() <= 10);
            prop_assert!(user.skills.iter().all(|s| catalog.contains(s.as_str())));
            prop_assert!(!user.education.is_empty());
            prop_assert!(user.positions.iter().all(|p| p.end_date > p.start_date));
            prop_assert!(user.education.iter().all(|e| e.end_date > e.start_date));
        }
    }

    #[test]
    fn same_seed_same_graph((n, min, max) in bounds(), seed in any::<u64>()) {
        prop_assert_eq!(generate(n, min, max, seed), generate(n, min, max, seed));
    }

    #[test]
    fn friends_of_friends_matches_definition((n, min, max) in bounds(), seed in any::<u64>()) {
        let graph = generate(n, min, max, seed);
        let view = build_view_from_graph(&graph);
        let out = adjacency(&graph);
        let empty = BTreeSet::new();

        for user in &graph.users {
            let direct = out.get(&user.key).unwrap_or(&empty);
            let expected: BTreeSet<u64> = direct
                .iter()
                .flat_map(|middle| out.get(middle).unwrap_or(&empty).iter())
                .filter(|w| **w != user.key && !direct.contains(w))
                .map(|w| w.as_u64())
                .collect();

            let idx = view_index(&view, user.key).unwrap();
            let actual: BTreeSet<u64> = friends_of_friends(&view, idx).into_iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
