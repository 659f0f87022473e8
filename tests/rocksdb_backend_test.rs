#![cfg(feature = "rocksdb")]

use socialgraph::{
    load_snapshot, AnalyticsEngine, GeneratorConfig, GraphGenerator, InMemoryBackend, LoaderConfig,
    ResumeFilter, RocksBackend,
};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_backends_agree() {
    let graph = GraphGenerator::new(GeneratorConfig {
        population_size: 120,
        min_out_degree: 2,
        max_out_degree: 9,
        seed: 77,
        ..GeneratorConfig::default()
    })
    .generate()
    .unwrap();
    let loader = LoaderConfig { batch_size: 50, ..LoaderConfig::default() };

    let memory = Arc::new(InMemoryBackend::new());
    load_snapshot(memory.as_ref(), &graph, &loader).await.unwrap();

    let dir = TempDir::new().unwrap();
    let rocks = Arc::new(RocksBackend::open(dir.path()).unwrap());
    load_snapshot(rocks.as_ref(), &graph, &loader).await.unwrap();

    let a = AnalyticsEngine::new(memory);
    let b = AnalyticsEngine::new(rocks);

    assert_eq!(a.stats().await.unwrap(), b.stats().await.unwrap());
    assert_eq!(a.skill_counts().await.unwrap(), b.skill_counts().await.unwrap());
    for threshold in [0, 1, 3, 5] {
        assert_eq!(
            a.influential_followers(threshold).await.unwrap(),
            b.influential_followers(threshold).await.unwrap()
        );
    }
    for user in graph.users.iter().take(20) {
        assert_eq!(
            a.friends_of_friends(user.key).await.unwrap(),
            b.friends_of_friends(user.key).await.unwrap()
        );
        assert_eq!(a.followers_of(user.key).await.unwrap(), b.followers_of(user.key).await.unwrap());
        assert_eq!(a.resume(user.key).await.unwrap(), b.resume(user.key).await.unwrap());
    }
    for (_, filter) in ResumeFilter::showcase() {
        assert_eq!(a.count_resumes(&filter).await.unwrap(), b.count_resumes(&filter).await.unwrap());
    }
}
