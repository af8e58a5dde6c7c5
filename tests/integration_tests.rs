use httpmock::prelude::*;
use rocks_id::core::ConfigProvider;
use rocks_id::index::{NameNumberIndex, INDEX_FILE};
use rocks_id::utils::export;
use rocks_id::{
    Identifier, QuaeroClient, ResolveOptions, Resolver, ResolverEngine, Settings,
};
use std::path::Path;
use tempfile::TempDir;

fn seed_cache(cache_dir: &Path) {
    let document = serde_json::json!({
        "version": 1,
        "built": "2026-06-01T00:00:00Z",
        "bodies": [
            {"name": "Ceres", "number": 1, "id": "Ceres", "aliases": ["1943 XB"]},
            {"name": "Vesta", "number": 4, "id": "Vesta", "aliases": []}
        ]
    });
    std::fs::write(
        cache_dir.join(INDEX_FILE),
        serde_json::to_vec(&document).unwrap(),
    )
    .unwrap();
}

fn settings_for(server: &MockServer, cache_dir: &Path) -> Settings {
    Settings {
        endpoint: server.base_url(),
        cache_dir: cache_dir.to_path_buf(),
        retry_attempts: 0,
        ..Settings::default()
    }
}

#[tokio::test]
async fn test_mixed_batch_resolves_locally_and_remotely() {
    let cache = TempDir::new().unwrap();
    seed_cache(cache.path());

    let server = MockServer::start();
    let pallas_mock = server.mock(|when, then| {
        when.method(GET).path("/search").query_param("q", "pallas");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "total": 1,
                "data": [
                    {"id": "Pallas", "name": "Pallas", "type": "Asteroid",
                     "aliases": ["2", "1802 F"]}
                ]
            }));
    });
    let miss_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("q", "doesnotexist123");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"total": 0, "data": []}));
    });

    let settings = settings_for(&server, cache.path());
    let index = NameNumberIndex::load_from_cache(settings.cache_dir()).unwrap();
    let client = QuaeroClient::from_config(&settings).unwrap();
    let engine = ResolverEngine::new(Resolver::new(index, client));

    let identifiers = vec![
        Identifier::from("Ceres"),
        Identifier::from("Pallas"),
        Identifier::from("doesnotexist123"),
        Identifier::from(4.0),
    ];
    let options = ResolveOptions {
        return_id: true,
        ..ResolveOptions::default()
    };
    let results = engine.run(identifiers, &options).await.unwrap();

    // One result per input, input order
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].to_string(), "(1) Ceres");
    assert_eq!(results[1].to_string(), "(2) Pallas");
    assert_eq!(results[1].id.as_deref(), Some("Pallas"));
    assert_eq!(results[2].to_string(), "not found");
    assert_eq!(results[3].to_string(), "(4) Vesta");

    // Local hits never reached the network
    pallas_mock.assert_hits(1);
    miss_mock.assert_hits(1);
}

#[tokio::test]
async fn test_remote_outage_degrades_to_per_element_soft_failure() {
    let cache = TempDir::new().unwrap();
    seed_cache(cache.path());

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(500);
    });

    let settings = settings_for(&server, cache.path());
    let index = NameNumberIndex::load_from_cache(settings.cache_dir()).unwrap();
    let client = QuaeroClient::from_config(&settings).unwrap();
    let engine = ResolverEngine::new(Resolver::new(index, client));

    let identifiers = vec![
        Identifier::from("Ceres"),
        Identifier::from("Pallas"),
        Identifier::from("Vesta"),
    ];
    let results = engine
        .run(identifiers, &ResolveOptions::default())
        .await
        .unwrap();

    // The batch survives the outage, local hits still resolve
    assert_eq!(results.len(), 3);
    assert!(results[0].is_resolved());
    assert!(!results[1].is_resolved());
    assert!(results[2].is_resolved());
}

#[tokio::test]
async fn test_external_ids_stay_blank_unless_requested() {
    let cache = TempDir::new().unwrap();
    seed_cache(cache.path());

    let server = MockServer::start();
    let settings = settings_for(&server, cache.path());
    let index = NameNumberIndex::load_from_cache(settings.cache_dir()).unwrap();
    let client = QuaeroClient::from_config(&settings).unwrap();
    let resolver = Resolver::new(index, client);

    let result = resolver
        .resolve_one("Ceres", &ResolveOptions::default())
        .await;

    assert_eq!(result.name.as_deref(), Some("Ceres"));
    assert_eq!(result.number, Some(1));
    assert_eq!(result.id, None);
}

#[tokio::test]
async fn test_resolved_batch_exports_to_csv() {
    let cache = TempDir::new().unwrap();
    seed_cache(cache.path());
    let output_dir = TempDir::new().unwrap();
    let output_path = output_dir.path().join("results.csv");

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"total": 0, "data": []}));
    });

    let settings = settings_for(&server, cache.path());
    let index = NameNumberIndex::load_from_cache(settings.cache_dir()).unwrap();
    let client = QuaeroClient::from_config(&settings).unwrap();
    let engine = ResolverEngine::new(Resolver::new(index, client));

    let identifiers = vec![Identifier::from("Ceres"), Identifier::from("doesnotexist123")];
    let options = ResolveOptions {
        return_id: true,
        ..ResolveOptions::default()
    };
    let results = engine.run(identifiers, &options).await.unwrap();
    export::write_csv(&output_path, &results).unwrap();

    let contents = std::fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "name,number,id");
    assert_eq!(lines[1], "Ceres,1,Ceres");
    assert_eq!(lines[2], ",,");
}

#[tokio::test]
async fn test_update_installs_a_fresh_index() {
    let cache = TempDir::new().unwrap();

    let server = MockServer::start();
    let index_mock = server.mock(|when, then| {
        when.method(GET).path("/index");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "version": 1,
                "built": "2026-07-01T00:00:00Z",
                "bodies": [
                    {"name": "Juno", "number": 3, "id": "Juno", "aliases": []}
                ]
            }));
    });

    let settings = settings_for(&server, cache.path());
    let client = QuaeroClient::from_config(&settings).unwrap();

    // Nothing cached yet
    assert!(NameNumberIndex::load_from_cache(settings.cache_dir())
        .unwrap()
        .is_none());

    let raw = client.fetch_index(&settings.index_url()).await.unwrap();
    NameNumberIndex::install(settings.cache_dir(), &raw).unwrap();

    index_mock.assert();
    let index = NameNumberIndex::load_from_cache(settings.cache_dir())
        .unwrap()
        .unwrap();
    assert_eq!(index.len(), 1);

    // The freshly installed index answers local lookups
    let resolver = Resolver::new(
        Some(index),
        QuaeroClient::from_config(&settings).unwrap(),
    );
    let result = resolver
        .resolve_one("Juno", &ResolveOptions::default())
        .await;
    assert_eq!(result.number, Some(3));
}
