//! End-to-end happy path test.
//!
//! Runs the catalog API against a real MongoDB and validates:
//!
//! 1. An empty catalog lists as `[]`
//! 2. Create returns the stored record with a store-assigned ID
//! 3. Lookup by title finds it
//! 4. Update changes the fields and keeps the ID
//! 5. Repeating the update returns the same record (zero modifications)
//! 6. Updating an unknown ID is 404
//!
//! ## Running
//!
//! Requires Docker:
//!
//! ```bash
//! cargo test -p dvd-e2e --test happy_path -- --ignored
//! ```

use std::sync::Arc;
use std::time::Duration;

use dvd_catalog::{
    api,
    db::{Database, DbConfig},
    films::FilmService,
    state::AppState,
};
use dvd_id::FilmId;
use serde_json::{json, Value};
use testcontainers::{core::IntoContainerPort, runners::AsyncRunner, GenericImage};
use tokio::net::TcpListener;

async fn connect_when_ready(config: &DbConfig) -> Database {
    let max_wait = Duration::from_secs(30);
    let start = std::time::Instant::now();

    loop {
        match Database::connect(config).await {
            Ok(db) => return db,
            Err(e) => {
                if start.elapsed() > max_wait {
                    panic!("mongodb did not become ready within {max_wait:?}: {e}");
                }
                tokio::time::sleep(Duration::from_millis(250)).await;
            }
        }
    }
}

#[tokio::test]
#[ignore = "requires Docker for the MongoDB container"]
async fn e2e_happy_path_create_lookup_update() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dvd_catalog=debug,mongodb=warn".into()),
        )
        .with_test_writer()
        .try_init();

    // Start MongoDB via testcontainer.
    let mongo = GenericImage::new("mongo", "7")
        .with_exposed_port(27017.tcp())
        .start()
        .await
        .expect("failed to start mongodb container");

    let port = mongo
        .get_host_port_ipv4(27017.tcp())
        .await
        .expect("failed to resolve mongodb host port");

    let db_config = DbConfig {
        uri: format!("mongodb://127.0.0.1:{port}/?directConnection=true"),
        database: "dvd_e2e".to_string(),
        ..Default::default()
    };
    let db = connect_when_ready(&db_config).await;

    let films = FilmService::new(Arc::new(db.films()));
    let app = api::create_router(AppState::new(films));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();

    // 1. Empty catalog.
    let resp = client.get(format!("{base_url}/films")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let listed: Vec<Value> = resp.json().await.unwrap();
    assert!(listed.is_empty());

    // 2. Create.
    let resp = client
        .post(format!("{base_url}/film"))
        .json(&json!({
            "title": "Test Film",
            "year": 2023,
            "location": "Test City",
            "available": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "create failed");
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["title"], "Test Film");
    let id = created["id"].as_str().expect("missing id").to_string();
    FilmId::parse(&id).expect("store-assigned id should be well-formed");
    tracing::info!(film_id = %id, "Created film");

    // 3. Lookup by title.
    let resp = client
        .get(format!("{base_url}/film/Test%20Film"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let found: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(found, vec![created.clone()]);

    // 4. Update.
    let update_body = json!({
        "title": "Updated Test Film",
        "year": 2024,
        "location": "New Test City",
        "available": false
    });
    let resp = client
        .put(format!("{base_url}/film/{id}"))
        .json(&update_body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "update failed");
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["title"], "Updated Test Film");
    assert_eq!(updated["year"], 2024);
    assert_eq!(updated["location"], "New Test City");
    assert_eq!(updated["available"], false);

    // 5. Same update again: nothing modified, still 200.
    let resp = client
        .put(format!("{base_url}/film/{id}"))
        .json(&update_body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "repeated update must not be 404");
    let repeated: Value = resp.json().await.unwrap();
    assert_eq!(repeated, updated);

    // 6. Unknown id.
    let resp = client
        .put(format!("{base_url}/film/{}", FilmId::new()))
        .json(&update_body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    db.shutdown().await;
    drop(mongo);
}
