use std::sync::Arc;

use futures::StreamExt;
use shared::domain::Contact;
use storage::{ContactStore, Storage};

#[tokio::test]
async fn concurrent_writers_end_with_consistent_snapshot() {
    let storage = Arc::new(Storage::new("sqlite::memory:").await.expect("db"));
    let mut observer = storage.select_all();
    assert!(observer.next().await.expect("initial").is_empty());

    let mut tasks = Vec::new();
    for i in 0..8 {
        let storage = Arc::clone(&storage);
        tasks.push(tokio::spawn(async move {
            storage
                .insert(&Contact::new(
                    format!("contact-{i}"),
                    format!("555-000{i}"),
                    format!("c{i}@example.com"),
                ))
                .await
        }));
    }
    for task in tasks {
        task.await.expect("join").expect("insert");
    }

    // Watch semantics may coalesce intermediate snapshots; the latest is always delivered.
    let latest = storage.list_contacts().await.expect("list");
    assert_eq!(latest.len(), 8);
    let mut seen = observer.next().await.expect("snapshot");
    while seen.len() < latest.len() {
        seen = observer.next().await.expect("snapshot");
    }
    assert_eq!(seen, latest);
}

#[tokio::test]
async fn on_disk_store_survives_reopen() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("contacts.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let id = {
        let storage = Storage::new(&database_url).await.expect("open");
        let id = storage
            .insert(&Contact::new("Ann", "555", "a@b.com"))
            .await
            .expect("insert");
        storage.pool().close().await;
        id
    };

    let reopened = Storage::new(&database_url).await.expect("reopen");
    let mut stream = reopened.select_all();
    let snapshot = stream.next().await.expect("initial");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, id);
    assert_eq!(snapshot[0].name, "Ann");
}
