use mongohaus::prelude::*;
use std::sync::{Arc, Mutex};

#[document(collection = "items")]
#[derive(PartialEq)]
pub struct Item {
    #[id]
    pub id: Option<ObjectId>,
    pub name: String,
    #[metadata]
    pub timestamps: SoftDeleteMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, SoftDeletable)]
#[soft_delete(collection = "accounts")]
pub struct Account {
    #[serde(rename = "_id")]
    pub handle: String,
    pub balance: i64,
    #[serde(default)]
    pub timestamps: SoftDeleteMetadata,
}

fn new_item(name: &str) -> Item {
    Item {
        id: None,
        name: name.to_string(),
        timestamps: SoftDeleteMetadata::default(),
    }
}

async fn remove_then_find_scenario<B: DocumentBackend>(
    repo: &SoftDeleteRepository<B>,
) -> anyhow::Result<()> {
    let mut item = new_item("a");
    let id = repo.insert(&mut item, "items").await?;

    let found: Item = repo.find(doc! { "name": "a" }, "items").await?;
    assert_eq!(found, item);

    repo.remove::<Item>(doc! { "name": "a" }, "items").await?;

    let err = repo
        .find::<Item>(doc! { "name": "a" }, "items")
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let raw = repo.find_raw(Selector::by_id(id), "items").await?;
    assert_eq!(raw.len(), 1);
    let timestamps = raw[0].get_document("timestamps")?;
    assert!(timestamps.get_datetime("deleted_at").is_ok());
    Ok(())
}

#[tokio::test]
async fn test_remove_then_find_in_memory() -> anyhow::Result<()> {
    let repo = SoftDeleteRepository::new(MemoryBackend::new());
    remove_then_find_scenario(&repo).await
}

#[tokio::test]
async fn test_derived_entity_with_string_identifier() -> anyhow::Result<()> {
    assert_eq!(Account::collection_name(), "accounts");
    assert_eq!(Account::metadata_key(), Some("timestamps"));

    let repo = SoftDeleteRepository::new(MemoryBackend::new());
    let accounts = repo.store::<Account>();

    let mut alice = Account {
        handle: "alice".to_string(),
        balance: 10,
        timestamps: SoftDeleteMetadata::default(),
    };
    let id = accounts.insert(&mut alice).await?;
    assert_eq!(id, Bson::String("alice".to_string()));

    alice.balance = 25;
    accounts.update(&mut alice).await?;

    let stored = accounts.find_by_id("alice").await?;
    assert_eq!(stored.balance, 25);
    assert!(stored.timestamps.updated_at.is_some());

    let mut duplicate = alice.clone();
    let err = accounts.insert(&mut duplicate).await.unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));

    accounts.remove_hard(Selector::by_id("alice")).await?;
    assert!(accounts.find_raw(Selector::all()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_bulk_removal_events_carry_counts() -> anyhow::Result<()> {
    let signals = Arc::new(SignalManager::new());
    let events: Arc<Mutex<Vec<DocumentEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    signals.add_callback(move |event| {
        if event.is_removal() {
            sink.lock().unwrap().push(event.clone());
        }
    });

    let repo = SoftDeleteRepository::new(MemoryBackend::new()).with_signals(signals);
    let items = repo.store::<Item>();
    for name in ["a", "b", "c"] {
        items.insert(&mut new_item(name)).await?;
    }
    items.remove(doc! { "name": "a" }).await?;

    let summary = items.remove_all(Selector::all()).await?;
    assert_eq!(summary.matched, 3);
    assert_eq!(summary.updated, 2);

    let events = events.lock().unwrap().clone();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].event_type, EventType::SoftDelete);
    assert_eq!(events[1].collection, "items");
    assert_eq!(events[1].affected, 2);
    assert_eq!(events[1].payload.get("matched"), Some(&serde_json::json!(3)));
    assert!(events[1].timestamp <= chrono::Utc::now());
    assert_ne!(events[0].id, events[1].id);
    Ok(())
}

#[tokio::test]
async fn test_selector_filters_compose_with_live_predicate() -> anyhow::Result<()> {
    let repo = SoftDeleteRepository::new(MemoryBackend::new());
    let items = repo.store::<Item>();
    for name in ["apple", "banana", "cherry"] {
        items.insert(&mut new_item(name)).await?;
    }
    items.remove(doc! { "name": "banana" }).await?;

    let selector = Selector::all().filter(SelectorFilter::or(vec![
        SelectorFilter::eq("name", "banana"),
        SelectorFilter::eq("name", "cherry"),
    ]));
    let live = items.find_all(selector.clone()).await?;
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].name, "cherry");

    assert_eq!(items.find_raw(selector).await?.len(), 2);
    Ok(())
}

/// Runs against a real server when `MONGODB_URI` is set
#[tokio::test]
async fn test_remove_then_find_against_mongodb() -> anyhow::Result<()> {
    let Ok(uri) = std::env::var("MONGODB_URI") else {
        return Ok(());
    };

    let database = format!("mongohaus_test_{}", uuid::Uuid::new_v4().simple());
    let config = DatabaseConfig::new(uri, database).with_app_name("mongohaus-tests");
    let mongohaus = MongoHaus::new(config).await?;
    mongohaus.health_check().await?;

    let repo = mongohaus.repository();
    let outcome = remove_then_find_scenario(&repo).await;

    let summary = repo.remove_all_hard(Selector::all(), "items").await?;
    assert_eq!(summary.removed, 1);

    mongohaus.database().drop().await?;
    outcome
}
