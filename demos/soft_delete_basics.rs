//! # Soft Delete Basics
//!
//! This example walks through the repository lifecycle:
//! - Declaring a document with `#[document]`
//! - Inserting, updating and soft-deleting entities
//! - Inspecting soft-deleted documents with raw reads
//! - Bulk removal and lifecycle signals
//!
//! Runs against MongoDB when `MONGODB_URI` is set, otherwise in memory.

use mongohaus::prelude::*;
use std::sync::Arc;

/// Inventory item stored in the `items` collection
#[document(collection = "items")]
pub struct Item {
    #[id]
    pub id: Option<ObjectId>,
    pub name: String,
    pub quantity: i32,
    #[metadata]
    pub timestamps: SoftDeleteMetadata,
}

impl Item {
    fn new(name: &str, quantity: i32) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            quantity,
            timestamps: SoftDeleteMetadata::default(),
        }
    }
}

async fn walkthrough<B: DocumentBackend>(repo: SoftDeleteRepository<B>) -> anyhow::Result<()> {
    let items = repo.store::<Item>();

    println!("\n📦 Inserting items");
    let mut ids = Vec::new();
    for (name, quantity) in [("bolt", 120), ("nut", 300), ("washer", 75)] {
        let mut item = Item::new(name, quantity);
        let id = items.insert(&mut item).await?;
        println!("  {} -> {}", item.name, id);
        ids.push(id);
    }

    println!("\n✏️  Updating the bolt count");
    let mut bolt = items.find_by_id(ids[0].clone()).await?;
    bolt.quantity -= 20;
    items.update(&mut bolt).await?;
    println!("  bolt quantity is now {}", bolt.quantity);

    println!("\n🗑️  Soft-deleting the nut");
    items.remove(Selector::by_id(ids[1].clone())).await?;
    match items.find_by_id(ids[1].clone()).await {
        Err(e) if e.is_not_found() => println!("  nut is hidden from reads"),
        other => println!("  unexpected result: {:?}", other),
    }
    let raw = items.find_raw(Selector::by_id(ids[1].clone())).await?;
    println!("  raw document still stored: {}", raw[0]);

    println!("\n📊 Live items: {}", items.count_live(Selector::all()).await?);

    println!("\n🧹 Soft-deleting everything");
    let summary = items.remove_all(Selector::all()).await?;
    println!(
        "  matched {}, updated {}, already deleted {}",
        summary.matched,
        summary.updated,
        summary.skipped()
    );

    let purged = items.remove_all_hard(Selector::all()).await?;
    println!("  purged {} documents", purged.removed);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🗃️  MongoHaus Soft Delete Basics");
    println!("===============================");

    let signals = Arc::new(SignalManager::new());
    signals.add_callback(|event| {
        println!(
            "  ⚡ {:?} on '{}' ({} affected)",
            event.event_type, event.collection, event.affected
        );
    });

    match std::env::var("MONGODB_URI") {
        Ok(uri) => {
            let config = DatabaseConfig::new(uri, "mongohaus_demo").with_app_name("soft-delete-basics");
            let mongohaus = MongoHaus::new(config).await?.with_signals(signals);
            mongohaus.health_check().await?;
            walkthrough(mongohaus.repository()).await
        }
        Err(_) => {
            println!("MONGODB_URI not set, using the in-memory backend");
            walkthrough(SoftDeleteRepository::new(MemoryBackend::new()).with_signals(signals)).await
        }
    }
}
