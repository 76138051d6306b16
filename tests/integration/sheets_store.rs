//! Post store behaviour over the in-memory backend

use super::test_utils::FailingStore;
use postcraft::error::StoreError;
use postcraft::generation::{fallback_item, GeneratedItem};
use postcraft::pillar::PILLARS;
use postcraft::sheets::{
    MemoryStore, SheetsConfig, SheetsService, StoreBackend, TabularStore, HEADER,
};
use std::sync::Arc;

fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn test_existing_sheet_is_read_with_defaults() {
    let mut rows = vec![row(&HEADER)];
    rows.push(row(&[
        "Ready to go",
        "notes",
        "Scheduled",
        "img.png",
        "Monday 09:00",
        "CTA",
        "Tips",
        "#tips",
        "2025-01-02",
    ]));
    rows.push(row(&["Short row"]));
    rows.push(row(&["", "no description"]));
    rows.push(row(&["Pending one", "", "Pending"]));
    let service = SheetsService::new(Arc::new(MemoryStore::with_rows(rows)));

    let summary = service.summary().await.unwrap();
    assert_eq!(summary.total_posts, 3);
    assert_eq!(summary.scheduled_posts, 1);
    assert_eq!(summary.pending_posts, 1);

    assert_eq!(summary.posts[0].image, "img.png");
    assert_eq!(summary.posts[0].created_date, "2025-01-02");
    assert_eq!(summary.posts[1].status, "draft");
    assert_eq!(summary.posts[1].hashtags, "");
}

#[tokio::test]
async fn test_appended_rows_keep_order_and_layout() {
    let store = Arc::new(MemoryStore::new());
    let service = SheetsService::new(store.clone());
    let items: Vec<GeneratedItem> = PILLARS
        .iter()
        .enumerate()
        .map(|(index, pillar)| fallback_item(pillar, index))
        .collect();

    assert_eq!(service.add_items(&items).await.unwrap(), 5);

    let rows = store.read_rows().await.unwrap();
    assert_eq!(rows.len(), 6);
    for (item, cells) in items.iter().zip(rows.iter().skip(1)) {
        assert_eq!(cells.len(), HEADER.len());
        assert_eq!(cells[0], item.post_description);
        assert_eq!(cells[2], "Pending");
        assert_eq!(cells[3], "");
        assert_eq!(cells[4], item.scheduled_for);
        assert_eq!(cells[6], item.pillar);
    }
}

#[tokio::test]
async fn test_failures_propagate() {
    let service = SheetsService::new(Arc::new(FailingStore));
    assert!(matches!(
        service.summary().await,
        Err(StoreError::RequestFailed(_))
    ));
    let item = GeneratedItem::default();
    assert!(service.add_items(&[item]).await.is_err());
    // Nothing to write means nothing is sent.
    assert_eq!(service.add_items(&[]).await.unwrap(), 0);
}

#[tokio::test]
async fn test_memory_backend_from_config() {
    let config = SheetsConfig {
        backend: StoreBackend::Memory,
        ..SheetsConfig::default()
    };
    let service = SheetsService::new(config.build_store().unwrap());
    let summary = service.summary().await.unwrap();
    assert_eq!(summary.total_posts, 0);
}
