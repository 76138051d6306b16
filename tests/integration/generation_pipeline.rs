//! Batch generation through the public orchestrator API

use super::test_utils::{orchestrator, ScriptedProvider};
use postcraft::generation::{BatchOutcome, FallbackBatch, GenerationRequest};
use postcraft::pillar::PILLARS;
use std::sync::Arc;

#[tokio::test]
async fn test_items_carry_static_pillar_fields() {
    let orchestrator = orchestrator(Arc::new(ScriptedProvider::always_ok()));
    let batch = orchestrator
        .generate("client", &GenerationRequest::new(10, None))
        .await
        .unwrap();

    assert_eq!(batch.ideas.len(), 10);
    for (index, item) in batch.ideas.iter().enumerate() {
        let pillar = &PILLARS[index % PILLARS.len()];
        assert_eq!(item.pillar, pillar.name);
        assert_eq!(item.cta, pillar.cta);
        assert_eq!(item.hashtags, pillar.hashtags);
        assert!(item.instructions.contains(pillar.name));
        assert!(!item.generated_at.is_empty());
    }
}

#[tokio::test]
async fn test_focus_area_is_case_insensitive() {
    let orchestrator = orchestrator(Arc::new(ScriptedProvider::always_ok()));
    let batch = orchestrator
        .generate(
            "client",
            &GenerationRequest::new(3, Some("SOCIAL PROOF".to_string())),
        )
        .await
        .unwrap();
    assert!(batch.ideas.iter().all(|item| item.pillar == "Social Proof"));
    // Slots still follow the position in the batch.
    assert_eq!(batch.ideas[2].scheduled_for, "Wednesday 14:00");
}

#[tokio::test]
async fn test_unknown_focus_area_pins_first_pillar() {
    let orchestrator = orchestrator(Arc::new(ScriptedProvider::always_ok()));
    let batch = orchestrator
        .generate(
            "client",
            &GenerationRequest::new(4, Some("Memes".to_string())),
        )
        .await
        .unwrap();
    assert!(batch.ideas.iter().all(|item| item.pillar == PILLARS[0].name));
}

#[tokio::test]
async fn test_every_item_failing_still_returns_full_batch() {
    let failures = (0..5).map(|_| Err("upstream 500".to_string())).collect();
    let provider = Arc::new(ScriptedProvider::new(failures));
    let orchestrator = orchestrator(provider.clone());

    let batch = orchestrator
        .generate("client", &GenerationRequest::new(5, None))
        .await
        .unwrap();
    assert_eq!(batch.ideas.len(), 5);
    assert!(batch.generated);
    assert_eq!(batch.ai_success_rate, 0.0);
    for (index, item) in batch.ideas.iter().enumerate() {
        assert!(!item.is_ai_generated);
        assert!(item.post_description.contains(&(index + 1).to_string()));
    }
    assert_eq!(provider.calls(), 5);
}

#[tokio::test]
async fn test_rejected_requests_do_not_consume_quota() {
    let orchestrator = orchestrator(Arc::new(ScriptedProvider::always_ok()));
    for _ in 0..5 {
        orchestrator.handle("busy", br#"{"count": 0}"#).await;
    }
    for _ in 0..3 {
        assert!(matches!(
            orchestrator.handle("busy", br#"{"count": 0}"#).await,
            BatchOutcome::RateLimited(_)
        ));
    }
    assert_eq!(orchestrator.limiter().recorded("busy"), 5);
}

#[test]
fn test_canned_batch_shape() {
    let canned = FallbackBatch::new(Some(1));
    assert_eq!(canned.ideas.len(), 1);
    assert!(canned.ideas.iter().all(|item| !item.is_ai_generated));

    let value = serde_json::to_value(FallbackBatch::new(None)).unwrap();
    assert_eq!(value["ideas"].as_array().unwrap().len(), 2);
    assert_eq!(value["generated"], false);
    assert_eq!(value["aiPowered"], false);
    assert!(value.get("totalGenerated").is_none());
}
