mod common;

use common::*;
use payhook::domain::error::PipelineError;
use payhook::domain::event::PaymentEvent;
use payhook::services::site_resolver::SiteResolver;
use std::sync::Arc;

fn event(data: serde_json::Value) -> PaymentEvent {
    PaymentEvent::parse(&event_body("evt_r", "payment_approved", data)).unwrap()
}

#[tokio::test]
async fn metadata_site_skips_lookup() {
    let lookup = Arc::new(FakeLookup::with("pay_1", "garden"));
    let resolver = SiteResolver::new(lookup.clone());

    let site = resolver
        .resolve_site_id(&event(serde_json::json!({
            "id": "pay_1",
            "metadata": {"site_id": "electronics"}
        })))
        .await
        .unwrap();

    assert_eq!(site.as_str(), "electronics");
    assert_eq!(lookup.calls(), 0);
}

#[tokio::test]
async fn missing_metadata_asks_lookup_once() {
    let lookup = Arc::new(FakeLookup::with("pay_2", "garden"));
    let resolver = SiteResolver::new(lookup.clone());

    let site = resolver
        .resolve_site_id(&event(serde_json::json!({"id": "pay_2"})))
        .await
        .unwrap();

    assert_eq!(site.as_str(), "garden");
    assert_eq!(lookup.calls(), 1);
}

#[tokio::test]
async fn blank_metadata_site_falls_back_to_lookup() {
    let lookup = Arc::new(FakeLookup::with("pay_3", "garden"));
    let resolver = SiteResolver::new(lookup.clone());

    let site = resolver
        .resolve_site_id(&event(serde_json::json!({
            "id": "pay_3",
            "metadata": {"site_id": "   "}
        })))
        .await
        .unwrap();

    assert_eq!(site.as_str(), "garden");
    assert_eq!(lookup.calls(), 1);
}

#[tokio::test]
async fn unknown_payment_is_an_error_not_a_default() {
    let lookup = Arc::new(FakeLookup::default());
    let resolver = SiteResolver::new(lookup.clone());

    let err = resolver
        .resolve_site_id(&event(serde_json::json!({"id": "pay_missing"})))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::PaymentNotFound(id) if id == "pay_missing"));
    assert_eq!(lookup.calls(), 1);
}

#[tokio::test]
async fn missing_data_and_payment_id_are_rejected() {
    let lookup = Arc::new(FakeLookup::default());
    let resolver = SiteResolver::new(lookup.clone());

    let no_data = PaymentEvent::parse(br#"{"id":"evt_nd","type":"payment_approved"}"#).unwrap();
    assert!(matches!(
        resolver.resolve_site_id(&no_data).await,
        Err(PipelineError::MissingData)
    ));

    let blank_id = event(serde_json::json!({"id": " ", "metadata": {"site_id": "electronics"}}));
    assert!(matches!(
        resolver.resolve_site_id(&blank_id).await,
        Err(PipelineError::MissingPaymentId)
    ));

    assert_eq!(lookup.calls(), 0);
}
