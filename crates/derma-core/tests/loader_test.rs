#![allow(clippy::unwrap_used)]
// Collection loader behaviour against a mock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use derma_api::ContentClient;
use derma_core::{CollectionLoader, EmptyPolicy, Faq, LoadOutcome, fallback};

const WAIT: Duration = Duration::from_millis(1000);

async fn setup(policy: EmptyPolicy) -> (MockServer, CollectionLoader) {
    let server = MockServer::start().await;
    let client = ContentClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, CollectionLoader::new(client, WAIT, policy))
}

async fn mount_faqs(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/faqs"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn live_data_is_used_when_present() {
    let (server, loader) = setup(EmptyPolicy::Fallback).await;
    mount_faqs(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "f1", "q": "Parking?", "a": "Yes, free." }
        ])),
    )
    .await;

    let loaded = loader.load::<Faq>(fallback::faqs()).await;

    assert!(!loaded.used_fallback);
    assert_eq!(loaded.outcome, LoadOutcome::Live);
    assert_eq!(loaded.data.len(), 1);
    assert_eq!(loaded.data[0].q, "Parking?");
}

#[tokio::test]
async fn server_error_falls_back() {
    let (server, loader) = setup(EmptyPolicy::Fallback).await;
    mount_faqs(&server, ResponseTemplate::new(503)).await;

    let loaded = loader.load::<Faq>(fallback::faqs()).await;

    assert!(loaded.used_fallback);
    assert_eq!(loaded.data, fallback::faqs());
    assert!(matches!(loaded.outcome, LoadOutcome::Failed(_)));
}

fn seven_faqs() -> Vec<Faq> {
    (1..=7)
        .map(|n| Faq {
            id: format!("s{n}"),
            q: format!("Question {n}?"),
            a: format!("Answer {n}."),
        })
        .collect()
}

#[tokio::test]
async fn seven_item_fallback_survives_failure_and_empty_alike() {
    let (failing, loader) = setup(EmptyPolicy::Fallback).await;
    mount_faqs(&failing, ResponseTemplate::new(500)).await;

    let loaded = loader.load::<Faq>(seven_faqs()).await;
    assert!(loaded.used_fallback);
    assert_eq!(loaded.data.len(), 7);
    assert_eq!(loaded.data, seven_faqs());

    let (empty, loader) = setup(EmptyPolicy::Fallback).await;
    mount_faqs(&empty, ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let loaded = loader.load::<Faq>(seven_faqs()).await;
    assert!(loaded.used_fallback);
    assert_eq!(loaded.outcome, LoadOutcome::Empty);
    assert_eq!(loaded.data.len(), 7);
}

#[tokio::test]
async fn undecodable_body_falls_back() {
    let (server, loader) = setup(EmptyPolicy::Fallback).await;
    mount_faqs(&server, ResponseTemplate::new(200).set_body_string("<html>")).await;

    let loaded = loader.load::<Faq>(fallback::faqs()).await;
    assert!(loaded.used_fallback);
}

#[tokio::test]
async fn empty_array_falls_back_by_default() {
    let (server, loader) = setup(EmptyPolicy::Fallback).await;
    mount_faqs(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let loaded = loader.load::<Faq>(fallback::faqs()).await;

    assert!(loaded.used_fallback);
    assert_eq!(loaded.outcome, LoadOutcome::Empty);
    assert_eq!(loaded.data.len(), fallback::faqs().len());
}

#[tokio::test]
async fn empty_array_can_be_shown_as_is() {
    let (server, loader) = setup(EmptyPolicy::ShowEmpty).await;
    mount_faqs(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let loaded = loader.load::<Faq>(fallback::faqs()).await;

    assert!(!loaded.used_fallback);
    assert_eq!(loaded.outcome, LoadOutcome::Empty);
    assert!(loaded.data.is_empty());
}

#[tokio::test]
async fn slow_backend_times_out_to_fallback() {
    let (server, loader) = setup(EmptyPolicy::Fallback).await;
    mount_faqs(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!([{ "_id": "f1", "q": "Q", "a": "A" }]))
            .set_delay(Duration::from_millis(500)),
    )
    .await;

    let loaded = loader
        .load_within::<Faq>(fallback::faqs(), Duration::from_millis(100))
        .await;

    assert!(loaded.used_fallback);
    match loaded.outcome {
        LoadOutcome::Failed(reason) => assert!(reason.contains("timed out"), "{reason}"),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_falls_back() {
    let client = ContentClient::from_reqwest("http://127.0.0.1:9", reqwest::Client::new()).unwrap();
    let loader = CollectionLoader::new(client, WAIT, EmptyPolicy::Fallback);

    let loaded = loader.load::<Faq>(fallback::faqs()).await;
    assert!(loaded.used_fallback);
}

#[tokio::test]
async fn cancelled_load_delivers_nothing() {
    let (server, loader) = setup(EmptyPolicy::Fallback).await;
    mount_faqs(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!([{ "_id": "f1", "q": "Q", "a": "A" }]))
            .set_delay(Duration::from_millis(300)),
    )
    .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let loaded = loader.load_until::<Faq>(fallback::faqs(), &cancel).await;
    assert!(loaded.is_none());
}

#[tokio::test]
async fn live_view_receives_its_load() {
    let (server, loader) = setup(EmptyPolicy::Fallback).await;
    mount_faqs(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([{ "_id": "f1", "q": "Q", "a": "A" }])),
    )
    .await;

    let cancel = CancellationToken::new();
    let loaded = loader.load_until::<Faq>(fallback::faqs(), &cancel).await.unwrap();
    assert!(!loaded.used_fallback);
}
