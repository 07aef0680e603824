//! Tests for the WebSocket connection manager and the notification relay.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::ws::Message;
use scribe_api::notifications::NotificationRelay;
use scribe_api::ws::WsManager;
use scribe_events::{ArticleEvent, EventBus};

fn text_of(message: Message) -> serde_json::Value {
    match message {
        Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
        other => panic!("expected a text frame, got {other:?}"),
    }
}

#[tokio::test]
async fn capacity_is_enforced() {
    let manager = WsManager::new(2);
    assert!(manager.oldest_connection().await.is_none());

    let _a = manager.add("a".into()).await.unwrap();
    let _b = manager.add("b".into()).await.unwrap();
    assert!(manager.is_full().await);
    assert!(manager.add("c".into()).await.is_none());
    assert!(manager.oldest_connection().await.is_some());

    manager.remove("a").await;
    assert!(!manager.is_full().await);
    assert!(manager.add("c".into()).await.is_some());
    assert_eq!(manager.connection_count().await, 2);
}

#[tokio::test]
async fn broadcast_skips_closed_channels() {
    let manager = WsManager::new(8);
    let mut live = manager.add("live".into()).await.unwrap();
    let gone = manager.add("gone".into()).await.unwrap();
    drop(gone);

    let delivered = manager.broadcast(Message::Text("hi".into())).await;
    assert_eq!(delivered, 1);
    assert_matches!(live.recv().await, Some(Message::Text(t)) if t.as_str() == "hi");
}

#[tokio::test]
async fn shutdown_closes_every_connection() {
    let manager = WsManager::new(8);
    let mut rx = manager.add("a".into()).await.unwrap();

    manager.ping_all().await;
    assert_matches!(rx.recv().await, Some(Message::Ping(_)));

    manager.shutdown_all().await;
    assert_matches!(rx.recv().await, Some(Message::Close(None)));
    assert_eq!(manager.connection_count().await, 0);
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn relay_forwards_events_as_json() {
    let manager = Arc::new(WsManager::new(8));
    let mut rx = manager.add("client".into()).await.unwrap();

    let relay = NotificationRelay::new(Arc::clone(&manager));
    relay
        .forward(&ArticleEvent::article_updated("hello-202410191200", "Hello"))
        .await;

    let json = text_of(rx.recv().await.unwrap());
    assert_eq!(json["type"], "articleUpdated");
    assert_eq!(json["articleId"], "hello-202410191200");
    assert_eq!(json["title"], "Hello");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn relay_runs_until_bus_is_dropped() {
    let manager = Arc::new(WsManager::new(8));
    let mut rx = manager.add("client".into()).await.unwrap();

    let bus = EventBus::default();
    let relay = tokio::spawn(NotificationRelay::new(Arc::clone(&manager)).run(bus.subscribe()));

    bus.publish(ArticleEvent::article_updated("a-1", "A"));
    let json = text_of(rx.recv().await.unwrap());
    assert_eq!(json["articleId"], "a-1");

    drop(bus);
    tokio::time::timeout(Duration::from_secs(5), relay)
        .await
        .expect("relay should stop once the bus is gone")
        .unwrap();
}
