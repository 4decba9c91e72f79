use std::time::Duration;

use serde_json::Value;

use super::fetch_list;
use crate::client::{ApiClient, Envelope};
use crate::device::Subscription;
use crate::models::{ChatReply, ChatRequest, CookRequest, IotLog, MenuRequest};

pub async fn recommend_menu(client: &ApiClient, ingredients: &[String]) -> Envelope<Value> {
    let request = MenuRequest {
        ingredients: ingredients.to_vec(),
    };
    client.post_json("/recommend-menu", &request).await
}

pub async fn start_cooking(client: &ApiClient, request: &CookRequest) -> Envelope<Value> {
    client.post_json("/kitchen/cook", request).await
}

/// Domanda all'assistente della cucina
pub async fn chat(client: &ApiClient, message: &str) -> Envelope<ChatReply> {
    let request = ChatRequest {
        message: message.to_string(),
    };
    client.post_json("/kitchen/chat", &request).await
}

pub async fn iot_logs(client: &ApiClient) -> Envelope<Vec<IotLog>> {
    fetch_list(client, "/iot/logs", &["logs", "data"]).await
}

pub async fn trigger_notifications(client: &ApiClient) -> Envelope<Value> {
    client.post("/notifications/trigger").await
}

/// Legge i sensori a intervalli regolari finché la sottoscrizione è attiva
pub fn watch_iot_logs<C>(client: ApiClient, interval: Duration, on_logs: C) -> Subscription
where
    C: FnMut(Envelope<Vec<IotLog>>) + Send + 'static,
{
    Subscription::start(
        interval,
        move || {
            let client = client.clone();
            async move { iot_logs(&client).await }
        },
        on_logs,
    )
}
