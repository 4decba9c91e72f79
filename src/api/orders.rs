use serde_json::Value;

use super::fetch_list;
use crate::client::{ApiClient, Envelope};
use crate::models::{Order, OrderStatus, UpdateOrderRequest};

/// Ordini ricevuti dal vendor
pub async fn vendor_orders(client: &ApiClient) -> Envelope<Vec<Order>> {
    fetch_list(client, "/orders/umkm", &["orders", "data"]).await
}

/// Ordini effettuati dalla cucina
pub async fn kitchen_orders(client: &ApiClient) -> Envelope<Vec<Order>> {
    fetch_list(client, "/orders/kitchen", &["orders", "data"]).await
}

pub async fn update_order(client: &ApiClient, order_id: i64, status: OrderStatus) -> Envelope<Value> {
    client
        .put_json(&format!("/orders/{}", order_id), &UpdateOrderRequest { status })
        .await
}
