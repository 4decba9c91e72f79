#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Multipart, Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use pangan::client::ApiClient;
use pangan::session::{CredentialStore, Role, UserProfile};

pub const VALID_TOKEN: &str = "tok-vendor";
pub const PASSWORD: &str = "rahasia";

/// Avvia il backend finto su una porta libera e restituisce la base URL
pub async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, backend()).await.unwrap();
    });

    format!("http://{}/api", addr)
}

/// Base URL su cui non risponde nessuno
pub async fn closed_port() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

pub fn client(base_url: &str) -> (Arc<CredentialStore>, ApiClient) {
    let store = Arc::new(CredentialStore::in_memory());
    let client = ApiClient::with_http_client(reqwest::Client::new(), base_url, store.clone());
    (store, client)
}

pub fn logged_in(base_url: &str, role: Role) -> (Arc<CredentialStore>, ApiClient) {
    let (store, client) = client(base_url);
    store
        .save(VALID_TOKEN, &UserProfile::new(role).with_name("Bu Sari"))
        .unwrap();
    (store, client)
}

fn backend() -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/google", post(google))
        .route("/api/whoami", get(whoami))
        .route("/api/expired", get(expired))
        .route("/api/expired/plain", get(expired_plain))
        .route("/api/orders/umkm", get(vendor_orders))
        .route("/api/orders/kitchen", get(kitchen_orders))
        .route(
            "/api/orders/:id",
            post(update_order).put(update_order).delete(delete_order),
        )
        .route("/api/fail/message", get(fail_message))
        .route("/api/fail/error", get(fail_error))
        .route("/api/fail/plain", get(fail_plain))
        .route("/api/fail/shape", get(fail_shape))
        .route("/api/supplies", get(list_supplies).post(save_supplies))
        .route("/api/suppliers/search", get(search_suppliers))
        .route("/api/sppg/search", get(search_sppg))
        .route("/api/kitchen/chat", post(chat))
        .route("/api/iot/logs", get(iot_logs))
        .route("/api/upload", post(upload))
        .route("/api/analyze", post(analyze))
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Token expired"})),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username_or_email"] == "tanpa-token" {
        return Json(json!({"access_token": "", "user": {"role": "vendor"}})).into_response();
    }
    if body["password"] == PASSWORD {
        let role = if body["username_or_email"] == "dapur" {
            "kitchen"
        } else {
            "vendor"
        };
        Json(json!({
            "access_token": VALID_TOKEN,
            "token_type": "bearer",
            "user": {"role": role, "name": "Bu Sari", "email": "sari@pasar.id"}
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Username atau password salah"})),
        )
            .into_response()
    }
}

async fn google(Json(body): Json<Value>) -> Response {
    Json(json!({
        "access_token": "tok-google",
        "user": {"role": body["role"], "full_name": "Pak Budi"}
    }))
    .into_response()
}

async fn whoami(headers: HeaderMap) -> Json<Value> {
    Json(json!({
        "authorization": headers.get("authorization").and_then(|v| v.to_str().ok()),
        "content_type": headers.get("content-type").and_then(|v| v.to_str().ok()),
        "x_trace": headers.get("x-trace").and_then(|v| v.to_str().ok()),
    }))
}

async fn expired() -> Response {
    unauthorized()
}

async fn expired_plain() -> Response {
    (StatusCode::UNAUTHORIZED, "nope").into_response()
}

async fn vendor_orders(headers: HeaderMap) -> Response {
    if bearer(&headers) != Some(VALID_TOKEN) {
        return unauthorized();
    }
    Json(json!({"orders": [
        {"id": 7, "status": "pending", "qty_ordered": 10,
         "created_at": "2025-01-10T08:30:00", "supplies": {"item_name": "Bayam"}}
    ]}))
    .into_response()
}

async fn kitchen_orders() -> Json<Value> {
    Json(json!([
        {"id": 3, "supply_name": "Tomat", "status": "completed"},
        {"id": 4, "supply_name": "Cabai", "status": "dikirim"}
    ]))
}

async fn update_order(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"id": id, "status": body["status"]}))
}

async fn delete_order() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fail_message() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"message": "Stok habis", "error": "ignored"})),
    )
        .into_response()
}

async fn fail_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Bad input"})),
    )
        .into_response()
}

async fn fail_plain() -> Response {
    (StatusCode::BAD_GATEWAY, "bad gateway").into_response()
}

async fn fail_shape() -> Json<Value> {
    Json(json!({"unexpected": true}))
}

async fn list_supplies() -> Json<Value> {
    Json(json!({"supplies": [
        {"id": 1, "name": "Bawang Merah", "qty": 5, "unit": "Kg",
         "freshness": "Segar", "expiry_days": 7}
    ]}))
}

async fn save_supplies(Json(body): Json<Value>) -> Json<Value> {
    let saved = body.as_array().map(|a| a.len()).unwrap_or(0);
    Json(json!({"saved": saved}))
}

async fn search_suppliers(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({"suppliers": [{
        "name": params.get("q").cloned().unwrap_or_default(),
        "location": params.get("lat").cloned().unwrap_or_else(|| "tanpa lokasi".to_string()),
        "distance_km": 1.5
    }]}))
}

async fn search_sppg(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if params.get("lat").map(String::as_str) == Some("0") {
        return Json(json!({"status": "error", "message": "Lokasi tidak valid"}));
    }
    Json(json!({"status": "success", "data": [{
        "name": "SPPG Gambir",
        "lat": params.get("lat").and_then(|v| v.parse::<f64>().ok()),
        "long": params.get("long").and_then(|v| v.parse::<f64>().ok())
    }]}))
}

async fn chat(Json(body): Json<Value>) -> Json<Value> {
    if body["message"] == "diam" {
        return Json(json!({}));
    }
    Json(json!({"reply": format!("Menu untuk: {}", body["message"].as_str().unwrap_or(""))}))
}

async fn iot_logs() -> Json<Value> {
    Json(json!([{"device_id": "kulkas-1", "temperature": 4.5, "humidity": 60}]))
}

async fn upload(headers: HeaderMap, mut multipart: Multipart) -> Response {
    let mut fields = Vec::new();
    let mut file_name = None;
    let mut size = 0;
    while let Ok(Some(field)) = multipart.next_field().await {
        fields.push(field.name().unwrap_or_default().to_string());
        file_name = field.file_name().map(str::to_string);
        size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
    }
    Json(json!({
        "url": "https://cdn.pangan.id/foto.jpg",
        "fields": fields,
        "file_name": file_name,
        "size": size,
        "authorization": headers.get("authorization").and_then(|v| v.to_str().ok()),
    }))
    .into_response()
}

async fn analyze(mut multipart: Multipart) -> Response {
    let mut file_name = String::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        file_name = field.file_name().unwrap_or_default().to_string();
    }
    if file_name.starts_with("kosong") {
        return Json(json!({"items": []})).into_response();
    }
    if file_name.starts_with("expired") {
        return unauthorized();
    }
    Json(json!({"items": [
        {"name": "Bawang Merah", "qty": 5, "unit": "Pcs",
         "freshness": "Sangat Segar", "expiry_days": 14}
    ]}))
    .into_response()
}
