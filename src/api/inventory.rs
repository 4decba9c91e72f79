//! Foto inventario: upload, analisi AI e salvataggio delle forniture

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::fetch_list;
use crate::client::{error_message, ApiClient, Envelope, UploadFile};
use crate::device::Position;
use crate::error::{ClientError, Result};
use crate::models::{AnalysisResult, SupplyItem, UploadResult};

pub const CAPTURE_OWNER: &str = "UMKM Vendor";
pub const UNKNOWN_LOCATION: &str = "Tidak terdeteksi";

pub async fn upload_image(client: &ApiClient, file: UploadFile) -> Result<reqwest::Response> {
    client.upload_raw("/upload", file).await
}

pub async fn analyze_image(client: &ApiClient, file: UploadFile) -> Result<reqwest::Response> {
    client.upload_raw("/analyze", file).await
}

/// Carica la foto, la fa analizzare e prepara gli articoli rilevati
///
/// Gli articoli non vengono salvati: vanno rivisti e poi passati a
/// `save_supplies`. Un 401 su upload o analisi chiude la sessione.
pub async fn capture(
    client: &ApiClient,
    file: UploadFile,
    position: Option<Position>,
) -> Result<Vec<SupplyItem>> {
    let uploaded: UploadResult =
        read_json(client, upload_image(client, file.clone()).await?).await?;
    let analysis: AnalysisResult = read_json(client, analyze_image(client, file).await?).await?;

    if analysis.items.is_empty() {
        return Err(ClientError::Api(
            "L'AI non ha rilevato articoli. Riprova con una foto più nitida.".to_string(),
        ));
    }

    tracing::info!("Articoli rilevati: {}", analysis.items.len());
    Ok(stamp_items(analysis.items, position, uploaded.url))
}

/// Completa gli articoli con proprietario, posizione e foto
pub fn stamp_items(
    items: Vec<SupplyItem>,
    position: Option<Position>,
    photo_url: Option<String>,
) -> Vec<SupplyItem> {
    items
        .into_iter()
        .map(|mut item| {
            item.owner_name = CAPTURE_OWNER.to_string();
            item.location = position
                .map(|p| p.label())
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());
            item.latitude = position.map(|p| p.latitude);
            item.longitude = position.map(|p| p.longitude);
            item.photo_url = photo_url.clone();
            item
        })
        .collect()
}

pub async fn save_supplies(client: &ApiClient, items: &[SupplyItem]) -> Envelope<Value> {
    client.post_json("/supplies", items).await
}

pub async fn list_supplies(client: &ApiClient) -> Envelope<Vec<SupplyItem>> {
    fetch_list(client, "/supplies", &["supplies", "data"]).await
}

/// Forniture del vendor autenticato
pub async fn vendor_supplies(client: &ApiClient) -> Envelope<Vec<SupplyItem>> {
    fetch_list(client, "/supplies/vendor", &["supplies", "data"]).await
}

async fn read_json<T: DeserializeOwned>(
    client: &ApiClient,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.json::<Value>().await.ok();
        tracing::warn!("[API] Upload fallito ({})", status.as_u16());
        if status == StatusCode::UNAUTHORIZED {
            client.guard().on_unauthorized();
        }
        return Err(ClientError::Api(error_message(body.as_ref())));
    }
    Ok(response.json().await?)
}
