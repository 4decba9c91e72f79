use serde_json::Value;

use super::coerce_envelope;
use crate::client::{error_message, ApiClient, Envelope};
use crate::device::{
    current_position, position_or_default, DeviceError, LocationSource, Position,
};
use crate::error::Result;
use crate::models::{SppgLocation, Supplier};

pub async fn search_suppliers(
    client: &ApiClient,
    query: &str,
    position: Option<Position>,
) -> Envelope<Vec<Supplier>> {
    let mut path = format!("/suppliers/search?q={}", urlencoding::encode(query));
    if let Some(position) = position {
        path.push_str(&format!(
            "&lat={}&long={}",
            position.latitude, position.longitude
        ));
    }
    let envelope = client.get::<Value>(&path).await;
    coerce_envelope(envelope, &["suppliers", "results", "data"])
}

/// Ricerca vicino al dispositivo: senza posizione non c'è ricerca
pub async fn search_suppliers_near(
    client: &ApiClient,
    query: &str,
    source: &dyn LocationSource,
) -> Result<Envelope<Vec<Supplier>>> {
    let position = current_position(source).await?;
    Ok(search_suppliers(client, query, Some(position)).await)
}

/// SPPG più vicine alla posizione indicata
pub async fn nearest_sppg(client: &ApiClient, position: Position) -> Envelope<Vec<SppgLocation>> {
    let path = format!(
        "/sppg/search?lat={}&long={}",
        position.latitude, position.longitude
    );
    let envelope = client.get::<Value>(&path).await;

    // `{"status": "error", ...}` con HTTP 200
    if let Some(status) = envelope
        .data
        .as_ref()
        .and_then(|d| d.get("status"))
        .and_then(Value::as_str)
    {
        if status != "success" {
            tracing::warn!("Ricerca SPPG fallita: status {}", status);
            return Envelope::failure(error_message(envelope.data.as_ref()));
        }
    }

    coerce_envelope(envelope, &["data", "results"])
}

/// Ricerca SPPG dalla posizione del dispositivo, con ripiego su Monas
///
/// Il secondo valore è l'errore del dispositivo, se c'è stato ripiego.
pub async fn nearest_sppg_from(
    client: &ApiClient,
    source: &dyn LocationSource,
) -> (Envelope<Vec<SppgLocation>>, Option<DeviceError>) {
    let (position, device_error) = position_or_default(source).await;
    (nearest_sppg(client, position).await, device_error)
}
