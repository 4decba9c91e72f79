//! Endpoint tipizzati del backend
//!
//! Ogni funzione fa una sola cosa: costruisce la richiesta, passa da
//! `ApiClient` e converte il payload nel tipo del modello.

pub mod analytics;
pub mod auth;
pub mod inventory;
pub mod kitchen;
pub mod orders;
pub mod suppliers;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{ApiClient, Envelope};
use crate::models::coerce_list;

/// GET di una lista, accettando sia l'array nudo sia l'oggetto che lo
/// contiene sotto una delle `keys`
pub(crate) async fn fetch_list<T: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
    keys: &[&str],
) -> Envelope<Vec<T>> {
    coerce_envelope(client.get::<Value>(path).await, keys)
}

pub(crate) fn coerce_envelope<T: DeserializeOwned>(
    envelope: Envelope<Value>,
    keys: &[&str],
) -> Envelope<Vec<T>> {
    if !envelope.success {
        return Envelope::failure(envelope.error.unwrap_or_default());
    }

    match coerce_list(envelope.data.unwrap_or(Value::Null), keys) {
        Ok(list) => Envelope::ok(list),
        Err(e) => Envelope::failure(format!("Risposta inattesa dal server: {}", e)),
    }
}
