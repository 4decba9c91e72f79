use tokio::sync::oneshot;

use super::{DeviceError, Position};

/// Monas, Jakarta: posizione usata quando il GPS non risponde
pub const DEFAULT_POSITION: Position = Position {
    latitude: -6.175392,
    longitude: 106.827153,
};

pub type PositionCallback = Box<dyn FnOnce(Result<Position, DeviceError>) + Send + 'static>;

/// Sorgente di posizione in stile callback
///
/// L'implementazione deve invocare `callback` al più una volta.
pub trait LocationSource: Send + Sync {
    fn request_position(&self, callback: PositionCallback);
}

/// Posizione fissa (configurazione o test)
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Position);

impl LocationSource for FixedLocation {
    fn request_position(&self, callback: PositionCallback) {
        callback(Ok(self.0));
    }
}

/// Dispositivo senza geolocalizzazione
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocation;

impl LocationSource for UnavailableLocation {
    fn request_position(&self, callback: PositionCallback) {
        callback(Err(DeviceError::Unsupported(
            "geolocalizzazione non disponibile".to_string(),
        )));
    }
}

pub fn source_from_position(position: Option<Position>) -> Box<dyn LocationSource> {
    match position {
        Some(position) => Box::new(FixedLocation(position)),
        None => Box::new(UnavailableLocation),
    }
}

/// Attende una singola posizione dalla sorgente
pub async fn current_position(source: &dyn LocationSource) -> Result<Position, DeviceError> {
    let (tx, rx) = oneshot::channel();
    source.request_position(Box::new(move |result| {
        let _ = tx.send(result);
    }));

    rx.await.unwrap_or_else(|_| {
        Err(DeviceError::Failed(
            "la sorgente di posizione non ha risposto".to_string(),
        ))
    })
}

/// Posizione corrente o `DEFAULT_POSITION`, con l'errore che ha causato
/// il ripiego
pub async fn position_or_default(source: &dyn LocationSource) -> (Position, Option<DeviceError>) {
    match current_position(source).await {
        Ok(position) => (position, None),
        Err(e) => {
            tracing::info!("Posizione non rilevata ({}), uso Monas, Jakarta", e);
            (DEFAULT_POSITION, Some(e))
        }
    }
}
