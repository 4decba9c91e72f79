//! Adattatori per le capacità del dispositivo
//!
//! Le API del dispositivo notificano via callback; qui diventano un valore
//! atteso con `.await` (posizione) o una sottoscrizione con `stop()`
//! (flussi continui).

pub mod feed;
pub mod location;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use feed::Subscription;
pub use location::{
    current_position, position_or_default, source_from_position, FixedLocation, LocationSource,
    PositionCallback, UnavailableLocation, DEFAULT_POSITION,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeviceError {
    #[error("funzione non supportata: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Failed(String),
}

/// Coordinate geografiche in gradi decimali
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Testo mostrato nel campo `location` delle forniture
    pub fn label(&self) -> String {
        format!("Lat: {}, Lon: {}", self.latitude, self.longitude)
    }
}
