use thiserror::Error;

use crate::device::DeviceError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Errore di rete: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Errore di archiviazione: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Errore di serializzazione: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Header non valido: {0}")]
    InvalidHeader(String),

    #[error("{0}")]
    Api(String),

    #[error("Non autorizzato: {0}")]
    Unauthorized(String),

    #[error("Accesso negato: {0}")]
    Forbidden(String),

    #[error("Formato non supportato: {0}")]
    UnsupportedFormat(String),

    #[error("Dispositivo non disponibile: {0}")]
    Device(#[from] DeviceError),

    #[error("Richiesta non valida: {0}")]
    BadRequest(String),
}

impl ClientError {
    /// Codice di uscita usato dalla CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::Unauthorized(_) => 2,
            ClientError::Forbidden(_) => 3,
            ClientError::Network(_) => 4,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
