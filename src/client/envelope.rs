use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Esito normalizzato di una chiamata API
///
/// `data` è valorizzato solo in caso di successo, `error` solo in caso di
/// fallimento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Successo senza corpo (es. 204 No Content)
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
        }
    }

    /// Converte in `Result`; un successo senza corpo dà `Ok(None)`
    pub fn into_result(self) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ClientError::Api(self.error.unwrap_or_default()))
        }
    }

    /// Come `into_result` ma richiede il corpo
    pub fn into_data(self) -> Result<T> {
        self.into_result()?
            .ok_or_else(|| ClientError::Api("Risposta vuota dal server".to_string()))
    }
}
