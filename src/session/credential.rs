//! Credential Store: token e profilo utente persistiti insieme

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::store::{KeyValueStore, MemoryStore};
use crate::error::{ClientError, Result};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Superficie applicativa dell'utente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Vendor,
    Kitchen,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Vendor => write!(f, "vendor"),
            Role::Kitchen => write!(f, "kitchen"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vendor" => Ok(Role::Vendor),
            "kitchen" => Ok(Role::Kitchen),
            other => Err(format!("ruolo sconosciuto: {}", other)),
        }
    }
}

/// Profilo utente restituito dal backend al login
///
/// Solo `role` è obbligatorio; gli altri campi vengono conservati così
/// come arrivano.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl UserProfile {
    pub fn new(role: Role) -> Self {
        Self {
            role: role.to_string(),
            name: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Ruolo riconosciuto, `None` per valori sconosciuti
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or_else(|| {
            ["full_name", "username", "email"]
                .iter()
                .find_map(|key| self.extra.get(*key).and_then(Value::as_str))
        })
    }
}

/// Sessione autenticata
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub token: String,
    pub user: UserProfile,
}

/// Unico punto di accesso a `token` e `user`
///
/// Il mutex interno rende `save`, `load` e `clear` atomiche tra loro anche
/// quando lo store è condiviso tra task.
pub struct CredentialStore {
    backend: Box<dyn KeyValueStore>,
    lock: Mutex<()>,
}

impl CredentialStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            lock: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Salva token e profilo in un'unica scrittura
    ///
    /// Un token vuoto non viene scritto: `load` lo tratterebbe come assente.
    pub fn save(&self, token: &str, user: &UserProfile) -> Result<()> {
        if token.trim().is_empty() {
            return Err(ClientError::BadRequest(
                "token di sessione vuoto".to_string(),
            ));
        }
        let encoded = serde_json::to_string(user)?;
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.backend
            .set_all(&[(TOKEN_KEY, token), (USER_KEY, encoded.as_str())])?;
        tracing::debug!("Credenziali salvate (ruolo {})", user.role);
        Ok(())
    }

    /// Legge la sessione corrente
    ///
    /// Uno stato parziale o corrotto vale come assente e viene rimosso.
    pub fn load(&self) -> Option<Credential> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let (token, raw_user) = match (
            self.backend.get(TOKEN_KEY),
            self.backend.get(USER_KEY),
        ) {
            (Ok(token), Ok(user)) => (token, user),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Lettura sessione fallita: {}", e);
                return None;
            }
        };

        let token = token.filter(|t| !t.is_empty());

        match (token, raw_user) {
            (None, None) => None,
            (Some(token), Some(raw_user)) => match serde_json::from_str::<UserProfile>(&raw_user) {
                Ok(user) => Some(Credential { token, user }),
                Err(e) => {
                    tracing::warn!("Profilo utente corrotto, sessione rimossa: {}", e);
                    self.clear_locked();
                    None
                }
            },
            _ => {
                tracing::warn!("Sessione incompleta, rimossa");
                self.clear_locked();
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.load().map(|credential| credential.token)
    }

    /// Rimuove entrambe le chiavi; idempotente
    pub fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.backend.remove_all(&[TOKEN_KEY, USER_KEY])
    }

    fn clear_locked(&self) {
        if let Err(e) = self.backend.remove_all(&[TOKEN_KEY, USER_KEY]) {
            tracing::error!("Impossibile rimuovere la sessione: {}", e);
        }
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}
