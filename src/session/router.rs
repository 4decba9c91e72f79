//! Role Router: sceglie la superficie (vendor / kitchen) dalla sessione salvata

use std::fmt;
use std::sync::Arc;

use super::credential::{Credential, CredentialStore, Role, UserProfile};
use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteState {
    /// Prima del primo `mount`
    Loading,
    Unauthenticated,
    Vendor,
    Kitchen,
}

impl RouteState {
    pub fn from_credential(credential: Option<&Credential>) -> Self {
        match credential.and_then(|c| c.user.role()) {
            Some(Role::Vendor) => RouteState::Vendor,
            Some(Role::Kitchen) => RouteState::Kitchen,
            None => RouteState::Unauthenticated,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            RouteState::Vendor => Some(Role::Vendor),
            RouteState::Kitchen => Some(Role::Kitchen),
            _ => None,
        }
    }
}

impl fmt::Display for RouteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteState::Loading => write!(f, "loading"),
            RouteState::Unauthenticated => write!(f, "unauthenticated"),
            RouteState::Vendor => write!(f, "vendor"),
            RouteState::Kitchen => write!(f, "kitchen"),
        }
    }
}

pub struct RoleRouter {
    store: Arc<CredentialStore>,
    state: RouteState,
    selected_role: Option<Role>,
}

impl RoleRouter {
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self {
            store,
            state: RouteState::Loading,
            selected_role: None,
        }
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    /// Rilegge la sessione e ricalcola lo stato
    pub fn mount(&mut self) -> RouteState {
        let credential = self.store.load();
        self.state = RouteState::from_credential(credential.as_ref());

        if let Some(credential) = credential.as_ref() {
            if self.state == RouteState::Unauthenticated {
                tracing::warn!(
                    "Ruolo '{}' non riconosciuto, mostrata la pagina iniziale",
                    credential.user.role
                );
            }
        }

        tracing::debug!("Superficie corrente: {}", self.state);
        self.state
    }

    /// Stessa valutazione di `mount`, chiamata a ogni navigazione
    pub fn refresh(&mut self) -> RouteState {
        self.mount()
    }

    /// Scelta del ruolo prima del login, non persistita
    ///
    /// Ritorna `false` se c'è già una sessione attiva.
    pub fn choose_role(&mut self, role: Role) -> bool {
        if matches!(self.state, RouteState::Vendor | RouteState::Kitchen) {
            tracing::warn!("Sessione attiva, scelta del ruolo ignorata");
            return false;
        }
        self.selected_role = Some(role);
        true
    }

    /// Ruolo scelto per il login; `vendor` se non indicato
    pub fn selected_role(&self) -> Role {
        self.selected_role.unwrap_or(Role::Vendor)
    }

    /// Persiste la sessione ottenuta da un'autenticazione riuscita
    pub fn authenticated(&mut self, token: &str, user: &UserProfile) -> Result<RouteState> {
        self.store.save(token, user)?;
        self.selected_role = None;
        Ok(self.mount())
    }

    pub fn logout(&mut self) -> RouteState {
        if let Err(e) = self.store.clear() {
            tracing::error!("Errore durante il logout: {}", e);
        }
        self.selected_role = None;
        self.state = RouteState::Unauthenticated;
        tracing::info!("Logout eseguito");
        self.state
    }

    /// Verifica che la superficie corrente sia quella richiesta
    pub fn require(&self, role: Role) -> Result<()> {
        match self.state.role() {
            Some(current) if current == role => Ok(()),
            Some(current) => Err(ClientError::Forbidden(format!(
                "comando riservato a '{}', sessione corrente '{}'",
                role, current
            ))),
            None => Err(ClientError::Unauthorized(
                "nessuna sessione attiva, eseguire il login".to_string(),
            )),
        }
    }

    /// Come `require` ma accetta entrambe le superfici
    pub fn require_any(&self) -> Result<Role> {
        self.state.role().ok_or_else(|| {
            ClientError::Unauthorized("nessuna sessione attiva, eseguire il login".to_string())
        })
    }
}
