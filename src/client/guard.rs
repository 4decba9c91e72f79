use std::sync::Arc;

use crate::session::CredentialStore;

/// Invalida la sessione quando il backend rifiuta il token
///
/// Non forza alcuna navigazione: la prossima valutazione del Role Router
/// troverà la sessione assente.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    store: Arc<CredentialStore>,
}

impl SessionGuard {
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self { store }
    }

    pub fn on_unauthorized(&self) {
        tracing::warn!("Sessione scaduta, credenziali rimosse");
        if let Err(e) = self.store.clear() {
            tracing::error!("Impossibile rimuovere le credenziali: {}", e);
        }
    }
}
