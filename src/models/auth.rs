//! Authentication-related models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::{Role, UserProfile};

/// Login con username/email e password
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username_or_email", &self.username_or_email)
            .field("password", &"***")
            .finish()
    }
}

/// Credenziale del provider di identità (Google) da scambiare col backend
#[derive(Debug, Clone, Serialize)]
pub struct IdentityExchangeRequest {
    /// Credenziale opaca restituita dal widget OAuth
    pub token: String,
    /// Ruolo con cui registrarsi se l'utente è nuovo
    pub role: Role,
}

/// Risposta di un'autenticazione riuscita
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: UserProfile,
}
