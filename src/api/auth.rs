use crate::client::{ApiClient, Envelope};
use crate::error::Result;
use crate::models::{AuthSession, IdentityExchangeRequest, LoginRequest};
use crate::session::{Role, RoleRouter, RouteState};

pub async fn login(client: &ApiClient, request: &LoginRequest) -> Envelope<AuthSession> {
    client.post_json("/auth/login", request).await
}

/// Scambia la credenziale del provider di identità con una sessione
pub async fn exchange_identity(
    client: &ApiClient,
    credential: &str,
    role: Role,
) -> Envelope<AuthSession> {
    let request = IdentityExchangeRequest {
        token: credential.to_string(),
        role,
    };
    client.post_json("/auth/google", &request).await
}

/// Login con password: salva la sessione e aggiorna la superficie
pub async fn sign_in(
    client: &ApiClient,
    router: &mut RoleRouter,
    request: &LoginRequest,
) -> Result<RouteState> {
    let session = login(client, request).await.into_data()?;
    tracing::info!("Login riuscito per {}", request.username_or_email);
    router.authenticated(&session.access_token, &session.user)
}

/// Login tramite provider di identità con il ruolo scelto nel router
pub async fn sign_in_with_identity(
    client: &ApiClient,
    router: &mut RoleRouter,
    credential: &str,
) -> Result<RouteState> {
    let role = router.selected_role();
    let session = exchange_identity(client, credential, role).await.into_data()?;
    tracing::info!("Login con Google riuscito (ruolo richiesto {})", role);
    router.authenticated(&session.access_token, &session.user)
}
