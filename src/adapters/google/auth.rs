use error_stack::ResultExt;
use google_sheets4::oauth2::{
    self, authenticator::Authenticator, InstalledFlowAuthenticator, InstalledFlowReturnMethod,
};
use thiserror::Error;
use tracing::instrument;

use crate::config::google_config::GoogleConfig;

use super::http_client::{HttpClient, HttpsConnector};

pub type GoogleAuthenticator = Authenticator<HttpsConnector>;

pub const PRESENTATIONS_SCOPE: &str = "https://www.googleapis.com/auth/presentations";

pub const SCOPES: [&str; 3] = [
    PRESENTATIONS_SCOPE,
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/youtube.force-ssl",
];

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("could not read OAuth client secret")]
    ReadSecret,
    #[error("could not create an authenticator")]
    BuildAuthenticator,
    #[error("could not obtain an access token")]
    FetchToken,
}

/// Installed-app OAuth flow with tokens cached on disk.
///
/// A token covering every scope is requested up front, so the user is asked
/// for consent at most once and later per-service calls reuse it.
#[instrument(skip(client))]
pub async fn auth(
    config: &GoogleConfig,
    client: HttpClient,
) -> error_stack::Result<GoogleAuthenticator, AuthError> {
    let client_secret = config.client_secret.as_ref();
    let secret = oauth2::read_application_secret(client_secret)
        .await
        .change_context(AuthError::ReadSecret)
        .attach_printable_lazy(|| format!("Client secret path: {}", client_secret))?;

    let authenticator = InstalledFlowAuthenticator::with_client(
        secret,
        InstalledFlowReturnMethod::HTTPRedirect,
        client,
    )
    .persist_tokens_to_disk(config.token_cache.as_ref())
    .build()
    .await
    .change_context(AuthError::BuildAuthenticator)?;

    authenticator
        .token(&SCOPES)
        .await
        .change_context(AuthError::FetchToken)?;

    Ok(authenticator)
}
