use crate::config::YouTubeConfig;
use crate::error::{ConfigError, UploadError};
use crate::ports::credentials::{AccessToken, CredentialProvider};
use async_trait::async_trait;
use google_youtube3::yup_oauth2::{
    self, authenticator::DefaultAuthenticator, authorized_user::AuthorizedUserSecret,
};
use tokio::sync::OnceCell;
use tracing::info;

pub const UPLOAD_SCOPE: &str = "https://www.googleapis.com/auth/youtube.upload";

/// Exchanges the long-lived refresh token for upload-scoped access tokens.
///
/// The authenticator is built on first use so missing credentials only
/// surface when a request needs them. It keeps issued tokens in memory and
/// refreshes them when they expire.
pub struct OAuthCredentialProvider {
    config: YouTubeConfig,
    authenticator: OnceCell<DefaultAuthenticator>,
}

impl OAuthCredentialProvider {
    pub fn new(config: YouTubeConfig) -> Self {
        Self {
            config,
            authenticator: OnceCell::new(),
        }
    }

    async fn authenticator(&self) -> Result<&DefaultAuthenticator, UploadError> {
        let credentials = self.config.credentials()?;

        let authenticator = self
            .authenticator
            .get_or_try_init(|| async move {
                info!("Authenticating with OAuth2");
                let secret = AuthorizedUserSecret {
                    client_id: credentials.client_id,
                    client_secret: credentials.client_secret,
                    refresh_token: credentials.refresh_token,
                    key_type: "authorized_user".to_string(),
                };
                yup_oauth2::AuthorizedUserAuthenticator::builder(secret)
                    .build()
                    .await
            })
            .await?;

        Ok(authenticator)
    }
}

#[async_trait]
impl CredentialProvider for OAuthCredentialProvider {
    fn ensure_configured(&self) -> Result<(), ConfigError> {
        self.config.credentials().map(|_| ())
    }

    async fn authorize(&self) -> Result<AccessToken, UploadError> {
        let authenticator = self.authenticator().await?;

        let token = authenticator
            .token(&[UPLOAD_SCOPE])
            .await
            .map_err(|e| UploadError::Auth(e.to_string()))?;

        token
            .token()
            .map(|t| AccessToken(t.to_string()))
            .ok_or_else(|| UploadError::Auth("Token endpoint returned no access token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> YouTubeConfig {
        YouTubeConfig {
            client_id: Some("client-id".to_string()),
            client_secret: Some("client-secret".to_string()),
            refresh_token: Some("refresh-token".to_string()),
        }
    }

    #[test]
    fn test_ensure_configured() {
        let provider = OAuthCredentialProvider::new(full_config());
        assert!(provider.ensure_configured().is_ok());

        let mut config = full_config();
        config.refresh_token = None;
        let provider = OAuthCredentialProvider::new(config);
        assert!(matches!(
            provider.ensure_configured(),
            Err(ConfigError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authorize_without_credentials() {
        let provider = OAuthCredentialProvider::new(YouTubeConfig::default());

        let result = provider.authorize().await;

        assert!(matches!(result, Err(UploadError::Config(_))));
        assert!(provider.authenticator.get().is_none());
    }
}
