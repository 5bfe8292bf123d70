//! External identity provider client.
//!
//! Authorization-code flow against an OIDC-style provider: redirect the
//! browser to the provider, exchange the returned code for an access token,
//! then read the userinfo endpoint for the subject and profile claims. The
//! provider is trusted for identity; this service never sees a password.

use anyhow::{Context, Result};
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::config::OidcConfig;
use crate::models::UpsertUser;

/// Claims read from the provider's userinfo endpoint.
///
/// Aliases cover providers that use flat claim names instead of the
/// standard OIDC ones.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderClaims {
    pub sub: String,
    pub email: Option<String>,
    #[serde(alias = "first_name")]
    pub given_name: Option<String>,
    #[serde(alias = "last_name")]
    pub family_name: Option<String>,
    #[serde(alias = "profile_image_url")]
    pub picture: Option<String>,
}

impl From<ProviderClaims> for UpsertUser {
    fn from(claims: ProviderClaims) -> Self {
        UpsertUser {
            id: claims.sub,
            email: claims.email,
            first_name: claims.given_name,
            last_name: claims.family_name,
            profile_image_url: claims.picture,
        }
    }
}

/// Identity provider client.
pub struct OidcService {
    client: BasicClient,
    http: reqwest::Client,
    userinfo_url: String,
}

impl OidcService {
    /// Build the client from configuration.
    pub fn new(config: &OidcConfig) -> Result<Self> {
        let auth_url =
            AuthUrl::new(config.auth_url.clone()).context("OIDC_AUTH_URL is not a valid URL")?;
        let token_url =
            TokenUrl::new(config.token_url.clone()).context("OIDC_TOKEN_URL is not a valid URL")?;
        let redirect_url = RedirectUrl::new(config.redirect_url.clone())
            .context("OIDC_REDIRECT_URL is not a valid URL")?;

        let client = BasicClient::new(
            ClientId::new(config.client_id.clone()),
            Some(ClientSecret::new(config.client_secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_redirect_uri(redirect_url);

        Ok(Self {
            client,
            http: reqwest::Client::new(),
            userinfo_url: config.userinfo_url.clone(),
        })
    }

    /// Build the provider authorization URL plus the CSRF state token to
    /// stash in the session.
    pub fn authorize_url(&self) -> (url::Url, CsrfToken) {
        self.client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .url()
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: String) -> Result<String> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(async_http_client)
            .await
            .map_err(|e| anyhow::anyhow!("token exchange failed: {e}"))?;

        Ok(token.access_token().secret().clone())
    }

    /// Fetch identity claims from the userinfo endpoint.
    pub async fn fetch_claims(&self, access_token: &str) -> Result<ProviderClaims> {
        let claims = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .context("userinfo request failed")?
            .error_for_status()
            .context("userinfo endpoint rejected the token")?
            .json::<ProviderClaims>()
            .await
            .context("failed to parse userinfo claims")?;

        Ok(claims)
    }
}
