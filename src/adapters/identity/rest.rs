//! REST identity provider
//!
//! Resolves the acting user from the hosted auth endpoint
//! (`{base}/auth/v1/user`), the application role from the `user_roles`
//! collection, and signs out via `{base}/auth/v1/logout`. Transport and
//! status failures map into [`AuthError`]; reqwest types stay inside this
//! module.

use crate::adapters::identity::traits::IdentityProvider;
use crate::config::schema::{SessionConfig, StoreConfig};
use crate::config::secret::SecretString;
use crate::domain::errors::{AuthError, StoreError};
use crate::domain::{Identity, Result, Role, UserId};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// User payload from the auth endpoint; only the id matters here
#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
}

/// Row shape of the `user_roles` collection
#[derive(Debug, Deserialize)]
struct RoleRow {
    role: String,
}

/// REST implementation of the identity provider
///
/// A `session.user_id` override skips the auth endpoint entirely, so
/// headless runs can act as a known user without holding a live token.
pub struct RestIdentity {
    /// HTTP client for making requests
    client: Client,

    /// Project base URL, without a trailing slash
    base_url: String,

    /// Publishable API key
    api_key: SecretString,

    /// Bearer token of the signed-in user, if any
    access_token: Option<SecretString>,

    /// Acting-user override for headless use
    user_id_override: Option<String>,
}

impl RestIdentity {
    /// Create a new REST identity provider from configuration
    ///
    /// # Errors
    ///
    /// Returns a connection error if the HTTP client cannot be built.
    pub fn new(store: &StoreConfig, session: &SessionConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(store.timeout_seconds))
            .connect_timeout(Duration::from_secs(10));

        if !store.tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: store.base_url.trim_end_matches('/').to_string(),
            api_key: store.api_key.clone(),
            access_token: session.access_token.clone(),
            user_id_override: session.user_id.clone(),
        })
    }

    /// Bearer token for the role lookup: the session token when present,
    /// the API key otherwise
    fn bearer(&self) -> &SecretString {
        self.access_token.as_ref().unwrap_or(&self.api_key)
    }

    /// Resolve the acting user id, or `None` when no session is configured
    async fn fetch_user_id(&self) -> Result<Option<UserId>> {
        if let Some(user_id) = &self.user_id_override {
            let user_id = UserId::new(user_id.clone()).map_err(AuthError::SessionRejected)?;
            tracing::debug!(user_id = %user_id, "Using configured user id override");
            return Ok(Some(user_id));
        }

        let Some(token) = &self.access_token else {
            return Ok(None);
        };

        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apikey", self.api_key.expose_secret().as_ref())
            .bearer_auth(token.expose_secret().as_ref())
            .send()
            .await
            .map_err(|e| AuthError::SessionRejected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::SessionRejected(format!("status {status}: {body}")).into());
        }

        let user: AuthUser = response
            .json()
            .await
            .map_err(|e| AuthError::SessionRejected(e.to_string()))?;

        Ok(Some(
            UserId::new(user.id).map_err(AuthError::SessionRejected)?,
        ))
    }

    /// Look up the application role for a user
    ///
    /// A user with no role row, or with a role value outside the fixed
    /// enumeration, resolves to `None` and is treated as least-privileged
    /// by the access layer.
    async fn fetch_role(&self, user_id: &UserId) -> Result<Option<Role>> {
        let url = format!("{}/rest/v1/user_roles", self.base_url);
        let params = [
            ("select", "role".to_string()),
            ("user_id", format!("eq.{user_id}")),
            ("limit", "1".to_string()),
        ];

        let response = self
            .client
            .get(&url)
            .header("apikey", self.api_key.expose_secret().as_ref())
            .bearer_auth(self.bearer().expose_secret().as_ref())
            .query(&params)
            .send()
            .await
            .map_err(|e| AuthError::RoleLookupFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::RoleLookupFailed(format!("status {status}: {body}")).into());
        }

        let rows: Vec<RoleRow> = response
            .json()
            .await
            .map_err(|e| AuthError::RoleLookupFailed(e.to_string()))?;

        match rows.first() {
            None => Ok(None),
            Some(row) => match Role::from_str(&row.role) {
                Ok(role) => Ok(Some(role)),
                Err(e) => {
                    tracing::warn!(user_id = %user_id, error = %e, "Treating unknown role as unprivileged");
                    Ok(None)
                }
            },
        }
    }
}

#[async_trait]
impl IdentityProvider for RestIdentity {
    async fn current_identity(&self) -> Result<Option<Identity>> {
        let Some(user_id) = self.fetch_user_id().await? else {
            return Ok(None);
        };
        let role = self.fetch_role(&user_id).await?;
        tracing::debug!(user_id = %user_id, role = ?role, "Resolved identity");
        Ok(Some(Identity::new(user_id, role)))
    }

    async fn sign_out(&self) -> Result<()> {
        let Some(token) = &self.access_token else {
            return Err(AuthError::NotSignedIn.into());
        };

        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("apikey", self.api_key.expose_secret().as_ref())
            .bearer_auth(token.expose_secret().as_ref())
            .send()
            .await
            .map_err(|e| AuthError::SignOutFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::SignOutFailed(format!("status {status}: {body}")).into());
        }

        tracing::info!("Session ended");
        Ok(())
    }
}
