//! Service-account authentication for Google APIs.
//!
//! Implements the OAuth2 JWT-bearer grant: an RS256-signed assertion built
//! from the service-account credentials is exchanged at the configured token
//! URI for a short-lived access token. The token is cached and refreshed in
//! place shortly before it expires.

use anyhow::{Context, anyhow};
use jiff::Timestamp;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::ServiceAccountConfig;
use crate::error::{AppError, AppResult};
use crate::external::HTTP_CLIENT;

/// OAuth scopes covering Firestore access and FCM sends.
const SCOPES: &str =
    "https://www.googleapis.com/auth/datastore https://www.googleapis.com/auth/firebase.messaging";

/// Assertion lifetime in seconds (the maximum Google accepts).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh the cached token this many seconds before it actually expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    access_token: String,
    expires_at: Timestamp,
}

/// Provides cached OAuth2 access tokens for the service account.
pub struct TokenProvider {
    client_email: String,
    token_uri: String,
    encoding_key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    /// Builds a provider from service-account credentials.
    ///
    /// Parses the PEM private key eagerly so a malformed key fails at
    /// startup rather than on the first request.
    pub fn new(account: &ServiceAccountConfig) -> AppResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(account.private_key.as_bytes()).map_err(
            |e| AppError::Configuration {
                key: "FIREBASE_PRIVATE_KEY".to_string(),
                source: anyhow!(e).context("failed to parse service-account private key"),
            },
        )?;

        Ok(Self {
            client_email: account.client_email.clone(),
            token_uri: account.token_uri.clone(),
            encoding_key,
            cached: Mutex::new(None),
        })
    }

    /// Returns a valid access token, fetching a fresh one if the cached
    /// token is absent or close to expiry.
    pub async fn token(&self) -> AppResult<String> {
        let mut cached = self.cached.lock().await;

        let now = Timestamp::now();
        if let Some(token) = cached.as_ref() {
            let margin = jiff::SignedDuration::from_secs(EXPIRY_MARGIN_SECS);
            let threshold = token
                .expires_at
                .saturating_sub(margin)
                .expect("saturating_sub with SignedDuration is infallible");
            if threshold > now {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.exchange(now).await.map_err(|e| AppError::Store {
            operation: "service-account token exchange".to_string(),
            source: e,
        })?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);

        Ok(access_token)
    }

    async fn exchange(&self, now: Timestamp) -> anyhow::Result<CachedToken> {
        let assertion = self.sign_assertion(now)?;

        let response = HTTP_CLIENT
            .post(&self.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .context("token endpoint unreachable")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("token endpoint returned {status}: {body}"));
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("malformed token endpoint response")?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + jiff::SignedDuration::from_secs(token.expires_in),
        })
    }

    fn sign_assertion(&self, now: Timestamp) -> anyhow::Result<String> {
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: SCOPES,
            aud: &self.token_uri,
            iat: now.as_second(),
            exp: now.as_second() + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .context("failed to sign service-account assertion")
    }
}
