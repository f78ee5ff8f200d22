//! Session context
//!
//! Holds the authenticated identity and the bearer credential for the
//! duration of a session. The context is an explicit value: it is created by
//! [`SessionContext::init`] (decode the stored credential) or
//! [`SessionContext::login`], handed down the call chain, and torn down by
//! [`SessionContext::logout`]. A credential that cannot be decoded never
//! produces a session.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use tracing::{debug, info, warn};
use crate::models::{Identity, Role};
use crate::utils::errors::{EventDeskError, Result};
use super::storage::CredentialStore;

/// Claims read from the credential payload. Signature verification is the
/// server's job; the client only needs the identity claims.
#[derive(Debug, Clone, Deserialize)]
struct Claims {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    name: Option<String>,
    role: String,
    #[serde(default)]
    exp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    identity: Identity,
    credential: String,
    expires_at: Option<DateTime<Utc>>,
}

impl SessionContext {
    /// Decode a bearer credential into a session
    pub fn from_credential(credential: &str) -> Result<Self> {
        let credential = credential.trim();

        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(credential, &DecodingKey::from_secret(&[]), &validation)?.claims;

        let role: Role = claims
            .role
            .parse()
            .map_err(EventDeskError::Authentication)?;

        let id = claims
            .id
            .or(claims.sub)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| EventDeskError::Authentication("credential carries no user id".to_string()))?;

        let name = claims.name.unwrap_or_else(|| id.clone());
        let expires_at = claims.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single());

        Ok(Self {
            identity: Identity { id, name, role },
            credential: credential.to_string(),
            expires_at,
        })
    }

    /// Decode whatever credential the store holds. Decode failures are
    /// logged and treated exactly like an absent credential.
    pub async fn init(store: &CredentialStore) -> Result<Option<Self>> {
        let Some(credential) = store.load().await? else {
            debug!("No stored credential");
            return Ok(None);
        };

        match Self::from_credential(&credential) {
            Ok(session) => {
                debug!(user_id = %session.identity.id, role = %session.identity.role, "Session restored");
                Ok(Some(session))
            }
            Err(e) => {
                warn!(error = %e, "Stored credential is not usable");
                Ok(None)
            }
        }
    }

    /// Validate a credential and persist it
    pub async fn login(store: &CredentialStore, credential: &str) -> Result<Self> {
        let session = Self::from_credential(credential)?;
        store.save(&session.credential).await?;
        info!(user_id = %session.identity.id, role = %session.identity.role, "Signed in");
        Ok(session)
    }

    /// End the session and forget the credential
    pub async fn logout(self, store: &CredentialStore) -> Result<()> {
        store.clear().await?;
        info!(user_id = %self.identity.id, "Signed out");
        Ok(())
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}
