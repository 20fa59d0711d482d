//! The enstash/destash/unstash protocol verbs.
//!
//! Server-side a stash moves `Created → {Consumed | Deleted | Expired}`,
//! all terminal. Each verb attempts exactly one transition; none of them
//! retries internally. Input validation and all cryptography happen
//! client-side before and after the single wire exchange, so malformed
//! input never reaches the network.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroize;

use crate::error::StashError;
use crate::transport::{ApiResponse, ApiTransport};
use stash_core::{format_token, is_uuid_v4, CipherEngine, Limits, Payload, StashToken};

/// 2xx response body for enstash and unstash.
#[derive(Debug, Deserialize)]
struct IdResponse {
    id: String,
}

/// Client for one Stash API endpoint.
///
/// Holds no mutable state; concurrent calls (e.g. batch enstash) are safe
/// and independent. No secret material is ever logged.
pub struct StashClient {
    transport: Arc<dyn ApiTransport>,
    engine: CipherEngine,
}

impl StashClient {
    /// Client with the default limits (4096-byte secrets, 16384-byte
    /// ciphertexts).
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self::with_limits(transport, Limits::default())
    }

    pub fn with_limits(transport: Arc<dyn ApiTransport>, limits: Limits) -> Self {
        Self {
            transport,
            engine: CipherEngine::new(limits),
        }
    }

    /// Encrypt a secret, store it, and return the redeemable token.
    ///
    /// The secret is validated and encrypted before any network call; the
    /// raw key is zeroized here as soon as the token string is formatted.
    pub async fn enstash(&self, secret: &str) -> Result<String, StashError> {
        let mut encrypted = self.engine.encrypt(secret)?;
        let body = serde_json::to_string(&encrypted.payload).map_err(stash_core::CoreError::from)?;

        let response = self.transport.post("/enstash", body).await?;
        if !response.is_success() {
            return Err(api_error(response));
        }

        let created: IdResponse = serde_json::from_str(&response.body)
            .map_err(|e| StashError::InvalidServerResponse(e.to_string()))?;
        if !is_uuid_v4(&created.id) {
            return Err(StashError::InvalidServerResponse(format!(
                "id is not a UUID v4: {:?}",
                created.id
            )));
        }

        let token = format_token(&created.id, &encrypted.key)?;
        encrypted.key.zeroize();
        debug!(id = %created.id, "stash created");
        Ok(token)
    }

    /// Redeem a token: fetch the stash and decrypt it.
    ///
    /// The read is destructive server-side (burn-after-read). A failed
    /// call is never retried here: after a successful-but-unacknowledged
    /// server delete, a retry would report failure for data that is
    /// already gone. Retrying is the caller's explicit choice.
    pub async fn destash(&self, token: &str) -> Result<String, StashError> {
        let parsed = StashToken::parse(token)?;

        let response = self.transport.get(&format!("/destash/{}", parsed.id)).await?;
        match response.status {
            status if (200..300).contains(&status) => {}
            404 => return Err(StashError::NotFound),
            410 => return Err(classify_gone(&response.body)),
            _ => return Err(api_error(response)),
        }

        let payload = Payload::parse(&response.body, self.engine.limits())?;
        let secret = self.engine.decrypt(&payload, parsed.key())?;
        debug!(id = %parsed.id, "stash redeemed");
        Ok(secret)
    }

    /// Delete a stash without reading it.
    ///
    /// Accepts a bare stash id or a full token; only the id goes over the
    /// wire. Returns a human-readable confirmation naming the deleted id.
    pub async fn unstash(&self, token_or_id: &str) -> Result<String, StashError> {
        let id = StashToken::parse_id_only(token_or_id).ok_or(StashError::InvalidUuid)?;

        let response = self.transport.delete(&format!("/unstash/{id}")).await?;
        match response.status {
            status if (200..300).contains(&status) => {}
            404 => return Err(StashError::NotFound),
            _ => return Err(api_error(response)),
        }

        debug!(id = %id, "stash deleted");
        Ok(format!("Stash {id} deleted"))
    }
}

fn api_error(response: ApiResponse) -> StashError {
    debug!(status = response.status, "api request failed");
    StashError::Api {
        status: response.status,
        body: response.body,
    }
}

/// Map a 410 body to `Expired` or `AlreadyConsumed` via the server's
/// `error` discriminator. An absent or unrecognized discriminator means
/// the stash was consumed.
fn classify_gone(body: &str) -> StashError {
    let discriminator = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));
    match discriminator.as_deref() {
        Some(reason) if reason.eq_ignore_ascii_case("expired") => StashError::Expired,
        _ => StashError::AlreadyConsumed,
    }
}
