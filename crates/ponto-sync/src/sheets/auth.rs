//! Service-account authentication for the Sheets API.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::{SyncError, SyncResult};

/// OAuth scope covering worksheet read/write.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;

/// The subset of the service-account key blob we need.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    /// Parse the JSON-encoded key from the environment blob.
    pub fn from_json(raw: &str) -> SyncResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| SyncError::Config(format!("invalid service account credentials: {e}")))
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Sign a JWT assertion with the key and exchange it for a bearer token.
pub async fn fetch_token(http: &reqwest::Client, key: &ServiceAccountKey) -> SyncResult<String> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let claims = Claims {
        iss: &key.client_email,
        scope: SHEETS_SCOPE,
        aud: &key.token_uri,
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| SyncError::Config(format!("invalid service account private key: {e}")))?;
    let assertion = encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
        .map_err(|e| SyncError::Publish(format!("failed to sign token assertion: {e}")))?;

    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
        .send()
        .await?
        .error_for_status()
        .map_err(|e| SyncError::Publish(format!("token exchange failed: {e}")))?;

    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}
