// ============================================================================
// hookcut-core/src/sheets/auth.rs
// ============================================================================
//
// SERVICE ACCOUNT AUTH: OAuth2 JWT-bearer flow for Google APIs
//
// A service account key (the JSON file downloaded from the Google Cloud
// console) is turned into a short-lived bearer token: an RS256-signed JWT
// assertion is posted to the key's token endpoint. Tokens last an hour,
// which comfortably covers one batch, so no refresh is attempted.

use crate::error::{CoreError, CoreResult};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: u64 = 3600;

/// Scopes requested for the caption sheet.
pub const SHEETS_SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets"];

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service account key file that the token flow needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Loads and checks a key file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::Credentials(format!(
                "credentials file not found: {}. Create a service account in the Google Cloud \
                 Console, download its JSON key and save it at this path",
                path.display()
            )));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses a key from its JSON text.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let key: ServiceAccountKey = serde_json::from_str(json)
            .map_err(|e| CoreError::Credentials(format!("malformed key file: {e}")))?;

        if let Some(kind) = key.key_type.as_deref() {
            if kind != "service_account" {
                return Err(CoreError::Credentials(format!(
                    "expected a service_account key, got '{kind}'"
                )));
            }
        }
        if key.client_email.trim().is_empty() {
            return Err(CoreError::Credentials("client_email is empty".to_string()));
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(CoreError::Credentials(
                "private_key is not a PEM encoded key".to_string(),
            ));
        }
        Ok(key)
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Builds the signed JWT assertion for `scopes`.
fn build_assertion(key: &ServiceAccountKey, scopes: &[&str], now: u64) -> CoreResult<String> {
    let claims = AssertionClaims {
        iss: &key.client_email,
        scope: scopes.join(" "),
        aud: &key.token_uri,
        iat: now,
        exp: now + TOKEN_LIFETIME_SECS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| CoreError::Credentials(format!("unusable private key: {e}")))?;

    jsonwebtoken::encode(&header, &claims, &encoding_key)
        .map_err(|e| CoreError::SheetAuth(format!("failed to sign token request: {e}")))
}

/// Exchanges the service account key for a bearer token.
pub fn fetch_access_token(
    http: &reqwest::blocking::Client,
    key: &ServiceAccountKey,
    scopes: &[&str],
) -> CoreResult<String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| CoreError::SheetAuth(format!("system clock before UNIX epoch: {e}")))?
        .as_secs();
    let assertion = build_assertion(key, scopes, now)?;

    log::debug!("Requesting access token for {}", key.client_email);
    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(CoreError::SheetAuth(format!(
            "token endpoint returned {status}: {}",
            body.trim()
        )));
    }

    let token: TokenResponse = response.json()?;
    log::debug!(
        "Access token obtained (expires in {}s)",
        token.expires_in.unwrap_or(TOKEN_LIFETIME_SECS)
    );
    Ok(token.access_token)
}
