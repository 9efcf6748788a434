//! # Google Sheets Sink
//!
//! Appends rows to a spreadsheet with a service-account identity.
//!
//! Authorization follows the OAuth 2.0 JWT bearer grant: an RS256 assertion
//! signed with the service account key is exchanged at the key's `token_uri`
//! for an access token. The token is cached and refreshed a minute before it
//! expires.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::entry::LogEntry;
use super::errors::{SinkError, SinkResult};
use super::{LogSink, RowSink};

/// Scopes requested for the access token
pub const SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";

/// Sheets REST API root
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service account JSON key this sink needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Load a key from its JSON file
    pub fn load(path: &Path) -> SinkResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SinkError::Auth(format!("Failed to read service account key {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse a key from JSON text
    pub fn from_json(json: &str) -> SinkResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SinkError::Auth(format!("Invalid service account key: {}", e)))
    }
}

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
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: i64,
}

impl AccessToken {
    fn is_fresh(&self, now: i64) -> bool {
        now + REFRESH_MARGIN_SECS < self.expires_at
    }
}

/// Where rows go
#[derive(Debug, Clone)]
pub struct SheetTarget {
    pub spreadsheet_id: String,
    /// A1 range; `A1` appends to the first worksheet
    pub range: String,
}

/// Remote spreadsheet log sink
pub struct SheetsSink {
    client: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    target: SheetTarget,
    api_base: Url,
    token: Mutex<Option<AccessToken>>,
}

impl std::fmt::Debug for SheetsSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsSink")
            .field("client_email", &self.key.client_email)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl SheetsSink {
    /// Build a sink without contacting the network
    pub fn new(key: ServiceAccountKey, target: SheetTarget) -> SinkResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SinkError::Auth(format!("Invalid service account private key: {}", e)))?;
        let api_base = Url::parse(SHEETS_API_BASE)
            .map_err(|e| SinkError::Malformed(format!("Invalid Sheets API base: {}", e)))?;

        Ok(Self {
            client: reqwest::Client::new(),
            key,
            encoding_key,
            target,
            api_base,
            token: Mutex::new(None),
        })
    }

    /// Build a sink and obtain the first access token.
    ///
    /// A failure here means the sink is unavailable for the process lifetime.
    pub async fn connect(key_path: &Path, target: SheetTarget) -> SinkResult<Self> {
        let key = ServiceAccountKey::load(key_path)?;
        let sink = Self::new(key, target)?;
        sink.access_token().await?;
        Ok(sink)
    }

    /// Spreadsheet being written to
    pub fn target(&self) -> &SheetTarget {
        &self.target
    }

    fn signed_assertion(&self, now: i64) -> SinkResult<String> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SCOPES,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|e| SinkError::Auth(format!("Failed to sign assertion: {}", e)))
    }

    async fn access_token(&self) -> SinkResult<String> {
        let mut cached = self.token.lock().await;
        let now = Utc::now().timestamp();

        if let Some(ref token) = *cached {
            if token.is_fresh(now) {
                return Ok(token.value.clone());
            }
        }

        let assertion = self.signed_assertion(now)?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Auth(format!("Token exchange failed ({}): {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SinkError::Auth(format!("Invalid token response: {}", e)))?;

        let value = token.access_token.clone();
        *cached = Some(AccessToken {
            value: token.access_token,
            expires_at: now + token.expires_in,
        });

        Ok(value)
    }

    fn append_url(&self) -> SinkResult<Url> {
        append_url(&self.api_base, &self.target)
    }
}

fn append_url(base: &Url, target: &SheetTarget) -> SinkResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| SinkError::Malformed("Sheets API base cannot hold a path".to_string()))?
        .pop_if_empty()
        .push("spreadsheets")
        .push(&target.spreadsheet_id)
        .push("values")
        .push(&format!("{}:append", target.range));
    url.query_pairs_mut()
        .append_pair("valueInputOption", "RAW")
        .append_pair("insertDataOption", "INSERT_ROWS");
    Ok(url)
}

#[async_trait]
impl LogSink for SheetsSink {
    async fn append(&self, entry: &LogEntry) -> SinkResult<()> {
        self.append_row(&self.row(entry)).await
    }

    fn name(&self) -> &'static str {
        "sheets"
    }
}

#[async_trait]
impl RowSink for SheetsSink {
    async fn append_row(&self, row: &[String]) -> SinkResult<()> {
        let token = self.access_token().await?;
        let body = serde_json::json!({ "values": [row] });

        let response = self
            .client
            .post(self.append_url()?)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> SheetTarget {
        SheetTarget {
            spreadsheet_id: "abc123".to_string(),
            range: "A1".to_string(),
        }
    }

    #[test]
    fn test_key_defaults_token_uri() {
        let key = ServiceAccountKey::from_json(
            r#"{"client_email":"logger@project.iam.gserviceaccount.com","private_key":"pem"}"#,
        )
        .unwrap();
        assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");
        assert!(key.private_key_id.is_none());
    }

    #[test]
    fn test_key_missing_fields() {
        let err = ServiceAccountKey::from_json(r#"{"client_email":"x"}"#).unwrap_err();
        assert!(matches!(err, SinkError::Auth(_)));
    }

    #[test]
    fn test_invalid_private_key_rejected() {
        let key = ServiceAccountKey::from_json(
            r#"{"client_email":"x@y","private_key":"not a pem"}"#,
        )
        .unwrap();
        assert!(matches!(SheetsSink::new(key, target()), Err(SinkError::Auth(_))));
    }

    #[tokio::test]
    async fn test_connect_missing_key_file() {
        let err = SheetsSink::connect(Path::new("/nonexistent/key.json"), target())
            .await
            .unwrap_err();
        assert!(matches!(err, SinkError::Auth(_)));
    }

    #[test]
    fn test_append_url() {
        let base = Url::parse(SHEETS_API_BASE).unwrap();
        let url = append_url(&base, &target()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/A1:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS"
        );
    }

    #[test]
    fn test_append_url_stores_input_verbatim() {
        let base = Url::parse(SHEETS_API_BASE).unwrap();
        let url = append_url(&base, &target()).unwrap();
        let options: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(options.contains(&("valueInputOption".to_string(), "RAW".to_string())));
        assert!(!url.as_str().contains("USER_ENTERED"));
    }

    #[test]
    fn test_append_url_encodes_sheet_name() {
        let base = Url::parse(SHEETS_API_BASE).unwrap();
        let target = SheetTarget {
            spreadsheet_id: "abc123".to_string(),
            range: "Explain Logs!A1".to_string(),
        };
        let url = append_url(&base, &target).unwrap();
        assert!(url.path().ends_with("/values/Explain%20Logs!A1:append"));
    }

    #[test]
    fn test_token_freshness() {
        let token = AccessToken {
            value: "t".to_string(),
            expires_at: 1_000,
        };
        assert!(token.is_fresh(900));
        assert!(!token.is_fresh(950));
        assert!(!token.is_fresh(1_000));
    }
}
