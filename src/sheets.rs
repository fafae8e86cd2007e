use crate::config::{Config, ServiceAccountKey};
use crate::errors::SheetsError;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;
const TOKEN_EXPIRY_SKEW_SECS: i64 = 60;

pub const HEADER_ROW: [&str; 2] = ["Name", "Phone Number"];

#[derive(Debug, Serialize)]
struct Claims<'a> {
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

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Thin client for the Google Sheets v4 REST API.
///
/// The access token is acquired lazily on first use and cached for the
/// process lifetime, refreshed shortly before expiry.
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    key: Arc<ServiceAccountKey>,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl SheetsClient {
    pub fn new(config: &Config, key: ServiceAccountKey) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.sheets_api_url.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            key: Arc::new(key),
            token: Arc::new(Mutex::new(None)),
        }
    }

    pub fn service_account(&self) -> &str {
        &self.key.client_email
    }

    /// Makes sure the tab exists, creating it with the header row if absent.
    pub async fn ensure_worksheet(&self, title: &str) -> Result<(), SheetsError> {
        if self.worksheet_titles().await?.iter().any(|t| t == title) {
            return Ok(());
        }

        self.add_worksheet(title).await?;
        let header: Vec<String> = HEADER_ROW.iter().map(|cell| cell.to_string()).collect();
        self.append_row(title, &header).await?;
        info!("created worksheet '{title}'");
        Ok(())
    }

    /// Appends one row to the tab, values taken as-entered.
    pub async fn append_row(&self, title: &str, row: &[String]) -> Result<(), SheetsError> {
        let token = self.access_token().await?;
        let range = format!("'{title}'!A1");
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&range)
        );
        let body = serde_json::json!({ "values": [row] });

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&body)
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    async fn worksheet_titles(&self) -> Result<Vec<String>, SheetsError> {
        let token = self.access_token().await?;
        let url = format!("{}/v4/spreadsheets/{}", self.base_url, self.spreadsheet_id);

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties.title")])
            .send()
            .await?;
        let response = self.check(response).await?;

        let meta: SpreadsheetMeta = response.json().await?;
        Ok(meta
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.title)
            .collect())
    }

    async fn add_worksheet(&self, title: &str) -> Result<(), SheetsError> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/v4/spreadsheets/{}:batchUpdate",
            self.base_url, self.spreadsheet_id
        );
        let body = serde_json::json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": { "rowCount": 1000, "columnCount": 3 }
                    }
                }
            }]
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .map(|body| body.error.message)
            .unwrap_or_else(|_| format!("HTTP {status}"));
        error!("sheets api error ({status}): {message}");
        Err(classify(status, message, self.key.client_email.clone()))
    }

    async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now().timestamp();
        if let Some(token) = cached.as_ref() {
            if now < token.expires_at - TOKEN_EXPIRY_SKEW_SECS {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.fetch_token(now).await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    async fn fetch_token(&self, now: i64) -> Result<CachedToken, SheetsError> {
        let assertion = self.signed_assertion(now)?;
        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }

    fn signed_assertion(&self, now: i64) -> Result<String, SheetsError> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|err| SheetsError::Auth(format!("invalid service-account key: {err}")))?;
        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|err| SheetsError::Auth(format!("failed to sign token request: {err}")))
    }
}

// An unshared sheet surfaces as 403, an unknown id as 404; both get the
// share-the-sheet hint. Everything else carries the API's own message.
fn classify(status: StatusCode, message: String, service_account: String) -> SheetsError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
            SheetsError::SpreadsheetNotFound { service_account }
        }
        _ => SheetsError::Api(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_not_found_names_service_account() {
        let err = classify(
            StatusCode::NOT_FOUND,
            "Requested entity was not found.".to_string(),
            "bot@example.iam.gserviceaccount.com".to_string(),
        );
        let text = err.to_string();
        assert!(text.contains("bot@example.iam.gserviceaccount.com"));
        assert!(text.contains("share it with"));
    }

    #[test]
    fn classify_forbidden_gets_same_hint() {
        let err = classify(
            StatusCode::FORBIDDEN,
            "The caller does not have permission".to_string(),
            "bot@example.iam.gserviceaccount.com".to_string(),
        );
        assert!(matches!(err, SheetsError::SpreadsheetNotFound { .. }));
    }

    #[test]
    fn classify_other_statuses_keep_api_message() {
        let err = classify(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error encountered.".to_string(),
            "bot@example.iam.gserviceaccount.com".to_string(),
        );
        assert!(matches!(err, SheetsError::Api(message) if message == "Internal error encountered."));
    }
}
