// src/integrations/backend/client.rs
//
// Managed Backend Integration (auth + REST tables)
//
// ARCHITECTURE:
// - HTTP client for a GoTrue-style auth API and a PostgREST-style table API
// - Maps wire payloads → Identity / Session (NO tracker state here)
// - Used by SessionService and the remote repositories
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never retries; every failure goes back to the caller
// - Every request carries the anon key; table requests also carry the
//   caller's access token so row-level security applies

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::query::RowQuery;
use crate::domain::{Identity, Session};
use crate::error::{AppError, AppResult};

const SERVICE_NAME: &str = "Backend";

/// User object returned by the auth API
#[derive(Debug, Clone, Deserialize)]
struct UserData {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    created_at: DateTime<Utc>,
}

/// Token grant / sign-up-with-session response
#[derive(Debug, Clone, Deserialize)]
struct TokenData {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: UserData,
}

/// Sign-up answers with a session when email confirmation is off,
/// and with the bare user otherwise
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpData {
    Session(TokenData),
    User(UserData),
}

/// Error body of the auth API; field names vary by endpoint and version
#[derive(Debug, Default, Deserialize)]
struct AuthErrorData {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Error body of the table API
#[derive(Debug, Default, Deserialize)]
struct RestErrorData {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Outcome of a sign-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Account created and signed in
    SignedIn(Session),
    /// Account created; the provider wants the email confirmed first
    ConfirmationRequired(Identity),
}

/// Managed backend client
#[derive(Clone, Debug)]
pub struct BackendClient {
    base_url: String,
    anon_key: String,
    http_client: Client,
}

impl BackendClient {
    /// Create a new client for the backend at `base_url`
    /// (e.g. "https://project.supabase.co").
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = base_url.into();
        log::debug!("creating BackendClient for {}", base_url);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            http_client,
        })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Attach the anon key and a bearer token (the anon key itself when no
    /// user token is available)
    fn authorize(&self, request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
            .header(header::ACCEPT, "application/json")
    }

    // ========================================================================
    // AUTH
    // ========================================================================

    /// POST /auth/v1/token?grant_type=password
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<Session> {
        let url = self.auth_url("token");
        log::debug!("POST {} (password grant)", url);
        let request = self
            .authorize(self.http_client.post(&url), None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));

        let response = Self::check_auth(request.send().await?).await?;
        let token: TokenData = response.json().await?;
        Ok(Self::map_session(token))
    }

    /// POST /auth/v1/signup
    pub async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpOutcome> {
        let url = self.auth_url("signup");
        log::debug!("POST {}", url);
        let request = self
            .authorize(self.http_client.post(&url), None)
            .json(&json!({ "email": email, "password": password }));

        let response = Self::check_auth(request.send().await?).await?;
        let body = response.text().await?;
        Self::parse_sign_up(&body)
    }

    /// POST /auth/v1/token?grant_type=refresh_token
    pub async fn refresh_session(&self, refresh_token: &str) -> AppResult<Session> {
        let url = self.auth_url("token");
        log::debug!("POST {} (refresh grant)", url);
        let request = self
            .authorize(self.http_client.post(&url), None)
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }));

        let response = Self::check_auth(request.send().await?).await?;
        let token: TokenData = response.json().await?;
        Ok(Self::map_session(token))
    }

    /// GET /auth/v1/user
    pub async fn get_user(&self, access_token: &str) -> AppResult<Identity> {
        let url = self.auth_url("user");
        log::debug!("GET {}", url);
        let request = self.authorize(self.http_client.get(&url), Some(access_token));

        let response = Self::check_auth(request.send().await?).await?;
        let user: UserData = response.json().await?;
        Ok(Self::map_identity(user))
    }

    /// POST /auth/v1/logout
    pub async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        let url = self.auth_url("logout");
        log::debug!("POST {}", url);
        let request = self.authorize(self.http_client.post(&url), Some(access_token));

        Self::check_auth(request.send().await?).await?;
        Ok(())
    }

    // ========================================================================
    // TABLES
    // ========================================================================

    /// GET /rest/v1/{table}
    pub async fn select<T>(&self, access_token: &str, table: &str, query: &RowQuery) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.table_url(table);
        log::debug!("GET {} {:?}", url, query);
        let request = self
            .authorize(self.http_client.get(&url), Some(access_token))
            .query(&query.select_pairs());

        let response = Self::check_rest(request.send().await?).await?;
        let body = response.text().await?;
        serde_json::from_str::<Vec<T>>(&body).map_err(|e| {
            let snippet: String = body.chars().take(500).collect();
            log::error!("failed to parse {} rows: {} (body: {})", table, e, snippet);
            AppError::Serialization(e)
        })
    }

    /// POST /rest/v1/{table}
    pub async fn insert<B>(&self, access_token: &str, table: &str, row: &B) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.table_url(table);
        log::debug!("POST {}", url);
        let request = self
            .authorize(self.http_client.post(&url), Some(access_token))
            .header("Prefer", "return=minimal")
            .json(row);

        Self::check_rest(request.send().await?).await?;
        Ok(())
    }

    /// PATCH /rest/v1/{table}?filters
    pub async fn update<B>(
        &self,
        access_token: &str,
        table: &str,
        filters: &RowQuery,
        patch: &B,
    ) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        Self::require_filters(table, filters)?;
        let url = self.table_url(table);
        log::debug!("PATCH {} {:?}", url, filters);
        let request = self
            .authorize(self.http_client.patch(&url), Some(access_token))
            .header("Prefer", "return=minimal")
            .query(&filters.filter_pairs())
            .json(patch);

        Self::check_rest(request.send().await?).await?;
        Ok(())
    }

    /// DELETE /rest/v1/{table}?filters
    pub async fn delete(&self, access_token: &str, table: &str, filters: &RowQuery) -> AppResult<()> {
        Self::require_filters(table, filters)?;
        let url = self.table_url(table);
        log::debug!("DELETE {} {:?}", url, filters);
        let request = self
            .authorize(self.http_client.delete(&url), Some(access_token))
            .query(&filters.filter_pairs());

        Self::check_rest(request.send().await?).await?;
        Ok(())
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    /// Unfiltered writes would touch every row the token can see
    fn require_filters(table: &str, filters: &RowQuery) -> AppResult<()> {
        if filters.has_filters() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Refusing unfiltered write to {}",
                table
            )))
        }
    }

    async fn check_auth(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::warn!("auth request rejected with {}: {}", status, body);
        Err(Self::auth_error(status.as_u16(), &body))
    }

    async fn check_rest(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::warn!("table request rejected with {}: {}", status, body);
        Err(Self::rest_error(status.as_u16(), &body))
    }

    fn auth_error(status: u16, body: &str) -> AppError {
        let data: AuthErrorData = serde_json::from_str(body).unwrap_or_default();
        if data.error_code.as_deref() == Some("user_already_exists") {
            return AppError::AlreadyRegistered;
        }
        let message = data
            .msg
            .or(data.message)
            .or(data.error_description)
            .or(data.error)
            .unwrap_or_else(|| format!("{} returned status {}", SERVICE_NAME, status));
        AppError::from_auth_message(message)
    }

    fn rest_error(status: u16, body: &str) -> AppError {
        let data: RestErrorData = serde_json::from_str(body).unwrap_or_default();
        let message = match (data.message, data.details) {
            (Some(message), Some(details)) => format!("{} ({})", message, details),
            (Some(message), None) => message,
            (None, _) => body.chars().take(200).collect(),
        };
        AppError::Remote {
            service: SERVICE_NAME,
            status,
            message,
        }
    }

    fn parse_sign_up(body: &str) -> AppResult<SignUpOutcome> {
        let data: SignUpData = serde_json::from_str(body)?;
        Ok(match data {
            SignUpData::Session(token) => SignUpOutcome::SignedIn(Self::map_session(token)),
            SignUpData::User(user) => SignUpOutcome::ConfirmationRequired(Self::map_identity(user)),
        })
    }

    fn map_identity(user: UserData) -> Identity {
        Identity {
            id: user.id,
            email: user.email.unwrap_or_default(),
            created_at: user.created_at,
        }
    }

    fn map_session(token: TokenData) -> Session {
        let expires_at = token
            .expires_at
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .or_else(|| {
                token
                    .expires_in
                    .map(|secs| Utc::now() + chrono::Duration::seconds(secs))
            });

        Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at,
            identity: Self::map_identity(token.user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_JSON: &str = r#"{
        "id": "0b6f7c1e-3d4a-4c55-9a35-7a1c2b3d4e5f",
        "aud": "authenticated",
        "email": "reader@example.com",
        "created_at": "2024-03-01T10:00:00.000000Z"
    }"#;

    #[test]
    fn test_urls_are_built_from_trimmed_base() {
        let client = BackendClient::new("https://project.supabase.co/", "anon").unwrap();
        assert_eq!(client.auth_url("token"), "https://project.supabase.co/auth/v1/token");
        assert_eq!(
            client.table_url("reading_list"),
            "https://project.supabase.co/rest/v1/reading_list"
        );
    }

    #[test]
    fn test_token_response_maps_to_session() {
        let json = format!(
            r#"{{ "access_token": "a", "token_type": "bearer", "expires_in": 3600,
                 "expires_at": 1735689600, "refresh_token": "r", "user": {} }}"#,
            USER_JSON
        );
        let token: TokenData = serde_json::from_str(&json).unwrap();
        let session = BackendClient::map_session(token);

        assert_eq!(session.access_token, "a");
        assert_eq!(session.refresh_token, "r");
        assert_eq!(session.identity.email, "reader@example.com");
        assert_eq!(
            session.expires_at,
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_sign_up_without_session_requires_confirmation() {
        match BackendClient::parse_sign_up(USER_JSON).unwrap() {
            SignUpOutcome::ConfirmationRequired(identity) => {
                assert_eq!(identity.email, "reader@example.com")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_sign_up_with_session_signs_in() {
        let json = format!(
            r#"{{ "access_token": "a", "refresh_token": "r", "expires_in": 60, "user": {} }}"#,
            USER_JSON
        );
        assert!(matches!(
            BackendClient::parse_sign_up(&json).unwrap(),
            SignUpOutcome::SignedIn(_)
        ));
    }

    #[test]
    fn test_already_registered_error_code() {
        let body = r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#;
        assert!(matches!(
            BackendClient::auth_error(422, body),
            AppError::AlreadyRegistered
        ));
    }

    #[test]
    fn test_invalid_credentials_message_kept() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        match BackendClient::auth_error(400, body) {
            AppError::Auth { message } => assert_eq!(message, "Invalid login credentials"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_auth_error_uses_status() {
        match BackendClient::auth_error(502, "<html>bad gateway</html>") {
            AppError::Auth { message } => assert!(message.contains("502")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rest_error_carries_message() {
        let body = r#"{"code":"42501","message":"permission denied for table bookmarks","details":null,"hint":null}"#;
        match BackendClient::rest_error(403, body) {
            AppError::Remote { status, message, .. } => {
                assert_eq!(status, 403);
                assert_eq!(message, "permission denied for table bookmarks");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unfiltered_writes_refused() {
        assert!(BackendClient::require_filters("bookmarks", &RowQuery::new()).is_err());
        assert!(BackendClient::require_filters("bookmarks", &RowQuery::new().eq("id", 1)).is_ok());
    }
}
