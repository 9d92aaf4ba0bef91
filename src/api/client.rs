//! API client for the campaign backend.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests against the backend's row-level CRUD API (`/rest/v1/{table}`)
//! and its identity service (`/auth/v1`). All table access funnels through
//! a handful of generic helpers so every view gets the same error handling
//! and rate-limit behavior.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::{header, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::SessionData;
use crate::models::{
    Building, BudgetItem, CensusRecord, District, NewBudgetItem, NewCensusRecord, NewDistrict,
    NewStrategyItem, NewTeamMember, Profile, ResidentialSquare, StrategyItem, TeamMember,
};

use super::query::{parse_content_range_total, Order, Query};
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    refresh_token: Option<String>,
    /// Token lifetime in seconds
    expires_in: i64,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// API client for the campaign backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    anon_key: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client for the given backend.
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token (sign-out)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            anon_key: self.anon_key.clone(),
            token: Some(token),
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Sign in with email and password, returning session data.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionData> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("Failed to send sign-in request")?;

        let response = Self::check_response(response).await?;
        let auth: AuthResponse = response
            .json()
            .await
            .context("Failed to parse sign-in response")?;

        Ok(SessionData {
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
            user_id: auth.user.id,
            email: auth.user.email.unwrap_or_else(|| email.to_string()),
            expires_at: Utc::now() + chrono::Duration::seconds(auth.expires_in),
        })
    }

    /// Invalidate the current session on the backend.
    pub async fn sign_out(&self) -> Result<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self
            .request(Method::POST, &url)
            .send()
            .await
            .context("Failed to send sign-out request")?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// Look up the currently authenticated user.
    pub async fn current_user(&self) -> Result<AuthUser> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .context("Failed to fetch current user")?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .context("Failed to parse current user response")
    }

    // =========================================================================
    // Generic row operations
    // =========================================================================

    fn rest_url(&self, table: &str, query: &Query) -> String {
        if query.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, table)
        } else {
            format!("{}/rest/v1/{}?{}", self.base_url, table, query.build())
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header("apikey", &self.anon_key);
        if let Some(ref token) = self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Send a request with rate-limit retry, returning the raw response.
    async fn send_with_retry<F>(&self, build: F, url: &str) -> Result<reqwest::Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = build()
                .send()
                .await
                .with_context(|| format!("Failed to send request to {}", url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => return Ok(response),
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(url, retry = retries, backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2;
                }
            }
        }
    }

    /// Select rows from a table.
    pub async fn select<T: DeserializeOwned>(&self, table: &str, query: Query) -> Result<Vec<T>> {
        let url = self.rest_url(table, &query);
        let response = self
            .send_with_retry(|| self.request(Method::GET, &url), &url)
            .await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse rows from {}", table))
    }

    /// Select one page of rows together with the exact total row count.
    pub async fn select_counted<T: DeserializeOwned>(
        &self,
        table: &str,
        query: Query,
    ) -> Result<(Vec<T>, usize)> {
        let url = self.rest_url(table, &query);
        let response = self
            .send_with_retry(
                || self.request(Method::GET, &url).header("Prefer", "count=exact"),
                &url,
            )
            .await?;

        let total = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .unwrap_or(0);

        let rows: Vec<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse rows from {}", table))?;

        Ok((rows, total))
    }

    /// Insert one row into a table.
    pub async fn insert<B: Serialize>(&self, table: &str, body: &B) -> Result<()> {
        let url = self.rest_url(table, &Query::new());
        let response = self
            .request(Method::POST, &url)
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to insert into {}", table))?;
        Self::check_response(response).await?;
        debug!(table, "Row inserted");
        Ok(())
    }

    /// Update all rows matching the query with the given patch. A single
    /// request mutates every matched row in one statement; callers relying
    /// on all-or-nothing batch semantics must not split this into per-row
    /// calls.
    pub async fn update<B: Serialize>(&self, table: &str, query: Query, patch: &B) -> Result<()> {
        let url = self.rest_url(table, &query);
        let response = self
            .request(Method::PATCH, &url)
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await
            .with_context(|| format!("Failed to update {}", table))?;
        Self::check_response(response).await?;
        debug!(table, "Rows updated");
        Ok(())
    }

    /// Delete all rows matching the query.
    pub async fn delete(&self, table: &str, query: Query) -> Result<()> {
        let url = self.rest_url(table, &query);
        let response = self
            .request(Method::DELETE, &url)
            .send()
            .await
            .with_context(|| format!("Failed to delete from {}", table))?;
        Self::check_response(response).await?;
        debug!(table, "Rows deleted");
        Ok(())
    }

    // =========================================================================
    // Profiles
    // =========================================================================

    /// Fetch all representative profiles, ordered by name.
    pub async fn fetch_representatives(&self) -> Result<Vec<Profile>> {
        self.select(
            "profiles",
            Query::new()
                .eq("role", "representative")
                .order("full_name", Order::Asc),
        )
        .await
    }

    /// Resolve the profile row for an auth user id.
    pub async fn fetch_profile_by_user(&self, user_id: &str) -> Result<Option<Profile>> {
        let rows: Vec<Profile> = self
            .select("profiles", Query::new().eq("user_id", user_id).limit(1))
            .await?;
        Ok(rows.into_iter().next())
    }

    // =========================================================================
    // Districts
    // =========================================================================

    pub async fn fetch_districts(&self) -> Result<Vec<District>> {
        self.select("districts", Query::new().order("name_ar", Order::Asc))
            .await
    }

    pub async fn insert_district(&self, district: &NewDistrict) -> Result<()> {
        self.insert("districts", district).await
    }

    pub async fn delete_district(&self, id: &str) -> Result<()> {
        self.delete("districts", Query::new().eq("id", id)).await
    }

    // =========================================================================
    // Residential squares
    // =========================================================================

    pub async fn fetch_squares(&self) -> Result<Vec<ResidentialSquare>> {
        self.select(
            "residential_squares",
            Query::new().order("square_number", Order::Asc),
        )
        .await
    }

    // =========================================================================
    // Buildings
    // =========================================================================

    /// Fetch one page of buildings plus the exact total, for range-based
    /// pagination in the assignment view.
    pub async fn fetch_buildings_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<Building>, usize)> {
        self.select_counted(
            "buildings",
            Query::new()
                .order("building_number", Order::Asc)
                .range(offset, limit),
        )
        .await
    }

    /// Buildings not yet held by any representative, for the batch
    /// assignment picker.
    pub async fn fetch_unassigned_buildings(&self) -> Result<Vec<Building>> {
        self.select(
            "buildings",
            Query::new()
                .is_null("assigned_representative_id")
                .order("building_number", Order::Asc),
        )
        .await
    }

    /// Count the buildings currently held by a representative.
    pub async fn count_assigned_buildings(&self, representative_id: &str) -> Result<usize> {
        let (_, total) = self
            .select_counted::<serde_json::Value>(
                "buildings",
                Query::new()
                    .select("id")
                    .eq("assigned_representative_id", representative_id)
                    .limit(1),
            )
            .await?;
        Ok(total)
    }

    /// Assign a batch of buildings to a representative in a single request.
    /// The `in`-list filter makes the whole batch one statement on the
    /// backend, so the assignment applies to all rows or to none.
    pub async fn assign_buildings(
        &self,
        representative_id: &str,
        building_ids: &[String],
    ) -> Result<()> {
        self.update(
            "buildings",
            Query::new().in_list("id", building_ids),
            &serde_json::json!({ "assigned_representative_id": representative_id }),
        )
        .await
    }

    /// Release a building back to the unassigned pool.
    pub async fn unassign_building(&self, building_id: &str) -> Result<()> {
        self.update(
            "buildings",
            Query::new().eq("id", building_id),
            &serde_json::json!({ "assigned_representative_id": null }),
        )
        .await
    }

    // =========================================================================
    // Voter census
    // =========================================================================

    pub async fn insert_census(&self, record: &NewCensusRecord) -> Result<()> {
        self.insert("voter_census", record).await
    }

    pub async fn fetch_census_for_square(&self, square_id: &str) -> Result<Vec<CensusRecord>> {
        self.select(
            "voter_census",
            Query::new()
                .eq("residential_square_id", square_id)
                .order("building_code", Order::Asc),
        )
        .await
    }

    /// Most recent census entries across all squares, newest first.
    pub async fn fetch_recent_census(&self, limit: usize) -> Result<Vec<CensusRecord>> {
        self.select(
            "voter_census",
            Query::new().order("surveyed_at", Order::Desc).limit(limit),
        )
        .await
    }

    // =========================================================================
    // Budget, team, strategy
    // =========================================================================

    pub async fn fetch_budget_items(&self) -> Result<Vec<BudgetItem>> {
        self.select("budget_items", Query::new().order("category", Order::Asc))
            .await
    }

    pub async fn insert_budget_item(&self, item: &NewBudgetItem) -> Result<()> {
        self.insert("budget_items", item).await
    }

    pub async fn delete_budget_item(&self, id: &str) -> Result<()> {
        self.delete("budget_items", Query::new().eq("id", id)).await
    }

    pub async fn fetch_team_members(&self) -> Result<Vec<TeamMember>> {
        self.select("team_members", Query::new().order("name", Order::Asc))
            .await
    }

    pub async fn insert_team_member(&self, member: &NewTeamMember) -> Result<()> {
        self.insert("team_members", member).await
    }

    pub async fn delete_team_member(&self, id: &str) -> Result<()> {
        self.delete("team_members", Query::new().eq("id", id)).await
    }

    pub async fn fetch_strategy_items(&self) -> Result<Vec<StrategyItem>> {
        self.select("strategy_items", Query::new().order("title", Order::Asc))
            .await
    }

    pub async fn insert_strategy_item(&self, item: &NewStrategyItem) -> Result<()> {
        self.insert("strategy_items", item).await
    }

    pub async fn update_strategy_progress(&self, id: &str, progress: i64) -> Result<()> {
        self.update(
            "strategy_items",
            Query::new().eq("id", id),
            &serde_json::json!({ "progress": progress }),
        )
        .await
    }

    pub async fn delete_strategy_item(&self, id: &str) -> Result<()> {
        self.delete("strategy_items", Query::new().eq("id", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_url_with_and_without_query() {
        let api = ApiClient::new("https://example.supabase.co/", "anon").unwrap();
        assert_eq!(
            api.rest_url("districts", &Query::new()),
            "https://example.supabase.co/rest/v1/districts"
        );
        let q = Query::new().eq("role", "representative");
        assert_eq!(
            api.rest_url("profiles", &q),
            "https://example.supabase.co/rest/v1/profiles?role=eq.representative"
        );
    }

    #[test]
    fn test_parse_auth_response() {
        let json = r#"{
            "access_token": "header.payload.sig",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": {
                "id": "22b210e3-d325-41be-b761-31e18bfe2c73",
                "email": "rep@example.org",
                "aud": "authenticated"
            }
        }"#;
        let auth: AuthResponse = serde_json::from_str(json).expect("Failed to parse auth");
        assert_eq!(auth.expires_in, 3600);
        assert_eq!(auth.user.email.as_deref(), Some("rep@example.org"));
    }
}
