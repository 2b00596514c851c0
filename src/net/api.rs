//! REST client for the homeschool backend.
//!
//! One [`ApiClient`] is shared (cheaply cloned) by the session store and every
//! dashboard. The bearer slot is shared across clones so `login`/`logout`
//! take effect on requests already wired up elsewhere.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns [`ApiResult`]. Non-2xx responses become
//! [`ApiError::Status`] with the server's message extracted from the body;
//! nothing here logs at `warn`, that decision belongs to the call site.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiResult, message_from_body};
use super::types::{Assignment, AssignmentStatus, AuthGrant, Credentials, NewAssignment, NewSubject, StudentProfile, Subject};
use crate::config::ClientConfig;
use crate::session::AuthApi;
use crate::util::dates::DateRange;

pub(crate) const LOGIN_PATH: &str = "/auth/login";
pub(crate) const REGISTER_PATH: &str = "/users/register";
pub(crate) const SUBJECTS_PATH: &str = "/subjects";
pub(crate) const ASSIGNMENTS_PATH: &str = "/assignments";

fn subject_path(subject_id: i64) -> String {
    format!("{SUBJECTS_PATH}/{subject_id}")
}

fn student_path(student_id: i64) -> String {
    format!("/students/{student_id}")
}

fn assignment_path(assignment_id: i64) -> String {
    format!("{ASSIGNMENTS_PATH}/{assignment_id}")
}

fn assignment_status_path(assignment_id: i64) -> String {
    format!("{ASSIGNMENTS_PATH}/{assignment_id}/status")
}

fn range_query(range: &DateRange) -> [(&'static str, String); 2] {
    [("startDate", range.start.to_rfc3339()), ("endDate", range.end.to_rfc3339())]
}

fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authorized", &self.has_bearer())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client for `config.api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base URL is not absolute HTTP(S),
    /// or [`ApiError::ClientBuild`] if the TLS/HTTP stack fails to initialize.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let base_url = config.api_base_url.trim_end_matches('/').to_owned();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url));
        }

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs));
        let http = builder.build().map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self { http, base_url, bearer: Arc::new(RwLock::new(None)) })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install or clear the bearer credential for every clone of this client.
    pub fn set_bearer(&self, token: Option<String>) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    #[must_use]
    pub fn has_bearer(&self) -> bool {
        self.bearer.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        tracing::debug!(%method, path, "api request");
        let builder = self.http.request(method, self.url(path));
        let token = self.bearer.read().unwrap_or_else(PoisonError::into_inner).clone();
        match token {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, bearer_value(&token)),
            None => builder,
        }
    }

    async fn checked(request: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status: status.as_u16(), message: message_from_body(&body) })
    }

    async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> ApiResult<T> {
        let response = Self::checked(request).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_empty(request: reqwest::RequestBuilder) -> ApiResult<()> {
        Self::checked(request).await.map(drop)
    }

    fn with_body<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> reqwest::RequestBuilder {
        self.request(method, path).json(body)
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Rejected credentials surface as [`ApiError::Status`] (usually 401).
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthGrant> {
        let grant: AuthGrant = Self::send_json(self.with_body(Method::POST, LOGIN_PATH, credentials)).await?;
        if grant.token.is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".to_owned()));
        }
        Ok(grant)
    }

    /// `POST /users/register`.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection (e.g. a taken username) as [`ApiError::Status`].
    pub async fn register(&self, credentials: &Credentials) -> ApiResult<()> {
        Self::send_empty(self.with_body(Method::POST, REGISTER_PATH, credentials)).await
    }

    // =========================================================================
    // SUBJECTS
    // =========================================================================

    /// # Errors
    ///
    /// Any transport, status, or decode failure.
    pub async fn list_subjects(&self) -> ApiResult<Vec<Subject>> {
        Self::send_json(self.request(Method::GET, SUBJECTS_PATH)).await
    }

    /// # Errors
    ///
    /// Any transport, status, or decode failure.
    pub async fn create_subject(&self, subject: &NewSubject) -> ApiResult<Subject> {
        Self::send_json(self.with_body(Method::POST, SUBJECTS_PATH, subject)).await
    }

    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn update_subject(&self, subject: &Subject) -> ApiResult<()> {
        Self::send_empty(self.with_body(Method::PUT, &subject_path(subject.subject_id), subject)).await
    }

    /// # Errors
    ///
    /// A subject still referenced by an assignment is refused with status 500.
    pub async fn delete_subject(&self, subject_id: i64) -> ApiResult<()> {
        Self::send_empty(self.request(Method::DELETE, &subject_path(subject_id))).await
    }

    // =========================================================================
    // STUDENTS
    // =========================================================================

    /// # Errors
    ///
    /// Any transport, status, or decode failure.
    pub async fn get_student(&self, student_id: i64) -> ApiResult<StudentProfile> {
        Self::send_json(self.request(Method::GET, &student_path(student_id))).await
    }

    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn update_student(&self, student_id: i64, profile: &StudentProfile) -> ApiResult<()> {
        Self::send_empty(self.with_body(Method::PUT, &student_path(student_id), profile)).await
    }

    // =========================================================================
    // ASSIGNMENTS
    // =========================================================================

    /// # Errors
    ///
    /// Any transport, status, or decode failure.
    pub async fn list_assignments(&self) -> ApiResult<Vec<Assignment>> {
        Self::send_json(self.request(Method::GET, ASSIGNMENTS_PATH)).await
    }

    /// `GET /assignments/range?startDate=..&endDate=..`.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decode failure.
    pub async fn assignments_in_range(&self, range: &DateRange) -> ApiResult<Vec<Assignment>> {
        let path = format!("{ASSIGNMENTS_PATH}/range");
        Self::send_json(self.request(Method::GET, &path).query(&range_query(range))).await
    }

    /// # Errors
    ///
    /// Any transport, status, or decode failure.
    pub async fn create_assignment(&self, assignment: &NewAssignment) -> ApiResult<Assignment> {
        Self::send_json(self.with_body(Method::POST, ASSIGNMENTS_PATH, assignment)).await
    }

    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn update_assignment(&self, assignment: &Assignment) -> ApiResult<()> {
        let path = assignment_path(assignment.assignment_id);
        Self::send_empty(self.with_body(Method::PUT, &path, assignment)).await
    }

    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn delete_assignment(&self, assignment_id: i64) -> ApiResult<()> {
        Self::send_empty(self.request(Method::DELETE, &assignment_path(assignment_id))).await
    }

    /// `PUT /assignments/{id}/status?status=..` with no body.
    ///
    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn update_assignment_status(&self, assignment_id: i64, status: AssignmentStatus) -> ApiResult<()> {
        let request = self
            .request(Method::PUT, &assignment_status_path(assignment_id))
            .query(&[("status", status.as_str())]);
        Self::send_empty(request).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl AuthApi for ApiClient {
    async fn authenticate(&self, credentials: &Credentials) -> ApiResult<AuthGrant> {
        self.login(credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> ApiResult<()> {
        ApiClient::register(self, credentials).await
    }

    fn set_bearer_token(&self, token: Option<String>) {
        self.set_bearer(token);
    }
}
