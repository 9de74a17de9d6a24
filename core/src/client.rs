//! Stateless HTTP request builder and response parser for the student API.
//!
//! # Design
//! `StudentClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Something else executes the round-trip in between, keeping
//! this module deterministic and free of I/O.
//!
//! User-supplied text that ends up in a URL (the name filter and the by-name
//! path segment) is always percent-encoded.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Student, StudentCreate, StudentUpdate};

const RESOURCE: &str = "/students";

#[derive(Debug, Clone)]
pub struct StudentClient {
    base_url: String,
}

impl StudentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{RESOURCE}/", self.base_url)
    }

    fn student_url(&self, student_id: i64) -> String {
        format!("{}{RESOURCE}/{student_id}", self.base_url)
    }

    pub fn build_create_student(&self, input: &StudentCreate) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_get_student(&self, student_id: i64) -> HttpRequest {
        empty_request(HttpMethod::Get, self.student_url(student_id))
    }

    /// `GET /students?name=...` with the name percent-encoded.
    pub fn build_get_student_by_name(&self, name: &str) -> HttpRequest {
        let url = format!(
            "{}{RESOURCE}?name={}",
            self.base_url,
            urlencoding::encode(name)
        );
        empty_request(HttpMethod::Get, url)
    }

    pub fn build_get_students(&self) -> HttpRequest {
        empty_request(HttpMethod::Get, self.collection_url())
    }

    pub fn build_update_student(
        &self,
        student_id: i64,
        input: &StudentUpdate,
    ) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.student_url(student_id), input)
    }

    pub fn build_delete_student(&self, student_id: i64) -> HttpRequest {
        empty_request(HttpMethod::Delete, self.student_url(student_id))
    }

    /// `GET /students/byname/{name}`: the single-record lookup route.
    pub fn build_find_student_by_name(&self, name: &str) -> HttpRequest {
        let url = format!(
            "{}{RESOURCE}/byname/{}",
            self.base_url,
            urlencoding::encode(name)
        );
        empty_request(HttpMethod::Get, url)
    }

    pub fn parse_create_student(&self, response: HttpResponse) -> Result<Student, ApiError> {
        parse_json(response, OnNotFound::Failure)
    }

    pub fn parse_get_student(&self, response: HttpResponse) -> Result<Student, ApiError> {
        parse_json(response, OnNotFound::Missing)
    }

    pub fn parse_get_student_by_name(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Student>, ApiError> {
        parse_json(response, OnNotFound::Failure)
    }

    pub fn parse_get_students(&self, response: HttpResponse) -> Result<Vec<Student>, ApiError> {
        parse_json(response, OnNotFound::Failure)
    }

    pub fn parse_update_student(&self, response: HttpResponse) -> Result<Student, ApiError> {
        parse_json(response, OnNotFound::Missing)
    }

    /// Any 2xx succeeds; the body (empty, or a confirmation message) is ignored.
    pub fn parse_delete_student(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, OnNotFound::Missing)
    }

    pub fn parse_find_student_by_name(&self, response: HttpResponse) -> Result<Student, ApiError> {
        parse_json(response, OnNotFound::Missing)
    }
}

fn empty_request(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request<T: Serialize>(
    method: HttpMethod,
    url: String,
    payload: &T,
) -> Result<HttpRequest, ApiError> {
    let body =
        serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(
    response: HttpResponse,
    on_not_found: OnNotFound,
) -> Result<T, ApiError> {
    check_status(&response, on_not_found)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// How a 404 is reported. Only requests addressing a single student can be
/// told that student is missing; on collection routes a 404 means the URL
/// itself is wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnNotFound {
    Missing,
    Failure,
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, on_not_found: OnNotFound) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = error_detail(&response.body);
    if response.status == 404 && on_not_found == OnNotFound::Missing {
        return Err(ApiError::NotFound { detail: message });
    }
    Err(ApiError::Http {
        status: response.status,
        message,
    })
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Pull `detail` out of a `{"detail": ...}` error body, falling back to the
/// raw body. Structured details (validation error lists) are re-rendered as
/// JSON text.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.to_string(),
    }
}
