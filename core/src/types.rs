//! Student record DTOs.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. `Student` embeds
//! `StudentBase` with `#[serde(flatten)]` so the wire format stays a single
//! flat JSON object.

use serde::{Deserialize, Serialize};

/// Identity and attributes shared by every student payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentBase {
    pub student_id: i64,
    pub name: String,
    pub major: String,
    /// Free text such as `active` or `graduated`; the server owns the vocabulary.
    pub status: String,
}

/// Create payload. The caller supplies every field, including the id.
pub type StudentCreate = StudentBase;

/// Partial update payload. Only the fields present in the JSON are applied;
/// omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self.student_id.is_none()
            && self.name.is_none()
            && self.major.is_none()
            && self.status.is_none()
    }
}

/// A full student record as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    #[serde(flatten)]
    pub base: StudentBase,
    pub created_at: String,
    pub updated_at: String,
}

impl Student {
    pub fn base(&self) -> &StudentBase {
        &self.base
    }
}
