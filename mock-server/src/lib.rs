//! In-memory stand-in for the student records REST API.
//!
//! Serves the `/students` collection with the same status codes and error
//! bodies (`{"detail": ...}`) as the real backend, so the client crate can be
//! exercised end-to-end without a database.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub student_id: i64,
    pub name: String,
    pub major: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
pub struct CreateStudent {
    pub student_id: i64,
    pub name: String,
    pub major: String,
    pub status: String,
}

#[derive(Deserialize, Default)]
pub struct UpdateStudent {
    pub student_id: Option<i64>,
    pub name: Option<String>,
    pub major: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct NameFilter {
    pub name: Option<String>,
}

/// Error payload, shaped like the backend's `HTTPException` responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

type Failure = (StatusCode, Json<ErrorBody>);

/// Keyed by `student_id`; the `BTreeMap` keeps listings ordered by id.
pub type Db = Arc<RwLock<BTreeMap<i64, Student>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(BTreeMap::new()));
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route("/students/", get(list_students).post(create_student))
        .route("/students/byname/{name}", get(get_student_by_name))
        .route(
            "/students/{student_id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> String {
    jiff::Timestamp::now().to_string()
}

fn failure(status: StatusCode, detail: &str) -> Failure {
    (
        status,
        Json(ErrorBody {
            detail: detail.to_string(),
        }),
    )
}

fn not_found() -> Failure {
    failure(StatusCode::NOT_FOUND, "Student not found")
}

fn already_registered() -> Failure {
    failure(StatusCode::BAD_REQUEST, "Student already registered")
}

async fn list_students(
    State(db): State<Db>,
    Query(filter): Query<NameFilter>,
) -> Json<Vec<Student>> {
    let students = db.read().await;
    let matches = students
        .values()
        .filter(|s| filter.name.as_deref().map_or(true, |name| s.name == name))
        .cloned()
        .collect();
    Json(matches)
}

async fn create_student(
    State(db): State<Db>,
    Json(input): Json<CreateStudent>,
) -> Result<(StatusCode, Json<Student>), Failure> {
    let mut students = db.write().await;
    if students.contains_key(&input.student_id) {
        tracing::warn!(student_id = input.student_id, "duplicate student id");
        return Err(already_registered());
    }
    let stamp = now();
    let student = Student {
        student_id: input.student_id,
        name: input.name,
        major: input.major,
        status: input.status,
        created_at: stamp.clone(),
        updated_at: stamp,
    };
    students.insert(student.student_id, student.clone());
    Ok((StatusCode::CREATED, Json(student)))
}

async fn get_student(
    State(db): State<Db>,
    Path(student_id): Path<i64>,
) -> Result<Json<Student>, Failure> {
    let students = db.read().await;
    students
        .get(&student_id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn get_student_by_name(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> Result<Json<Student>, Failure> {
    let students = db.read().await;
    students
        .values()
        .find(|s| s.name == name)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn update_student(
    State(db): State<Db>,
    Path(student_id): Path<i64>,
    Json(input): Json<UpdateStudent>,
) -> Result<Json<Student>, Failure> {
    let mut students = db.write().await;
    let mut student = students.remove(&student_id).ok_or_else(not_found)?;
    if let Some(new_id) = input.student_id {
        if new_id != student_id && students.contains_key(&new_id) {
            students.insert(student_id, student);
            return Err(already_registered());
        }
        student.student_id = new_id;
    }
    if let Some(name) = input.name {
        student.name = name;
    }
    if let Some(major) = input.major {
        student.major = major;
    }
    if let Some(status) = input.status {
        student.status = status;
    }
    student.updated_at = now();
    students.insert(student.student_id, student.clone());
    Ok(Json(student))
}

async fn delete_student(
    State(db): State<Db>,
    Path(student_id): Path<i64>,
) -> Result<StatusCode, Failure> {
    let mut students = db.write().await;
    students
        .remove(&student_id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(not_found)
}
