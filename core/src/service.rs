//! Student data-access facade.
//!
//! `StudentService` pairs a `StudentClient` with a `Transport` and runs each
//! operation as `build_*`, execute, `parse_*`. One request per call, no
//! retries and no caching; the outcome is exactly the server's answer.

use tracing::{debug, warn};

use crate::client::StudentClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Student, StudentCreate, StudentUpdate};

#[derive(Debug, Clone)]
pub struct StudentService<T> {
    client: StudentClient,
    transport: T,
}

#[cfg(feature = "ureq")]
impl StudentService<crate::transport::UreqTransport> {
    pub fn from_config(config: &crate::config::ClientConfig) -> Self {
        Self::new(
            StudentClient::new(&config.base_url),
            crate::transport::UreqTransport::from_config(config),
        )
    }
}

impl<T: Transport> StudentService<T> {
    pub fn new(client: StudentClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &StudentClient {
        &self.client
    }

    #[tracing::instrument(skip(self, input), fields(student_id = input.student_id))]
    pub fn create_student(&self, input: &StudentCreate) -> Result<Student, ApiError> {
        let request = self.client.build_create_student(input)?;
        self.client
            .parse_create_student(self.send(request)?)
            .inspect_err(report)
    }

    #[tracing::instrument(skip(self))]
    pub fn get_student(&self, student_id: i64) -> Result<Student, ApiError> {
        let request = self.client.build_get_student(student_id);
        self.client
            .parse_get_student(self.send(request)?)
            .inspect_err(report)
    }

    /// Every student whose name matches `name` exactly. No match is an empty
    /// list, not an error.
    #[tracing::instrument(skip(self))]
    pub fn get_student_by_name(&self, name: &str) -> Result<Vec<Student>, ApiError> {
        let request = self.client.build_get_student_by_name(name);
        self.client
            .parse_get_student_by_name(self.send(request)?)
            .inspect_err(report)
    }

    #[tracing::instrument(skip(self))]
    pub fn get_students(&self) -> Result<Vec<Student>, ApiError> {
        let request = self.client.build_get_students();
        self.client
            .parse_get_students(self.send(request)?)
            .inspect_err(report)
    }

    #[tracing::instrument(skip(self, input))]
    pub fn update_student(
        &self,
        student_id: i64,
        input: &StudentUpdate,
    ) -> Result<Student, ApiError> {
        let request = self.client.build_update_student(student_id, input)?;
        self.client
            .parse_update_student(self.send(request)?)
            .inspect_err(report)
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_student(&self, student_id: i64) -> Result<(), ApiError> {
        let request = self.client.build_delete_student(student_id);
        self.client
            .parse_delete_student(self.send(request)?)
            .inspect_err(report)
    }

    /// First student named exactly `name`, or `NotFound`.
    #[tracing::instrument(skip(self))]
    pub fn find_student_by_name(&self, name: &str) -> Result<Student, ApiError> {
        let request = self.client.build_find_student_by_name(name);
        self.client
            .parse_find_student_by_name(self.send(request)?)
            .inspect_err(report)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

fn report(err: &ApiError) {
    if err.is_not_found() {
        debug!(status = err.status(), "student not found");
    } else {
        warn!(status = err.status(), error = %err, "request failed");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::http::HttpMethod;
    use crate::types::StudentBase;

    /// Replays canned responses in order and records every request.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn respond(self, status: u16, body: &str) -> Self {
            self.responses.lock().unwrap().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
            self
        }

        fn fail(self, message: &str) -> Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(ApiError::Transport(message.to_string())));
            self
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left")
        }
    }

    const ALICE: &str = r#"{"student_id":1,"name":"Alice","major":"CS","status":"active","created_at":"t0","updated_at":"t0"}"#;

    fn service(transport: &ScriptedTransport) -> StudentService<&ScriptedTransport> {
        StudentService::new(StudentClient::new("http://api.test"), transport)
    }

    #[test]
    fn create_student_posts_payload_and_returns_record() {
        let transport = ScriptedTransport::default().respond(201, ALICE);
        let input = StudentBase {
            student_id: 1,
            name: "Alice".to_string(),
            major: "CS".to_string(),
            status: "active".to_string(),
        };

        let created = service(&transport).create_student(&input).unwrap();
        assert_eq!(created.base(), &input);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "http://api.test/students/");
    }

    #[test]
    fn get_student_maps_404() {
        let transport =
            ScriptedTransport::default().respond(404, r#"{"detail":"Student not found"}"#);
        let err = service(&transport).get_student(5).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        assert_eq!(transport.requests()[0].url, "http://api.test/students/5");
    }

    #[test]
    fn get_student_by_name_encodes_query() {
        let transport = ScriptedTransport::default().respond(200, "[]");
        let found = service(&transport).get_student_by_name("A&B").unwrap();
        assert!(found.is_empty());
        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/students?name=A%26B"
        );
    }

    #[test]
    fn update_then_delete() {
        let updated = ALICE.replace("active", "graduated");
        let transport = ScriptedTransport::default()
            .respond(200, &updated)
            .respond(204, "");
        let svc = service(&transport);

        let input = StudentUpdate {
            status: Some("graduated".to_string()),
            ..StudentUpdate::default()
        };
        let student = svc.update_student(1, &input).unwrap();
        assert_eq!(student.base().status, "graduated");
        svc.delete_student(1).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"status":"graduated"}"#));
        assert_eq!(requests[1].method, HttpMethod::Delete);
    }

    #[test]
    fn transport_failure_propagates_unchanged() {
        let transport = ScriptedTransport::default().fail("connection refused");
        let err = service(&transport).get_students().unwrap_err();
        assert!(matches!(err, ApiError::Transport(ref m) if m == "connection refused"));
        assert!(err.is_request_error());
    }

    #[test]
    fn find_student_by_name_hits_byname_route() {
        let transport = ScriptedTransport::default().respond(200, ALICE);
        let student = service(&transport).find_student_by_name("Alice").unwrap();
        assert_eq!(student.base().student_id, 1);
        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/students/byname/Alice"
        );
    }
}
