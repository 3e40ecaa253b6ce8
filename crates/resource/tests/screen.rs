//! End-to-end screen behaviour against an in-memory backend.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use core_types::{Resource, ResourceId, Session, SessionUser, SkillType};
use resource::session::{self, Credentials};
use resource::{
    ApiRequest, ApiResponse, CSRF_COOKIE, ClientError, CookieJar, Method, ResourceClient,
    ScreenController, ToastStatus, Transport,
};
use serde_json::{Value, json};

#[derive(Default)]
struct BackendState {
    records: Vec<SkillType>,
    next_id: u64,
    requests: Vec<ApiRequest>,
    cookies: CookieJar,
    /// Status forced on the next mutating request
    fail_next: Option<u16>,
    offline: bool,
}

/// Skill-type backend that enforces the CSRF header like the real one.
#[derive(Clone, Default)]
struct FakeBackend {
    state: Rc<RefCell<BackendState>>,
}

impl FakeBackend {
    fn with_records(records: Vec<SkillType>) -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state.borrow_mut();
            state.next_id = records.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
            state.records = records;
            state.cookies = CookieJar::parse("sessionid=s1; csrftoken=tok");
        }
        backend
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().requests.clone()
    }

    fn methods(&self) -> Vec<Method> {
        self.requests().iter().map(|r| r.method).collect()
    }

    fn clear_requests(&self) {
        self.state.borrow_mut().requests.clear();
    }

    fn fail_next(&self, status: u16) {
        self.state.borrow_mut().fail_next = Some(status);
    }

    fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    fn push_raw(&self, record: SkillType) {
        self.state.borrow_mut().records.push(record);
    }

    fn route(state: &mut BackendState, request: &ApiRequest) -> ApiResponse {
        if request.method != Method::Get {
            let expected = state.cookies.get(CSRF_COOKIE).unwrap_or_default().to_string();
            let sent = request.header_value("X-CSRFToken").unwrap_or_default();
            if expected.is_empty() || sent != expected {
                return ApiResponse::new(403, r#"{"detail": "CSRF Failed"}"#);
            }
            if let Some(status) = state.fail_next.take() {
                return ApiResponse::new(status, r#"{"detail": "boom"}"#);
            }
        }

        let id_segment = request
            .path
            .strip_prefix("/api/skill-type/")
            .and_then(|s| s.parse::<u64>().ok())
            .map(ResourceId);

        match (request.method, request.path.as_str(), id_segment) {
            (Method::Get, "/api/skill-type", _) => {
                ApiResponse::new(200, serde_json::to_string(&state.records).unwrap())
            }
            (Method::Post, "/api/skill-type", _) => {
                let mut body = request.body.clone().unwrap_or(Value::Null);
                body["id"] = json!(state.next_id);
                match serde_json::from_value::<SkillType>(body) {
                    Ok(record) => {
                        state.next_id += 1;
                        state.records.push(record.clone());
                        ApiResponse::new(201, serde_json::to_string(&record).unwrap())
                    }
                    Err(e) => ApiResponse::new(400, e.to_string()),
                }
            }
            (Method::Patch, _, Some(id)) => {
                let Some(pos) = state.records.iter().position(|r| r.id == id) else {
                    return ApiResponse::new(404, "");
                };
                let mut merged = serde_json::to_value(&state.records[pos]).unwrap();
                if let Some(Value::Object(changes)) = &request.body {
                    for (k, v) in changes {
                        merged[k] = v.clone();
                    }
                }
                let record: SkillType = serde_json::from_value(merged).unwrap();
                state.records[pos] = record.clone();
                ApiResponse::new(200, serde_json::to_string(&record).unwrap())
            }
            (Method::Delete, _, Some(id)) => {
                let before = state.records.len();
                state.records.retain(|r| r.id != id);
                if state.records.len() == before {
                    ApiResponse::new(404, "")
                } else {
                    ApiResponse::new(204, "")
                }
            }
            (Method::Post, "/api/logout", _) => ApiResponse::new(200, "{}"),
            (Method::Post, "/api/login", _) => ApiResponse::new(
                200,
                r#"{"user": {"username": "ann", "staff": true, "admin": false}}"#,
            ),
            _ => ApiResponse::new(404, ""),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> resource::Result<ApiResponse> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());
        if state.offline {
            return Err(ClientError::Transport("connection refused".to_string()));
        }
        Ok(Self::route(&mut state, &request))
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.state.borrow().cookies.get(name).map(str::to_string)
    }

    fn remove_cookie(&self, name: &str) {
        self.state.borrow_mut().cookies.remove(name);
    }
}

fn skill_type(id: u64, name: &str) -> SkillType {
    SkillType {
        id: ResourceId(id),
        name: name.to_string(),
        cost_per_day: 200.0,
        error_rate: 0.2,
        throughput: 2.0,
        management_quality: 30.0,
        development_quality: 40.0,
        signing_bonus: 500.0,
    }
}

async fn loaded_controller(
    records: Vec<SkillType>,
) -> (FakeBackend, ScreenController<SkillType, FakeBackend>) {
    let backend = FakeBackend::with_records(records);
    let mut controller = ScreenController::new(ResourceClient::new(backend.clone()));
    assert!(controller.load().await);
    backend.clear_requests();
    (backend, controller)
}

#[tokio::test]
async fn test_load_populates_store() {
    let backend = FakeBackend::with_records(vec![skill_type(1, "junior"), skill_type(2, "senior")]);
    let mut controller: ScreenController<SkillType, FakeBackend> = ScreenController::new(ResourceClient::new(backend.clone()));

    assert!(controller.load().await);

    let screen = controller.screen();
    assert!(!screen.is_loading());
    assert_eq!(screen.store().len(), 2);
    assert_eq!(backend.methods(), vec![Method::Get]);
    assert_eq!(backend.requests()[0].path, "/api/skill-type");
}

#[tokio::test]
async fn test_create_posts_snake_case_and_refetches_once() {
    let (backend, mut controller) = loaded_controller(vec![skill_type(1, "junior")]).await;
    let before = controller.screen().store().len();

    let form = controller.screen_mut().form_mut();
    form.open_create();
    for (input, value) in [
        ("name", "Dev"),
        ("costPerDay", "100"),
        ("errorRate", "0.1"),
        ("throughput", "5"),
        ("managementQuality", "50"),
        ("developmentQuality", "60"),
        ("signingBonus", "200"),
    ] {
        form.set(input, value).unwrap();
    }

    assert_eq!(controller.submit().await, Some(true));

    let requests = backend.requests();
    assert_eq!(backend.methods(), vec![Method::Post, Method::Get]);
    assert_eq!(requests[0].path, "/api/skill-type");
    assert_eq!(requests[0].header_value("X-CSRFToken"), Some("tok"));
    assert_eq!(requests[0].header_value("Content-Type"), Some("application/json"));
    assert_eq!(
        requests[0].body,
        Some(json!({
            "name": "Dev",
            "cost_per_day": 100,
            "error_rate": 0.1,
            "throughput": 5,
            "management_quality": 50,
            "development_quality": 60,
            "signing_bonus": 200,
        }))
    );

    let screen = controller.screen();
    assert_eq!(screen.store().len(), before + 1);
    let created = screen.store().iter().find(|r| r.name == "Dev").unwrap();
    assert!((created.cost_per_day - 100.0).abs() < f64::EPSILON);
    assert!((created.error_rate - 0.1).abs() < f64::EPSILON);
    assert!((created.signing_bonus - 200.0).abs() < f64::EPSILON);

    assert!(!screen.form().is_open());
    assert_eq!(screen.toasts().len(), 1);
    assert_eq!(screen.toasts()[0].title, "Dev has been created");
    assert_eq!(screen.toasts()[0].status, ToastStatus::Success);
    assert_eq!(screen.toasts()[0].duration_ms, 5000);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (backend, mut controller) =
        loaded_controller(vec![skill_type(1, "junior"), skill_type(2, "senior")]).await;

    let senior = controller.screen().store().get(ResourceId(2)).cloned().unwrap();
    controller.screen_mut().request_delete(senior);
    assert!(controller.screen().gate().is_open());
    assert!(backend.requests().is_empty());

    assert_eq!(controller.confirm_delete().await, Some(true));

    let requests = backend.requests();
    assert_eq!(backend.methods(), vec![Method::Delete, Method::Get]);
    assert_eq!(requests[0].path, "/api/skill-type/2");
    assert!(requests[0].body.is_none());

    let screen = controller.screen();
    assert!(!screen.gate().is_open());
    assert!(!screen.store().contains(ResourceId(2)));
    assert_eq!(screen.toasts()[0].title, "senior has been deleted");
}

#[tokio::test]
async fn test_cancelled_gate_sends_nothing() {
    let (backend, mut controller) = loaded_controller(vec![skill_type(1, "junior")]).await;

    let junior = controller.screen().store().records()[0].clone();
    controller.screen_mut().request_delete(junior);
    controller.screen_mut().cancel_delete();

    assert_eq!(controller.confirm_delete().await, None);
    assert!(backend.requests().is_empty());
    assert!(controller.screen().store().contains(ResourceId(1)));
}

#[tokio::test]
async fn test_failed_mutation_leaves_store_unchanged() {
    let (backend, mut controller) =
        loaded_controller(vec![skill_type(1, "junior"), skill_type(2, "senior")]).await;
    let snapshot = controller.screen().store().clone();

    backend.fail_next(500);
    let junior = snapshot.records()[0].clone();
    controller.screen_mut().request_delete(junior);
    assert_eq!(controller.confirm_delete().await, Some(false));

    // No re-fetch after a failure.
    assert_eq!(backend.methods(), vec![Method::Delete]);

    let screen = controller.screen();
    assert_eq!(screen.store(), &snapshot);
    assert!(!screen.gate().is_open());
    assert_eq!(screen.toasts()[0].title, "Could not delete junior");
    assert!(screen.toasts()[0].is_error());
}

#[tokio::test]
async fn test_transport_error_keeps_form_open() {
    let (backend, mut controller) = loaded_controller(vec![skill_type(1, "junior")]).await;
    let snapshot = controller.screen().store().clone();

    let form = controller.screen_mut().form_mut();
    form.open_create();
    form.set("name", "Ops").unwrap();

    backend.set_offline(true);
    assert_eq!(controller.submit().await, Some(false));

    let screen = controller.screen();
    assert_eq!(screen.store(), &snapshot);
    assert!(screen.form().is_open());
    assert_eq!(screen.form().value("name"), Some("Ops"));
    assert_eq!(screen.toasts()[0].title, "Could not create Ops");
}

#[tokio::test]
async fn test_update_patches_record() {
    let (backend, mut controller) = loaded_controller(vec![skill_type(3, "expert")]).await;

    let expert = controller.screen().store().records()[0].clone();
    let form = controller.screen_mut().form_mut();
    form.open_edit(&expert).unwrap();
    assert_eq!(form.value("cost_per_day"), Some("200"));
    form.set("cost_per_day", "450").unwrap();

    assert_eq!(controller.submit().await, Some(true));

    let requests = backend.requests();
    assert_eq!(backend.methods(), vec![Method::Patch, Method::Get]);
    assert_eq!(requests[0].path, "/api/skill-type/3");
    let body = requests[0].body.as_ref().unwrap();
    assert_eq!(body["id"], json!(3));
    assert_eq!(body["cost_per_day"], json!(450));

    let screen = controller.screen();
    let updated = screen.store().get(ResourceId(3)).unwrap();
    assert!((updated.cost_per_day - 450.0).abs() < f64::EPSILON);
    assert_eq!(screen.toasts()[0].title, "expert has been updated");
    assert!(!screen.form().is_open());
}

#[tokio::test]
async fn test_rejected_update_keeps_form_and_store() {
    let (backend, mut controller) = loaded_controller(vec![skill_type(3, "expert")]).await;
    let snapshot = controller.screen().store().clone();

    let expert = snapshot.records()[0].clone();
    let form = controller.screen_mut().form_mut();
    form.open_edit(&expert).unwrap();
    form.set("cost_per_day", "450").unwrap();

    backend.fail_next(400);
    assert_eq!(controller.submit().await, Some(false));
    assert_eq!(backend.methods(), vec![Method::Patch]);

    let screen = controller.screen();
    assert_eq!(screen.store(), &snapshot);
    assert!(!screen.is_loading());
    assert!(screen.form().is_open());
    assert_eq!(screen.form().value("cost_per_day"), Some("450"));
    assert_eq!(screen.toasts()[0].title, "Could not update expert");
    assert!(screen.toasts()[0].is_error());
}

#[tokio::test]
async fn test_rejected_create_keeps_form_and_store() {
    let (backend, mut controller) = loaded_controller(vec![skill_type(1, "junior")]).await;
    let snapshot = controller.screen().store().clone();

    let form = controller.screen_mut().form_mut();
    form.open_create();
    form.set("name", "Ops").unwrap();

    backend.fail_next(422);
    assert_eq!(controller.submit().await, Some(false));
    assert_eq!(backend.methods(), vec![Method::Post]);

    let screen = controller.screen();
    assert_eq!(screen.store(), &snapshot);
    assert!(!screen.is_loading());
    assert!(screen.form().is_open());
    assert_eq!(screen.form().value("name"), Some("Ops"));
    assert_eq!(screen.toasts()[0].title, "Could not create Ops");
    assert!(screen.toasts()[0].is_error());
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let (backend, mut controller) = loaded_controller(vec![]).await;

    let form = controller.screen_mut().form_mut();
    form.open_create();
    form.set("errorRate", "2").unwrap();

    assert_eq!(controller.submit().await, None);
    assert!(backend.requests().is_empty());
    assert_eq!(controller.screen().form().violations().len(), 1);
    assert!(controller.screen().toasts().is_empty());
}

#[tokio::test]
async fn test_unparseable_draft_raises_error_toast() {
    let (backend, mut controller) = loaded_controller(vec![]).await;

    let form = controller.screen_mut().form_mut();
    form.open_create();
    form.set("name", "Blank").unwrap();
    form.set("throughput", "").unwrap();

    assert_eq!(controller.submit().await, None);
    assert!(backend.requests().is_empty());
    assert_eq!(controller.screen().toasts()[0].title, "Could not create Blank");
}

#[tokio::test]
async fn test_missing_csrf_cookie_is_rejected() {
    let (backend, mut controller) = loaded_controller(vec![skill_type(1, "junior")]).await;
    backend.remove_cookie(CSRF_COOKIE);

    let junior = controller.screen().store().records()[0].clone();
    controller.screen_mut().request_delete(junior);
    assert_eq!(controller.confirm_delete().await, Some(false));

    assert_eq!(backend.requests()[0].header_value("X-CSRFToken"), Some(""));
    assert!(controller.screen().store().contains(ResourceId(1)));
}

#[tokio::test]
async fn test_fetch_failure_keeps_previous_snapshot() {
    let (backend, mut controller) = loaded_controller(vec![skill_type(1, "junior")]).await;
    let snapshot = controller.screen().store().clone();

    backend.set_offline(true);
    assert!(!controller.load().await);
    assert!(!controller.screen().is_loading());
    assert_eq!(controller.screen().store(), &snapshot);

    backend.set_offline(false);
    backend.push_raw(skill_type(1, "clone"));
    assert!(!controller.load().await);
    assert_eq!(controller.screen().store(), &snapshot);
}

#[test]
fn test_collection_path() {
    assert_eq!(
        ResourceClient::<SkillType, FakeBackend>::collection_path(),
        format!("/api/{}", SkillType::COLLECTION)
    );
}

#[tokio::test]
async fn test_login_sets_session() {
    let backend = FakeBackend::with_records(vec![]);
    let credentials = Credentials {
        username: "ann".to_string(),
        password: "secret".to_string(),
    };

    let session = session::login(&backend, &credentials).await.unwrap();

    let request = &backend.requests()[0];
    assert_eq!(request.path, "/api/login");
    assert_eq!(request.body, Some(json!({"username": "ann", "password": "secret"})));
    assert_eq!(
        session,
        Session::Authenticated(SessionUser {
            username: "ann".to_string(),
            staff: true,
            ..Default::default()
        })
    );
}

#[tokio::test]
async fn test_logout_clears_state() {
    let backend = FakeBackend::with_records(vec![]);
    let mut session = Session::Authenticated(SessionUser::new("ann"));

    session::logout(&backend, &mut session).await.unwrap();

    let request = &backend.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/api/logout");
    assert_eq!(request.header_value("X-CSRFToken"), Some("tok"));
    assert_eq!(request.header_value("Content-Type"), Some("application/json"));
    assert_eq!(session, Session::Anonymous);
    assert_eq!(backend.cookie(CSRF_COOKIE), None);
}

#[tokio::test]
async fn test_failed_logout_still_clears_state() {
    let backend = FakeBackend::with_records(vec![]);
    backend.set_offline(true);
    let mut session = Session::Authenticated(SessionUser::new("ann"));

    let result = session::logout(&backend, &mut session).await;

    assert!(matches!(result, Err(ClientError::Transport(_))));
    assert_eq!(session, Session::Anonymous);
    assert_eq!(backend.cookie(CSRF_COOKIE), None);
}
