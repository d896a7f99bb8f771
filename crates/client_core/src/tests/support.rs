//! In-process activities server and recording view fakes shared by the unit tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use shared::{domain::StatusMessage, protocol::SignupQuery};
use tokio::net::TcpListener;

use crate::{
    controller::SignupController,
    status::StatusBoard,
    transport::HttpActivitiesApi,
    view::{CatalogView, ListContent, SelectOption, SignupForm, StatusDisplay},
};

pub const CHESS_CLUB_CATALOG: &str = r#"{
    "Chess Club": {
        "description": "Learn chess",
        "schedule": "Mon 3pm",
        "participants": ["a@x.com"]
    }
}"#;

pub const CHESS_CLUB_AFTER_SIGNUP: &str = r#"{
    "Chess Club": {
        "description": "Learn chess",
        "schedule": "Mon 3pm",
        "participants": ["a@x.com", "alice@x.com"]
    }
}"#;

pub struct StubState {
    catalog: Mutex<(StatusCode, String)>,
    signup: Mutex<(StatusCode, String)>,
    catalog_fetches: AtomicUsize,
    signups: Mutex<Vec<(String, String)>>,
}

impl StubState {
    pub fn new(catalog_body: &str) -> Arc<Self> {
        Arc::new(Self {
            catalog: Mutex::new((StatusCode::OK, catalog_body.to_string())),
            signup: Mutex::new((
                StatusCode::OK,
                r#"{"message": "Signed up"}"#.to_string(),
            )),
            catalog_fetches: AtomicUsize::new(0),
            signups: Mutex::new(Vec::new()),
        })
    }

    pub fn set_catalog(&self, status: StatusCode, body: &str) {
        *self.catalog.lock().expect("catalog lock") = (status, body.to_string());
    }

    pub fn set_signup(&self, status: StatusCode, body: &str) {
        *self.signup.lock().expect("signup lock") = (status, body.to_string());
    }

    pub fn catalog_fetches(&self) -> usize {
        self.catalog_fetches.load(Ordering::SeqCst)
    }

    pub fn signups(&self) -> Vec<(String, String)> {
        self.signups.lock().expect("signups lock").clone()
    }
}

fn json_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn serve_catalog(State(state): State<Arc<StubState>>) -> Response {
    state.catalog_fetches.fetch_add(1, Ordering::SeqCst);
    let (status, body) = state.catalog.lock().expect("catalog lock").clone();
    json_response(status, body)
}

async fn serve_signup(
    State(state): State<Arc<StubState>>,
    Path(activity): Path<String>,
    Query(query): Query<SignupQuery>,
) -> Response {
    state
        .signups
        .lock()
        .expect("signups lock")
        .push((activity, query.email));
    let (status, body) = state.signup.lock().expect("signup lock").clone();
    json_response(status, body)
}

pub async fn spawn_stub_server(state: Arc<StubState>) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/activities", get(serve_catalog))
        .route("/activities/:activity/signup", post(serve_signup))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[derive(Default)]
pub struct RecordingView {
    list: Mutex<Option<ListContent>>,
    options: Mutex<Vec<SelectOption>>,
    list_writes: AtomicUsize,
}

impl RecordingView {
    pub fn list(&self) -> Option<ListContent> {
        self.list.lock().expect("list lock").clone()
    }

    pub fn options(&self) -> Vec<SelectOption> {
        self.options.lock().expect("options lock").clone()
    }

    pub fn option_values(&self) -> Vec<String> {
        self.options().into_iter().map(|option| option.value).collect()
    }

    pub fn list_writes(&self) -> usize {
        self.list_writes.load(Ordering::SeqCst)
    }

    pub fn text(&self) -> String {
        self.list()
            .map(|content| content.text_content())
            .unwrap_or_default()
    }
}

impl CatalogView for RecordingView {
    fn replace_list(&self, content: ListContent) {
        self.list_writes.fetch_add(1, Ordering::SeqCst);
        *self.list.lock().expect("list lock") = Some(content);
    }

    fn replace_options(&self, options: Vec<SelectOption>) {
        *self.options.lock().expect("options lock") = options;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Shown(StatusMessage),
    Hidden,
}

#[derive(Default)]
pub struct RecordingDisplay {
    events: Mutex<Vec<DisplayEvent>>,
}

impl RecordingDisplay {
    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().expect("events lock").clone()
    }

    pub fn shown(&self) -> Vec<StatusMessage> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DisplayEvent::Shown(message) => Some(message),
                DisplayEvent::Hidden => None,
            })
            .collect()
    }

    pub fn last_shown(&self) -> Option<StatusMessage> {
        self.shown().pop()
    }
}

impl StatusDisplay for RecordingDisplay {
    fn show(&self, message: &StatusMessage) {
        self.events
            .lock()
            .expect("events lock")
            .push(DisplayEvent::Shown(message.clone()));
    }

    fn hide(&self) {
        self.events
            .lock()
            .expect("events lock")
            .push(DisplayEvent::Hidden);
    }
}

#[derive(Default)]
pub struct RecordingForm {
    email: Mutex<String>,
    activity: Mutex<String>,
    resets: AtomicUsize,
}

impl RecordingForm {
    pub fn filled(email: &str, activity: &str) -> Self {
        Self {
            email: Mutex::new(email.to_string()),
            activity: Mutex::new(activity.to_string()),
            resets: AtomicUsize::new(0),
        }
    }

    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl SignupForm for RecordingForm {
    fn email(&self) -> String {
        self.email.lock().expect("email lock").clone()
    }

    fn selected_activity(&self) -> String {
        self.activity.lock().expect("activity lock").clone()
    }

    fn reset(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
        self.email.lock().expect("email lock").clear();
        self.activity.lock().expect("activity lock").clear();
    }
}

pub struct Harness {
    pub server: Arc<StubState>,
    pub view: Arc<RecordingView>,
    pub display: Arc<RecordingDisplay>,
    pub form: Arc<RecordingForm>,
    pub controller: Arc<SignupController>,
}

pub async fn harness(catalog_body: &str, form: RecordingForm) -> Result<Harness> {
    let server = StubState::new(catalog_body);
    let server_url = spawn_stub_server(server.clone()).await?;
    let api = HttpActivitiesApi::from_server_url(&server_url)?;
    let view = Arc::new(RecordingView::default());
    let display = Arc::new(RecordingDisplay::default());
    let form = Arc::new(form);
    let controller = SignupController::new(
        Arc::new(api),
        view.clone(),
        form.clone(),
        StatusBoard::new(display.clone()),
    );
    Ok(Harness {
        server,
        view,
        display,
        form,
        controller,
    })
}
