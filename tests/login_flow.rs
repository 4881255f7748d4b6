#![allow(clippy::unwrap_used)]

use serde_json::json;
use signon::{
    form::FormContext,
    gateway::{HttpTransport, Outcome, TRANSPORT_ERROR_MESSAGE},
    login::{LoginOptions, LoginPage},
    session::{FileStore, MemoryStore, Session, SessionStore, TOKEN_KEY},
    ui::{Control, Destination, FieldId, Navigator, Page, Ui},
};
use std::{
    net::TcpListener,
    sync::{Arc, Mutex},
    time::Duration,
};
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Valid(FieldId, Option<bool>),
    Error(String),
    Loading(Control),
    Loaded(Control),
    Style(String),
    Navigate(Destination),
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    fn count(&self, wanted: &Event) -> usize {
        self.events().iter().filter(|e| *e == wanted).count()
    }

    fn navigations(&self) -> Vec<Destination> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Navigate(d) => Some(d),
                _ => None,
            })
            .collect()
    }
}

impl Ui for Recorder {
    fn set_valid(&self, field: FieldId, validity: Option<bool>) {
        self.push(Event::Valid(field, validity));
    }
    fn show_error(&self, message: &str) {
        self.push(Event::Error(message.to_string()));
    }
    fn add_loading(&self, control: Control) {
        self.push(Event::Loading(control));
    }
    fn remove_loading(&self, control: Control) {
        self.push(Event::Loaded(control));
    }
    fn set_addon_style(&self, rules: &str) {
        self.push(Event::Style(rules.to_string()));
    }
}

impl Navigator for Recorder {
    fn navigate(&self, destination: Destination) {
        self.push(Event::Navigate(destination));
    }
}

fn page(
    server: &MockServer,
    store: Arc<dyn SessionStore>,
    recorder: &Arc<Recorder>,
    page_url: &str,
    delay: Duration,
) -> LoginPage<HttpTransport> {
    let transport = HttpTransport::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let mut options = LoginOptions::new(Url::parse(page_url).unwrap());
    options.redirect_delay = delay;
    LoginPage::new(
        FormContext::with_default_rules().unwrap(),
        transport,
        store,
        recorder.clone(),
        recorder.clone(),
        options,
    )
}

async fn mount_login(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/Login"))
        .and(body_json(json!({"Username": "alice", "Password": "hunter2-long"})))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn fill(page: &mut LoginPage<HttpTransport>) {
    page.on_input(FieldId::Username, "alice");
    page.on_blur(FieldId::Username);
    page.on_input(FieldId::Password, "hunter2-long");
    page.on_blur(FieldId::Password);
}

#[tokio::test]
async fn login_persists_session_then_redirects_after_delay() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "Success": true,
            "Message": "Login succeeded",
            "Data": {"Token": "t1", "IsAdmin": true, "UID": "u1"}
        })),
    )
    .await;

    let store = Arc::new(MemoryStore::new());
    let recorder = Arc::new(Recorder::default());
    let mut page = page(
        &server,
        store.clone(),
        &recorder,
        "https://judge.example.com/Login?Callback=/dashboard",
        Duration::from_millis(200),
    );
    fill(&mut page);

    let pending = match page.submit().await.unwrap() {
        Outcome::Success(pending) => pending,
        other => panic!("unexpected outcome: {other:?}"),
    };

    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.get("Token").map(String::as_str), Some("t1"));
    assert_eq!(snapshot.get("IsAdmin").map(String::as_str), Some("true"));
    assert_eq!(snapshot.get("UID").map(String::as_str), Some("u1"));
    assert_eq!(snapshot.get("Username").map(String::as_str), Some("alice"));
    assert_eq!(snapshot.len(), 4);

    assert!(recorder.navigations().is_empty());
    assert_eq!(
        recorder.count(&Event::Style(".NotLoginOnly { display: none; }".to_string())),
        1
    );

    let destination = pending.wait().await.unwrap();
    let expected = Destination::Url(Url::parse("https://judge.example.com/dashboard").unwrap());
    assert_eq!(destination, expected);
    assert_eq!(recorder.navigations(), vec![expected]);
    assert_eq!(recorder.count(&Event::Loading(Control::LoginButton)), 1);
    assert_eq!(recorder.count(&Event::Loaded(Control::LoginButton)), 1);
}

#[tokio::test]
async fn rejected_login_marks_password_and_releases_button() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "Success": false,
            "Message": "Wrong username or password"
        })),
    )
    .await;

    let store = Arc::new(MemoryStore::new());
    let recorder = Arc::new(Recorder::default());
    let mut page = page(
        &server,
        store.clone(),
        &recorder,
        "http://localhost/Login",
        Duration::from_millis(10),
    );
    fill(&mut page);

    let outcome = page.submit().await.unwrap();
    assert!(matches!(outcome, Outcome::ClientError(ref m) if m == "Wrong username or password"));

    let events = recorder.events();
    let invalid_at = events
        .iter()
        .rposition(|e| *e == Event::Valid(FieldId::Password, Some(false)))
        .unwrap();
    let released_at = events
        .iter()
        .position(|e| *e == Event::Loaded(Control::LoginButton))
        .unwrap();
    assert!(invalid_at < released_at);
    assert_eq!(recorder.count(&Event::Loaded(Control::LoginButton)), 1);
    assert!(!recorder.events().iter().any(|e| matches!(e, Event::Error(_))));
    assert!(store.snapshot().unwrap().is_empty());
    assert!(recorder.navigations().is_empty());
}

#[tokio::test]
async fn server_fault_shows_generic_message_once() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_login(&server, ResponseTemplate::new(503).set_body_string("maintenance")).await;

    let store = Arc::new(MemoryStore::new());
    let recorder = Arc::new(Recorder::default());
    let mut page = page(
        &server,
        store.clone(),
        &recorder,
        "http://localhost/Login",
        Duration::from_millis(10),
    );
    fill(&mut page);

    let outcome = page.submit().await.unwrap();
    assert!(matches!(outcome, Outcome::TransportError(_)));
    assert_eq!(
        recorder.count(&Event::Error(TRANSPORT_ERROR_MESSAGE.to_string())),
        1
    );
    assert_eq!(recorder.count(&Event::Loaded(Control::LoginButton)), 1);
    assert!(store.snapshot().unwrap().is_empty());
}

#[tokio::test]
async fn page_load_removes_rejected_token_from_file() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/CheckTokenAvailable"))
        .and(body_json(json!({"Token": "stale"})))
        .respond_with(ResponseTemplate::new(401).set_body_string("Token expired"))
        .expect(1)
        .mount(&server)
        .await;

    let session_path = std::env::temp_dir()
        .join(format!("signon-flow-{}", ulid::Ulid::new()))
        .join("session.json");
    let store = Arc::new(FileStore::new(session_path.clone()));
    Session {
        token: "stale".to_string(),
        is_admin: false,
        uid: "u9".to_string(),
        username: "bob".to_string(),
    }
    .save(store.as_ref())
    .unwrap();

    let recorder = Arc::new(Recorder::default());
    let page = page(
        &server,
        store.clone(),
        &recorder,
        "http://localhost/Login",
        Duration::from_millis(10),
    );

    let outcome = page.on_load().await.unwrap();
    assert!(matches!(outcome, Some(Outcome::ClientError(_))));

    let reopened = FileStore::new(session_path.clone());
    assert_eq!(reopened.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(reopened.get("Username").unwrap().as_deref(), Some("bob"));
    assert!(recorder.events().is_empty());

    if let Some(dir) = session_path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[tokio::test]
async fn page_load_with_valid_token_goes_home() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/CheckTokenAvailable"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store.set(TOKEN_KEY, "t1").unwrap();
    let recorder = Arc::new(Recorder::default());
    let page = page(
        &server,
        store.clone(),
        &recorder,
        "http://localhost/Login",
        Duration::from_millis(10),
    );

    let outcome = page.on_load().await.unwrap();
    assert_eq!(outcome, Some(Outcome::Success(())));
    assert_eq!(recorder.navigations(), vec![Destination::Page(Page::Home)]);
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("t1"));
}
