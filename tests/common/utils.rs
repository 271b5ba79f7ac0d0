use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::{Client, Method, Response};
use secrecy::SecretString;

use matchday_backend::run;
use matchday_backend::config::settings::{get_config, get_jwt_settings};
use matchday_backend::db::InMemoryStore;
use matchday_backend::services::AuthService;
use matchday_backend::telemetry::{get_subscriber, init_subscriber};

pub const TEST_PASSWORD: &str = "password123";

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub admin_email: String,
}

pub struct UserRegLoginResponse {
    pub token: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.application.password_hash_cost = 4;
    configuration.application.bootstrap_admin = None;

    // Every app gets its own store, so tests never see each other's records
    let store = Arc::new(InMemoryStore::new());
    let admin_email = format!("admin{}@example.com", Uuid::new_v4().simple());
    AuthService::new(store.clone(), Arc::new(get_jwt_settings(&configuration)), 4)
        .seed_admin("admin", &admin_email, &SecretString::new(TEST_PASSWORD.into()))
        .await
        .expect("Failed to seed admin");

    let server = run(
        listener,
        store.clone(),
        get_jwt_settings(&configuration),
        &configuration.application,
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);
    TestApp {
        address,
        store,
        admin_email,
    }
}

impl TestApp {
    pub async fn admin_token(&self) -> String {
        login(&self.address, &self.admin_email, TEST_PASSWORD).await
    }
}

pub async fn login(app_address: &str, email: &str, password: &str) -> String {
    let client = Client::new();
    let login_response = client
        .post(&format!("{}/auth/login", app_address))
        .json(&json!({
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute login request.");
    assert_eq!(200, login_response.status().as_u16(), "Login should succeed for {}", email);

    let body: Value = login_response.json().await.expect("Failed to parse login response");
    body["data"]["token"].as_str().expect("No token in response").to_string()
}

/// Sign up through the public endpoint with the given role ("USER" or "CAPTAIN") and log in.
pub async fn create_test_user_and_login(app_address: &str, role: &str) -> UserRegLoginResponse {
    let client = Client::new();
    let username = format!("user{}", &Uuid::new_v4().simple().to_string()[..12]);
    let email = format!("{}@example.com", username);

    let signup_response = client
        .post(&format!("{}/auth/signup", app_address))
        .json(&json!({
            "username": username,
            "email": email,
            "password": TEST_PASSWORD,
            "role": role
        }))
        .send()
        .await
        .expect("Failed to sign up user.");
    assert_eq!(201, signup_response.status().as_u16());

    let body: Value = signup_response.json().await.expect("Failed to parse signup response");
    let user_id = body["data"]["id"].as_str().expect("No user id").to_string();
    let token = login(app_address, &email, TEST_PASSWORD).await;

    UserRegLoginResponse {
        token,
        user_id,
        username,
        email,
    }
}

pub async fn make_authenticated_request(
    client: &Client,
    method: Method,
    url: &str,
    token: &str,
    body: Option<Value>,
) -> Response {
    let mut request = client
        .request(method, url)
        .header("Authorization", format!("Bearer {}", token));
    if let Some(body) = body {
        request = request.json(&body);
    }
    request.send().await.expect("Failed to execute request.")
}
