//! Food-planner service flow: sign up, authenticate, read and mutate the
//! menu with a bearer token supplied at generation time, then verify the
//! negative path after deletion.

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use wasapi::{CallExecutor, Endpoint, FailedCallError, ServiceDefinition, WasapiClient};

const JWT: &str = "token-nice-user";

#[derive(Debug, Serialize)]
struct SignUpRequest {
    username: String,
    email: String,
    password: String,
    roles: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AuthRequest {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    username: String,
    #[serde(rename = "jwtToken")]
    jwt_token: String,
}

#[derive(Debug, Deserialize)]
struct SimpleMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    username: String,
    email: String,
    menu: Vec<Food>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Food {
    name: String,
}

struct FoodPlannerService;

impl ServiceDefinition for FoodPlannerService {
    fn name() -> &'static str {
        "food-planner"
    }

    fn base_address() -> &'static str {
        ""
    }

    fn endpoints() -> Vec<Endpoint> {
        vec![
            Endpoint::post("sign_up", "/api/auth/signup"),
            Endpoint::post("sign_in", "/api/auth/signin"),
        ]
    }
}

struct FoodPlannerAuthorized;

impl ServiceDefinition for FoodPlannerAuthorized {
    fn name() -> &'static str {
        "food-planner-authorized"
    }

    fn base_address() -> &'static str {
        ""
    }

    fn endpoints() -> Vec<Endpoint> {
        vec![
            Endpoint::get("get_user", "/api/user"),
            Endpoint::post("add_food", "/api/user/add-food"),
            Endpoint::delete("delete_user", "/api/auth/user/{username}/delete"),
            Endpoint::get("logout", "/api/logout"),
        ]
    }
}

/// A stateful planner backend: authentication, menu reads, deletion.
fn planner_backend() -> SocketAddr {
    use std::sync::Mutex;
    let deleted: Mutex<Vec<String>> = Mutex::new(Vec::new());

    common::start_programmable_backend(move |req| {
        let authorized = req.header("authorization") == Some(&format!("Bearer {JWT}"));
        match (req.method.as_str(), req.path.as_str()) {
            ("POST", "/api/auth/signup") => (
                200,
                json!({"message": "User registered successfully!"}).to_string(),
            ),
            ("POST", "/api/auth/signin") => {
                let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
                let username = body["username"].as_str().unwrap_or_default().to_string();
                if deleted.lock().unwrap().contains(&username) {
                    (401, json!({"message": "Unauthorized"}).to_string())
                } else {
                    (
                        200,
                        json!({"username": username, "jwtToken": JWT}).to_string(),
                    )
                }
            }
            ("GET", "/api/user") if authorized => (
                200,
                json!({
                    "username": "nice-user",
                    "email": "nice-user@admin.com",
                    "menu": [
                        {"name": "Lasagna"},
                        {"name": "Grilled Chicken"},
                        {"name": "Margarita Pizza"},
                    ],
                })
                .to_string(),
            ),
            ("POST", "/api/user/add-food") if authorized => {
                let food: serde_json::Value = serde_json::from_str(&req.body).unwrap();
                (
                    200,
                    json!({
                        "username": "nice-user",
                        "email": "nice-user@admin.com",
                        "menu": [{"name": food["name"]}],
                    })
                    .to_string(),
                )
            }
            ("DELETE", path) if authorized && path.starts_with("/api/auth/user/") => {
                let username = path
                    .trim_start_matches("/api/auth/user/")
                    .trim_end_matches("/delete")
                    .to_string();
                let message =
                    format!("User with name {username} deleted successfully!");
                deleted.lock().unwrap().push(username);
                (200, json!({"message": message}).to_string())
            }
            ("GET", "/api/logout") if authorized => {
                (200, json!({"message": "Logged out"}).to_string())
            }
            _ => (401, json!({"message": "Unauthorized"}).to_string()),
        }
    })
}

fn bearer_client(addr: SocketAddr) -> WasapiClient {
    WasapiClient::builder()
        .base_url(&format!("http://{addr}/"))
        .unwrap()
        .header(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {JWT}")).unwrap(),
        )
        .build()
}

#[test]
fn test_sign_up_and_sign_in_flow() {
    let addr = planner_backend();
    let client = WasapiClient::builder()
        .base_url(&format!("http://{addr}/"))
        .unwrap()
        .build();
    let proxy = client.generate::<FoodPlannerService>().unwrap();
    let executor = CallExecutor::default();

    let call = proxy
        .endpoint("sign_up")
        .unwrap()
        .json(&SignUpRequest {
            username: "user-123".into(),
            email: "user-123@user.com".into(),
            password: "Test-123".into(),
            roles: vec!["ROLE_USER".into()],
        })
        .unwrap()
        .pending::<SimpleMessage>()
        .unwrap();
    let reply = executor.perform(call).unwrap();
    assert_eq!(reply.message, "User registered successfully!");

    let call = proxy
        .endpoint("sign_in")
        .unwrap()
        .json(&AuthRequest {
            username: "user-123".into(),
            password: "Test-123".into(),
        })
        .unwrap()
        .pending::<AuthResponse>()
        .unwrap();
    let auth = executor.perform(call).unwrap();
    assert_eq!(auth.username, "user-123");
    assert_eq!(auth.jwt_token, JWT);
}

#[test]
fn test_authorized_user_flow() {
    let addr = planner_backend();
    let proxy = bearer_client(addr)
        .generate::<FoodPlannerAuthorized>()
        .unwrap();
    let executor = CallExecutor::default();

    let call = proxy
        .endpoint("get_user")
        .unwrap()
        .pending::<UserResponse>()
        .unwrap();
    let user = executor.perform(call).unwrap();
    assert_eq!(user.username, "nice-user");
    assert_eq!(user.email, "nice-user@admin.com");
    assert_eq!(user.menu[0].name, "Lasagna");
    assert_eq!(user.menu[1].name, "Grilled Chicken");
    assert_eq!(user.menu[2].name, "Margarita Pizza");

    let call = proxy
        .endpoint("add_food")
        .unwrap()
        .json(&Food {
            name: "Stuffed Peppers".into(),
        })
        .unwrap()
        .pending::<UserResponse>()
        .unwrap();
    let user = executor.perform(call).unwrap();
    assert_eq!(user.menu[0].name, "Stuffed Peppers");

    let call = proxy
        .endpoint("logout")
        .unwrap()
        .pending::<SimpleMessage>()
        .unwrap();
    let reply = executor.perform(call).unwrap();
    assert_eq!(reply.message, "Logged out");
}

#[test]
fn test_deleted_user_can_no_longer_sign_in() {
    let addr = planner_backend();
    let executor = CallExecutor::new(false, true);

    let authorized = bearer_client(addr)
        .generate::<FoodPlannerAuthorized>()
        .unwrap();
    let call = authorized
        .endpoint("delete_user")
        .unwrap()
        .path_param("username", "doomed-user")
        .pending::<SimpleMessage>()
        .unwrap();
    let reply = executor.perform(call).unwrap();
    assert_eq!(
        reply.message,
        "User with name doomed-user deleted successfully!"
    );

    let open = WasapiClient::builder()
        .base_url(&format!("http://{addr}/"))
        .unwrap()
        .build()
        .generate::<FoodPlannerService>()
        .unwrap();
    let call = open
        .endpoint("sign_in")
        .unwrap()
        .json(&AuthRequest {
            username: "doomed-user".into(),
            password: "Test-123".into(),
        })
        .unwrap()
        .pending::<AuthResponse>()
        .unwrap();
    let err = executor.perform(call).unwrap_err();
    assert!(matches!(err, FailedCallError::Status { status: 401, .. }));
}

#[test]
fn test_missing_bearer_is_rejected_with_expected_status() {
    let addr = planner_backend();
    let unauthorized = WasapiClient::builder()
        .base_url(&format!("http://{addr}/"))
        .unwrap()
        .build()
        .generate::<FoodPlannerAuthorized>()
        .unwrap();

    let call = unauthorized
        .endpoint("get_user")
        .unwrap()
        .pending::<()>()
        .unwrap();
    CallExecutor::new(false, false)
        .expect_status(call, 401, Duration::from_secs(5))
        .unwrap();
}
