use chrono::{Duration, Utc};
use reqwest::{Client, Method};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::utils::{make_authenticated_request, UserRegLoginResponse, TEST_PASSWORD};

/// Create a tournament that is open for registration, returning its id.
pub async fn create_open_tournament(app_address: &str, admin_token: &str, max_teams: u32) -> String {
    let client = Client::new();
    let start = Utc::now() + Duration::days(14);
    let response = make_authenticated_request(
        &client,
        Method::POST,
        &format!("{}/tournaments", app_address),
        admin_token,
        Some(json!({
            "name": format!("Cup {}", &Uuid::new_v4().simple().to_string()[..6]),
            "format": "league",
            "start_date": start,
            "end_date": start + Duration::days(2),
            "max_teams": max_teams,
            "open_registration": true
        })),
    ).await;
    assert_eq!(201, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse tournament");
    body["data"]["id"].as_str().unwrap().to_string()
}

pub async fn register_team(app_address: &str, captain_token: &str, tournament_id: &str, name: &str) -> String {
    let client = Client::new();
    let response = make_authenticated_request(
        &client,
        Method::POST,
        &format!("{}/tournaments/{}/teams", app_address, tournament_id),
        captain_token,
        Some(json!({
            "name": name,
            "players": [{ "name": "Keeper", "jersey_number": 1 }]
        })),
    ).await;
    assert_eq!(201, response.status().as_u16(), "Team registration should succeed");

    let body: Value = response.json().await.expect("Failed to parse team");
    body["data"]["id"].as_str().unwrap().to_string()
}

/// Register a team under a new captain and approve it; returns the team id.
pub async fn create_approved_team(app_address: &str, admin_token: &str, tournament_id: &str, name: &str) -> String {
    let captain = crate::common::utils::create_test_user_and_login(app_address, "CAPTAIN").await;
    let team_id = register_team(app_address, &captain.token, tournament_id, name).await;

    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &format!("{}/teams/{}/approve", app_address, team_id),
        admin_token,
        None,
    ).await;
    assert_eq!(200, response.status().as_u16(), "Approval should succeed");
    team_id
}

pub async fn schedule_match(app_address: &str, token: &str, tournament_id: &str, team_a: &str, team_b: &str) -> String {
    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &format!("{}/tournaments/{}/matches", app_address, tournament_id),
        token,
        Some(json!({
            "team_a_id": team_a,
            "team_b_id": team_b,
            "round": 1,
            "scheduled_at": Utc::now() + Duration::days(15)
        })),
    ).await;
    assert_eq!(201, response.status().as_u16(), "Match creation should succeed");

    let body: Value = response.json().await.expect("Failed to parse match");
    body["data"]["id"].as_str().unwrap().to_string()
}

/// Admin-created management user, assigned to the given tournaments, logged in.
pub async fn create_management_user(app_address: &str, admin_token: &str, tournaments: &[&str]) -> UserRegLoginResponse {
    let username = format!("manager{}", &Uuid::new_v4().simple().to_string()[..12]);
    let email = format!("{}@example.com", username);
    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &format!("{}/admin/users/management", app_address),
        admin_token,
        Some(json!({
            "username": username,
            "email": email,
            "password": TEST_PASSWORD,
            "assigned_tournaments": tournaments
        })),
    ).await;
    assert_eq!(201, response.status().as_u16(), "Management user creation should succeed");

    let body: Value = response.json().await.expect("Failed to parse user");
    let user_id = body["data"]["id"].as_str().unwrap().to_string();
    let token = crate::common::utils::login(app_address, &email, TEST_PASSWORD).await;
    UserRegLoginResponse { token, user_id, username, email }
}
