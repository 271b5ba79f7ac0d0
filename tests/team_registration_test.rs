use reqwest::{Client, Method};
use serde_json::{json, Value};

mod common;
use common::utils::{create_test_user_and_login, make_authenticated_request, spawn_app};
use common::tournament_helpers::{create_management_user, create_open_tournament, register_team};

async fn team_count(address: &str, token: &str, tournament_id: &str) -> u64 {
    let response = make_authenticated_request(
        &Client::new(),
        Method::GET,
        &format!("{}/tournaments/{}", address, tournament_id),
        token,
        None,
    ).await;
    let body: Value = response.json().await.unwrap();
    body["data"]["team_count"].as_u64().unwrap()
}

#[tokio::test]
async fn approvals_stop_at_max_teams() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin_token = test_app.admin_token().await;
    let max_teams = 3;
    let tournament_id = create_open_tournament(&test_app.address, &admin_token, max_teams).await;

    let mut team_ids = Vec::new();
    for i in 0..=max_teams {
        let captain = create_test_user_and_login(&test_app.address, "CAPTAIN").await;
        team_ids.push(register_team(&test_app.address, &captain.token, &tournament_id, &format!("Team {}", i)).await);
    }

    // Act
    let mut statuses = Vec::new();
    for team_id in &team_ids {
        let response = make_authenticated_request(
            &client,
            Method::POST,
            &format!("{}/teams/{}/approve", test_app.address, team_id),
            &admin_token,
            None,
        ).await;
        statuses.push(response.status().as_u16());
    }

    // Assert
    assert_eq!(statuses, vec![200, 200, 200, 409]);
    assert_eq!(team_count(&test_app.address, &admin_token, &tournament_id).await, max_teams as u64);
}

#[tokio::test]
async fn approving_twice_never_double_counts() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin_token = test_app.admin_token().await;
    let tournament_id = create_open_tournament(&test_app.address, &admin_token, 4).await;
    let captain = create_test_user_and_login(&test_app.address, "CAPTAIN").await;
    let team_id = register_team(&test_app.address, &captain.token, &tournament_id, "Green Hornets").await;

    let url = format!("{}/teams/{}/approve", test_app.address, team_id);
    let first = make_authenticated_request(&client, Method::POST, &url, &admin_token, None).await;
    let second = make_authenticated_request(&client, Method::POST, &url, &admin_token, None).await;

    assert_eq!(200, first.status().as_u16());
    assert_eq!(409, second.status().as_u16());
    assert_eq!(team_count(&test_app.address, &admin_token, &tournament_id).await, 1);
}

#[tokio::test]
async fn team_approval_role_matrix() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin_token = test_app.admin_token().await;
    let tournament_id = create_open_tournament(&test_app.address, &admin_token, 8).await;
    let other_tournament = create_open_tournament(&test_app.address, &admin_token, 8).await;

    let assigned = create_management_user(&test_app.address, &admin_token, &[tournament_id.as_str()]).await;
    let unassigned = create_management_user(&test_app.address, &admin_token, &[other_tournament.as_str()]).await;
    let captain = create_test_user_and_login(&test_app.address, "CAPTAIN").await;
    let user = create_test_user_and_login(&test_app.address, "USER").await;

    let cases = [
        (unassigned.token.clone(), 403, "unassigned management"),
        (captain.token.clone(), 403, "captain"),
        (user.token.clone(), 403, "plain user"),
        (assigned.token.clone(), 200, "assigned management"),
        (admin_token.clone(), 200, "admin"),
    ];

    for (i, (token, expected, who)) in cases.into_iter().enumerate() {
        let team_captain = create_test_user_and_login(&test_app.address, "CAPTAIN").await;
        let team_id = register_team(&test_app.address, &team_captain.token, &tournament_id, &format!("Squad {}", i)).await;
        let response = make_authenticated_request(
            &client,
            Method::POST,
            &format!("{}/teams/{}/approve", test_app.address, team_id),
            &token,
            None,
        ).await;
        assert_eq!(expected, response.status().as_u16(), "approval by {}", who);
    }
}

#[tokio::test]
async fn only_captains_register_and_names_are_unique() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin_token = test_app.admin_token().await;
    let tournament_id = create_open_tournament(&test_app.address, &admin_token, 8).await;
    let user = create_test_user_and_login(&test_app.address, "USER").await;
    let captain = create_test_user_and_login(&test_app.address, "CAPTAIN").await;
    let rival = create_test_user_and_login(&test_app.address, "CAPTAIN").await;

    let url = format!("{}/tournaments/{}/teams", test_app.address, tournament_id);
    let by_user = make_authenticated_request(&client, Method::POST, &url, &user.token, Some(json!({ "name": "Red Lions" }))).await;
    assert_eq!(403, by_user.status().as_u16());

    register_team(&test_app.address, &captain.token, &tournament_id, "Red Lions").await;

    let clash = make_authenticated_request(&client, Method::POST, &url, &rival.token, Some(json!({ "name": "RED LIONS" }))).await;
    assert_eq!(409, clash.status().as_u16());

    let mine = make_authenticated_request(
        &client,
        Method::GET,
        &format!("{}/teams/mine", test_app.address),
        &captain.token,
        None,
    ).await;
    let body: Value = mine.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["status"], "pending");
}

#[tokio::test]
async fn rejecting_an_approved_team_frees_its_slot() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin_token = test_app.admin_token().await;
    let tournament_id = create_open_tournament(&test_app.address, &admin_token, 2).await;
    let captain = create_test_user_and_login(&test_app.address, "CAPTAIN").await;
    let team_id = register_team(&test_app.address, &captain.token, &tournament_id, "Blue Sharks").await;

    for (action, expected_count) in [("approve", 1), ("reject", 0), ("approve", 1), ("eliminate", 1)] {
        let response = make_authenticated_request(
            &client,
            Method::POST,
            &format!("{}/teams/{}/{}", test_app.address, team_id, action),
            &admin_token,
            None,
        ).await;
        assert_eq!(200, response.status().as_u16(), "{} should succeed", action);
        assert_eq!(team_count(&test_app.address, &admin_token, &tournament_id).await, expected_count);
    }
}
