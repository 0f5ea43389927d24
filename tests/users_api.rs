mod support;

use axum::http::StatusCode;
use serde_json::json;

use support::{seed_admin_and_member, send, test_app};

#[tokio::test]
async fn admin_can_create_and_fetch_users() {
    let (app, pool) = test_app().await;
    let (_, _, admin_token, _) = seed_admin_and_member(&app, &pool).await;

    let (status, created) = send(
        &app,
        "POST",
        "/users",
        Some(&admin_token),
        Some(json!({
            "name": "Alice Tan",
            "identifier": "alice",
            "email": "alice@example.com"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["identifier"], json!("alice"));
    // Role defaults to member when omitted.
    assert_eq!(created["role"], json!("member"));

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(
        &app,
        "GET",
        &format!("/users/{id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], json!("alice@example.com"));

    let (status, list) = send(&app, "GET", "/users", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn duplicate_identifier_or_email_conflicts() {
    let (app, pool) = test_app().await;
    let (_, _, admin_token, _) = seed_admin_and_member(&app, &pool).await;

    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(&admin_token),
        Some(json!({ "name": "Alice", "identifier": "alice", "email": "alice@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(&admin_token),
        Some(json!({ "name": "Other Alice", "identifier": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(&admin_token),
        Some(json!({ "name": "Mallory", "identifier": "mallory", "email": "alice@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_user_validates_input() {
    let (app, pool) = test_app().await;
    let (_, _, admin_token, _) = seed_admin_and_member(&app, &pool).await;

    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(&admin_token),
        Some(json!({ "name": "   ", "identifier": "blank" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(&admin_token),
        Some(json!({ "name": "Bad Email", "identifier": "bademail", "email": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_merges_only_provided_fields() {
    let (app, pool) = test_app().await;
    let (_, member, admin_token, _) = seed_admin_and_member(&app, &pool).await;

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/users/{}", member.id),
        Some(&admin_token),
        Some(json!({ "name": "Renamed Member" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], json!("Renamed Member"));
    assert_eq!(updated["identifier"], json!("member"));
    assert_eq!(updated["role"], json!("member"));

    let (status, promoted) = send(
        &app,
        "PUT",
        &format!("/users/{}", member.id),
        Some(&admin_token),
        Some(json!({ "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(promoted["role"], json!("admin"));
    assert_eq!(promoted["name"], json!("Renamed Member"));
}

#[tokio::test]
async fn update_conflicts_on_taken_identifier() {
    let (app, pool) = test_app().await;
    let (_, member, admin_token, _) = seed_admin_and_member(&app, &pool).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/users/{}", member.id),
        Some(&admin_token),
        Some(json!({ "identifier": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Re-submitting your own identifier is not a conflict.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/users/{}", member.id),
        Some(&admin_token),
        Some(json!({ "identifier": "member" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_users_surface_not_found() {
    let (app, pool) = test_app().await;
    let (_, _, admin_token, _) = seed_admin_and_member(&app, &pool).await;

    let ghost = "6ecd8c99-4036-403d-bf84-cf8400f67836";
    let (status, _) = send(
        &app,
        "GET",
        &format!("/users/{ghost}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/users/{ghost}"),
        Some(&admin_token),
        Some(json!({ "name": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/users/{ghost}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_user_ids_are_bad_requests() {
    let (app, pool) = test_app().await;
    let (_, _, admin_token, _) = seed_admin_and_member(&app, &pool).await;

    let (status, _) = send(&app, "GET", "/users/not-a-uuid", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_user_cascades_attendance_and_orphans_activities() {
    let (app, pool) = test_app().await;
    let (_, member, admin_token, member_token) = seed_admin_and_member(&app, &pool).await;

    let (_, activity) = send(
        &app,
        "POST",
        "/activities",
        Some(&admin_token),
        Some(json!({ "title": "Morning Parade" })),
    )
    .await;
    let (status, _) = send(
        &app,
        "POST",
        "/attendance",
        Some(&member_token),
        Some(json!({ "userId": member.id, "activityId": activity["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/users/{}", member.id),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The member's attendance went with them.
    let (status, list) = send(&app, "GET", "/attendance", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 0);

    // The activity itself survives; only the attendance was owned by the user.
    let activity_id = activity["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        "GET",
        &format!("/activities/{activity_id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn deleting_the_creator_nulls_activity_ownership() {
    let (app, pool) = test_app().await;
    let (admin, _, admin_token, member_token) = seed_admin_and_member(&app, &pool).await;

    let (_, activity) = send(
        &app,
        "POST",
        "/activities",
        Some(&admin_token),
        Some(json!({ "title": "Handover Parade" })),
    )
    .await;
    assert_eq!(activity["createdByUserId"], json!(admin.id));

    // A second admin removes the original creator.
    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(&admin_token),
        Some(json!({ "name": "Second Admin", "identifier": "admin2", "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let admin2_token = support::login(&app, "admin2").await;

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/users/{}", admin.id),
        Some(&admin2_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let activity_id = activity["id"].as_str().unwrap();
    let (status, fetched) = send(
        &app,
        "GET",
        &format!("/activities/{activity_id}"),
        Some(&member_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["createdByUserId"], json!(null));
    assert_eq!(fetched["createdByName"], json!(null));
}
