use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use voyage_mock_api::{build_app, build_router, ApiState};

fn app() -> Router {
    build_router(ApiState::new(Duration::ZERO))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn create_user(app: &Router, external_id: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/user_services/get_or_create_user_uuid",
            json!({
                "external_id": external_id,
                "username": "maria",
                "email": "maria@example.com",
                "display_name": "Maria"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await.as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let response = build_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = body_json(response).await;
    assert_eq!(parsed["status"], "ok");
    assert!(parsed.get("metrics").is_some());
}

#[tokio::test]
async fn feed_serves_seeded_posts() {
    let response = app()
        .oneshot(post_json(
            "/api/social_services/get_social_feed",
            json!({ "user_id": "anyone", "page": 0, "limit": 20 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    let posts = parsed["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["author"]["username"], "sarah_wanderlust");
    assert_eq!(posts[0]["post"]["booking_info"]["affiliate_code"], "SARAH_YOGA35");
    assert_eq!(posts[1]["post"]["price_range"], "$$");
}

#[tokio::test]
async fn like_is_a_toggle() {
    let app = app();
    let request = || {
        post_json(
            "/api/social_services/like_post",
            json!({ "user_id": "u1", "post_id": "2" }),
        )
    };

    let first = body_json(app.clone().oneshot(request()).await.unwrap()).await;
    assert_eq!(first, json!({ "action": "liked", "likes_count": 1624 }));

    let second = body_json(app.clone().oneshot(request()).await.unwrap()).await;
    assert_eq!(second, json!({ "action": "unliked", "likes_count": 1623 }));
}

#[tokio::test]
async fn save_defaults_to_wishlist_and_toggles() {
    let app = app();
    let request = || {
        post_json(
            "/api/social_services/save_post_to_wishlist",
            json!({ "user_id": "u1", "post_id": "1" }),
        )
    };

    let saved = body_json(app.clone().oneshot(request()).await.unwrap()).await;
    assert_eq!(saved["action"], "saved");
    assert_eq!(saved["saves_count"], 429);

    let unsaved = body_json(app.clone().oneshot(request()).await.unwrap()).await;
    assert_eq!(unsaved["action"], "unsaved");
}

#[tokio::test]
async fn follow_rejects_self_and_unknown_users() {
    let app = app();
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/social_services/follow_user",
            json!({ "follower_id": "user1", "following_id": "user1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/social_services/follow_user",
            json!({ "follower_id": "u1", "following_id": "ghost" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["detail"], "user not found");

    let followed = body_json(
        app.oneshot(post_json(
            "/api/social_services/follow_user",
            json!({ "follower_id": "u1", "following_id": "user1" }),
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(followed, json!({ "action": "followed", "followers_count": 15421 }));
}

#[tokio::test]
async fn create_post_validates_and_appears_in_feed() {
    let app = app();
    let user_id = create_user(&app, "ext-maria").await;
    assert_eq!(create_user(&app, "ext-maria").await, user_id);

    let rejected = app
        .clone()
        .oneshot(post_json(
            "/api/social_services/create_travel_post",
            json!({
                "user_id": user_id,
                "caption": "",
                "location_name": "Oia",
                "country": "Greece",
                "post_type": "experience",
                "category": "travel"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(rejected).await["detail"], "caption must not be empty");

    let created = app
        .clone()
        .oneshot(post_json(
            "/api/social_services/create_travel_post",
            json!({
                "user_id": user_id,
                "caption": "Blue domes at golden hour",
                "images": ["", "https://img.example/oia.jpg"],
                "location_name": "Oia",
                "country": "Greece",
                "post_type": "experience",
                "category": "travel",
                "tags": ["sunset"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::OK);
    let post = body_json(created).await;
    assert_eq!(post["images"], json!(["https://img.example/oia.jpg"]));

    let feed = body_json(
        app.oneshot(post_json(
            "/api/social_services/get_social_feed",
            json!({ "user_id": user_id, "page": 0, "limit": 20 }),
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(feed["posts"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn saved_posts_keep_collection_and_notes() {
    let app = app();
    for (post_id, collection, notes) in [
        ("1", "Bali Retreat", Some("sunrise class")),
        ("2", "Food Goals", None),
    ] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/social_services/save_post_to_wishlist",
                json!({
                    "user_id": "u1",
                    "post_id": post_id,
                    "collection_name": collection,
                    "notes": notes
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let saved = body_json(
        app.clone()
            .oneshot(post_json(
                "/api/social_services/get_user_saved_posts",
                json!({ "user_id": "u1", "collection_filter": "Bali Retreat" }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let saved = saved.as_array().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["post"]["id"], "1");
    assert_eq!(saved[0]["saved_info"]["personal_notes"], "sunrise class");
    assert_eq!(saved[0]["saved_info"]["location_category"], "Ubud");

    let locations = body_json(
        app.oneshot(post_json(
            "/api/social_services/get_saved_locations",
            json!({ "user_id": "u1" }),
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(locations.as_array().unwrap().len(), 2);
    assert_eq!(locations[0]["count"], 1);
}
