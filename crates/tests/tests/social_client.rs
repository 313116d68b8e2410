use std::time::Duration;

use voyage_core::{ExternalIdentity, SessionContext};
use voyage_mock_api::{build_router, ApiState};
use voyage_observability::AppMetrics;
use voyage_social::{
    spawn_keepalive, ClientConfig, FeedSource, NewPost, SocialClient, SocialError, ToggleAction,
};

/// Serves the mock backend on an ephemeral port and returns its base url.
async fn spawn_mock(delay: Duration) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(ApiState::new(delay));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> SocialClient {
    SocialClient::new(ClientConfig::new(base_url).unwrap(), AppMetrics::shared()).unwrap()
}

fn identity() -> ExternalIdentity {
    ExternalIdentity {
        external_id: "ext-42".to_string(),
        username: "maria".to_string(),
        email: "maria@example.com".to_string(),
        display_name: "Maria".to_string(),
        profile_image_url: None,
    }
}

#[tokio::test]
async fn signed_in_user_can_like_save_follow_and_post() {
    let base = spawn_mock(Duration::ZERO).await;
    let client = client(&base);

    let user = client.get_or_create_user(&identity()).await.unwrap();
    assert_eq!(user.username, "maria");
    let session = SessionContext::signed_in(user);

    let liked = client.like_post(&session, "1").await.unwrap();
    assert_eq!(liked.action, ToggleAction::Liked);
    assert_eq!(liked.likes_count, 2148);

    let saved = client.save_post(&session, "2", None, None).await.unwrap();
    assert_eq!(saved.action, ToggleAction::Saved);

    let followed = client.follow_user(&session, "user2").await.unwrap();
    assert!(followed.action.is_active());

    let feed = client.fetch_feed(&session, 0).await.unwrap();
    assert_eq!(feed.source, FeedSource::Backend);
    assert_eq!(feed.items.len(), 1);
    assert!(feed.items[0].is_saved);
    assert!(!feed.has_more);

    let post = client
        .create_post(&session, NewPost::new("Night market", "Shilin", "Taiwan"))
        .await
        .unwrap();
    assert_eq!(post.location_name, "Shilin");
}

#[tokio::test]
async fn actions_need_a_loaded_profile() {
    let base = spawn_mock(Duration::ZERO).await;
    let client = client(&base);
    let anonymous = SessionContext::default();

    let err = client.like_post(&anonymous, "1").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please wait for your profile to load before liking posts."
    );
    let err = client.follow_user(&anonymous, "user1").await.unwrap_err();
    assert!(matches!(err, SocialError::Session(_)));

    let feed = client.fetch_feed(&anonymous, 0).await.unwrap();
    assert_eq!(feed.source, FeedSource::Backend);
    assert_eq!(feed.items.len(), 2);
}

#[tokio::test]
async fn create_post_surfaces_backend_detail() {
    let base = spawn_mock(Duration::ZERO).await;
    let client = client(&base);
    let session = SessionContext::signed_in(client.get_or_create_user(&identity()).await.unwrap());

    let err = client
        .create_post(&session, NewPost::new("Lovely", " ", "Peru"))
        .await
        .unwrap_err();
    assert!(matches!(err, SocialError::Status { status: 422, .. }));
    assert_eq!(
        err.user_message("create post"),
        "Failed to create post. location_name must not be empty"
    );
}

#[tokio::test]
async fn slow_backend_times_out_and_feed_falls_back() {
    let base = spawn_mock(Duration::from_millis(500)).await;
    let metrics = AppMetrics::shared();
    let config = ClientConfig::new(&base)
        .unwrap()
        .with_request_timeout(Duration::from_millis(100));
    let client = SocialClient::new(config, metrics.clone()).unwrap();

    let err = client.ping().await.unwrap_err();
    assert!(err.is_timeout());
    assert!(err.user_message("load feed").contains("The backend may be sleeping"));

    let session = SessionContext::default();
    let feed = client.fetch_feed(&session, 0).await.unwrap();
    assert_eq!(feed.source, FeedSource::Fallback);
    assert_eq!(feed.items.len(), 2);
    assert!(!feed.has_more);

    assert!(client.fetch_feed(&session, 1).await.is_err());

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.backend_timeouts_total, 3);
    assert_eq!(snapshot.feed_fallbacks_total, 1);
}

#[tokio::test]
async fn unreachable_backend_falls_back_to_builtin_feed() {
    let client = client("http://127.0.0.1:9");
    let feed = client
        .fetch_feed(&SessionContext::default(), 0)
        .await
        .unwrap();
    assert_eq!(feed.source, FeedSource::Fallback);
    assert_eq!(feed.items[1].author.display_name, "Marco Rodriguez");
}

#[tokio::test]
async fn keepalive_pings_immediately() {
    let base = spawn_mock(Duration::ZERO).await;
    let metrics = AppMetrics::shared();
    let config = ClientConfig::new(&base)
        .unwrap()
        .with_keepalive_interval(Duration::from_secs(600));
    let client = SocialClient::new(config, metrics.clone()).unwrap();

    let handle = spawn_keepalive(client);
    for _ in 0..50 {
        if metrics.snapshot().backend_requests_total > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    handle.abort();

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.backend_requests_total, 1);
    assert_eq!(snapshot.backend_failures_total, 0);
}

#[tokio::test]
async fn wishlist_reads_back_collections_and_locations() {
    let base = spawn_mock(Duration::ZERO).await;
    let client = client(&base);
    let session = SessionContext::signed_in(client.get_or_create_user(&identity()).await.unwrap());

    client
        .save_post(&session, "1", Some("Bali Retreat"), Some("  sunrise class "))
        .await
        .unwrap();
    client.save_post(&session, "2", None, None).await.unwrap();

    let everything = client.saved_posts(&session, None, None).await.unwrap();
    assert_eq!(everything.len(), 2);
    assert_eq!(everything[0].post.id, "2");
    assert_eq!(
        everything[0].saved_info.collection_name.as_deref(),
        Some("My Wishlist")
    );

    let retreat = client
        .saved_posts(&session, Some(" "), Some("Bali Retreat"))
        .await
        .unwrap();
    assert_eq!(retreat.len(), 1);
    assert_eq!(
        retreat[0].saved_info.personal_notes.as_deref(),
        Some("sunrise class")
    );
    assert!(client
        .saved_posts(&session, Some("Tokyo"), Some("Bali Retreat"))
        .await
        .unwrap()
        .is_empty());

    let locations = client.saved_locations(&session).await.unwrap();
    let names = locations
        .iter()
        .map(|location| location.location.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Tokyo", "Ubud"]);

    let err = client
        .saved_posts(&SessionContext::default(), None, None)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please wait for your profile to load before viewing saved posts."
    );
}
