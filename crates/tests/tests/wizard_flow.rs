use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use voyage_core::{ExternalIdentity, GoalTag, SessionContext, TripType, VideoFilter};
use voyage_mock_api::{build_router, ApiState};
use voyage_observability::AppMetrics;
use voyage_social::{ClientConfig, SocialClient};
use voyage_storage::{ItineraryRepository, Store};
use voyage_wizard::{CatalogSource, Stage, Step, WizardController, WizardError};

async fn signed_in_session() -> SessionContext {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(ApiState::new(Duration::ZERO));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = SocialClient::new(
        ClientConfig::new(&format!("http://{addr}")).unwrap(),
        AppMetrics::shared(),
    )
    .unwrap();
    let user = client
        .get_or_create_user(&ExternalIdentity {
            external_id: "ext-planner".to_string(),
            username: "planner".to_string(),
            email: "planner@example.com".to_string(),
            display_name: "Planner".to_string(),
            profile_image_url: None,
        })
        .await
        .unwrap();
    SessionContext::signed_in(user)
}

/// The returned directory owns the database file and removes it on drop.
async fn sqlite_store() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("voyage.db");
    let store = Store::sqlite(&format!("sqlite://{}?mode=rwc", path.display()))
        .await
        .unwrap();
    (dir, store)
}

#[tokio::test]
async fn planned_trip_is_saved_for_backend_user() {
    let session = signed_in_session().await;
    let user_id = session.current().unwrap().user_id.clone();
    let (_db_dir, store) = sqlite_store().await;
    let store = Arc::new(store);
    let metrics = AppMetrics::shared();
    let source = CatalogSource::new(Duration::from_millis(10), Duration::from_millis(10));
    let mut controller =
        WizardController::new(store.clone(), Arc::new(source), metrics.clone(), session)
            .with_booking_aid("PARTNER_AID");

    let form = controller.wizard_mut().setup_form_mut().unwrap();
    form.destination = "Santorini, Greece".to_string();
    form.start_date = Some("2024-07-01".parse().unwrap());
    form.end_date = Some("2024-07-03".parse().unwrap());
    form.children = 1;
    form.trip_type = Some(TripType::Family);
    assert_eq!(controller.advance().await.unwrap(), Step::Preferences);

    let prefs = controller.wizard_mut().preferences_form_mut().unwrap();
    assert!(prefs.describe("the beach please").is_some());
    assert!(controller.advance().await.is_err());
    let prefs = controller.wizard_mut().preferences_form_mut().unwrap();
    prefs.describe("kids, local street food");
    prefs.toggle_goal(GoalTag::Bonding);
    assert_eq!(controller.advance().await.unwrap(), Step::Recommendations);

    let screen = controller.wizard_mut().recommendations_mut().unwrap();
    assert_eq!(screen.visible().len(), 6);
    screen.toggle("4");
    screen.toggle("2");
    assert_eq!(controller.advance().await.unwrap(), Step::DailyOptions);

    let days = controller.wizard_mut().daily_options_mut().unwrap();
    assert_eq!(days.total_days(), 3);
    days.select(0, "2").unwrap();
    days.select(2, "day2_foodie").unwrap();

    let activity = days.days().get(0).unwrap().options[0].to_ref();
    controller.view_activity_videos(activity).await.unwrap();
    controller.set_video_filter(VideoFilter::Honest).await.unwrap();
    let action = controller.book_video("vid2").unwrap().unwrap();
    assert!(action.link.contains("aid=PARTNER_AID"));
    assert_eq!(controller.back().await.unwrap(), Step::DailyOptions);
    assert_eq!(
        controller
            .wizard_mut()
            .daily_options_mut()
            .unwrap()
            .completed_days(),
        2
    );

    assert_eq!(controller.advance().await.unwrap(), Step::Itinerary);
    let builder = controller.wizard_mut().itinerary_mut().unwrap();
    assert_eq!(builder.itinerary().title, "Santorini, Greece family Trip");
    builder.move_later(0).unwrap();
    builder.rename("Island Days");

    let receipt = controller.save().await.unwrap();
    assert_eq!(receipt.bookings, 2);
    assert_eq!(receipt.total_cost, (75.0 + 95.0) * 3.0);
    assert!(receipt.message().contains("Platform Owner 70%"));

    let listed = store.list_itineraries(&user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Island Days");
    let export = listed[0].itinerary.export_text();
    assert!(export.contains("Travelers: 2 adults, 1 children"));
    assert!(export.contains("  • Free day"));

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.itineraries_saved_total, 1);
    assert_eq!(snapshot.bookings_tracked_total, 1);
}

#[tokio::test]
async fn anonymous_planner_cannot_save() {
    let mut controller = WizardController::new(
        Arc::new(Store::memory()),
        Arc::new(CatalogSource::instant()),
        AppMetrics::shared(),
        SessionContext::default(),
    );
    let form = controller.wizard_mut().setup_form_mut().unwrap();
    form.destination = "Tokyo, Japan".to_string();
    form.start_date = Some("2024-09-10".parse().unwrap());
    form.end_date = Some("2024-09-10".parse().unwrap());
    form.trip_type = Some(TripType::Solo);
    controller.advance().await.unwrap();

    let prefs = controller.wizard_mut().preferences_form_mut().unwrap();
    prefs.describe("adventure hiking with a thrill");
    controller.advance().await.unwrap();
    controller
        .wizard_mut()
        .recommendations_mut()
        .unwrap()
        .toggle("3");
    controller.advance().await.unwrap();
    controller
        .wizard_mut()
        .daily_options_mut()
        .unwrap()
        .select(0, "3")
        .unwrap();
    controller.advance().await.unwrap();
    assert!(matches!(controller.stage(), Stage::Itinerary { .. }));

    let err = controller.save().await.unwrap_err();
    assert!(matches!(err, WizardError::Session(_)));
}
