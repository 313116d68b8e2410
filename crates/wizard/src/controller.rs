use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};
use voyage_core::{
    track_booking, ActivityRef, BookingAction, BookingInfo, ProfileAction, SessionContext,
    VideoFilter, DEFAULT_BOOKING_AID,
};
use voyage_observability::AppMetrics;
use voyage_storage::{ItineraryRepository, SavedItinerary};

use crate::error::WizardError;
use crate::source::ActivitySource;
use crate::step::{Stage, Step, Wizard, WizardEvent};

pub const PLATFORM_COMMISSION_PERCENT: u8 = 70;
pub const CREATOR_COMMISSION_PERCENT: u8 = 30;

#[derive(Debug, Clone, Serialize)]
pub struct SaveReceipt {
    pub trip_id: String,
    pub title: String,
    pub bookings: usize,
    pub total_cost: f64,
    pub platform_commission_percent: u8,
    pub creator_commission_percent: u8,
}

impl SaveReceipt {
    pub fn message(&self) -> String {
        format!(
            "Trip saved successfully! {} bookings created with commission tracking: \
             Platform Owner {}% commission, Content Creators {}% commission",
            self.bookings, self.platform_commission_percent, self.creator_commission_percent
        )
    }
}

impl From<&SavedItinerary> for SaveReceipt {
    fn from(saved: &SavedItinerary) -> Self {
        Self {
            trip_id: saved.trip_id.clone(),
            title: saved.title.clone(),
            bookings: saved.bookings,
            total_cost: saved.total_cost,
            platform_commission_percent: PLATFORM_COMMISSION_PERCENT,
            creator_commission_percent: CREATOR_COMMISSION_PERCENT,
        }
    }
}

/// Drives a [`Wizard`] and performs its side effects: loading screen data
/// from the activity source, booking tracking and saving the itinerary.
pub struct WizardController<S, A>
where
    S: ItineraryRepository,
    A: ActivitySource,
{
    wizard: Wizard,
    store: Arc<S>,
    source: Arc<A>,
    metrics: Arc<AppMetrics>,
    session: SessionContext,
    booking_aid: String,
}

impl<S, A> WizardController<S, A>
where
    S: ItineraryRepository,
    A: ActivitySource,
{
    pub fn new(
        store: Arc<S>,
        source: Arc<A>,
        metrics: Arc<AppMetrics>,
        session: SessionContext,
    ) -> Self {
        Self {
            wizard: Wizard::new(),
            store,
            source,
            metrics,
            session,
            booking_aid: DEFAULT_BOOKING_AID.to_string(),
        }
    }

    pub fn with_booking_aid(mut self, aid: impl Into<String>) -> Self {
        self.booking_aid = aid.into();
        self
    }

    pub fn step(&self) -> Step {
        self.wizard.step()
    }

    pub fn stage(&self) -> &Stage {
        self.wizard.stage()
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Screen access for the current step.
    pub fn wizard_mut(&mut self) -> &mut Wizard {
        &mut self.wizard
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionContext {
        &mut self.session
    }

    #[instrument(skip(self, event), fields(event = event.name()))]
    pub async fn dispatch(&mut self, event: WizardEvent) -> Result<Step, WizardError> {
        let from = self.wizard.step();
        let to = self.wizard.apply(event).inspect_err(|err| {
            warn!(from = %from, error = %err, "wizard transition rejected");
        })?;

        self.metrics.inc_transition();
        info!(from = %from, to = %to, "wizard transition");
        self.load_pending().await;
        Ok(to)
    }

    /// Submits the current screen and moves forward when it is valid.
    pub async fn advance(&mut self) -> Result<Step, WizardError> {
        let event = self.wizard.completion()?;
        self.dispatch(event).await
    }

    pub async fn back(&mut self) -> Result<Step, WizardError> {
        self.dispatch(WizardEvent::Back).await
    }

    pub async fn view_activity_videos(&mut self, activity: ActivityRef) -> Result<Step, WizardError> {
        self.dispatch(WizardEvent::ViewActivityVideos(activity)).await
    }

    pub async fn set_video_filter(&mut self, filter: VideoFilter) -> Result<bool, WizardError> {
        let changed = self.wizard.videos_mut()?.set_filter(filter);
        if changed {
            self.load_pending().await;
        }
        Ok(changed)
    }

    /// Fetch failures stay on the screen; the wizard itself never fails here.
    async fn load_pending(&mut self) {
        match self.wizard.stage_mut() {
            Stage::Recommendations {
                setup,
                preferences,
                screen,
            } if screen.is_loading() => {
                match self.source.recommendations(setup, preferences).await {
                    Ok(catalog) => {
                        info!(count = catalog.len(), "recommendations loaded");
                        screen.loaded(catalog);
                    }
                    Err(err) => {
                        warn!(error = %err, "recommendations unavailable");
                        screen.failed(err.to_string());
                    }
                }
            }
            Stage::ActivityVideos { screen, .. } if screen.is_loading() => {
                let filter = screen.filter();
                match self.source.activity_videos(screen.activity(), filter).await {
                    Ok(videos) => {
                        info!(count = videos.len(), filter = ?filter, "activity videos loaded");
                        screen.loaded(videos);
                    }
                    Err(err) => {
                        warn!(error = %err, "activity videos unavailable");
                        screen.failed(err.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    /// Booking button on an activity card.
    pub fn book(
        &self,
        booking: &BookingInfo,
        video_id: Option<&str>,
        creator_id: Option<&str>,
    ) -> BookingAction {
        self.metrics.inc_booking();
        track_booking(booking, video_id, creator_id, &self.booking_aid)
    }

    pub fn book_video(&self, video_id: &str) -> Result<Option<BookingAction>, WizardError> {
        let Stage::ActivityVideos { screen, .. } = self.wizard.stage() else {
            return Err(WizardError::WrongScreen(self.wizard.step()));
        };
        let action = screen.book(video_id, &self.booking_aid);
        if action.is_some() {
            self.metrics.inc_booking();
        }
        Ok(action)
    }

    /// Hands the finished itinerary to the repository. Does not change step.
    #[instrument(skip(self))]
    pub async fn save(&self) -> Result<SaveReceipt, WizardError> {
        let Stage::Itinerary { builder, .. } = self.wizard.stage() else {
            return Err(WizardError::NothingToSave(self.wizard.step()));
        };
        let user = self.session.require(ProfileAction::SaveTrip)?;

        let saved = self
            .store
            .save_itinerary(&user.user_id, builder.itinerary())
            .await?;
        self.metrics.inc_saved();
        info!(
            trip_id = %saved.trip_id,
            user_id = %saved.user_id,
            bookings = saved.bookings,
            total_cost = saved.total_cost,
            "itinerary saved"
        );

        Ok(SaveReceipt::from(&saved))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};
    use voyage_core::{
        ActivityOption, ActivityVideo, GoalTag, Preferences, TripSetup, TripType, UserSession,
        VibeTag,
    };
    use voyage_storage::MemoryStore;

    use super::*;
    use crate::source::CatalogSource;

    struct Offline;

    impl ActivitySource for Offline {
        async fn recommendations(
            &self,
            _setup: &TripSetup,
            _preferences: &Preferences,
        ) -> Result<Vec<ActivityOption>> {
            Err(anyhow!("recommendation service offline"))
        }

        async fn activity_videos(
            &self,
            _activity: &ActivityRef,
            _filter: VideoFilter,
        ) -> Result<Vec<ActivityVideo>> {
            Err(anyhow!("video service offline"))
        }
    }

    fn session() -> SessionContext {
        SessionContext::signed_in(UserSession {
            user_id: "user-42".to_string(),
            username: "maria".to_string(),
            display_name: "Maria".to_string(),
        })
    }

    fn controller<A: ActivitySource>(
        source: A,
        session: SessionContext,
    ) -> WizardController<MemoryStore, A> {
        WizardController::new(
            Arc::new(MemoryStore::new()),
            Arc::new(source),
            AppMetrics::shared(),
            session,
        )
    }

    async fn to_recommendations<A: ActivitySource>(controller: &mut WizardController<MemoryStore, A>) {
        let form = controller.wizard_mut().setup_form_mut().unwrap();
        form.destination = "Santorini, Greece".to_string();
        form.start_date = Some("2024-07-01".parse().unwrap());
        form.end_date = Some("2024-07-02".parse().unwrap());
        form.trip_type = Some(TripType::Romantic);
        controller.advance().await.unwrap();

        let prefs = controller.wizard_mut().preferences_form_mut().unwrap();
        prefs.describe("romantic beach dinner");
        prefs.toggle_vibe(VibeTag::Luxury);
        prefs.toggle_goal(GoalTag::Local);
        assert_eq!(controller.advance().await.unwrap(), Step::Recommendations);
    }

    #[tokio::test]
    async fn full_flow_saves_for_signed_in_user() {
        let mut controller = controller(CatalogSource::instant(), session());
        to_recommendations(&mut controller).await;

        let screen = controller.wizard_mut().recommendations_mut().unwrap();
        assert!(!screen.is_loading());
        screen.toggle("1");
        assert_eq!(controller.advance().await.unwrap(), Step::DailyOptions);

        let days = controller.wizard_mut().daily_options_mut().unwrap();
        days.select(0, "1").unwrap();
        days.select(1, "day1_relax").unwrap();
        assert_eq!(controller.advance().await.unwrap(), Step::Itinerary);

        let receipt = controller.save().await.unwrap();
        assert_eq!(receipt.bookings, 2);
        assert_eq!(receipt.total_cost, (95.0 + 85.0) * 2.0);
        assert!(receipt.message().contains("2 bookings"));
        assert_eq!(controller.step(), Step::Itinerary);
    }

    #[tokio::test]
    async fn save_requires_profile_and_itinerary() {
        let mut controller = controller(CatalogSource::instant(), SessionContext::default());
        assert!(matches!(
            controller.save().await,
            Err(WizardError::NothingToSave(Step::Setup))
        ));

        to_recommendations(&mut controller).await;
        controller.wizard_mut().recommendations_mut().unwrap().toggle("2");
        controller.advance().await.unwrap();
        controller
            .wizard_mut()
            .daily_options_mut()
            .unwrap()
            .select(0, "2")
            .unwrap();
        controller.advance().await.unwrap();

        let err = controller.save().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please wait for your profile to load before saving trips."
        );
    }

    #[tokio::test]
    async fn source_failure_stays_on_screen() {
        let mut controller = controller(Offline, session());
        to_recommendations(&mut controller).await;

        let screen = controller.wizard_mut().recommendations_mut().unwrap();
        assert!(matches!(
            screen.state(),
            crate::screens::LoadState::Failed(message) if message.contains("offline")
        ));
        assert!(controller.advance().await.is_err());
        assert_eq!(controller.step(), Step::Recommendations);
    }

    #[tokio::test]
    async fn video_detour_loads_and_books() {
        let mut controller = controller(CatalogSource::instant(), session())
            .with_booking_aid("PARTNER");
        to_recommendations(&mut controller).await;

        let activity = ActivityRef {
            id: "4".to_string(),
            title: "Hidden Beach Hike & Swim".to_string(),
        };
        controller.view_activity_videos(activity).await.unwrap();
        assert!(controller.set_video_filter(VideoFilter::Popular).await.unwrap());
        assert!(!controller.set_video_filter(VideoFilter::Popular).await.unwrap());

        let action = controller.book_video("vid5").unwrap().unwrap();
        assert!(action.link.contains("aid=PARTNER"));
        assert_eq!(action.label(), "BUDGET_VN_345");

        assert_eq!(controller.back().await.unwrap(), Step::Recommendations);
    }
}
