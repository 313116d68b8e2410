use std::env;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, instrument};
use voyage_core::{
    activity_video_catalog, recommendation_catalog, ActivityOption, ActivityRef, ActivityVideo,
    Preferences, TripSetup, VideoFilter,
};

/// Where the wizard gets its recommendation and video lists from.
pub trait ActivitySource: Send + Sync {
    async fn recommendations(
        &self,
        setup: &TripSetup,
        preferences: &Preferences,
    ) -> Result<Vec<ActivityOption>>;

    async fn activity_videos(
        &self,
        activity: &ActivityRef,
        filter: VideoFilter,
    ) -> Result<Vec<ActivityVideo>>;
}

/// Serves the static catalogs after a fixed delay.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    recommendation_latency: Duration,
    video_latency: Duration,
}

impl CatalogSource {
    pub fn new(recommendation_latency: Duration, video_latency: Duration) -> Self {
        Self {
            recommendation_latency,
            video_latency,
        }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn from_env() -> Self {
        let recommendation_millis = env::var("VOYAGE_RECOMMENDATION_LATENCY_MILLIS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(2_000);
        let video_millis = env::var("VOYAGE_VIDEO_LATENCY_MILLIS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(1_000);

        Self::new(
            Duration::from_millis(recommendation_millis),
            Duration::from_millis(video_millis),
        )
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(2_000), Duration::from_millis(1_000))
    }
}

impl ActivitySource for CatalogSource {
    #[instrument(skip_all, fields(destination = %setup.destination))]
    async fn recommendations(
        &self,
        setup: &TripSetup,
        preferences: &Preferences,
    ) -> Result<Vec<ActivityOption>> {
        debug!(tags = ?preferences.tag_ids(), "loading recommendations");
        tokio::time::sleep(self.recommendation_latency).await;
        Ok(recommendation_catalog())
    }

    #[instrument(skip_all, fields(activity = %activity.id, filter = ?filter))]
    async fn activity_videos(
        &self,
        activity: &ActivityRef,
        filter: VideoFilter,
    ) -> Result<Vec<ActivityVideo>> {
        tokio::time::sleep(self.video_latency).await;
        Ok(activity_video_catalog(activity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyage_core::TripType;

    #[tokio::test]
    async fn recommendations_arrive_after_latency() {
        let source = CatalogSource::new(Duration::from_millis(20), Duration::ZERO);
        let setup = TripSetup::new(
            "Bali, Indonesia",
            "2024-05-01".parse().unwrap(),
            "2024-05-04".parse().unwrap(),
            2,
            0,
            TripType::Friends,
        )
        .unwrap();

        let started = std::time::Instant::now();
        let catalog = source
            .recommendations(&setup, &Preferences::default())
            .await
            .unwrap();
        assert_eq!(catalog.len(), 6);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn videos_follow_requested_activity() {
        let activity = ActivityRef {
            id: "3".to_string(),
            title: "Luxury Spa Day".to_string(),
        };
        let videos = CatalogSource::instant()
            .activity_videos(&activity, VideoFilter::Honest)
            .await
            .unwrap();
        assert_eq!(videos.len(), 5);
        assert!(videos.iter().all(|video| video.title.contains("Luxury Spa Day")));
    }
}
