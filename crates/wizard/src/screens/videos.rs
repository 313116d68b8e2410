use voyage_core::{track_booking, ActivityRef, ActivityVideo, BookingAction, VideoFilter};

use super::LoadState;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityVideosScreen {
    activity: ActivityRef,
    filter: VideoFilter,
    videos: LoadState<Vec<ActivityVideo>>,
}

impl ActivityVideosScreen {
    pub fn new(activity: ActivityRef) -> Self {
        Self {
            activity,
            filter: VideoFilter::Trending,
            videos: LoadState::Loading,
        }
    }

    pub fn activity(&self) -> &ActivityRef {
        &self.activity
    }

    pub fn filter(&self) -> VideoFilter {
        self.filter
    }

    pub fn state(&self) -> &LoadState<Vec<ActivityVideo>> {
        &self.videos
    }

    pub fn is_loading(&self) -> bool {
        self.videos.is_loading()
    }

    /// Switching filters puts the list back into loading; returns whether anything changed.
    pub fn set_filter(&mut self, filter: VideoFilter) -> bool {
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.videos = LoadState::Loading;
        true
    }

    pub fn loaded(&mut self, videos: Vec<ActivityVideo>) {
        self.videos = LoadState::Ready(videos);
    }

    pub fn failed(&mut self, message: impl Into<String>) {
        self.videos = LoadState::Failed(message.into());
    }

    pub fn video(&self, video_id: &str) -> Option<&ActivityVideo> {
        self.videos
            .ready()
            .and_then(|videos| videos.iter().find(|video| video.id == video_id))
    }

    /// Booking button on a video card; attribution goes to the video's creator.
    pub fn book(&self, video_id: &str, aid: &str) -> Option<BookingAction> {
        let video = self.video(video_id)?;
        Some(track_booking(
            &video.booking,
            Some(&video.id),
            Some(&video.creator.username),
            aid,
        ))
    }
}
