//! Local state of each wizard step. A screen only hands its payload to the
//! controller once its own validity check passes.

mod daily_options;
mod itinerary;
mod preferences;
mod recommendations;
mod setup;
mod videos;

pub use daily_options::DailyOptionsScreen;
pub use itinerary::{ExportedItinerary, ItineraryBuilder};
pub use preferences::{ChatMessage, ChatRole, PreferencesForm};
pub use recommendations::{CategoryFilter, RecommendationsScreen};
pub use setup::{TripSetupForm, POPULAR_DESTINATIONS};
pub use videos::ActivityVideosScreen;

/// Progress of a list a screen fetches from the activity source.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}
