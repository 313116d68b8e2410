pub mod booking;
pub mod itinerary;
pub mod models;
pub mod phrase;
pub mod planner;
pub mod session;
pub mod validation;

pub use booking::{affiliate_link, track_booking, BookingAction, BookingTrackingEvent, DEFAULT_BOOKING_AID};
pub use itinerary::{parse_price, DayPlans, Itinerary, ItineraryError};
pub use models::*;
pub use phrase::{compose_phrase_reply, normalize_text, parse_preference_phrase};
pub use planner::{
    activity_video_catalog, daily_options, recommendation_catalog, synthetic_alternatives,
    MAX_DAILY_OPTIONS,
};
pub use session::{ExternalIdentity, ProfileAction, SessionContext, SessionError, UserSession};
pub use validation::{
    validate_day_plans, validate_preferences, validate_selection, ValidationError,
    MAX_TRIP_DAYS, MIN_PREFERENCE_TAGS,
};
