use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use url::form_urlencoded;

use crate::models::{BookingInfo, BookingType};

pub const BOOKING_SEARCH_URL: &str = "https://www.booking.com/searchresults.html";
pub const DEFAULT_BOOKING_AID: &str = "VOYAGE_APP_ID";
const MISSING_CODE: &str = "NO_CODE";

/// Search link on the partner booking site carrying our partner id and the
/// creator's affiliate code as the attribution label.
pub fn affiliate_link(location_name: &str, affiliate_code: Option<&str>, aid: &str) -> String {
    let label = affiliate_code
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .unwrap_or(MISSING_CODE);

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("ss", location_name)
        .append_pair("aid", aid)
        .append_pair("label", label)
        .finish();

    format!("{BOOKING_SEARCH_URL}?{query}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingTrackingEvent {
    pub video_id: Option<String>,
    pub creator_id: Option<String>,
    pub affiliate_code: Option<String>,
    pub location_name: String,
    pub booking_type: BookingType,
    pub timestamp: DateTime<Utc>,
}

/// Result of pressing a booking button: the link to show and what was tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingAction {
    pub link: String,
    pub event: BookingTrackingEvent,
}

impl BookingAction {
    pub fn label(&self) -> &str {
        self.event.affiliate_code.as_deref().unwrap_or(MISSING_CODE)
    }
}

/// Builds the link for a booking and records a tracking event. The link is
/// only surfaced to the caller, never followed.
pub fn track_booking(
    booking: &BookingInfo,
    video_id: Option<&str>,
    creator_id: Option<&str>,
    aid: &str,
) -> BookingAction {
    let affiliate_code = Some(booking.affiliate_code.trim())
        .filter(|code| !code.is_empty())
        .map(ToString::to_string);

    let event = BookingTrackingEvent {
        video_id: video_id.map(ToString::to_string),
        creator_id: creator_id.map(ToString::to_string),
        affiliate_code,
        location_name: booking.location_name.clone(),
        booking_type: booking.booking_type,
        timestamp: Utc::now(),
    };
    let link = affiliate_link(&event.location_name, event.affiliate_code.as_deref(), aid);

    info!(
        location = %event.location_name,
        booking_type = event.booking_type.as_str(),
        affiliate_code = event.affiliate_code.as_deref().unwrap_or(MISSING_CODE),
        video_id = event.video_id.as_deref().unwrap_or("-"),
        creator_id = event.creator_id.as_deref().unwrap_or("-"),
        link = %link,
        "booking tracked"
    );

    BookingAction { link, event }
}
