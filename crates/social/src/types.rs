//! Request and response bodies of the social backend.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostBookingInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_code: Option<String>,
}

impl PostBookingInfo {
    pub fn is_empty(&self) -> bool {
        [&self.price, &self.booking_url, &self.affiliate_code]
            .iter()
            .all(|field| field.as_deref().map_or(true, |value| value.trim().is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPost {
    pub id: String,
    pub caption: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub video_thumbnail: Option<String>,
    pub location_name: String,
    pub country: String,
    #[serde(default)]
    pub city: Option<String>,
    pub post_type: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub saves_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub experience_rating: Option<f32>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub booking_info: Option<PostBookingInfo>,
    pub created_at: String,
    #[serde(default)]
    pub is_sponsored: bool,
}

impl TravelPost {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|stamp| stamp.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    /// Feed-card age: hours under a day, days under a week, otherwise the date.
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let Some(created) = self.created_at() else {
            return self.created_at.clone();
        };
        let hours = (now - created).num_hours();
        if hours < 24 {
            format!("{}h", hours.max(0))
        } else if hours / 24 < 7 {
            format!("{}d", hours / 24)
        } else {
            created.format("%-m/%-d/%Y").to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_creator: bool,
    #[serde(default)]
    pub followers_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub post: TravelPost,
    pub author: PostAuthor,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub is_saved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSource {
    Backend,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedPage {
    pub page: u32,
    pub items: Vec<FeedItem>,
    pub has_more: bool,
    pub source: FeedSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRequest {
    pub user_id: String,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub posts: Vec<FeedItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRequest {
    pub user_id: String,
    pub post_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    pub user_id: String,
    pub post_id: String,
    pub collection_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Wishlist query. Both filters are exact matches and optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPostsRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_filter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLocationsRequest {
    pub user_id: String,
}

/// How a post sits in the user's wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedInfo {
    pub id: String,
    #[serde(default)]
    pub collection_name: Option<String>,
    /// City, else country, else location name of the post at save time.
    #[serde(default)]
    pub location_category: Option<String>,
    #[serde(default)]
    pub personal_notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPost {
    #[serde(alias = "saved_post")]
    pub saved_info: SavedInfo,
    pub post: TravelPost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub location: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowRequest {
    pub follower_id: String,
    pub following_id: String,
}

/// Result of a like, save or follow toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Liked,
    Unliked,
    Saved,
    Unsaved,
    Followed,
    Unfollowed,
}

impl ToggleAction {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Liked | Self::Saved | Self::Followed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub action: ToggleAction,
    pub likes_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub action: ToggleAction,
    pub saves_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowResponse {
    pub action: ToggleAction,
    pub followers_count: u64,
}

/// Post composed by the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub caption: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub location_name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub post_type: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_info: Option<PostBookingInfo>,
}

impl NewPost {
    pub fn new(
        caption: impl Into<String>,
        location_name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            caption: caption.into(),
            images: Vec::new(),
            location_name: location_name.into(),
            country: country.into(),
            city: None,
            post_type: "experience".to_string(),
            category: "travel".to_string(),
            tags: Vec::new(),
            booking_info: None,
        }
    }

    /// Adds a tag unless it is blank or already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|existing| existing == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Drops blank image slots, a blank city and an all-empty booking block.
    pub fn normalized(mut self) -> Self {
        self.images.retain(|image| !image.trim().is_empty());
        self.city = self
            .city
            .map(|city| city.trim().to_string())
            .filter(|city| !city.is_empty());
        self.booking_info = self.booking_info.filter(|info| !info.is_empty());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub post: NewPost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLookupRequest {
    pub external_id: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub timestamp: String,
}

/// Error body shape shared by every backend route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
