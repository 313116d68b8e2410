//! Client for the travel social backend: feed, likes, saves, follows and
//! post creation, with a built-in feed for when the backend is asleep.

mod client;
pub mod config;
pub mod error;
mod fallback;
mod keepalive;
pub mod types;

pub use client::SocialClient;
pub use config::{
    ClientConfig, ANONYMOUS_FEED_USER_ID, DEFAULT_API_URL, DEFAULT_COLLECTION, FEED_PAGE_SIZE,
};
pub use error::SocialError;
pub use fallback::fallback_feed;
pub use keepalive::spawn_keepalive;
pub use types::{
    FeedItem, FeedPage, FeedSource, FollowResponse, LikeResponse, NewPost, PingResponse,
    PostAuthor, PostBookingInfo, SaveResponse, SavedInfo, SavedLocation, SavedPost, ToggleAction,
    TravelPost,
};
