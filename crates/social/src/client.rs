use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use voyage_core::{ExternalIdentity, ProfileAction, SessionContext, UserSession};
use voyage_observability::AppMetrics;

use crate::config::{ClientConfig, ANONYMOUS_FEED_USER_ID, DEFAULT_COLLECTION, FEED_PAGE_SIZE};
use crate::error::SocialError;
use crate::fallback::fallback_feed;
use crate::types::{
    CreatePostRequest, ErrorBody, FeedPage, FeedRequest, FeedResponse, FeedSource,
    FollowRequest, FollowResponse, LikeRequest, LikeResponse, NewPost, PingResponse,
    SaveRequest, SaveResponse, SavedLocation, SavedLocationsRequest, SavedPost,
    SavedPostsRequest, TravelPost, UserLookupRequest,
};

const FEED_PATH: &str = "/api/social_services/get_social_feed";
const LIKE_PATH: &str = "/api/social_services/like_post";
const SAVE_PATH: &str = "/api/social_services/save_post_to_wishlist";
const SAVED_POSTS_PATH: &str = "/api/social_services/get_user_saved_posts";
const SAVED_LOCATIONS_PATH: &str = "/api/social_services/get_saved_locations";
const FOLLOW_PATH: &str = "/api/social_services/follow_user";
const CREATE_POST_PATH: &str = "/api/social_services/create_travel_post";
const USER_PATH: &str = "/api/user_services/get_or_create_user_uuid";
const PING_PATH: &str = "/api/ping";

/// REST client for the social backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SocialClient {
    http: Client,
    config: ClientConfig,
    metrics: Arc<AppMetrics>,
}

impl SocialClient {
    pub fn new(config: ClientConfig, metrics: Arc<AppMetrics>) -> Result<Self, SocialError> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(SocialError::Network)?;
        Ok(Self {
            http,
            config,
            metrics,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves a sign-in identity to the backend user id, creating the user on first sight.
    #[instrument(skip(self, identity), fields(external_id = %identity.external_id))]
    pub async fn get_or_create_user(
        &self,
        identity: &ExternalIdentity,
    ) -> Result<UserSession, SocialError> {
        let request = UserLookupRequest {
            external_id: identity.external_id.clone(),
            username: identity.username.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            profile_image_url: identity.profile_image_url.clone(),
        };
        let user_id: String = self.post_json(USER_PATH, &request).await?;
        info!(user_id = %user_id, "backend profile resolved");
        Ok(UserSession::from_identity(user_id, identity))
    }

    /// One feed page. The first page never fails: backend errors and empty
    /// results are replaced by the built-in posts.
    #[instrument(skip(self, session))]
    pub async fn fetch_feed(
        &self,
        session: &SessionContext,
        page: u32,
    ) -> Result<FeedPage, SocialError> {
        let request = FeedRequest {
            user_id: session
                .current()
                .map(|user| user.user_id.clone())
                .unwrap_or_else(|| ANONYMOUS_FEED_USER_ID.to_string()),
            page,
            limit: FEED_PAGE_SIZE,
        };

        match self.post_json::<_, FeedResponse>(FEED_PATH, &request).await {
            Ok(response) if page == 0 && response.posts.is_empty() => {
                info!("feed empty, showing built-in posts");
                Ok(self.fallback_page())
            }
            Ok(response) => {
                let has_more = response.posts.len() == FEED_PAGE_SIZE as usize;
                debug!(page, count = response.posts.len(), has_more, "feed page loaded");
                Ok(FeedPage {
                    page,
                    items: response.posts,
                    has_more,
                    source: FeedSource::Backend,
                })
            }
            Err(err) if page == 0 => {
                warn!(error = %err, "feed unavailable, showing built-in posts");
                Ok(self.fallback_page())
            }
            Err(err) => Err(err),
        }
    }

    fn fallback_page(&self) -> FeedPage {
        self.metrics.inc_feed_fallback();
        FeedPage {
            page: 0,
            items: fallback_feed(),
            has_more: false,
            source: FeedSource::Fallback,
        }
    }

    #[instrument(skip(self, session))]
    pub async fn like_post(
        &self,
        session: &SessionContext,
        post_id: &str,
    ) -> Result<LikeResponse, SocialError> {
        let user = session.require(ProfileAction::Like)?;
        let request = LikeRequest {
            user_id: user.user_id.clone(),
            post_id: post_id.to_string(),
        };
        let response: LikeResponse = self.post_json(LIKE_PATH, &request).await?;
        info!(action = ?response.action, likes = response.likes_count, "post like toggled");
        Ok(response)
    }

    /// Saves into `collection`, or the default wishlist when `None`.
    #[instrument(skip(self, session, notes))]
    pub async fn save_post(
        &self,
        session: &SessionContext,
        post_id: &str,
        collection: Option<&str>,
        notes: Option<&str>,
    ) -> Result<SaveResponse, SocialError> {
        let user = session.require(ProfileAction::Save)?;
        let request = SaveRequest {
            user_id: user.user_id.clone(),
            post_id: post_id.to_string(),
            collection_name: collection
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_COLLECTION)
                .to_string(),
            notes: non_blank(notes),
        };
        let response: SaveResponse = self.post_json(SAVE_PATH, &request).await?;
        info!(action = ?response.action, saves = response.saves_count, "post save toggled");
        Ok(response)
    }

    /// The signed-in user's wishlist, newest save first. Blank filters are ignored.
    #[instrument(skip(self, session))]
    pub async fn saved_posts(
        &self,
        session: &SessionContext,
        location: Option<&str>,
        collection: Option<&str>,
    ) -> Result<Vec<SavedPost>, SocialError> {
        let user = session.require(ProfileAction::ViewSaved)?;
        let request = SavedPostsRequest {
            user_id: user.user_id.clone(),
            location_filter: non_blank(location),
            collection_filter: non_blank(collection),
        };
        let saved: Vec<SavedPost> = self.post_json(SAVED_POSTS_PATH, &request).await?;
        debug!(count = saved.len(), "saved posts loaded");
        Ok(saved)
    }

    /// Locations the user has saved posts for, with counts, most saved first.
    #[instrument(skip(self, session))]
    pub async fn saved_locations(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<SavedLocation>, SocialError> {
        let user = session.require(ProfileAction::ViewSaved)?;
        let request = SavedLocationsRequest {
            user_id: user.user_id.clone(),
        };
        self.post_json(SAVED_LOCATIONS_PATH, &request).await
    }

    #[instrument(skip(self, session))]
    pub async fn follow_user(
        &self,
        session: &SessionContext,
        author_id: &str,
    ) -> Result<FollowResponse, SocialError> {
        let user = session.require(ProfileAction::Follow)?;
        let request = FollowRequest {
            follower_id: user.user_id.clone(),
            following_id: author_id.to_string(),
        };
        let response: FollowResponse = self.post_json(FOLLOW_PATH, &request).await?;
        info!(
            action = ?response.action,
            followers = response.followers_count,
            "follow toggled"
        );
        Ok(response)
    }

    #[instrument(skip(self, session, post), fields(location = %post.location_name))]
    pub async fn create_post(
        &self,
        session: &SessionContext,
        post: NewPost,
    ) -> Result<TravelPost, SocialError> {
        let user = session.require(ProfileAction::Post)?;
        let request = CreatePostRequest {
            user_id: user.user_id.clone(),
            post: post.normalized(),
        };
        let created: TravelPost = self.post_json(CREATE_POST_PATH, &request).await?;
        info!(post_id = %created.id, "travel post created");
        Ok(created)
    }

    pub async fn ping(&self) -> Result<PingResponse, SocialError> {
        self.send(PING_PATH, self.http.get(self.config.endpoint(PING_PATH)))
            .await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, SocialError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.config.endpoint(path)).json(body);
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, SocialError> {
        self.metrics.inc_backend_request();
        let started = Instant::now();
        let result = self.execute(request).await;
        let elapsed = started.elapsed();
        self.metrics.observe_latency(elapsed);

        match &result {
            Ok(_) => debug!(path, elapsed_ms = elapsed.as_millis() as u64, "backend call ok"),
            Err(err) => {
                if err.is_timeout() {
                    self.metrics.inc_backend_timeout();
                } else {
                    self.metrics.inc_backend_failure();
                }
                warn!(path, elapsed_ms = elapsed.as_millis() as u64, error = %err, "backend call failed");
            }
        }
        result
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SocialError> {
        let timeout_secs = self.config.request_timeout.as_secs();
        let response = request
            .send()
            .await
            .map_err(|err| SocialError::from_reqwest(err, timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(SocialError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| SocialError::from_reqwest(err, timeout_secs))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
