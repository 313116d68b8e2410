use std::collections::{BTreeMap, HashMap, HashSet};

use voyage_social::types::{
    FeedItem, FollowResponse, LikeResponse, NewPost, PostAuthor, SaveResponse, SavedInfo,
    SavedLocation, SavedPost, ToggleAction, TravelPost, UserLookupRequest,
};
use voyage_social::fallback_feed;

use crate::ApiError;

#[derive(Debug, Clone)]
struct StoredPost {
    author_id: String,
    post: TravelPost,
}

/// A wishlist row. Unsaving deactivates it so a later save keeps the original entry.
#[derive(Debug, Clone)]
struct SaveRecord {
    info: SavedInfo,
    active: bool,
    sequence: u64,
}

/// In-memory social graph behind the mock routes.
#[derive(Debug, Default)]
pub struct Backend {
    users_by_external_id: HashMap<String, String>,
    authors: HashMap<String, PostAuthor>,
    posts: Vec<StoredPost>,
    likes: HashSet<(String, String)>,
    saves: HashMap<(String, String), SaveRecord>,
    save_sequence: u64,
    follows: HashSet<(String, String)>,
}

impl Backend {
    /// Starts with the two built-in creators and their posts.
    pub fn seeded() -> Self {
        let mut backend = Self::default();
        for item in fallback_feed() {
            backend
                .authors
                .insert(item.author.id.clone(), item.author.clone());
            backend.posts.push(StoredPost {
                author_id: item.author.id,
                post: item.post,
            });
        }
        backend
    }

    pub fn get_or_create_user(&mut self, request: &UserLookupRequest) -> Result<String, ApiError> {
        let external_id = request.external_id.trim();
        if external_id.is_empty() {
            return Err(ApiError::Unprocessable("external_id must not be empty".to_string()));
        }
        if let Some(user_id) = self.users_by_external_id.get(external_id) {
            return Ok(user_id.clone());
        }

        let user_id = uuid::Uuid::new_v4().to_string();
        self.users_by_external_id
            .insert(external_id.to_string(), user_id.clone());
        self.authors.insert(
            user_id.clone(),
            PostAuthor {
                id: user_id.clone(),
                username: request.username.clone(),
                display_name: request.display_name.clone(),
                profile_image_url: request.profile_image_url.clone(),
                is_verified: false,
                is_creator: false,
                followers_count: 0,
            },
        );
        Ok(user_id)
    }

    /// Posts from followed authors, newest first; without follows, the most
    /// liked posts.
    pub fn feed(&self, user_id: &str, page: u32, limit: u32) -> Vec<FeedItem> {
        let following = self
            .follows
            .iter()
            .filter(|(follower, _)| follower == user_id)
            .map(|(_, following)| following.as_str())
            .collect::<HashSet<_>>();

        let mut posts = self
            .posts
            .iter()
            .filter(|stored| following.is_empty() || following.contains(stored.author_id.as_str()))
            .collect::<Vec<_>>();
        if following.is_empty() {
            posts.sort_by(|a, b| {
                b.post
                    .likes_count
                    .cmp(&a.post.likes_count)
                    .then_with(|| b.post.created_at.cmp(&a.post.created_at))
            });
        } else {
            posts.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        }

        let offset = page as usize * limit as usize;
        posts
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .filter_map(|stored| {
                let author = self.authors.get(&stored.author_id)?.clone();
                let key = (user_id.to_string(), stored.post.id.clone());
                Some(FeedItem {
                    post: stored.post.clone(),
                    author,
                    is_liked: self.likes.contains(&key),
                    is_saved: self.saves.get(&key).is_some_and(|record| record.active),
                })
            })
            .collect()
    }

    pub fn toggle_like(&mut self, user_id: &str, post_id: &str) -> Result<LikeResponse, ApiError> {
        self.post_mut(post_id)?;
        let key = (user_id.to_string(), post_id.to_string());
        let liked = !self.likes.remove(&key);
        if liked {
            self.likes.insert(key);
        }

        let post = self.post_mut(post_id)?;
        post.likes_count = adjust(post.likes_count, liked);
        Ok(LikeResponse {
            action: if liked {
                ToggleAction::Liked
            } else {
                ToggleAction::Unliked
            },
            likes_count: post.likes_count,
        })
    }

    /// Re-saving reactivates the existing entry and takes the new collection,
    /// plus the notes when given.
    pub fn toggle_save(
        &mut self,
        user_id: &str,
        post_id: &str,
        collection: &str,
        notes: Option<&str>,
    ) -> Result<SaveResponse, ApiError> {
        let location_category = location_category_of(self.post_mut(post_id)?);
        let key = (user_id.to_string(), post_id.to_string());
        let saved = match self.saves.get_mut(&key) {
            Some(record) => {
                record.active = !record.active;
                if record.active {
                    record.info.collection_name = Some(collection.to_string());
                    if let Some(notes) = notes {
                        record.info.personal_notes = Some(notes.to_string());
                    }
                }
                record.active
            }
            None => {
                self.save_sequence += 1;
                self.saves.insert(
                    key,
                    SaveRecord {
                        info: SavedInfo {
                            id: uuid::Uuid::new_v4().to_string(),
                            collection_name: Some(collection.to_string()),
                            location_category,
                            personal_notes: notes.map(str::to_string),
                            created_at: chrono::Utc::now().to_rfc3339(),
                        },
                        active: true,
                        sequence: self.save_sequence,
                    },
                );
                true
            }
        };

        let post = self.post_mut(post_id)?;
        post.saves_count = adjust(post.saves_count, saved);
        Ok(SaveResponse {
            action: if saved {
                ToggleAction::Saved
            } else {
                ToggleAction::Unsaved
            },
            saves_count: post.saves_count,
        })
    }

    /// Active saves of `user_id`, newest first, narrowed by exact location
    /// category and collection name when given.
    pub fn saved_posts(
        &self,
        user_id: &str,
        location: Option<&str>,
        collection: Option<&str>,
    ) -> Vec<SavedPost> {
        let mut records = self
            .active_saves(user_id)
            .filter(|(_, record)| {
                location.map_or(true, |wanted| {
                    record.info.location_category.as_deref() == Some(wanted)
                })
            })
            .filter(|(_, record)| {
                collection.map_or(true, |wanted| {
                    record.info.collection_name.as_deref() == Some(wanted)
                })
            })
            .collect::<Vec<_>>();
        records.sort_by(|a, b| b.1.sequence.cmp(&a.1.sequence));

        records
            .into_iter()
            .filter_map(|(post_id, record)| {
                let stored = self.posts.iter().find(|stored| stored.post.id == post_id)?;
                Some(SavedPost {
                    saved_info: record.info.clone(),
                    post: stored.post.clone(),
                })
            })
            .collect()
    }

    /// Location categories of the user's active saves, most saved first.
    pub fn saved_locations(&self, user_id: &str) -> Vec<SavedLocation> {
        let mut counts = BTreeMap::<&str, u64>::new();
        for (_, record) in self.active_saves(user_id) {
            if let Some(location) = record.info.location_category.as_deref() {
                *counts.entry(location).or_default() += 1;
            }
        }

        let mut locations = counts
            .into_iter()
            .map(|(location, count)| SavedLocation {
                location: location.to_string(),
                count,
            })
            .collect::<Vec<_>>();
        locations.sort_by(|a, b| b.count.cmp(&a.count));
        locations
    }

    fn active_saves<'a>(
        &'a self,
        user_id: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a SaveRecord)> + 'a {
        self.saves
            .iter()
            .filter(move |((owner, _), record)| owner == user_id && record.active)
            .map(|((_, post_id), record)| (post_id.as_str(), record))
    }

    pub fn toggle_follow(
        &mut self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<FollowResponse, ApiError> {
        if follower_id == following_id {
            return Err(ApiError::BadRequest("users cannot follow themselves".to_string()));
        }
        if !self.authors.contains_key(following_id) {
            return Err(ApiError::NotFound("user"));
        }

        let key = (follower_id.to_string(), following_id.to_string());
        let followed = !self.follows.remove(&key);
        if followed {
            self.follows.insert(key);
        }

        let author = self
            .authors
            .get_mut(following_id)
            .ok_or(ApiError::NotFound("user"))?;
        author.followers_count = adjust(author.followers_count, followed);
        Ok(FollowResponse {
            action: if followed {
                ToggleAction::Followed
            } else {
                ToggleAction::Unfollowed
            },
            followers_count: author.followers_count,
        })
    }

    pub fn create_post(&mut self, user_id: &str, draft: NewPost) -> Result<TravelPost, ApiError> {
        if draft.caption.trim().is_empty() {
            return Err(ApiError::Unprocessable("caption must not be empty".to_string()));
        }
        if draft.location_name.trim().is_empty() {
            return Err(ApiError::Unprocessable(
                "location_name must not be empty".to_string(),
            ));
        }
        if !self.authors.contains_key(user_id) {
            return Err(ApiError::NotFound("user"));
        }

        let draft = draft.normalized();
        let post = TravelPost {
            id: uuid::Uuid::new_v4().to_string(),
            caption: draft.caption,
            images: draft.images,
            video_url: None,
            video_thumbnail: None,
            location_name: draft.location_name,
            country: draft.country,
            city: draft.city,
            post_type: draft.post_type,
            category: draft.category,
            tags: draft.tags,
            likes_count: 0,
            saves_count: 0,
            comments_count: 0,
            experience_rating: None,
            price_range: None,
            booking_info: draft.booking_info,
            created_at: chrono::Utc::now().to_rfc3339(),
            is_sponsored: false,
        };
        self.posts.push(StoredPost {
            author_id: user_id.to_string(),
            post: post.clone(),
        });
        Ok(post)
    }

    fn post_mut(&mut self, post_id: &str) -> Result<&mut TravelPost, ApiError> {
        self.posts
            .iter_mut()
            .map(|stored| &mut stored.post)
            .find(|post| post.id == post_id)
            .ok_or(ApiError::NotFound("post"))
    }
}

fn location_category_of(post: &TravelPost) -> Option<String> {
    [post.city.as_deref(), Some(post.country.as_str()), Some(post.location_name.as_str())]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn adjust(count: u64, increment: bool) -> u64 {
    if increment {
        count + 1
    } else {
        count.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(external_id: &str) -> UserLookupRequest {
        UserLookupRequest {
            external_id: external_id.to_string(),
            username: "maria".to_string(),
            email: "maria@example.com".to_string(),
            display_name: "Maria".to_string(),
            profile_image_url: None,
        }
    }

    #[test]
    fn same_identity_maps_to_same_user() {
        let mut backend = Backend::seeded();
        let first = backend.get_or_create_user(&identity("ext-1")).unwrap();
        assert_eq!(backend.get_or_create_user(&identity(" ext-1 ")).unwrap(), first);
        assert_ne!(backend.get_or_create_user(&identity("ext-2")).unwrap(), first);
    }

    #[test]
    fn like_toggles_and_counts() {
        let mut backend = Backend::seeded();
        let liked = backend.toggle_like("u1", "1").unwrap();
        assert_eq!(liked.action, ToggleAction::Liked);
        assert_eq!(liked.likes_count, 2148);
        assert!(backend.feed("u1", 0, 20)[0].is_liked);

        let unliked = backend.toggle_like("u1", "1").unwrap();
        assert_eq!(unliked.action, ToggleAction::Unliked);
        assert_eq!(unliked.likes_count, 2147);
        assert!(matches!(
            backend.toggle_like("u1", "missing"),
            Err(ApiError::NotFound("post"))
        ));
    }

    #[test]
    fn following_narrows_feed_to_followed_authors() {
        let mut backend = Backend::seeded();
        assert_eq!(backend.feed("u1", 0, 20).len(), 2);

        let follow = backend.toggle_follow("u1", "user2").unwrap();
        assert_eq!(follow.followers_count, 9871);
        let feed = backend.feed("u1", 0, 20);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].author.username, "marco_eats_world");
        assert!(backend.feed("u1", 1, 20).is_empty());
    }

    #[test]
    fn blank_caption_is_unprocessable() {
        let mut backend = Backend::seeded();
        let user = backend.get_or_create_user(&identity("ext-1")).unwrap();
        let err = backend
            .create_post(&user, NewPost::new("  ", "Ubud", "Indonesia"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Unprocessable(_)));

        let post = backend
            .create_post(&user, NewPost::new("Rice terraces", "Ubud", "Indonesia"))
            .unwrap();
        assert_eq!(post.likes_count, 0);
        assert_eq!(backend.feed(&user, 0, 20).len(), 3);
    }

    #[test]
    fn wishlist_filters_by_collection_and_location() {
        let mut backend = Backend::seeded();
        backend
            .toggle_save("u1", "1", "Bali Retreat", Some("sunrise class"))
            .unwrap();
        backend.toggle_save("u1", "2", "Food Goals", None).unwrap();
        backend.toggle_save("u2", "2", "Food Goals", None).unwrap();

        let all = backend.saved_posts("u1", None, None);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].post.id, "2");

        let bali = backend.saved_posts("u1", None, Some("Bali Retreat"));
        assert_eq!(bali.len(), 1);
        assert_eq!(bali[0].saved_info.location_category.as_deref(), Some("Ubud"));
        assert_eq!(bali[0].saved_info.personal_notes.as_deref(), Some("sunrise class"));

        assert_eq!(backend.saved_posts("u1", Some("Tokyo"), None)[0].post.id, "2");
        assert!(backend
            .saved_posts("u1", Some("Tokyo"), Some("Bali Retreat"))
            .is_empty());
    }

    #[test]
    fn unsave_hides_entry_and_resave_restores_it() {
        let mut backend = Backend::seeded();
        backend.toggle_save("u1", "1", "My Wishlist", Some("book early")).unwrap();
        backend.toggle_save("u1", "2", "My Wishlist", None).unwrap();
        let unsaved = backend.toggle_save("u1", "1", "My Wishlist", None).unwrap();
        assert_eq!(unsaved.action, ToggleAction::Unsaved);
        assert_eq!(
            backend.saved_locations("u1"),
            vec![SavedLocation {
                location: "Tokyo".to_string(),
                count: 1
            }]
        );

        backend.toggle_save("u1", "1", "Bali Retreat", None).unwrap();
        let restored = backend.saved_posts("u1", None, Some("Bali Retreat"));
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].saved_info.personal_notes.as_deref(), Some("book early"));
        assert_eq!(backend.saved_locations("u1").len(), 2);
        assert!(backend.saved_posts("u2", None, None).is_empty());
    }
}
