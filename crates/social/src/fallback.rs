use crate::types::{FeedItem, PostAuthor, PostBookingInfo, TravelPost};

/// Posts shown when the backend cannot serve the first feed page.
pub fn fallback_feed() -> Vec<FeedItem> {
    vec![
        FeedItem {
            post: TravelPost {
                id: "1".to_string(),
                caption: "Sunrise yoga session overlooking the rice terraces in Ubud! This moment of \
                          peace before the world wakes up is exactly why I fell in love with Bali. \
                          Who else starts their day with gratitude and stretches? \
                          #BaliVibes #YogaLife #Mindfulness"
                    .to_string(),
                images: vec![
                    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=800&fit=crop"
                        .to_string(),
                ],
                video_url: Some(
                    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4"
                        .to_string(),
                ),
                video_thumbnail: Some(
                    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=800&fit=crop"
                        .to_string(),
                ),
                location_name: "Tegallalang Rice Terraces".to_string(),
                country: "Indonesia".to_string(),
                city: Some("Ubud".to_string()),
                post_type: "experience".to_string(),
                category: "wellness".to_string(),
                tags: tags(&["yoga", "sunrise", "bali", "mindfulness", "rice_terraces"]),
                likes_count: 2147,
                saves_count: 428,
                comments_count: 89,
                experience_rating: Some(4.9),
                price_range: None,
                booking_info: Some(PostBookingInfo {
                    price: Some("$35/session".to_string()),
                    booking_url: Some("https://example.com/uluwatu-yoga".to_string()),
                    affiliate_code: Some("SARAH_YOGA35".to_string()),
                }),
                created_at: "2024-08-20T06:30:00Z".to_string(),
                is_sponsored: false,
            },
            author: PostAuthor {
                id: "user1".to_string(),
                username: "sarah_wanderlust".to_string(),
                display_name: "Sarah Chen".to_string(),
                profile_image_url: Some(
                    "https://images.unsplash.com/photo-1494790108755-2616b812b0c1?w=400&h=400&fit=crop&crop=face"
                        .to_string(),
                ),
                is_verified: true,
                is_creator: true,
                followers_count: 15420,
            },
            is_liked: false,
            is_saved: false,
        },
        FeedItem {
            post: TravelPost {
                id: "2".to_string(),
                caption: "BEST ramen I've ever had! This tiny 8-seat shop in Shibuya has been \
                          perfecting their tonkotsu recipe for 45 years. The broth is so rich it \
                          coats the spoon, and the chashu melts in your mouth. Worth every minute \
                          of the 3-hour wait! #TokyoRamen #AuthenticJapan #FoodieFinds"
                    .to_string(),
                images: vec![
                    "https://images.unsplash.com/photo-1569718212165-3a8278d5f624?w=800&h=800&fit=crop"
                        .to_string(),
                ],
                video_url: Some(
                    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4"
                        .to_string(),
                ),
                video_thumbnail: Some(
                    "https://images.unsplash.com/photo-1569718212165-3a8278d5f624?w=800&h=800&fit=crop"
                        .to_string(),
                ),
                location_name: "Menya Saimi Shibuya".to_string(),
                country: "Japan".to_string(),
                city: Some("Tokyo".to_string()),
                post_type: "food".to_string(),
                category: "foodie".to_string(),
                tags: tags(&["ramen", "tokyo", "authentic", "local_favorite", "tonkotsu"]),
                likes_count: 1623,
                saves_count: 312,
                comments_count: 67,
                experience_rating: Some(4.8),
                price_range: Some("$$".to_string()),
                booking_info: Some(PostBookingInfo {
                    price: Some("¥1,400 (~$9)".to_string()),
                    booking_url: Some("https://example.com/tokyo-ramen-tour".to_string()),
                    affiliate_code: Some("MARCO_RAMEN".to_string()),
                }),
                created_at: "2024-08-19T14:20:00Z".to_string(),
                is_sponsored: false,
            },
            author: PostAuthor {
                id: "user2".to_string(),
                username: "marco_eats_world".to_string(),
                display_name: "Marco Rodriguez".to_string(),
                profile_image_url: Some(
                    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop&crop=face"
                        .to_string(),
                ),
                is_verified: true,
                is_creator: true,
                followers_count: 9870,
            },
            is_liked: false,
            is_saved: false,
        },
    ]
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
