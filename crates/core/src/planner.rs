use std::collections::BTreeSet;

use crate::models::{
    ActivityCategory, ActivityOption, ActivityRef, ActivityVideo, BookingInfo, BookingType,
    CreatorInfo, VideoCreator,
};

pub const MAX_DAILY_OPTIONS: usize = 5;

/// Static recommendation catalog standing in for a real recommendation service.
pub fn recommendation_catalog() -> Vec<ActivityOption> {
    vec![
        ActivityOption {
            creator: Some(creator("@santorini_adventures", "125K", true)),
            ..activity(
                "1",
                "Sunset Catamaran Sailing",
                "Experience the magic of a Santorini sunset while sailing around the caldera on a luxury catamaran.",
                "https://images.unsplash.com/photo-1570077188670-e3a8d69ac5ff?w=400&h=300&fit=crop",
                4.9,
                "€80-120",
                "5 hours",
                &["romantic", "water", "sunset"],
                ActivityCategory::Trending,
                booking(
                    "Santorini Sunset Catamaran Tour",
                    "€95/person",
                    Some("€130/person"),
                    BookingType::Activity,
                    "SAN001",
                ),
            )
        },
        activity(
            "2",
            "Traditional Greek Cooking Class",
            "Learn to cook authentic Greek dishes with a local chef in a traditional village setting.",
            "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?w=400&h=300&fit=crop",
            4.8,
            "€60-80",
            "4 hours",
            &["foodie", "culture", "local"],
            ActivityCategory::LocalGem,
            booking(
                "Greek Cooking Experience",
                "€75/person",
                None,
                BookingType::Activity,
                "SAN002",
            ),
        ),
        activity(
            "3",
            "Luxury Spa Day at Mystique Resort",
            "Indulge in a full day of pampering with treatments overlooking the Aegean Sea.",
            "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400&h=300&fit=crop",
            4.9,
            "€200-350",
            "Full day",
            &["luxury", "relaxing", "spa"],
            ActivityCategory::Popular,
            booking(
                "Mystique Resort Spa Package",
                "€280/person",
                Some("€380/person"),
                BookingType::Experience,
                "SAN003",
            ),
        ),
        ActivityOption {
            creator: Some(creator("@hidden_greece", "89K", false)),
            ..activity(
                "4",
                "Hidden Beach Hike & Swim",
                "Discover secret beaches accessible only by foot through scenic hiking trails.",
                "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=400&h=300&fit=crop",
                4.7,
                "€40-60",
                "6 hours",
                &["adventure", "nature", "hidden"],
                ActivityCategory::LocalGem,
                booking(
                    "Secret Beach Hiking Tour",
                    "€50/person",
                    None,
                    BookingType::Activity,
                    "SAN004",
                ),
            )
        },
        activity(
            "5",
            "Wine Tasting at Santo Wines",
            "Sample award-winning local wines while enjoying panoramic views of the caldera.",
            "https://images.unsplash.com/photo-1506377247377-2a5b3b417ebb?w=400&h=300&fit=crop",
            4.6,
            "€35-50",
            "2 hours",
            &["wine", "relaxing", "views"],
            ActivityCategory::Popular,
            booking(
                "Santo Wines Tasting Experience",
                "€42/person",
                None,
                BookingType::Activity,
                "SAN005",
            ),
        ),
        ActivityOption {
            creator: Some(creator("@luxury_greece", "200K", true)),
            ..activity(
                "6",
                "Helicopter Tour of the Islands",
                "See Santorini and neighboring islands from above on a thrilling helicopter ride.",
                "https://images.unsplash.com/photo-1469474968028-56623f02e42e?w=400&h=300&fit=crop",
                4.9,
                "€300-450",
                "45 minutes",
                &["luxury", "adventure", "views"],
                ActivityCategory::Trending,
                booking(
                    "Santorini Helicopter Tour",
                    "€380/person",
                    Some("€480/person"),
                    BookingType::Activity,
                    "SAN006",
                ),
            )
        },
    ]
}

/// Day-indexed synthetic alternatives. The index is baked into ids and
/// affiliate codes so they stay unique across the trip.
pub fn synthetic_alternatives(day_index: usize) -> Vec<ActivityOption> {
    vec![
        activity(
            &format!("day{day_index}_relax"),
            "Beach Day & Spa Time",
            "Unwind with a full day of beach relaxation and rejuvenating spa treatments.",
            "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400&h=300&fit=crop",
            4.7,
            "€50-150",
            "Full day",
            &["relaxing", "beach", "spa"],
            ActivityCategory::Popular,
            booking(
                "Beach & Spa Relaxation Package",
                "€85/person",
                None,
                BookingType::Experience,
                &format!("RELAX{day_index}"),
            ),
        ),
        activity(
            &format!("day{day_index}_adventure"),
            "Extreme Adventure Package",
            "Adrenaline-packed day with multiple adventure activities and thrills.",
            "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=400&h=300&fit=crop",
            4.8,
            "€120-200",
            "8 hours",
            &["adventure", "extreme", "adrenaline"],
            ActivityCategory::Trending,
            booking(
                "Adventure Sports Combo",
                "€165/person",
                Some("€220/person"),
                BookingType::Activity,
                &format!("ADV{day_index}"),
            ),
        ),
        activity(
            &format!("day{day_index}_foodie"),
            "Culinary Discovery Tour",
            "Explore local cuisine with guided food tours and cooking experiences.",
            "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?w=400&h=300&fit=crop",
            4.9,
            "€70-120",
            "6 hours",
            &["foodie", "culture", "local"],
            ActivityCategory::LocalGem,
            booking(
                "Local Food Discovery Experience",
                "€95/person",
                None,
                BookingType::Activity,
                &format!("FOOD{day_index}"),
            ),
        ),
    ]
}

/// Options for one day: the traveller's picks first, then the synthetic
/// alternatives, capped at `MAX_DAILY_OPTIONS`. Yields 3 to 5 entries.
pub fn daily_options(selected: &[ActivityOption], day_index: usize) -> Vec<ActivityOption> {
    selected
        .iter()
        .cloned()
        .chain(synthetic_alternatives(day_index))
        .take(MAX_DAILY_OPTIONS)
        .collect()
}

pub fn activity_video_catalog(activity: &ActivityRef) -> Vec<ActivityVideo> {
    let title = activity.title.as_str();
    let lower = title.to_lowercase();

    vec![
        video(
            "vid1",
            format!("Amazing {title} Experience - Must See!"),
            "3:24",
            "2.1M",
            "89K",
            video_creator("Adventure Sarah", "@adventuresarah", "245K", true),
            "Bali, Indonesia",
            format!("Just experienced the most incredible {lower}! The views were absolutely breathtaking and totally worth every penny. Here's everything you need to know before booking..."),
            &["adventure", "travel", "mustdo", "bali"],
            "2 days ago",
            booking("Bali Adventure Tours", "€89", Some("€120"), BookingType::Activity, "SARAH_BALI_123"),
        ),
        video(
            "vid2",
            format!("{title} Gone WRONG - What They Don't Tell You"),
            "8:15",
            "1.8M",
            "67K",
            video_creator("Honest Travel", "@honesttravel", "892K", true),
            "Thailand",
            format!("Real talk about {lower} - both the amazing parts and the things that went wrong. This honest review will help you prepare properly and avoid the mistakes I made."),
            &["honest", "review", "tips", "thailand"],
            "5 days ago",
            booking("Thailand Adventures Co", "€75", None, BookingType::Activity, "HONEST_THAI_456"),
        ),
        video(
            "vid3",
            format!("First Time {title} - Beginner's Guide"),
            "12:30",
            "956K",
            "43K",
            video_creator("Travel Couple", "@travelcouple", "156K", false),
            "Costa Rica",
            format!("Complete beginner's guide to {lower}! We were terrified but it turned out to be the highlight of our trip. Here's everything first-timers need to know."),
            &["beginner", "guide", "costarica", "couple"],
            "1 week ago",
            booking("Costa Rica Adventures", "€65", Some("€85"), BookingType::Activity, "COUPLE_CR_789"),
        ),
        video(
            "vid4",
            format!("{title} at 4AM - Epic Sunrise Experience"),
            "6:45",
            "734K",
            "28K",
            video_creator("Golden Hour Adventures", "@goldenhour", "89K", true),
            "Nepal",
            format!("Woke up at 4AM for this {lower} experience and it was MAGICAL! The sunrise views were absolutely incredible. Worth the early wake-up call!"),
            &["sunrise", "early", "nepal", "magical"],
            "3 days ago",
            booking("Himalayan Adventures", "€195", None, BookingType::Experience, "GOLDEN_NEP_012"),
        ),
        video(
            "vid5",
            format!("Budget {title} - Only €20!"),
            "4:52",
            "1.2M",
            "91K",
            video_creator("Budget Backpacker", "@budgetbackpacker", "567K", true),
            "Vietnam",
            format!("Discovered this amazing budget-friendly {lower} for only €20! Proves you don't need to spend a fortune for incredible experiences. Here's how to find these hidden gems."),
            &["budget", "cheap", "vietnam", "backpacker"],
            "4 days ago",
            booking("Vietnam Budget Tours", "€20", None, BookingType::Activity, "BUDGET_VN_345"),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn activity(
    id: &str,
    title: &str,
    description: &str,
    thumbnail: &str,
    rating: f32,
    price_range: &str,
    duration: &str,
    tags: &[&str],
    category: ActivityCategory,
    booking: BookingInfo,
) -> ActivityOption {
    ActivityOption {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        thumbnail: thumbnail.to_string(),
        rating,
        price_range: price_range.to_string(),
        duration: duration.to_string(),
        tags: tags
            .iter()
            .map(|tag| tag.to_string())
            .collect::<BTreeSet<_>>(),
        category,
        creator: None,
        booking,
    }
}

fn booking(
    location_name: &str,
    price: &str,
    original_price: Option<&str>,
    booking_type: BookingType,
    affiliate_code: &str,
) -> BookingInfo {
    BookingInfo {
        location_name: location_name.to_string(),
        price: price.to_string(),
        original_price: original_price.map(ToString::to_string),
        booking_type,
        affiliate_code: affiliate_code.to_string(),
    }
}

fn creator(username: &str, followers: &str, verified: bool) -> CreatorInfo {
    CreatorInfo {
        username: username.to_string(),
        followers: followers.to_string(),
        verified,
    }
}

fn video_creator(name: &str, username: &str, followers: &str, verified: bool) -> VideoCreator {
    VideoCreator {
        name: name.to_string(),
        username: username.to_string(),
        followers: followers.to_string(),
        verified,
    }
}

#[allow(clippy::too_many_arguments)]
fn video(
    id: &str,
    title: String,
    duration: &str,
    views: &str,
    likes: &str,
    creator: VideoCreator,
    location: &str,
    description: String,
    tags: &[&str],
    uploaded_ago: &str,
    booking: BookingInfo,
) -> ActivityVideo {
    ActivityVideo {
        id: id.to_string(),
        thumbnail: format!("video-thumbnails://{id}"),
        title,
        duration: duration.to_string(),
        views: views.to_string(),
        likes: likes.to_string(),
        creator,
        location: location.to_string(),
        description,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        uploaded_ago: uploaded_ago.to_string(),
        booking,
    }
}
