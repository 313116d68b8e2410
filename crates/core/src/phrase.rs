use std::collections::BTreeSet;

use crate::models::{ActivityTag, GoalTag, PreferenceTag, Preferences, VibeTag};

const VIBE_KEYWORDS: &[(VibeTag, &[&str])] = &[
    (
        VibeTag::Relaxing,
        &["relax", "chill", "peaceful", "calm", "spa", "unwind", "rest", "laid back"],
    ),
    (
        VibeTag::Active,
        &["active", "adventure", "exciting", "thrill", "adrenaline", "extreme", "wild", "energetic"],
    ),
    (
        VibeTag::Offgrid,
        &["remote", "isolated", "off-grid", "wilderness", "nature", "escape", "disconnect", "cabin"],
    ),
    (
        VibeTag::Foodie,
        &["food", "cuisine", "cooking", "restaurant", "eat", "culinary", "taste", "market"],
    ),
    (
        VibeTag::Luxury,
        &["luxury", "upscale", "premium", "fancy", "expensive", "high-end", "lavish", "nightlife"],
    ),
];

const ACTIVITY_KEYWORDS: &[(ActivityTag, &[&str])] = &[
    (
        ActivityTag::Water,
        &["water", "swim", "surf", "dive", "snorkel", "boat", "ocean", "beach", "jet ski"],
    ),
    (
        ActivityTag::Adventure,
        &["hiking", "climb", "trek", "mountain", "bike", "zip", "bungee", "atv", "cliff"],
    ),
    (
        ActivityTag::Chill,
        &["chill", "relax", "lounge", "spa", "wine", "beach", "peaceful"],
    ),
    (
        ActivityTag::Social,
        &["party", "nightlife", "club", "bar", "social", "meet people", "friends", "concert"],
    ),
    (
        ActivityTag::Family,
        &["family", "kids", "children", "safe", "easy", "simple", "aquarium", "theme park"],
    ),
];

const GOAL_KEYWORDS: &[(GoalTag, &[&str])] = &[
    (
        GoalTag::Romance,
        &["romantic", "romance", "couple", "love", "intimate", "together", "sunset", "dinner"],
    ),
    (
        GoalTag::Bonding,
        &["family", "bonding", "together", "educational", "safe"],
    ),
    (
        GoalTag::Thrill,
        &["thrill", "adrenaline", "exciting", "rush", "intense", "extreme"],
    ),
    (
        GoalTag::Recharge,
        &["wellness", "health", "recharge", "rejuvenate", "mindful", "relax", "spa"],
    ),
    (
        GoalTag::Local,
        &["local", "authentic", "hidden", "discover", "explore", "culture", "gems", "street food"],
    ),
];

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Keyword lookup over free text. Every axis entry whose keyword list has a
/// substring hit is returned, so one phrase can select several tags per axis.
pub fn parse_preference_phrase(input: &str) -> Preferences {
    let lower = normalize_text(input).to_lowercase();

    Preferences {
        vibe: find_matches(&lower, VIBE_KEYWORDS),
        activities: find_matches(&lower, ACTIVITY_KEYWORDS),
        goals: find_matches(&lower, GOAL_KEYWORDS),
    }
}

/// Assistant reply shown after a phrase was applied.
pub fn compose_phrase_reply(matched: &Preferences) -> String {
    if matched.is_empty() {
        return "I'd love to help you more! Could you be more specific? Try mentioning things like:\n\n\
                • Relaxing, adventure, luxury\n\
                • Water sports, hiking, spa\n\
                • Romantic, family bonding, thrill-seeking\n\n\
                The more details, the better I can customize your trip!"
            .to_string();
    }

    let mut reply = String::from(
        "Perfect! Based on what you described, I've automatically selected these preferences for you:\n\n",
    );
    if !matched.vibe.is_empty() {
        reply.push_str(&format!("Vibe: {}\n", labels(&matched.vibe)));
    }
    if !matched.activities.is_empty() {
        reply.push_str(&format!("Activities: {}\n", labels(&matched.activities)));
    }
    if !matched.goals.is_empty() {
        reply.push_str(&format!("Goals: {}\n", labels(&matched.goals)));
    }
    reply.push_str(
        "\nYou can always add more by selecting cards below, or tell me if you want to change anything!",
    );
    reply
}

fn find_matches<T: PreferenceTag>(lower: &str, table: &[(T, &[&str])]) -> BTreeSet<T> {
    table
        .iter()
        .filter(|(_, keywords)| contains_any(lower, keywords))
        .map(|(tag, _)| *tag)
        .collect()
}

fn labels<T: PreferenceTag>(tags: &BTreeSet<T>) -> String {
    tags.iter()
        .map(|tag| tag.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
