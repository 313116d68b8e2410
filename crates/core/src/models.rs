use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    Family,
    Friends,
    Romantic,
    Solo,
}

impl TripType {
    pub const ALL: [Self; 4] = [Self::Family, Self::Friends, Self::Romantic, Self::Solo];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "family" | "kids" => Some(Self::Family),
            "friends" | "friend" | "group" => Some(Self::Friends),
            "romantic" | "couple" | "couples" => Some(Self::Romantic),
            "solo" | "alone" => Some(Self::Solo),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Friends => "friends",
            Self::Romantic => "romantic",
            Self::Solo => "solo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Family => "Family Trip",
            Self::Friends => "Friends Trip",
            Self::Romantic => "Romantic Trip",
            Self::Solo => "Solo Trip",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Family => "Kid-friendly adventures",
            Self::Friends => "Group fun & activities",
            Self::Romantic => "Couples experiences",
            Self::Solo => "Personal adventure",
        }
    }
}

/// Step 1 output. Only built through `TripSetupForm::submit` or `TripSetup::new`,
/// both of which enforce the field invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSetup {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adults: u8,
    pub children: u8,
    pub trip_type: TripType,
}

impl TripSetup {
    pub fn travelers(&self) -> u32 {
        u32::from(self.adults) + u32::from(self.children)
    }

    /// Inclusive number of calendar days between start and end.
    pub fn day_count(&self) -> usize {
        let span = (self.end_date - self.start_date).num_days();
        if span < 0 {
            0
        } else {
            span as usize + 1
        }
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start_date.iter_days().take(self.day_count())
    }

    pub fn default_title(&self) -> String {
        format!("{} {} Trip", self.destination, self.trip_type.as_str())
    }
}

/// Common surface of the three preference vocabularies.
pub trait PreferenceTag: Copy + Ord + 'static {
    fn all() -> &'static [Self];
    fn id(self) -> &'static str;
    fn label(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::all().iter().copied().find(|tag| tag.id() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VibeTag {
    Relaxing,
    Active,
    Offgrid,
    Foodie,
    Luxury,
}

impl PreferenceTag for VibeTag {
    fn all() -> &'static [Self] {
        &[
            Self::Relaxing,
            Self::Active,
            Self::Offgrid,
            Self::Foodie,
            Self::Luxury,
        ]
    }

    fn id(self) -> &'static str {
        match self {
            Self::Relaxing => "relaxing",
            Self::Active => "active",
            Self::Offgrid => "offgrid",
            Self::Foodie => "foodie",
            Self::Luxury => "luxury",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Relaxing => "Relaxing & Laid Back",
            Self::Active => "Active & Adventurous",
            Self::Offgrid => "Off-the-Grid",
            Self::Foodie => "Food & Culture Focused",
            Self::Luxury => "Luxury & Nightlife",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityTag {
    Water,
    Adventure,
    Chill,
    Social,
    Family,
}

impl PreferenceTag for ActivityTag {
    fn all() -> &'static [Self] {
        &[
            Self::Water,
            Self::Adventure,
            Self::Chill,
            Self::Social,
            Self::Family,
        ]
    }

    fn id(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Adventure => "adventure",
            Self::Chill => "chill",
            Self::Social => "social",
            Self::Family => "family",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Water => "Water Sports",
            Self::Adventure => "Adventure Sports",
            Self::Chill => "Chill & Relax",
            Self::Social => "Fun with Friends",
            Self::Family => "Family-Friendly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalTag {
    Romance,
    Bonding,
    Thrill,
    Recharge,
    Local,
}

impl PreferenceTag for GoalTag {
    fn all() -> &'static [Self] {
        &[
            Self::Romance,
            Self::Bonding,
            Self::Thrill,
            Self::Recharge,
            Self::Local,
        ]
    }

    fn id(self) -> &'static str {
        match self {
            Self::Romance => "romance",
            Self::Bonding => "bonding",
            Self::Thrill => "thrill",
            Self::Recharge => "recharge",
            Self::Local => "local",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Romance => "Romance",
            Self::Bonding => "Family Bonding",
            Self::Thrill => "Thrill-Seeking",
            Self::Recharge => "Relax & Recharge",
            Self::Local => "Explore Local Gems",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub vibe: BTreeSet<VibeTag>,
    pub activities: BTreeSet<ActivityTag>,
    pub goals: BTreeSet<GoalTag>,
}

impl Preferences {
    pub fn total_tags(&self) -> usize {
        self.vibe.len() + self.activities.len() + self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_tags() == 0
    }

    /// Returns whether the tag is selected after the toggle.
    pub fn toggle_vibe(&mut self, tag: VibeTag) -> bool {
        toggle(&mut self.vibe, tag)
    }

    pub fn toggle_activity(&mut self, tag: ActivityTag) -> bool {
        toggle(&mut self.activities, tag)
    }

    pub fn toggle_goal(&mut self, tag: GoalTag) -> bool {
        toggle(&mut self.goals, tag)
    }

    /// Set union with `other`; returns how many tags were newly added.
    pub fn merge(&mut self, other: &Preferences) -> usize {
        let before = self.total_tags();
        self.vibe.extend(other.vibe.iter().copied());
        self.activities.extend(other.activities.iter().copied());
        self.goals.extend(other.goals.iter().copied());
        self.total_tags() - before
    }

    pub fn tag_ids(&self) -> Vec<&'static str> {
        self.vibe
            .iter()
            .map(|tag| tag.id())
            .chain(self.activities.iter().map(|tag| tag.id()))
            .chain(self.goals.iter().map(|tag| tag.id()))
            .collect()
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Trending,
    Popular,
    LocalGem,
}

impl ActivityCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "trending" => Some(Self::Trending),
            "popular" => Some(Self::Popular),
            "local_gem" | "local" | "gem" => Some(Self::LocalGem),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Popular => "popular",
            Self::LocalGem => "local_gem",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    Hotel,
    Restaurant,
    Activity,
    Flight,
    Experience,
}

impl BookingType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Restaurant => "restaurant",
            Self::Activity => "activity",
            Self::Flight => "flight",
            Self::Experience => "experience",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingInfo {
    pub location_name: String,
    pub price: String,
    pub original_price: Option<String>,
    pub booking_type: BookingType,
    pub affiliate_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorInfo {
    pub username: String,
    pub followers: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityOption {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub rating: f32,
    pub price_range: String,
    pub duration: String,
    pub tags: BTreeSet<String>,
    pub category: ActivityCategory,
    pub creator: Option<CreatorInfo>,
    pub booking: BookingInfo,
}

impl ActivityOption {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn to_ref(&self) -> ActivityRef {
        ActivityRef {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// What the activity-video detour needs to know about the activity it was opened for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub selected_activity: Option<ActivityOption>,
    pub options: Vec<ActivityOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoFilter {
    Trending,
    Recent,
    Popular,
    Honest,
}

impl VideoFilter {
    pub const ALL: [Self; 4] = [Self::Trending, Self::Recent, Self::Popular, Self::Honest];

    pub fn label(self) -> &'static str {
        match self {
            Self::Trending => "Trending",
            Self::Recent => "Recent",
            Self::Popular => "Most Popular",
            Self::Honest => "Honest Reviews",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoCreator {
    pub name: String,
    pub username: String,
    pub followers: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityVideo {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub duration: String,
    pub views: String,
    pub likes: String,
    pub creator: VideoCreator,
    pub location: String,
    pub description: String,
    pub tags: Vec<String>,
    pub uploaded_ago: String,
    pub booking: BookingInfo,
}
