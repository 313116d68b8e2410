use std::collections::BTreeSet;
use std::fmt::Write as _;

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ActivityOption, DayPlan, TripSetup};
use crate::planner::daily_options;

static PRICE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d.]").expect("valid price regex"));
static PRICE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+(?:\.\d+)?|\.\d+)").expect("valid price number regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItineraryError {
    #[error("day {index} is out of range (trip has {days} days)")]
    DayOutOfRange { index: usize, days: usize },
    #[error("option {option_id} is not offered on day {day}")]
    UnknownOption { day: usize, option_id: String },
}

/// Numeric part of a display price such as `€85/person`. Currency and unit
/// text is stripped first, then the longest leading number is read, so stray
/// dots from trailing text (`€85/person incl. tax`) are ignored. Returns `None`
/// when no number is left.
pub fn parse_price(display: &str) -> Option<f64> {
    let digits = PRICE_NOISE.replace_all(display, "");
    let number = PRICE_NUMBER.find(&digits)?;
    number
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// One entry per calendar day of the trip, addressed by zero-based index.
/// Entries are never added or removed after generation, so the length always
/// matches the trip's inclusive day count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayPlans {
    days: Vec<DayPlan>,
}

impl DayPlans {
    pub fn generate(setup: &TripSetup, selected: &[ActivityOption]) -> Self {
        let days = setup
            .dates()
            .enumerate()
            .map(|(index, date)| DayPlan {
                date,
                selected_activity: None,
                options: daily_options(selected, index),
            })
            .collect();

        Self { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn as_slice(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayPlan> {
        self.days.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DayPlan> {
        self.days.get(index)
    }

    pub fn select(&mut self, day: usize, activity: ActivityOption) -> Result<(), ItineraryError> {
        self.slot_mut(day)?.selected_activity = Some(activity);
        Ok(())
    }

    /// Selects one of the day's own options by id.
    pub fn select_option(
        &mut self,
        day: usize,
        option_id: &str,
    ) -> Result<&ActivityOption, ItineraryError> {
        let slot = self.slot_mut(day)?;
        let option = slot
            .options
            .iter()
            .find(|option| option.id == option_id)
            .cloned()
            .ok_or_else(|| ItineraryError::UnknownOption {
                day,
                option_id: option_id.to_string(),
            })?;

        Ok(slot.selected_activity.insert(option))
    }

    pub fn clear(&mut self, day: usize) -> Result<Option<ActivityOption>, ItineraryError> {
        Ok(self.slot_mut(day)?.selected_activity.take())
    }

    /// Moves the selection of `from` onto `to`, replacing whatever `to` held.
    /// Returns `false` when `from` had nothing to move.
    pub fn move_selection(&mut self, from: usize, to: usize) -> Result<bool, ItineraryError> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Ok(false);
        }

        let Some(moved) = self.days[from].selected_activity.take() else {
            return Ok(false);
        };
        self.days[to].selected_activity = Some(moved);
        Ok(true)
    }

    /// Permutes a day's options in place; membership is unchanged.
    pub fn shuffle_options(&mut self, day: usize) -> Result<(), ItineraryError> {
        let slot = self.slot_mut(day)?;
        slot.options.shuffle(&mut rand::rng());
        Ok(())
    }

    pub fn planned_days(&self) -> usize {
        self.days
            .iter()
            .filter(|day| day.selected_activity.is_some())
            .count()
    }

    /// Sum of each selected activity's price multiplied by the party size.
    pub fn total_cost(&self, travelers: u32) -> f64 {
        self.days
            .iter()
            .filter_map(|day| day.selected_activity.as_ref())
            .filter_map(|activity| parse_price(&activity.booking.price))
            .map(|price| price * f64::from(travelers))
            .sum()
    }

    pub fn all_tags(&self) -> BTreeSet<String> {
        self.days
            .iter()
            .flat_map(|day| day.options.iter())
            .flat_map(|option| option.tags.iter().cloned())
            .collect()
    }

    fn check(&self, index: usize) -> Result<(), ItineraryError> {
        if index < self.days.len() {
            Ok(())
        } else {
            Err(ItineraryError::DayOutOfRange {
                index,
                days: self.days.len(),
            })
        }
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut DayPlan, ItineraryError> {
        self.check(index)?;
        Ok(&mut self.days[index])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub title: String,
    pub setup: TripSetup,
    pub days: DayPlans,
}

impl Itinerary {
    pub fn new(setup: TripSetup, days: DayPlans) -> Self {
        Self {
            title: setup.default_title(),
            setup,
            days,
        }
    }

    /// Blank titles are ignored.
    pub fn rename(&mut self, title: &str) {
        let title = title.trim();
        if !title.is_empty() {
            self.title = title.to_string();
        }
    }

    pub fn total_cost(&self) -> f64 {
        self.days.total_cost(self.setup.travelers())
    }

    pub fn bookings(&self) -> Vec<&ActivityOption> {
        self.days
            .iter()
            .filter_map(|day| day.selected_activity.as_ref())
            .collect()
    }

    pub fn share_text(&self) -> String {
        format!(
            "Check out my {} itinerary: {} amazing activities planned!",
            self.setup.destination,
            self.days.planned_days()
        )
    }

    pub fn export_file_name(&self) -> String {
        format!(
            "{}_Itinerary.txt",
            self.title.split_whitespace().collect::<Vec<_>>().join("_")
        )
    }

    /// Plain-text rendering, one block per day. One-way; not meant to be parsed back.
    pub fn export_text(&self) -> String {
        let setup = &self.setup;
        let mut out = String::new();

        let _ = writeln!(out, "{}\n", self.title);
        let _ = writeln!(out, "Destination: {}", setup.destination);
        let _ = writeln!(out, "Dates: {} to {}", setup.start_date, setup.end_date);
        let _ = write!(out, "Travelers: {} adults", setup.adults);
        if setup.children > 0 {
            let _ = write!(out, ", {} children", setup.children);
        }
        out.push_str("\n\n");

        for (index, day) in self.days.iter().enumerate() {
            let _ = writeln!(out, "Day {} - {}", index + 1, day.date.format("%A, %B %-d"));
            match &day.selected_activity {
                Some(activity) => {
                    let _ = writeln!(out, "  • {}", activity.title);
                    let _ = writeln!(out, "    {}", activity.description);
                    let _ = writeln!(
                        out,
                        "    Duration: {} | Price: {}",
                        activity.duration, activity.booking.price
                    );
                }
                None => out.push_str("  • Free day\n"),
            }
            out.push('\n');
        }

        out
    }
}
