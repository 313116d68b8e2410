use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{ActivityOption, DayPlan, Preferences, TripSetup, TripType};

pub const MIN_PREFERENCE_TAGS: usize = 3;
/// Longest trip the planner generates day plans for.
pub const MAX_TRIP_DAYS: usize = 365;

/// Local invariant a step screen checks before it hands its payload to the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("destination is required")]
    MissingDestination,
    #[error("start date is required")]
    MissingStartDate,
    #[error("end date is required")]
    MissingEndDate,
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("trip lasts {days} days, the planner handles at most {max}")]
    TripTooLong { days: usize, max: usize },
    #[error("at least one adult must travel")]
    NoAdults,
    #[error("trip type is required")]
    MissingTripType,
    #[error("select at least {required} preferences ({selected} selected)")]
    TooFewPreferences { selected: usize, required: usize },
    #[error("select at least one activity")]
    NoActivitySelected,
    #[error("choose an activity for at least one day")]
    NoDayPlanned,
}

impl TripSetup {
    pub fn new(
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        adults: u8,
        children: u8,
        trip_type: TripType,
    ) -> Result<Self, ValidationError> {
        let destination = destination.into().trim().to_string();
        if destination.is_empty() {
            return Err(ValidationError::MissingDestination);
        }
        if end_date < start_date {
            return Err(ValidationError::EndBeforeStart {
                start: start_date,
                end: end_date,
            });
        }
        let days = (end_date - start_date).num_days() + 1;
        if days > MAX_TRIP_DAYS as i64 {
            return Err(ValidationError::TripTooLong {
                days: usize::try_from(days).unwrap_or(usize::MAX),
                max: MAX_TRIP_DAYS,
            });
        }
        if adults == 0 {
            return Err(ValidationError::NoAdults);
        }

        Ok(Self {
            destination,
            start_date,
            end_date,
            adults,
            children,
            trip_type,
        })
    }
}

pub fn validate_preferences(preferences: &Preferences) -> Result<(), ValidationError> {
    let selected = preferences.total_tags();
    if selected < MIN_PREFERENCE_TAGS {
        return Err(ValidationError::TooFewPreferences {
            selected,
            required: MIN_PREFERENCE_TAGS,
        });
    }
    Ok(())
}

pub fn validate_selection(selected: &[ActivityOption]) -> Result<(), ValidationError> {
    if selected.is_empty() {
        return Err(ValidationError::NoActivitySelected);
    }
    Ok(())
}

pub fn validate_day_plans(days: &[DayPlan]) -> Result<(), ValidationError> {
    if !days.iter().any(|day| day.selected_activity.is_some()) {
        return Err(ValidationError::NoDayPlanned);
    }
    Ok(())
}
