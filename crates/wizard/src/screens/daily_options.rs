use std::collections::BTreeSet;

use voyage_core::{
    validate_day_plans, ActivityOption, DayPlan, DayPlans, ItineraryError, ValidationError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DailyOptionsScreen {
    days: DayPlans,
    current_day: usize,
    tag_filter: Option<String>,
}

impl DailyOptionsScreen {
    pub fn new(days: DayPlans) -> Self {
        Self {
            days,
            current_day: 0,
            tag_filter: None,
        }
    }

    pub fn days(&self) -> &DayPlans {
        &self.days
    }

    pub fn current_day(&self) -> usize {
        self.current_day
    }

    pub fn current(&self) -> Option<&DayPlan> {
        self.days.get(self.current_day)
    }

    pub fn go_to_day(&mut self, index: usize) -> Result<(), ItineraryError> {
        if index >= self.days.len() {
            return Err(ItineraryError::DayOutOfRange {
                index,
                days: self.days.len(),
            });
        }
        self.current_day = index;
        Ok(())
    }

    pub fn select(&mut self, day: usize, option_id: &str) -> Result<(), ItineraryError> {
        self.days.select_option(day, option_id).map(|_| ())
    }

    pub fn clear(&mut self, day: usize) -> Result<(), ItineraryError> {
        self.days.clear(day).map(|_| ())
    }

    pub fn shuffle(&mut self, day: usize) -> Result<(), ItineraryError> {
        self.days.shuffle_options(day)
    }

    /// `None` or `"all"` shows every option.
    pub fn set_tag_filter(&mut self, tag: Option<&str>) {
        self.tag_filter = tag
            .map(str::trim)
            .filter(|tag| !tag.is_empty() && !tag.eq_ignore_ascii_case("all"))
            .map(ToString::to_string);
    }

    pub fn tag_filter(&self) -> Option<&str> {
        self.tag_filter.as_deref()
    }

    pub fn visible_options(&self, day: usize) -> Vec<&ActivityOption> {
        let Some(plan) = self.days.get(day) else {
            return Vec::new();
        };
        plan.options
            .iter()
            .filter(|option| {
                self.tag_filter
                    .as_deref()
                    .map_or(true, |tag| option.has_tag(tag))
            })
            .collect()
    }

    pub fn all_tags(&self) -> BTreeSet<String> {
        self.days.all_tags()
    }

    pub fn completed_days(&self) -> usize {
        self.days.planned_days()
    }

    pub fn total_days(&self) -> usize {
        self.days.len()
    }

    pub fn submit(&self) -> Result<DayPlans, ValidationError> {
        validate_day_plans(self.days.as_slice())?;
        Ok(self.days.clone())
    }
}
