use chrono::NaiveDate;
use voyage_core::{TripSetup, TripType, ValidationError};

pub const POPULAR_DESTINATIONS: [&str; 10] = [
    "Paris, France",
    "Tokyo, Japan",
    "Bali, Indonesia",
    "Santorini, Greece",
    "New York, USA",
    "Dubai, UAE",
    "Maldives",
    "Rome, Italy",
    "Thailand",
    "Iceland",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSetupForm {
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub adults: u8,
    pub children: u8,
    pub trip_type: Option<TripType>,
}

impl Default for TripSetupForm {
    fn default() -> Self {
        Self {
            destination: String::new(),
            start_date: None,
            end_date: None,
            adults: 2,
            children: 0,
            trip_type: None,
        }
    }
}

impl TripSetupForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled from a previously submitted setup.
    pub fn from_setup(setup: &TripSetup) -> Self {
        Self {
            destination: setup.destination.clone(),
            start_date: Some(setup.start_date),
            end_date: Some(setup.end_date),
            adults: setup.adults,
            children: setup.children,
            trip_type: Some(setup.trip_type),
        }
    }

    /// Popular destinations containing the typed text, all of them when nothing is typed.
    pub fn suggestions(&self) -> Vec<&'static str> {
        let typed = self.destination.trim().to_lowercase();
        POPULAR_DESTINATIONS
            .iter()
            .copied()
            .filter(|name| typed.is_empty() || name.to_lowercase().contains(&typed))
            .collect()
    }

    pub fn increment_adults(&mut self) {
        self.adults = self.adults.saturating_add(1);
    }

    pub fn decrement_adults(&mut self) {
        self.adults = self.adults.saturating_sub(1).max(1);
    }

    pub fn increment_children(&mut self) {
        self.children = self.children.saturating_add(1);
    }

    pub fn decrement_children(&mut self) {
        self.children = self.children.saturating_sub(1);
    }

    pub fn is_valid(&self) -> bool {
        self.submit().is_ok()
    }

    pub fn submit(&self) -> Result<TripSetup, ValidationError> {
        if self.destination.trim().is_empty() {
            return Err(ValidationError::MissingDestination);
        }
        let start = self.start_date.ok_or(ValidationError::MissingStartDate)?;
        let end = self.end_date.ok_or(ValidationError::MissingEndDate)?;
        let trip_type = self.trip_type.ok_or(ValidationError::MissingTripType)?;

        TripSetup::new(
            self.destination.as_str(),
            start,
            end,
            self.adults,
            self.children,
            trip_type,
        )
    }
}
