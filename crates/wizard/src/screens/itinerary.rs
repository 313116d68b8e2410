use serde::Serialize;
use voyage_core::{Itinerary, ItineraryError};

/// Text download offered from the itinerary step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedItinerary {
    pub file_name: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryBuilder {
    itinerary: Itinerary,
}

impl ItineraryBuilder {
    pub fn new(itinerary: Itinerary) -> Self {
        Self { itinerary }
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    pub fn into_itinerary(self) -> Itinerary {
        self.itinerary
    }

    pub fn rename(&mut self, title: &str) {
        self.itinerary.rename(title);
    }

    pub fn move_activity(&mut self, from: usize, to: usize) -> Result<bool, ItineraryError> {
        self.itinerary.days.move_selection(from, to)
    }

    pub fn move_earlier(&mut self, day: usize) -> Result<bool, ItineraryError> {
        match day.checked_sub(1) {
            Some(previous) => self.move_activity(day, previous),
            None => Ok(false),
        }
    }

    pub fn move_later(&mut self, day: usize) -> Result<bool, ItineraryError> {
        match day.checked_add(1) {
            Some(next) => self.move_activity(day, next),
            None => Err(ItineraryError::DayOutOfRange {
                index: day,
                days: self.total_days(),
            }),
        }
    }

    pub fn remove_activity(&mut self, day: usize) -> Result<bool, ItineraryError> {
        Ok(self.itinerary.days.clear(day)?.is_some())
    }

    /// Fills a day from its own option list.
    pub fn quick_add(&mut self, day: usize, option_id: &str) -> Result<(), ItineraryError> {
        self.itinerary.days.select_option(day, option_id).map(|_| ())
    }

    pub fn planned_days(&self) -> usize {
        self.itinerary.days.planned_days()
    }

    pub fn total_days(&self) -> usize {
        self.itinerary.days.len()
    }

    pub fn total_cost(&self) -> f64 {
        self.itinerary.total_cost()
    }

    pub fn share_text(&self) -> String {
        self.itinerary.share_text()
    }

    pub fn export(&self) -> ExportedItinerary {
        ExportedItinerary {
            file_name: self.itinerary.export_file_name(),
            contents: self.itinerary.export_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use voyage_core::{recommendation_catalog, DayPlans, TripSetup, TripType};

    use super::*;

    fn builder() -> ItineraryBuilder {
        let setup = TripSetup::new(
            "Paris, France",
            "2024-04-10".parse().unwrap(),
            "2024-04-12".parse().unwrap(),
            1,
            2,
            TripType::Family,
        )
        .unwrap();
        let mut days = DayPlans::generate(&setup, &recommendation_catalog()[3..4]);
        days.select_option(0, "4").unwrap();
        days.select_option(2, "day2_relax").unwrap();
        ItineraryBuilder::new(Itinerary::new(setup, days))
    }

    #[test]
    fn cost_counts_children_as_travellers() {
        assert_eq!(builder().total_cost(), 405.0);
    }

    #[test]
    fn adjacent_moves_respect_trip_bounds() {
        let mut builder = builder();
        assert!(!builder.move_earlier(0).unwrap());
        assert!(builder.move_later(0).unwrap());
        assert!(builder.itinerary().days.get(0).unwrap().selected_activity.is_none());
        assert_eq!(
            builder.itinerary().days.get(1).unwrap().selected_activity.as_ref().unwrap().id,
            "4"
        );
        assert!(builder.move_later(2).is_err());
    }

    #[test]
    fn move_later_rejects_index_past_any_trip() {
        let mut builder = builder();
        assert_eq!(
            builder.move_later(usize::MAX),
            Err(ItineraryError::DayOutOfRange {
                index: usize::MAX,
                days: 3
            })
        );
        assert_eq!(builder.planned_days(), 2);
    }

    #[test]
    fn remove_then_quick_add() {
        let mut builder = builder();
        assert!(builder.remove_activity(2).unwrap());
        assert!(!builder.remove_activity(2).unwrap());
        assert_eq!(builder.planned_days(), 1);

        builder.quick_add(1, "day1_adventure").unwrap();
        assert_eq!(builder.planned_days(), 2);
        assert_eq!(
            builder.share_text(),
            "Check out my Paris, France itinerary: 2 amazing activities planned!"
        );
    }

    #[test]
    fn export_uses_edited_title() {
        let mut builder = builder();
        builder.rename("Paris   with the kids");
        let export = builder.export();
        assert_eq!(export.file_name, "Paris_with_the_kids_Itinerary.txt");
        assert!(export.contents.starts_with("Paris   with the kids\n\n"));
        assert!(export.contents.contains("  • Hidden Beach Hike & Swim"));
        assert!(export.contents.contains("Price: €50/person"));
    }
}
