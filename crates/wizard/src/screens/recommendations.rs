use std::collections::BTreeSet;

use voyage_core::{validate_selection, ActivityCategory, ActivityOption, ValidationError};

use super::LoadState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ActivityCategory),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        ActivityCategory::parse(value).map(Self::Only)
    }

    fn admits(self, option: &ActivityOption) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => option.category == category,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationsScreen {
    catalog: LoadState<Vec<ActivityOption>>,
    selected: BTreeSet<String>,
    filter: CategoryFilter,
}

impl RecommendationsScreen {
    /// Starts loading; `selected` pre-checks ids from an earlier visit.
    pub fn new(selected: impl IntoIterator<Item = String>) -> Self {
        Self {
            catalog: LoadState::Loading,
            selected: selected.into_iter().collect(),
            filter: CategoryFilter::All,
        }
    }

    pub fn state(&self) -> &LoadState<Vec<ActivityOption>> {
        &self.catalog
    }

    pub fn is_loading(&self) -> bool {
        self.catalog.is_loading()
    }

    /// Drops pre-checked ids that the fresh catalog no longer offers.
    pub fn loaded(&mut self, catalog: Vec<ActivityOption>) {
        self.selected
            .retain(|id| catalog.iter().any(|option| &option.id == id));
        self.catalog = LoadState::Ready(catalog);
    }

    pub fn failed(&mut self, message: impl Into<String>) {
        self.catalog = LoadState::Failed(message.into());
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn visible(&self) -> Vec<&ActivityOption> {
        self.catalog
            .ready()
            .map(|catalog| {
                catalog
                    .iter()
                    .filter(|option| self.filter.admits(option))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the new selection state, or `None` when the id is not in the catalog.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let known = self
            .catalog
            .ready()
            .is_some_and(|catalog| catalog.iter().any(|option| option.id == id));
        if !known {
            return None;
        }

        if self.selected.remove(id) {
            Some(false)
        } else {
            self.selected.insert(id.to_string());
            Some(true)
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected activities in catalog order.
    pub fn submit(&self) -> Result<Vec<ActivityOption>, ValidationError> {
        let selected = self
            .catalog
            .ready()
            .map(|catalog| {
                catalog
                    .iter()
                    .filter(|option| self.selected.contains(&option.id))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        validate_selection(&selected)?;
        Ok(selected)
    }
}
