use std::fmt;

use serde::Serialize;
use voyage_core::{
    ActivityOption, ActivityRef, DayPlans, Itinerary, Preferences, TripSetup,
};

use crate::error::WizardError;
use crate::screens::{
    ActivityVideosScreen, DailyOptionsScreen, ItineraryBuilder, PreferencesForm,
    RecommendationsScreen, TripSetupForm,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Setup,
    Preferences,
    Recommendations,
    DailyOptions,
    Itinerary,
    ActivityVideos,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Preferences => "preferences",
            Self::Recommendations => "recommendations",
            Self::DailyOptions => "daily_options",
            Self::Itinerary => "itinerary",
            Self::ActivityVideos => "activity_videos",
        }
    }

    /// 1-based position in the forward sequence; the video detour has none.
    pub fn position(self) -> Option<usize> {
        match self {
            Self::Setup => Some(1),
            Self::Preferences => Some(2),
            Self::Recommendations => Some(3),
            Self::DailyOptions => Some(4),
            Self::Itinerary => Some(5),
            Self::ActivityVideos => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input to the transition table. Each completion event carries exactly the
/// payload its step produces.
#[derive(Debug, Clone)]
pub enum WizardEvent {
    SetupCompleted(TripSetup),
    PreferencesCompleted(Preferences),
    ActivitiesChosen(Vec<ActivityOption>),
    DaysPlanned(DayPlans),
    ViewActivityVideos(ActivityRef),
    Back,
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetupCompleted(_) => "setup_completed",
            Self::PreferencesCompleted(_) => "preferences_completed",
            Self::ActivitiesChosen(_) => "activities_chosen",
            Self::DaysPlanned(_) => "days_planned",
            Self::ViewActivityVideos(_) => "view_activity_videos",
            Self::Back => "back",
        }
    }
}

/// Current step together with everything accumulated to reach it and the
/// step's own screen state.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Setup(TripSetupForm),
    Preferences {
        setup: TripSetup,
        form: PreferencesForm,
    },
    Recommendations {
        setup: TripSetup,
        preferences: Preferences,
        screen: RecommendationsScreen,
    },
    DailyOptions {
        setup: TripSetup,
        preferences: Preferences,
        selected: Vec<ActivityOption>,
        screen: DailyOptionsScreen,
    },
    Itinerary {
        preferences: Preferences,
        selected: Vec<ActivityOption>,
        builder: ItineraryBuilder,
    },
    ActivityVideos {
        screen: ActivityVideosScreen,
        origin: Box<Stage>,
    },
}

impl Stage {
    pub fn step(&self) -> Step {
        match self {
            Self::Setup(_) => Step::Setup,
            Self::Preferences { .. } => Step::Preferences,
            Self::Recommendations { .. } => Step::Recommendations,
            Self::DailyOptions { .. } => Step::DailyOptions,
            Self::Itinerary { .. } => Step::Itinerary,
            Self::ActivityVideos { .. } => Step::ActivityVideos,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RetainedDays {
    selection: Vec<String>,
    days: DayPlans,
}

/// Data from later steps kept across back-navigation so a re-entered step
/// starts pre-filled. Overwritten when the step submits again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Retained {
    preferences: Option<Preferences>,
    selected_ids: Vec<String>,
    days: Option<RetainedDays>,
    title: Option<String>,
}

impl Retained {
    pub fn preferences(&self) -> Option<&Preferences> {
        self.preferences.as_ref()
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected_ids
    }

    pub fn days(&self) -> Option<&DayPlans> {
        self.days.as_ref().map(|retained| &retained.days)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Earlier day plans are reused only when they were built from the same
    /// selection over the same dates.
    fn days_for(&self, setup: &TripSetup, selected: &[ActivityOption]) -> DayPlans {
        let ids = selection_ids(selected);
        match &self.days {
            Some(retained)
                if retained.selection == ids
                    && retained.days.len() == setup.day_count()
                    && retained.days.get(0).map(|day| day.date) == Some(setup.start_date) =>
            {
                retained.days.clone()
            }
            _ => DayPlans::generate(setup, selected),
        }
    }

    fn keep_days(&mut self, selected: &[ActivityOption], days: DayPlans) {
        self.days = Some(RetainedDays {
            selection: selection_ids(selected),
            days,
        });
    }
}

fn selection_ids(selected: &[ActivityOption]) -> Vec<String> {
    selected.iter().map(|option| option.id.clone()).collect()
}

/// The trip-planning state machine. Transitions are synchronous; loading
/// screen data is left to the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    stage: Stage,
    retained: Retained,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            stage: Stage::Setup(TripSetupForm::new()),
            retained: Retained::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.stage.step()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn retained(&self) -> &Retained {
        &self.retained
    }

    /// Applies one event. A rejected event leaves the wizard untouched.
    pub fn apply(&mut self, event: WizardEvent) -> Result<Step, WizardError> {
        let current = std::mem::replace(&mut self.stage, Stage::Setup(TripSetupForm::new()));
        match self.transition(current, event) {
            Ok(next) => {
                self.stage = next;
                Ok(self.stage.step())
            }
            Err((restored, err)) => {
                self.stage = restored;
                Err(err)
            }
        }
    }

    /// Completion event for the current screen, if its local check passes.
    pub fn completion(&self) -> Result<WizardEvent, WizardError> {
        let event = match &self.stage {
            Stage::Setup(form) => WizardEvent::SetupCompleted(form.submit()?),
            Stage::Preferences { form, .. } => WizardEvent::PreferencesCompleted(form.submit()?),
            Stage::Recommendations { screen, .. } => WizardEvent::ActivitiesChosen(screen.submit()?),
            Stage::DailyOptions { screen, .. } => WizardEvent::DaysPlanned(screen.submit()?),
            stage @ (Stage::Itinerary { .. } | Stage::ActivityVideos { .. }) => {
                return Err(WizardError::IllegalTransition {
                    step: stage.step(),
                    event: "advance",
                })
            }
        };
        Ok(event)
    }

    fn transition(
        &mut self,
        stage: Stage,
        event: WizardEvent,
    ) -> Result<Stage, (Stage, WizardError)> {
        match (stage, event) {
            (Stage::Setup(_), WizardEvent::SetupCompleted(setup)) => {
                let form = self
                    .retained
                    .preferences
                    .clone()
                    .map(PreferencesForm::with_preferences)
                    .unwrap_or_default();
                Ok(Stage::Preferences { setup, form })
            }
            (Stage::Preferences { setup, .. }, WizardEvent::PreferencesCompleted(preferences)) => {
                self.retained.preferences = Some(preferences.clone());
                let screen = RecommendationsScreen::new(self.retained.selected_ids.clone());
                Ok(Stage::Recommendations {
                    setup,
                    preferences,
                    screen,
                })
            }
            (
                Stage::Recommendations {
                    setup, preferences, ..
                },
                WizardEvent::ActivitiesChosen(selected),
            ) => {
                let days = self.retained.days_for(&setup, &selected);
                self.retained.selected_ids = selection_ids(&selected);
                Ok(Stage::DailyOptions {
                    setup,
                    preferences,
                    selected,
                    screen: DailyOptionsScreen::new(days),
                })
            }
            (
                Stage::DailyOptions {
                    setup,
                    preferences,
                    selected,
                    ..
                },
                WizardEvent::DaysPlanned(days),
            ) => {
                self.retained.keep_days(&selected, days.clone());
                let mut itinerary = Itinerary::new(setup, days);
                if let Some(title) = &self.retained.title {
                    itinerary.rename(title);
                }
                Ok(Stage::Itinerary {
                    preferences,
                    selected,
                    builder: ItineraryBuilder::new(itinerary),
                })
            }
            (
                origin @ (Stage::Recommendations { .. }
                | Stage::DailyOptions { .. }
                | Stage::Itinerary { .. }),
                WizardEvent::ViewActivityVideos(activity),
            ) => Ok(Stage::ActivityVideos {
                screen: ActivityVideosScreen::new(activity),
                origin: Box::new(origin),
            }),
            (stage, WizardEvent::Back) => self.back(stage),
            (stage, event) => {
                let err = WizardError::IllegalTransition {
                    step: stage.step(),
                    event: event.name(),
                };
                Err((stage, err))
            }
        }
    }

    fn back(&mut self, stage: Stage) -> Result<Stage, (Stage, WizardError)> {
        match stage {
            Stage::Setup(form) => Err((Stage::Setup(form), WizardError::NoBackTarget(Step::Setup))),
            Stage::Preferences { setup, form } => {
                self.retained.preferences = Some(form.preferences().clone());
                Ok(Stage::Setup(TripSetupForm::from_setup(&setup)))
            }
            Stage::Recommendations {
                setup,
                preferences,
                screen,
            } => {
                self.retained.selected_ids = screen.selected_ids();
                Ok(Stage::Preferences {
                    setup,
                    form: PreferencesForm::with_preferences(preferences),
                })
            }
            Stage::DailyOptions {
                setup,
                preferences,
                selected,
                screen,
            } => {
                self.retained.keep_days(&selected, screen.days().clone());
                Ok(Stage::Recommendations {
                    setup,
                    preferences,
                    screen: RecommendationsScreen::new(selection_ids(&selected)),
                })
            }
            Stage::Itinerary {
                preferences,
                selected,
                builder,
            } => {
                let itinerary = builder.into_itinerary();
                self.retained.title = (itinerary.title != itinerary.setup.default_title())
                    .then(|| itinerary.title.clone());
                self.retained.keep_days(&selected, itinerary.days.clone());
                Ok(Stage::DailyOptions {
                    setup: itinerary.setup,
                    preferences,
                    selected,
                    screen: DailyOptionsScreen::new(itinerary.days),
                })
            }
            Stage::ActivityVideos { origin, .. } => Ok(*origin),
        }
    }

    pub fn setup_form_mut(&mut self) -> Result<&mut TripSetupForm, WizardError> {
        match &mut self.stage {
            Stage::Setup(form) => Ok(form),
            stage => Err(WizardError::WrongScreen(stage.step())),
        }
    }

    pub fn preferences_form_mut(&mut self) -> Result<&mut PreferencesForm, WizardError> {
        match &mut self.stage {
            Stage::Preferences { form, .. } => Ok(form),
            stage => Err(WizardError::WrongScreen(stage.step())),
        }
    }

    pub fn recommendations_mut(&mut self) -> Result<&mut RecommendationsScreen, WizardError> {
        match &mut self.stage {
            Stage::Recommendations { screen, .. } => Ok(screen),
            stage => Err(WizardError::WrongScreen(stage.step())),
        }
    }

    pub fn daily_options_mut(&mut self) -> Result<&mut DailyOptionsScreen, WizardError> {
        match &mut self.stage {
            Stage::DailyOptions { screen, .. } => Ok(screen),
            stage => Err(WizardError::WrongScreen(stage.step())),
        }
    }

    pub fn itinerary_mut(&mut self) -> Result<&mut ItineraryBuilder, WizardError> {
        match &mut self.stage {
            Stage::Itinerary { builder, .. } => Ok(builder),
            stage => Err(WizardError::WrongScreen(stage.step())),
        }
    }

    pub fn videos_mut(&mut self) -> Result<&mut ActivityVideosScreen, WizardError> {
        match &mut self.stage {
            Stage::ActivityVideos { screen, .. } => Ok(screen),
            stage => Err(WizardError::WrongScreen(stage.step())),
        }
    }
}
