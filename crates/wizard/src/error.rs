use thiserror::Error;
use voyage_core::{ItineraryError, SessionError, ValidationError};

use crate::step::Step;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("{event} is not accepted while on the {step} step")]
    IllegalTransition { step: Step, event: &'static str },
    #[error("the {0} step has no previous step")]
    NoBackTarget(Step),
    #[error("only a finished itinerary can be saved (current step: {0})")]
    NothingToSave(Step),
    #[error("the {0} step has no screen for this action")]
    WrongScreen(Step),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Itinerary(#[from] ItineraryError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
