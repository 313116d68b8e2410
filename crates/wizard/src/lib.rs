//! Trip-planning wizard: the step state machine, per-step screens and the
//! controller that loads screen data and saves finished itineraries.

mod controller;
pub mod error;
pub mod screens;
pub mod source;
pub mod step;

pub use controller::{
    SaveReceipt, WizardController, CREATOR_COMMISSION_PERCENT, PLATFORM_COMMISSION_PERCENT,
};
pub use error::WizardError;
pub use screens::LoadState;
pub use source::{ActivitySource, CatalogSource};
pub use step::{Retained, Stage, Step, Wizard, WizardEvent};
