pub mod controller;
pub mod error;
pub mod render;
pub mod status;
pub mod transport;
pub mod view;

pub use controller::{LoadOutcome, SignupController, SubmitOutcome, SubmitPhase};
pub use error::ClientError;
pub use status::{StatusBoard, STATUS_DISPLAY_WINDOW};
pub use transport::{ActivitiesApi, HttpActivitiesApi, InvalidServerUrl};
pub use view::{
    ActivityCard, CatalogView, ListContent, ParticipantEntry, SelectOption, SignupForm,
    StatusDisplay,
};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;
