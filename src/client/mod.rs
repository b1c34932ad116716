//! Client side of the tracker: a typed API client plus the list and form
//! view models that drive it.

pub mod api;
pub mod board;
pub mod form;

pub use api::{ClientError, ProjectsClient};
pub use board::ProjectBoard;
pub use form::{FormData, FormOutcome, FormState, Notification, ProjectForm};
