pub mod project;

pub use project::{AirdropStatus, NewProject, Project, ProjectPatch};
