pub mod launch;
pub mod link;

pub use launch::{LaunchLink, LaunchRecord, LinkKind};
pub use link::{ActionLabel, ActionLink};
