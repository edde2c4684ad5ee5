//! Display helpers for the project cards rendered alongside the header.
//!
//! Project data comes from the exported site; this module only normalizes
//! what the cards show: the status badge and the "Jan 2023 - Mar 2024"
//! date line.

pub mod cards;
pub mod dates;
pub mod status;

pub use cards::{project_card, ProjectCardView, ProjectSummary};
