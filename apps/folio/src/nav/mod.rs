// Header navigation core: scroll-spy tracking, offset-aware smooth scrolling,
// mobile menu state and the other page-level interactions.
// Single-threaded by construction (Rc/RefCell); one controller per mounted view.

pub mod actions;
pub mod controller;
pub mod dispatcher;
pub mod events;
pub mod geometry;
pub mod links;
pub mod simulate;
pub mod tracker;
pub mod window;

pub use controller::{NavConfig, MOBILE_MENU_ID};
pub use links::{load_links, NavLink};
pub use simulate::{run_simulation, SimulationError, SimulationReport, SimulationRequest};
