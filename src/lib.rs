//! quickrecipes - quick & easy recipes, picked at random
//!
//! The library holds the recipe catalog, the viewer state machine and the
//! terminal front end; `main.rs` wires them to the command line.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod ui;
pub mod viewer;

pub use catalog::{catalog, Recipe, CATALOG};
pub use config::ViewerConfig;
pub use error::AppError;
pub use viewer::{OverlapPolicy, RecipeViewer, Trigger, ViewPhase};
