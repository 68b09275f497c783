//! Shared types and advisory logic for the AgriSynch farm assistant
//!
//! This crate contains the domain models, the static crop/soil/region
//! reference data, and the pure advisory core (growth stage resolution and
//! insight generation) shared between the backend and the browser (via WASM).

pub mod error;
pub mod growth;
pub mod insights;
pub mod models;
pub mod reference;
pub mod types;
pub mod validation;

pub use error::*;
pub use growth::*;
pub use insights::*;
pub use models::*;
pub use reference::*;
pub use types::*;
pub use validation::*;
