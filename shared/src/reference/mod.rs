//! Static reference data bundled with the app
//!
//! Built once on first use and read-only afterwards.

mod crops;
mod regions;
mod soils;

pub use crops::*;
pub use regions::*;
pub use soils::*;
