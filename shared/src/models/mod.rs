//! Domain models for the AgriSynch farm assistant

mod advisory;
mod crop;
mod diagnostic;
mod insight;
mod region;
mod soil;
mod state;
mod weather;

pub use advisory::*;
pub use crop::*;
pub use diagnostic::*;
pub use insight::*;
pub use region::*;
pub use soil::*;
pub use state::*;
pub use weather::*;
