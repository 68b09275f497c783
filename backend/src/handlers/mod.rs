//! HTTP handlers for the AgriSynch gateway

pub mod advisory;
pub mod diagnostic;
pub mod health;
pub mod reference;
pub mod weather;

pub use advisory::*;
pub use diagnostic::*;
pub use health::*;
pub use reference::*;
pub use weather::*;
