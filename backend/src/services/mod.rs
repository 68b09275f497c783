//! Business logic services for the AgriSynch gateway

pub mod advisory;
pub mod diagnostic;
pub mod weather;

pub use advisory::AdvisoryService;
pub use diagnostic::DiagnosticService;
pub use weather::WeatherService;
