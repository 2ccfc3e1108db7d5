//! Paint-event model and event sources.
//!
//! Events enter the engine through [`source::EventSource`], which yields validated
//! [`model::DayLog`] values. Acquiring the log from a chain client is an upstream concern.

/// Color parsing and palettes.
pub mod color;
/// Paint events and per-day logs.
pub mod model;
/// Event-source trait and the JSON file source.
pub mod source;
