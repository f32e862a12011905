//! Electricity carbon footprint calculator.
//!
//! Turns a monthly electricity usage figure into annual usage and CO₂
//! emissions with relatable equivalence metrics, served as a small web
//! application with a downloadable PDF report.
//!
//! Module map:
//! - `footprint`: emission model and the calculation itself
//! - `input`: form field parsing and validation
//! - `report`: typed report document, its builder, and rendering backends
//! - `web`: Axum state, router, handlers, and page templates

pub mod footprint;
pub mod input;
pub mod report;
pub mod web;

// Re-export commonly used types
pub use footprint::{EmissionModel, FootprintResult};
pub use input::{UsageInput, ValidationError};
pub use report::{build_report, ReportDocument};
pub use web::{create_router, AppState};
