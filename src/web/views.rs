//! Askama page templates.
//!
//! Figures are formatted here, once, so the templates stay free of number
//! logic and the hidden download form echoes exactly what the page shows.

use askama::Template;

use crate::footprint::{fmt_thousands, EmissionModel, FootprintResult};
use crate::input::UsageInput;
use crate::report::RECOMMENDATIONS;

/// The calculator form, optionally with an error banner.
#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub error: Option<String>,
}

/// The result page for one calculation.
#[derive(Template)]
#[template(path = "pages/result.html")]
pub struct ResultTemplate {
    pub user_type: String,
    pub monthly_usage: String,
    pub annual_usage: String,
    pub annual_emissions: String,
    pub trees_per_year: String,
    pub car_miles: String,
    pub monthly_average: String,
    pub recommendations: &'static [&'static str],
    pub factor_note: String,
}

impl ResultTemplate {
    pub fn new(model: &EmissionModel, input: &UsageInput, result: &FootprintResult) -> Self {
        Self {
            user_type: input.user_type.clone(),
            monthly_usage: input.monthly_usage_kwh.to_string(),
            annual_usage: format!("{:.2}", result.annual_usage_kwh),
            annual_emissions: format!("{:.2}", result.annual_emissions_kg),
            trees_per_year: format!("{:.1}", result.trees_per_year),
            car_miles: fmt_thousands(result.equivalent_car_miles),
            monthly_average: format!("{:.1}", model.monthly_average_kg(result.annual_emissions_kg)),
            recommendations: &RECOMMENDATIONS,
            factor_note: format!(
                "Based on {}'s electricity emission factor of {} kg CO₂/kWh.",
                model.grid_region, model.emission_factor_kg_per_kwh
            ),
        }
    }
}
