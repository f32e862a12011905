//! Report content assembly.
//!
//! `build_report` lays down the full block sequence for one calculation:
//! title, generation date, input table, headline emissions figure, the
//! calculation method, equivalence metrics, recommendations, and a footer.
//! All numbers arrive pre-rounded in `FootprintResult`; this module only
//! formats them.

use chrono::{DateTime, Utc};

use crate::footprint::{fmt_thousands, EmissionModel, FootprintResult};
use crate::input::UsageInput;
use crate::report::{Block, ParagraphStyle, ReportDocument, TableAccent};

pub const REPORT_TITLE: &str = "Electricity Carbon Footprint Report";

pub const RECOMMENDATIONS: [&str; 7] = [
    "Switch to LED light bulbs to reduce electricity consumption",
    "Use energy-efficient appliances (5-star rated)",
    "Install solar panels if feasible",
    "Unplug devices when not in use",
    "Use natural light during daytime",
    "Set AC temperature to 24°C or higher",
    "Regular maintenance of electrical appliances",
];

/// Assembles the report document for one calculation.
///
/// The caller supplies the generation timestamp so the document body and the
/// download filename can share a single clock reading. The same inputs always
/// produce an identical document.
pub fn build_report(
    model: &EmissionModel,
    input: &UsageInput,
    result: &FootprintResult,
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    let mut blocks = Vec::with_capacity(20);

    blocks.push(Block::Title(REPORT_TITLE.to_string()));
    blocks.push(Block::Spacer { points: 20.0 });

    blocks.push(Block::Paragraph {
        text: format!("Report Generated: {}", generated_at.format("%B %d, %Y")),
        style: ParagraphStyle::Body,
    });
    blocks.push(Block::Spacer { points: 20.0 });

    blocks.push(heading("Input Details"));
    blocks.push(Block::KeyValueTable {
        header: ("Parameter".to_string(), "Value".to_string()),
        rows: vec![
            ("User Type".to_string(), input.user_type.clone()),
            (
                "Monthly Electricity Usage".to_string(),
                format!("{} kWh", input.monthly_usage_kwh),
            ),
            (
                "Annual Electricity Usage".to_string(),
                format!("{:.2} kWh", result.annual_usage_kwh),
            ),
        ],
        accent: TableAccent::Blue,
    });
    blocks.push(Block::Spacer { points: 30.0 });

    blocks.push(heading("Carbon Footprint Results"));
    blocks.push(Block::Paragraph {
        text: format!("Annual CO₂ Emissions: {:.2} kg", result.annual_emissions_kg),
        style: ParagraphStyle::Highlight,
    });
    blocks.push(Block::Spacer { points: 20.0 });

    blocks.push(heading("Calculation Method"));
    blocks.push(Block::Paragraph {
        text: format!(
            "Formula: Annual CO₂ Emission = Monthly Usage × 12 × Emission Factor\n\
             Emission Factor ({region}): {factor} kg CO₂ per kWh\n\
             Calculation: {monthly} kWh × 12 × {factor} = {emissions:.2} kg CO₂",
            region = model.grid_region,
            factor = model.emission_factor_kg_per_kwh,
            monthly = input.monthly_usage_kwh,
            emissions = result.annual_emissions_kg,
        ),
        style: ParagraphStyle::Body,
    });
    blocks.push(Block::Spacer { points: 30.0 });

    blocks.push(heading("Environmental Impact Context"));
    blocks.push(Block::KeyValueTable {
        header: ("Impact Metric".to_string(), "Equivalent".to_string()),
        rows: vec![
            (
                "Trees needed to offset emissions".to_string(),
                format!("{:.1} trees per year", result.trees_per_year),
            ),
            (
                "Equivalent car miles driven".to_string(),
                format!("{} miles", fmt_thousands(result.equivalent_car_miles)),
            ),
            (
                "Monthly average".to_string(),
                format!("{:.1} kg CO₂", model.monthly_average_kg(result.annual_emissions_kg)),
            ),
        ],
        accent: TableAccent::Green,
    });
    blocks.push(Block::Spacer { points: 30.0 });

    blocks.push(heading("Recommendations to Reduce Carbon Footprint"));
    blocks.push(Block::BulletList(
        RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
    ));
    blocks.push(Block::Spacer { points: 30.0 });

    blocks.push(Block::Paragraph {
        text: format!(
            "This report was generated by the Electricity Carbon Footprint Calculator\n\
             Data based on {}'s electricity emission factor of {} kg CO₂/kWh\n\
             For more information on reducing your carbon footprint, consult environmental agencies.",
            model.grid_region, model.emission_factor_kg_per_kwh,
        ),
        style: ParagraphStyle::Footer,
    });

    ReportDocument { blocks }
}

fn heading(text: &str) -> Block {
    Block::Paragraph {
        text: text.to_string(),
        style: ParagraphStyle::SectionHeading,
    }
}
