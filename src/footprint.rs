//! Emission model and the footprint calculation.
//!
//! Public API (consumed by report builder and web handlers):
//! - `EmissionModel::footprint()` - annual figures from a monthly kWh value
//! - `EmissionModel::monthly_average_kg()` - per-month share of annual emissions
//! - `FootprintResult` - the derived figures, pre-rounded for presentation

/// Billing months per year.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Calculation constants. Every constant lives here so the page, the report
/// document, and the tests all read the same values.
#[derive(Debug, Clone)]
pub struct EmissionModel {
    /// Grid emission intensity in kg CO2 per kWh.
    pub emission_factor_kg_per_kwh: f64,
    /// Label for the grid the factor describes.
    pub grid_region: &'static str,
    /// Annual CO2 absorption of one mature tree, in kg.
    pub tree_absorption_kg_per_year: f64,
    /// Car miles that emit one kg of CO2.
    pub car_miles_per_kg: f64,
}

impl Default for EmissionModel {
    fn default() -> Self {
        Self {
            emission_factor_kg_per_kwh: 0.82,
            grid_region: "India",
            tree_absorption_kg_per_year: 22.0,
            car_miles_per_kg: 2.3,
        }
    }
}

impl EmissionModel {
    /// Derives the annual footprint from a monthly usage figure.
    ///
    /// Annual usage is rounded to two decimals before the emission factor is
    /// applied, so the emissions figure is always reproducible from the usage
    /// figure a report displays. Equivalence metrics are likewise derived
    /// from the rounded emissions value.
    pub fn footprint(&self, monthly_usage_kwh: f64) -> FootprintResult {
        debug_assert!(monthly_usage_kwh >= 0.0, "usage must be validated before calculation");

        let annual_usage_kwh = round_to(monthly_usage_kwh * MONTHS_PER_YEAR, 2);
        let annual_emissions_kg = round_to(annual_usage_kwh * self.emission_factor_kg_per_kwh, 2);
        let trees_per_year = round_to(annual_emissions_kg / self.tree_absorption_kg_per_year, 1);
        let equivalent_car_miles = (annual_emissions_kg * self.car_miles_per_kg).round() as i64;

        FootprintResult {
            annual_usage_kwh,
            annual_emissions_kg,
            trees_per_year,
            equivalent_car_miles,
        }
    }

    /// Average monthly emissions for a given annual total, one decimal.
    pub fn monthly_average_kg(&self, annual_emissions_kg: f64) -> f64 {
        round_to(annual_emissions_kg / MONTHS_PER_YEAR, 1)
    }
}

/// Annual footprint figures, already rounded for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintResult {
    /// Annual electricity usage in kWh, two decimals.
    pub annual_usage_kwh: f64,
    /// Annual CO2 emissions in kg, two decimals.
    pub annual_emissions_kg: f64,
    /// Trees needed to absorb the annual emissions, one decimal.
    pub trees_per_year: f64,
    /// Car miles with the same emissions, whole miles.
    pub equivalent_car_miles: i64,
}

/// Rounds half away from zero at the given number of decimals.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Formats an integer with comma thousands separators, e.g. 6790 -> "6,790".
pub fn fmt_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_household_usage() {
        let model = EmissionModel::default();
        let result = model.footprint(300.0);

        assert_relative_eq!(result.annual_usage_kwh, 3600.0, epsilon = 1e-9);
        assert_relative_eq!(result.annual_emissions_kg, 2952.0, epsilon = 1e-9);
        assert_relative_eq!(result.trees_per_year, 134.2, epsilon = 1e-9);
        assert_eq!(result.equivalent_car_miles, 6790);
        assert_relative_eq!(model.monthly_average_kg(result.annual_emissions_kg), 246.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fractional_usage() {
        let model = EmissionModel::default();
        let result = model.footprint(150.5);

        assert_relative_eq!(result.annual_usage_kwh, 1806.0, epsilon = 1e-9);
        assert_relative_eq!(result.annual_emissions_kg, 1480.92, epsilon = 1e-9);
        assert_relative_eq!(result.trees_per_year, 67.3, epsilon = 1e-9);
        assert_eq!(result.equivalent_car_miles, 3406);
    }

    #[test]
    fn test_zero_usage() {
        let model = EmissionModel::default();
        let result = model.footprint(0.0);

        assert_relative_eq!(result.annual_usage_kwh, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.annual_emissions_kg, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.trees_per_year, 0.0, epsilon = 1e-9);
        assert_eq!(result.equivalent_car_miles, 0);
        assert_relative_eq!(model.monthly_average_kg(0.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_emissions_derive_from_rounded_usage() {
        // The factor multiplies the rounded annual usage, not the raw product,
        // so displayed usage and emissions always agree.
        let model = EmissionModel::default();
        for monthly in [0.0, 1.0, 2.7, 33.33, 150.5, 300.0, 1234.56] {
            let result = model.footprint(monthly);
            let expected = round_to(result.annual_usage_kwh * model.emission_factor_kg_per_kwh, 2);
            assert_relative_eq!(result.annual_emissions_kg, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_equivalents_derive_from_rounded_emissions() {
        let model = EmissionModel::default();
        for monthly in [1.0, 42.0, 150.5, 999.99] {
            let result = model.footprint(monthly);
            let trees = round_to(result.annual_emissions_kg / model.tree_absorption_kg_per_year, 1);
            let miles = (result.annual_emissions_kg * model.car_miles_per_kg).round() as i64;
            assert_relative_eq!(result.trees_per_year, trees, epsilon = 1e-9);
            assert_eq!(result.equivalent_car_miles, miles);
        }
    }

    #[test]
    fn test_round_to_half_away_from_zero() {
        // Ties on exactly representable values round away from zero.
        assert_relative_eq!(round_to(0.125, 2), 0.13, epsilon = 1e-9);
        assert_relative_eq!(round_to(-0.125, 2), -0.13, epsilon = 1e-9);
        assert_relative_eq!(round_to(134.25, 1), 134.3, epsilon = 1e-9);
        assert_relative_eq!(round_to(3.0, 2), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fmt_thousands() {
        assert_eq!(fmt_thousands(0), "0");
        assert_eq!(fmt_thousands(999), "999");
        assert_eq!(fmt_thousands(6790), "6,790");
        assert_eq!(fmt_thousands(1234567), "1,234,567");
    }
}
