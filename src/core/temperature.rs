//! Temperature scales are affine, so they cannot share a single factor table.
//! Every conversion goes source -> Celsius -> target.

use crate::domain::model::TemperatureScale;
use crate::utils::format::format_trimmed;

const KELVIN_OFFSET: f64 = 273.15;
const FAHRENHEIT_OFFSET: f64 = 32.0;

impl TemperatureScale {
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - FAHRENHEIT_OFFSET) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - KELVIN_OFFSET,
        }
    }

    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            // (c * 9/5) + 32, parenthesised explicitly
            TemperatureScale::Fahrenheit => (celsius * 9.0 / 5.0) + FAHRENHEIT_OFFSET,
            TemperatureScale::Kelvin => celsius + KELVIN_OFFSET,
        }
    }

    fn to_celsius_expr(self, value: &str) -> String {
        match self {
            TemperatureScale::Celsius => value.to_string(),
            TemperatureScale::Fahrenheit => format!("({} - 32) × 5/9", value),
            TemperatureScale::Kelvin => format!("{} - 273.15", value),
        }
    }

    fn from_celsius_expr(self, celsius: &str) -> String {
        match self {
            TemperatureScale::Celsius => celsius.to_string(),
            TemperatureScale::Fahrenheit => format!("{} × 9/5 + 32", celsius),
            TemperatureScale::Kelvin => format!("{} + 273.15", celsius),
        }
    }
}

/// Outcome of a pivot conversion: the unrounded result and both derivation lines.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotConversion {
    pub value: f64,
    pub steps: [String; 2],
}

pub fn convert_temperature(
    value: f64,
    from: TemperatureScale,
    to: TemperatureScale,
    decimals: usize,
) -> PivotConversion {
    let celsius = from.to_celsius(value);
    let result = to.from_celsius(celsius);

    let value_txt = format_trimmed(value, decimals);
    let celsius_txt = format_trimmed(celsius, decimals);
    let result_txt = format_trimmed(result, decimals);

    // Both lines are always reported, even when C is one of the ends.
    let into_pivot = format!(
        "Convert {} {} to Celsius: {} = {} C",
        value_txt,
        from,
        from.to_celsius_expr(&value_txt),
        celsius_txt
    );
    let out_of_pivot = format!(
        "Convert Celsius to {}: {} = {} {}",
        to,
        to.from_celsius_expr(&celsius_txt),
        result_txt,
        to
    );

    tracing::debug!(
        "Temperature pivot: {} {} -> {} C -> {} {}",
        value,
        from,
        celsius,
        result,
        to
    );

    PivotConversion {
        value: result,
        steps: [into_pivot, out_of_pivot],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TemperatureScale::*;

    #[test]
    fn test_known_fixed_points() {
        assert_eq!(convert_temperature(100.0, Celsius, Fahrenheit, 4).value, 212.0);
        assert_eq!(convert_temperature(32.0, Fahrenheit, Celsius, 4).value, 0.0);
        assert_eq!(convert_temperature(0.0, Celsius, Kelvin, 4).value, 273.15);
        assert!((convert_temperature(-40.0, Fahrenheit, Celsius, 4).value + 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_steps_name_the_pivot() {
        let conversion = convert_temperature(100.0, Celsius, Fahrenheit, 4);
        assert_eq!(conversion.steps[0], "Convert 100 C to Celsius: 100 = 100 C");
        assert_eq!(conversion.steps[1], "Convert Celsius to F: 100 × 9/5 + 32 = 212 F");
    }

    #[test]
    fn test_steps_for_fahrenheit_to_kelvin() {
        let conversion = convert_temperature(212.0, Fahrenheit, Kelvin, 4);
        assert_eq!(conversion.steps[0], "Convert 212 F to Celsius: (212 - 32) × 5/9 = 100 C");
        assert_eq!(conversion.steps[1], "Convert Celsius to K: 100 + 273.15 = 373.15 K");
        assert!((conversion.value - 373.15).abs() < 1e-9);
    }

    #[test]
    fn test_scale_conversions_by_value() {
        let scale = Fahrenheit;
        assert_eq!(scale.to_celsius(212.0), 100.0);
        assert_eq!(scale.from_celsius(100.0), 212.0);
        assert_eq!(Kelvin.from_celsius(Kelvin.to_celsius(5.0)), 5.0);
    }

    #[test]
    fn test_round_trips_stay_within_tolerance() {
        for &v in &[-273.15, -40.0, 0.0, 36.6, 100.0, 1234.5678] {
            for (a, b) in [(Celsius, Fahrenheit), (Celsius, Kelvin), (Fahrenheit, Kelvin)] {
                let there = convert_temperature(v, a, b, 4).value;
                let back = convert_temperature(there, b, a, 4).value;
                assert!((back - v).abs() < 1e-9, "{} {} -> {} -> {}", v, a, b, back);
            }
        }
    }
}
