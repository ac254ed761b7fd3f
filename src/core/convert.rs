use crate::core::temperature::convert_temperature;
use crate::domain::model::{ConversionResult, Domain, DomainKind, TemperatureScale, UnitDef};
use crate::utils::error::ConvertError;
use crate::utils::format::{format_factor, format_fixed, format_trimmed};
use serde::{Deserialize, Serialize};

/// Decimal places used when rendering results; arithmetic is never rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPrecision {
    pub linear: usize,
    pub temperature: usize,
}

impl Default for DisplayPrecision {
    fn default() -> Self {
        Self {
            linear: 6,
            temperature: 4,
        }
    }
}

/// Converts an already validated value between two units of `domain`.
///
/// A finite input can still overflow (`1e308 km` in `m`); the result is then
/// `inf` and is returned as a normal conversion.
pub fn convert_value(
    domain: &Domain,
    value: f64,
    source_unit: &str,
    target_unit: &str,
    precision: DisplayPrecision,
) -> Result<ConversionResult, ConvertError> {
    let result = match &domain.kind {
        DomainKind::Linear { base_unit, units } => convert_linear(
            domain,
            base_unit,
            units,
            value,
            source_unit,
            target_unit,
            precision.linear,
        ),
        DomainKind::Pivot { scales } => {
            let from = pivot_scale(domain, scales, source_unit)?;
            let to = pivot_scale(domain, scales, target_unit)?;
            let conversion = convert_temperature(value, from, to, precision.temperature);

            Ok(ConversionResult {
                value: conversion.value,
                unit: target_unit.to_string(),
                text: format!(
                    "{} {}",
                    format_fixed(conversion.value, precision.temperature),
                    target_unit
                ),
                derivation: conversion.steps.to_vec(),
            })
        }
    }?;

    if !result.value.is_finite() {
        tracing::warn!(
            "{}: {} {} -> {} overflowed to {}",
            domain.name,
            value,
            source_unit,
            target_unit,
            result.value
        );
    }
    Ok(result)
}

fn convert_linear(
    domain: &Domain,
    base_unit: &str,
    units: &[UnitDef],
    value: f64,
    source_unit: &str,
    target_unit: &str,
    decimals: usize,
) -> Result<ConversionResult, ConvertError> {
    let source_factor = linear_factor(domain, units, source_unit)?;
    let target_factor = linear_factor(domain, units, target_unit)?;

    // Step 4 divides the unrounded base value
    let base_value = value * source_factor;
    let result = base_value / target_factor;

    tracing::debug!(
        "{}: {} {} -> {} {} -> {} {}",
        domain.name,
        value,
        source_unit,
        base_value,
        base_unit,
        result,
        target_unit
    );

    let value_txt = format_trimmed(value, decimals);
    let base_txt = format_trimmed(base_value, decimals);
    let source_factor_txt = format_factor(source_factor);
    let target_factor_txt = format_factor(target_factor);

    let derivation = vec![
        format!("1 {} = {} {}", source_unit, source_factor_txt, base_unit),
        format!(
            "{} {} = {} × {} = {} {}",
            value_txt, source_unit, value_txt, source_factor_txt, base_txt, base_unit
        ),
        format!("1 {} = {} {}", target_unit, target_factor_txt, base_unit),
        format!(
            "{} ÷ {} = {} {}",
            base_txt,
            target_factor_txt,
            format_trimmed(result, decimals),
            target_unit
        ),
    ];

    Ok(ConversionResult {
        value: result,
        unit: target_unit.to_string(),
        text: format!("{} {}", format_fixed(result, decimals), target_unit),
        derivation,
    })
}

fn linear_factor(domain: &Domain, units: &[UnitDef], symbol: &str) -> Result<f64, ConvertError> {
    units
        .iter()
        .find(|u| u.symbol == symbol)
        .map(|u| u.factor)
        .ok_or_else(|| unknown_unit(domain, symbol))
}

fn pivot_scale(
    domain: &Domain,
    scales: &[TemperatureScale],
    symbol: &str,
) -> Result<TemperatureScale, ConvertError> {
    symbol
        .parse::<TemperatureScale>()
        .ok()
        .filter(|scale| scales.contains(scale))
        .ok_or_else(|| unknown_unit(domain, symbol))
}

fn unknown_unit(domain: &Domain, symbol: &str) -> ConvertError {
    ConvertError::UnknownUnit {
        domain: domain.name.clone(),
        unit: symbol.to_string(),
    }
}
