use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One catalog entry: `1 symbol = factor base-units`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDef {
    pub symbol: String,
    pub factor: f64,
}

/// The scales understood by the temperature domain, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    pub const ALL: [TemperatureScale; 3] = [
        TemperatureScale::Celsius,
        TemperatureScale::Fahrenheit,
        TemperatureScale::Kelvin,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "C",
            TemperatureScale::Fahrenheit => "F",
            TemperatureScale::Kelvin => "K",
        }
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TemperatureScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(TemperatureScale::Celsius),
            "F" => Ok(TemperatureScale::Fahrenheit),
            "K" => Ok(TemperatureScale::Kelvin),
            other => Err(format!("Unknown temperature scale: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomainKind {
    /// Multiplicative units normalised through `base_unit`.
    Linear {
        base_unit: String,
        units: Vec<UnitDef>,
    },
    /// Affine scales converted through a Celsius pivot.
    Pivot { scales: Vec<TemperatureScale> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    pub name: String,
    pub allows_negative: bool,
    pub kind: DomainKind,
}

impl Domain {
    pub fn linear(name: &str, base_unit: &str, allows_negative: bool, units: &[(&str, f64)]) -> Self {
        Self {
            name: name.to_string(),
            allows_negative,
            kind: DomainKind::Linear {
                base_unit: base_unit.to_string(),
                units: units
                    .iter()
                    .map(|(symbol, factor)| UnitDef {
                        symbol: symbol.to_string(),
                        factor: *factor,
                    })
                    .collect(),
            },
        }
    }

    pub fn temperature(name: &str) -> Self {
        Self {
            name: name.to_string(),
            allows_negative: true,
            kind: DomainKind::Pivot {
                scales: TemperatureScale::ALL.to_vec(),
            },
        }
    }

    pub fn base_unit(&self) -> Option<&str> {
        match &self.kind {
            DomainKind::Linear { base_unit, .. } => Some(base_unit.as_str()),
            DomainKind::Pivot { .. } => None,
        }
    }

    /// Unit symbols in declaration order.
    pub fn unit_symbols(&self) -> Vec<&str> {
        match &self.kind {
            DomainKind::Linear { units, .. } => units.iter().map(|u| u.symbol.as_str()).collect(),
            DomainKind::Pivot { scales } => scales.iter().map(|s| s.symbol()).collect(),
        }
    }

    pub fn unit_count(&self) -> usize {
        match &self.kind {
            DomainKind::Linear { units, .. } => units.len(),
            DomainKind::Pivot { scales } => scales.len(),
        }
    }

    pub fn contains_unit(&self, symbol: &str) -> bool {
        self.unit_symbols().contains(&symbol)
    }

    /// Factor relative to the base unit; `None` for pivot domains or unknown symbols.
    pub fn factor(&self, symbol: &str) -> Option<f64> {
        match &self.kind {
            DomainKind::Linear { units, .. } => {
                units.iter().find(|u| u.symbol == symbol).map(|u| u.factor)
            }
            DomainKind::Pivot { .. } => None,
        }
    }

    /// First and second unit in catalog order, or the only unit twice.
    pub fn default_units(&self) -> UnitSelection {
        let symbols = self.unit_symbols();
        let source = symbols.first().copied().unwrap_or_default().to_string();
        let target = symbols.get(1).copied().map(str::to_string).unwrap_or_else(|| source.clone());
        UnitSelection { source, target }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSelection {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub domain: String,
    pub raw_input: String,
    pub source_unit: String,
    pub target_unit: String,
}

impl ConversionRequest {
    pub fn new(domain: &str, raw_input: &str, source_unit: &str, target_unit: &str) -> Self {
        Self {
            domain: domain.to_string(),
            raw_input: raw_input.to_string(),
            source_unit: source_unit.to_string(),
            target_unit: target_unit.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Unrounded converted value.
    pub value: f64,
    pub unit: String,
    /// Display form, e.g. `1.000000 km`.
    pub text: String,
    pub derivation: Vec<String>,
}

impl ConversionResult {
    pub fn numbered_steps(&self) -> Vec<String> {
        self.derivation
            .iter()
            .enumerate()
            .map(|(i, line)| format!("Step {}: {}", i + 1, line))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub domain: String,
    pub input_value: f64,
    pub source_unit: String,
    pub target_unit: String,
    pub result_text: String,
    pub converted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    Converted,
}
