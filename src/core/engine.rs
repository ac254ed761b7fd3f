use crate::core::convert::{convert_value, DisplayPrecision};
use crate::core::registry::UnitRegistry;
use crate::domain::model::{ConversionRequest, ConversionResult};
use crate::domain::ports::{ConfigProvider, SameUnitPolicy};
use crate::utils::error::ConvertError;
use crate::utils::validation::{
    validate_number, validate_sign, validate_unit_membership, validate_units_distinct,
};

/// A successful run: the parsed input alongside the rendered result.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    pub input_value: f64,
    pub result: ConversionResult,
}

/// Stateless validator + algorithm runner. Sessions own one; so can callers that
/// just need a single conversion without history.
#[derive(Debug, Clone, Copy)]
pub struct ConversionEngine<'r> {
    registry: &'r UnitRegistry,
    precision: DisplayPrecision,
    same_unit_policy: SameUnitPolicy,
}

impl<'r> ConversionEngine<'r> {
    pub fn new(registry: &'r UnitRegistry) -> Self {
        Self {
            registry,
            precision: DisplayPrecision::default(),
            same_unit_policy: SameUnitPolicy::default(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(registry: &'r UnitRegistry, config: &C) -> Self {
        Self::new(registry)
            .with_precision(DisplayPrecision {
                linear: config.linear_decimals(),
                temperature: config.temperature_decimals(),
            })
            .with_same_unit_policy(config.same_unit_policy())
    }

    pub fn with_precision(mut self, precision: DisplayPrecision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_same_unit_policy(mut self, policy: SameUnitPolicy) -> Self {
        self.same_unit_policy = policy;
        self
    }

    pub fn registry(&self) -> &'r UnitRegistry {
        self.registry
    }

    /// Runs every check, then the conversion. The first failing check wins:
    /// domain, unit membership, distinct units, number, sign.
    pub fn run(&self, request: &ConversionRequest) -> Result<ConversionOutcome, ConvertError> {
        let domain = self.registry.get_domain(&request.domain)?;

        validate_unit_membership(domain, &request.source_unit)?;
        validate_unit_membership(domain, &request.target_unit)?;

        if self.same_unit_policy == SameUnitPolicy::Reject {
            validate_units_distinct(&request.source_unit, &request.target_unit)?;
        }

        let input_value = validate_number(&request.raw_input)?;
        validate_sign(input_value, domain)?;

        tracing::debug!(
            "Converting {} {} -> {} in {}",
            input_value,
            request.source_unit,
            request.target_unit,
            domain.name
        );

        let result = convert_value(
            domain,
            input_value,
            &request.source_unit,
            &request.target_unit,
            self.precision,
        )?;

        Ok(ConversionOutcome {
            input_value,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ConversionEngine<'static> {
        ConversionEngine::new(UnitRegistry::standard())
    }

    #[test]
    fn test_run_success() {
        let outcome = engine()
            .run(&ConversionRequest::new("Length", "1000", "m", "km"))
            .unwrap();
        assert_eq!(outcome.input_value, 1000.0);
        assert_eq!(outcome.result.text, "1.000000 km");
    }

    #[test]
    fn test_same_unit_wins_over_bad_number() {
        let err = engine()
            .run(&ConversionRequest::new("Length", "abc", "m", "m"))
            .unwrap_err();
        assert_eq!(err, ConvertError::SameUnit { unit: "m".to_string() });

        let err = engine()
            .run(&ConversionRequest::new("Length", "-5", "m", "m"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::SameUnit { .. }));
    }

    #[test]
    fn test_number_checked_before_sign() {
        let err = engine()
            .run(&ConversionRequest::new("Length", "-x", "m", "km"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotANumber { .. }));

        let err = engine()
            .run(&ConversionRequest::new("Length", "-5", "m", "km"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::NegativeNotAllowed { .. }));
    }

    #[test]
    fn test_unknown_domain_and_unit() {
        let err = engine()
            .run(&ConversionRequest::new("Happiness", "1", "a", "b"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnknownDomain { .. }));

        let err = engine()
            .run(&ConversionRequest::new("Mass", "1", "m", "kg"))
            .unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnknownUnit {
                domain: "Mass".to_string(),
                unit: "m".to_string()
            }
        );
    }

    #[test]
    fn test_identity_policy_allows_same_unit() {
        let outcome = engine()
            .with_same_unit_policy(SameUnitPolicy::Identity)
            .run(&ConversionRequest::new("Mass", "2.5", "kg", "kg"))
            .unwrap();
        assert_eq!(outcome.result.value, 2.5);
        assert_eq!(outcome.result.text, "2.500000 kg");
    }
}
