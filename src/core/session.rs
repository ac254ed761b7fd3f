//! Per-user conversion session.
//!
//! ```text
//!  Idle ──convert ok──▶ Converted
//!   ▲                      │
//!   └── select_domain / reset / convert error
//! ```
//!
//! Each session owns its state; only the registry is shared.

use crate::core::engine::ConversionEngine;
use crate::core::registry::UnitRegistry;
use crate::domain::model::{
    ConversionRequest, ConversionResult, HistoryEntry, SessionState, UnitSelection,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::ConvertError;
use chrono::Utc;

#[derive(Debug, Clone)]
pub struct Session<'r> {
    engine: ConversionEngine<'r>,
    default_domain: String,
    domain: String,
    units: UnitSelection,
    input: String,
    result: Option<ConversionResult>,
    error: Option<ConvertError>,
    history: Vec<HistoryEntry>,
}

impl<'r> Session<'r> {
    /// Session over `registry` whose default domain is the first one in the catalog.
    pub fn new(registry: &'r UnitRegistry) -> Result<Self, ConvertError> {
        let first = registry
            .list_domains()
            .first()
            .map(|d| d.to_string())
            .unwrap_or_default();
        Self::with_engine(ConversionEngine::new(registry), &first)
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(
        registry: &'r UnitRegistry,
        config: &C,
    ) -> Result<Self, ConvertError> {
        let engine = ConversionEngine::from_config(registry, config);
        Self::with_engine(engine, config.default_domain())
    }

    pub fn with_engine(engine: ConversionEngine<'r>, default_domain: &str) -> Result<Self, ConvertError> {
        let units = engine.registry().default_units(default_domain)?;
        Ok(Self {
            engine,
            default_domain: default_domain.to_string(),
            domain: default_domain.to_string(),
            units,
            input: String::new(),
            result: None,
            error: None,
            history: Vec::new(),
        })
    }

    pub fn list_domains(&self) -> Vec<&'r str> {
        self.engine.registry().list_domains()
    }

    pub fn list_units(&self, domain_id: &str) -> Result<Vec<&'r str>, ConvertError> {
        self.engine.registry().list_units(domain_id)
    }

    /// Switches domain and resets units to the catalog defaults.
    /// An unknown id leaves the session untouched.
    pub fn select_domain(&mut self, domain_id: &str) -> Result<UnitSelection, ConvertError> {
        let units = self.engine.registry().default_units(domain_id)?;

        tracing::info!(
            "Domain selected: {} (defaults {} -> {})",
            domain_id,
            units.source,
            units.target
        );

        self.domain = domain_id.to_string();
        self.units = units.clone();
        self.clear_outputs();
        Ok(units)
    }

    /// Converts within `domain_id`, switching to it first when it is not the current domain.
    pub fn convert(
        &mut self,
        domain_id: &str,
        raw_input: &str,
        source_unit: &str,
        target_unit: &str,
    ) -> Result<ConversionResult, ConvertError> {
        if domain_id != self.domain {
            if let Err(e) = self.select_domain(domain_id) {
                return Err(self.fail(e));
            }
        }
        self.convert_current(raw_input, source_unit, target_unit)
    }

    /// Converts within the currently selected domain.
    pub fn convert_current(
        &mut self,
        raw_input: &str,
        source_unit: &str,
        target_unit: &str,
    ) -> Result<ConversionResult, ConvertError> {
        self.input = raw_input.to_string();
        self.remember_units(source_unit, target_unit);

        let request = ConversionRequest::new(&self.domain, raw_input, source_unit, target_unit);
        match self.engine.run(&request) {
            Ok(outcome) => {
                self.history.push(HistoryEntry {
                    domain: self.domain.clone(),
                    input_value: outcome.input_value,
                    source_unit: source_unit.to_string(),
                    target_unit: target_unit.to_string(),
                    result_text: outcome.result.text.clone(),
                    converted_at: Utc::now(),
                });
                self.error = None;
                self.result = Some(outcome.result.clone());
                Ok(outcome.result)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Converts `raw_input` with the currently selected source and target units.
    pub fn convert_input(&mut self, raw_input: &str) -> Result<ConversionResult, ConvertError> {
        let UnitSelection { source, target } = self.units.clone();
        self.convert_current(raw_input, &source, &target)
    }

    pub fn set_source_unit(&mut self, unit: &str) -> Result<(), ConvertError> {
        self.check_member(unit)?;
        self.units.source = unit.to_string();
        Ok(())
    }

    pub fn set_target_unit(&mut self, unit: &str) -> Result<(), ConvertError> {
        self.check_member(unit)?;
        self.units.target = unit.to_string();
        Ok(())
    }

    /// Clears outputs and history and returns to the default domain.
    pub fn reset(&mut self) {
        tracing::info!(
            "Session reset ({} history entries dropped)",
            self.history.len()
        );

        self.history.clear();
        self.domain = self.default_domain.clone();
        // default_domain was checked in with_engine
        if let Ok(units) = self.engine.registry().default_units(&self.default_domain) {
            self.units = units;
        }
        self.clear_outputs();
    }

    pub fn state(&self) -> SessionState {
        if self.result.is_some() {
            SessionState::Converted
        } else {
            SessionState::Idle
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn units(&self) -> &UnitSelection {
        &self.units
    }

    pub fn source_unit(&self) -> &str {
        &self.units.source
    }

    pub fn target_unit(&self) -> &str {
        &self.units.target
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&ConvertError> {
        self.error.as_ref()
    }

    /// Successful conversions, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    fn check_member(&self, unit: &str) -> Result<(), ConvertError> {
        let domain = self.engine.registry().get_domain(&self.domain)?;
        if domain.contains_unit(unit) {
            Ok(())
        } else {
            Err(ConvertError::UnknownUnit {
                domain: self.domain.clone(),
                unit: unit.to_string(),
            })
        }
    }

    // Only catalog members are kept as the selection.
    fn remember_units(&mut self, source_unit: &str, target_unit: &str) {
        if self.check_member(source_unit).is_ok() {
            self.units.source = source_unit.to_string();
        }
        if self.check_member(target_unit).is_ok() {
            self.units.target = target_unit.to_string();
        }
    }

    fn fail(&mut self, error: ConvertError) -> ConvertError {
        tracing::debug!("Conversion rejected: {}", error);
        self.result = None;
        self.error = Some(error.clone());
        error
    }

    fn clear_outputs(&mut self) {
        self.input.clear();
        self.result = None;
        self.error = None;
    }
}
