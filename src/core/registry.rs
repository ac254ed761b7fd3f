use crate::core::catalog::standard_domains;
use crate::domain::model::{Domain, DomainKind, UnitSelection};
use crate::utils::error::{ConvertError, RegistryError};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Built once on first use and shared read-only by every session.
static STANDARD_REGISTRY: Lazy<UnitRegistry> = Lazy::new(|| match UnitRegistry::new(standard_domains()) {
    Ok(registry) => registry,
    Err(e) => panic!("standard unit catalog is inconsistent: {}", e),
});

/// Read-only catalog of measurement domains, kept in declaration order.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    domains: Vec<Domain>,
}

impl UnitRegistry {
    /// Builds a registry, rejecting any catalog that breaks the domain invariants.
    pub fn new(domains: Vec<Domain>) -> Result<Self, RegistryError> {
        {
            let mut seen = HashSet::new();
            for domain in &domains {
                if !seen.insert(domain.name.as_str()) {
                    return Err(RegistryError::DuplicateDomain {
                        domain: domain.name.clone(),
                    });
                }
                check_domain(domain)?;
            }
        }

        tracing::debug!("Unit registry built with {} domains", domains.len());
        Ok(Self { domains })
    }

    pub fn standard() -> &'static UnitRegistry {
        &STANDARD_REGISTRY
    }

    pub fn list_domains(&self) -> Vec<&str> {
        self.domains.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn get_domain(&self, id: &str) -> Result<&Domain, ConvertError> {
        self.domains
            .iter()
            .find(|d| d.name == id)
            .ok_or_else(|| ConvertError::UnknownDomain {
                domain: id.to_string(),
            })
    }

    pub fn list_units(&self, id: &str) -> Result<Vec<&str>, ConvertError> {
        Ok(self.get_domain(id)?.unit_symbols())
    }

    pub fn default_units(&self, id: &str) -> Result<UnitSelection, ConvertError> {
        Ok(self.get_domain(id)?.default_units())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

fn check_domain(domain: &Domain) -> Result<(), RegistryError> {
    if domain.unit_count() == 0 {
        return Err(RegistryError::EmptyDomain {
            domain: domain.name.clone(),
        });
    }

    let mut symbols = HashSet::new();
    for symbol in domain.unit_symbols() {
        if !symbols.insert(symbol) {
            return Err(RegistryError::DuplicateUnit {
                domain: domain.name.clone(),
                unit: symbol.to_string(),
            });
        }
    }

    if let DomainKind::Linear { base_unit, units } = &domain.kind {
        for unit in units {
            if !unit.factor.is_finite() || unit.factor <= 0.0 {
                return Err(RegistryError::NonPositiveFactor {
                    domain: domain.name.clone(),
                    unit: unit.symbol.clone(),
                    factor: unit.factor,
                });
            }
        }

        let base_ok = units
            .iter()
            .any(|u| &u.symbol == base_unit && u.factor == 1.0);
        if !base_ok {
            return Err(RegistryError::MissingBaseUnit {
                domain: domain.name.clone(),
                base: base_unit.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_lists_domains_in_catalog_order() {
        let registry = UnitRegistry::standard();
        let domains = registry.list_domains();

        assert_eq!(domains.len(), 17);
        assert_eq!(domains[0], "Length");
        assert_eq!(domains[3], "Temperature");
        assert_eq!(domains[16], "Density");
    }

    #[test]
    fn test_list_units_in_declaration_order() {
        let registry = UnitRegistry::standard();
        assert_eq!(
            registry.list_units("Length").unwrap(),
            vec!["km", "m", "cm", "mm", "mi", "yd", "ft", "in"]
        );
        assert_eq!(registry.list_units("Temperature").unwrap(), vec!["C", "F", "K"]);
    }

    #[test]
    fn test_unknown_domain() {
        let registry = UnitRegistry::standard();
        assert_eq!(
            registry.get_domain("Luminosity").unwrap_err(),
            ConvertError::UnknownDomain {
                domain: "Luminosity".to_string()
            }
        );
        assert!(registry.list_units("").is_err());
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        let bad = Domain::linear("Length", "m", false, &[("m", 1.0), ("broken", 0.0)]);
        let err = UnitRegistry::new(vec![bad]).unwrap_err();
        assert!(matches!(err, RegistryError::NonPositiveFactor { .. }));

        let negative = Domain::linear("Length", "m", false, &[("m", 1.0), ("neg", -2.0)]);
        assert!(UnitRegistry::new(vec![negative]).is_err());
    }

    #[test]
    fn test_rejects_missing_base_unit() {
        let bad = Domain::linear("Length", "m", false, &[("km", 1000.0)]);
        assert!(matches!(
            UnitRegistry::new(vec![bad]).unwrap_err(),
            RegistryError::MissingBaseUnit { .. }
        ));

        // base present but not at factor 1
        let scaled = Domain::linear("Length", "m", false, &[("m", 2.0)]);
        assert!(UnitRegistry::new(vec![scaled]).is_err());
    }

    #[test]
    fn test_rejects_empty_and_duplicate_definitions() {
        let empty = Domain::linear("Empty", "x", false, &[]);
        assert!(matches!(
            UnitRegistry::new(vec![empty]).unwrap_err(),
            RegistryError::EmptyDomain { .. }
        ));

        let dup_unit = Domain::linear("Length", "m", false, &[("m", 1.0), ("m", 1.0)]);
        assert!(matches!(
            UnitRegistry::new(vec![dup_unit]).unwrap_err(),
            RegistryError::DuplicateUnit { .. }
        ));

        let a = Domain::linear("Length", "m", false, &[("m", 1.0)]);
        let b = a.clone();
        assert!(matches!(
            UnitRegistry::new(vec![a, b]).unwrap_err(),
            RegistryError::DuplicateDomain { .. }
        ));
    }
}
