// ============================================================================
// Standard catalog: 17 domains, factors relative to SI-consistent base units
// ============================================================================

use crate::domain::model::Domain;

pub const DOMAIN_COUNT: usize = 17;

pub fn standard_domains() -> Vec<Domain> {
    vec![
        Domain::linear(
            "Length",
            "m",
            false,
            &[
                ("km", 1000.0),
                ("m", 1.0),
                ("cm", 0.01),
                ("mm", 0.001),
                ("mi", 1609.34),
                ("yd", 0.9144),
                ("ft", 0.3048),
                ("in", 0.0254),
            ],
        ),
        Domain::linear(
            "Mass",
            "kg",
            false,
            &[
                ("t", 1000.0),
                ("kg", 1.0),
                ("g", 0.001),
                ("mg", 1e-6),
                ("lb", 0.453592),
                ("oz", 0.0283495),
            ],
        ),
        Domain::linear(
            "Time",
            "s",
            false,
            &[
                ("yr", 31_536_000.0),
                ("wk", 604_800.0),
                ("day", 86_400.0),
                ("hr", 3600.0),
                ("min", 60.0),
                ("s", 1.0),
            ],
        ),
        Domain::temperature("Temperature"),
        Domain::linear(
            "ElectricCurrent",
            "A",
            true,
            &[("kA", 1e3), ("A", 1.0), ("mA", 1e-3), ("μA", 1e-6)],
        ),
        Domain::linear("AmountOfSubstance", "mol", false, &[("mol", 1.0), ("mmol", 1e-3)]),
        Domain::linear("LuminousIntensity", "cd", false, &[("cd", 1.0)]),
        Domain::linear(
            "Area",
            "m²",
            false,
            &[
                ("km²", 1e6),
                ("m²", 1.0),
                ("cm²", 1e-4),
                ("mm²", 1e-6),
                ("acre", 4046.86),
                ("ft²", 0.092903),
            ],
        ),
        Domain::linear(
            "Volume",
            "m³",
            false,
            &[
                ("m³", 1.0),
                ("L", 1e-3),
                ("mL", 1e-6),
                ("ft³", 0.0283168),
                ("in³", 1.63871e-5),
            ],
        ),
        Domain::linear(
            "Pressure",
            "Pa",
            false,
            &[
                ("Pa", 1.0),
                ("kPa", 1e3),
                ("bar", 1e5),
                ("atm", 101_325.0),
                ("psi", 6894.76),
            ],
        ),
        Domain::linear(
            "Speed",
            "m/s",
            false,
            &[
                ("m/s", 1.0),
                ("kmh", 0.277778),
                ("mph", 0.44704),
                ("knot", 0.514444),
                ("ft/s", 0.3048),
            ],
        ),
        Domain::linear(
            "Acceleration",
            "m/s²",
            false,
            &[("m/s²", 1.0), ("ft/s²", 0.3048), ("g", 9.80665)],
        ),
        Domain::linear(
            "Force",
            "N",
            false,
            &[("N", 1.0), ("kN", 1e3), ("dyn", 1e-5), ("lbf", 4.44822)],
        ),
        Domain::linear(
            "Energy",
            "J",
            false,
            &[
                ("J", 1.0),
                ("kJ", 1e3),
                ("cal", 4.184),
                ("Wh", 3600.0),
                ("eV", 1.60218e-19),
            ],
        ),
        Domain::linear(
            "Power",
            "W",
            false,
            &[("W", 1.0), ("kW", 1e3), ("MW", 1e6), ("hp", 745.7)],
        ),
        Domain::linear(
            "Frequency",
            "Hz",
            false,
            &[
                ("Hz", 1.0),
                ("kHz", 1e3),
                ("MHz", 1e6),
                ("GHz", 1e9),
                ("rpm", 1.0 / 60.0),
            ],
        ),
        Domain::linear(
            "Density",
            "kg/m³",
            false,
            &[("kg/m³", 1.0), ("g/cm³", 1e3), ("lb/ft³", 16.0185)],
        ),
    ]
}
