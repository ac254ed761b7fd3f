pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::ConverterConfig};
pub use core::{
    convert::DisplayPrecision,
    engine::{ConversionEngine, ConversionOutcome},
    export::{ExportFormat, HistoryExporter},
    registry::UnitRegistry,
    session::Session,
};
pub use domain::model::{
    ConversionRequest, ConversionResult, HistoryEntry, SessionState, TemperatureScale, UnitSelection,
};
pub use domain::ports::SameUnitPolicy;
pub use utils::error::{AppError, ConvertError, ErrorKind, RegistryError, Result};
