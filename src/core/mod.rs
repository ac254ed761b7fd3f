pub mod catalog;
pub mod convert;
pub mod engine;
pub mod export;
pub mod registry;
pub mod session;
pub mod temperature;

pub use crate::domain::model::{ConversionRequest, ConversionResult, Domain, HistoryEntry};
pub use crate::domain::ports::{ConfigProvider, SameUnitPolicy, Storage};
pub use crate::utils::error::Result;
