use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Destination for exported session data.
pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// What to do when source and target unit are identical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameUnitPolicy {
    #[default]
    Reject,
    Identity,
}

/// Settings a session needs from whichever configuration source is in use.
pub trait ConfigProvider {
    fn default_domain(&self) -> &str;
    fn same_unit_policy(&self) -> SameUnitPolicy;
    fn linear_decimals(&self) -> usize;
    fn temperature_decimals(&self) -> usize;
}
