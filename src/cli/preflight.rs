//! Pre-flight checks before any session starts.
//!
//! Missing credentials or broken proxy settings are fatal up front rather
//! than surfacing on the first user action.

use crate::config::Settings;
use crate::error::Result;
use crate::transcript::ProxyPool;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Generating notes or answers needs the API key and a usable proxy setup.
    Generate,
    /// Showing configuration has no requirements.
    Inspect,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Generate => {
            settings.api_key()?;
            ProxyPool::from_settings(&settings.proxy)?;
        }
        Operation::Inspect => {}
    }
    Ok(())
}
