use tracing::{info, warn};

use crate::config::Config;
use crate::error::{EtlError, Result};

/// Verifies that the raw input file exists before the pipeline proceeds.
///
/// Fails fast with `EtlError::SourceMissing` so the scheduler sees a distinct
/// source-availability failure instead of a later, less specific transform
/// error.
pub fn source_check(config: &Config) -> Result<()> {
    if !config.raw_path.exists() {
        warn!(path = %config.raw_path.display(), "raw input file is missing");
        return Err(EtlError::SourceMissing(config.raw_path.clone()));
    }
    info!(path = %config.raw_path.display(), "raw input file is ready");
    Ok(())
}
