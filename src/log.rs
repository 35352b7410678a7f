use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive that overrides everything else
pub const LOG_ENV_VAR: &str = "AUDIO_DEVICES_LOG";

/// Global flag to control per-device debug tracing
static DEVICE_DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Set per-device debug tracing on/off
pub fn set_device_debug(enabled: bool) {
    DEVICE_DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Check if per-device debug tracing is enabled
pub fn is_device_debug_enabled() -> bool {
    DEVICE_DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Pick the filter directive. Precedence: environment, `-v` flags, config file.
///
/// Logging is off unless asked for: stderr output is the failure signal
/// for callers that spawn this tool.
pub fn filter_directive(verbosity: u8, env: Option<&str>, configured: Option<&str>) -> String {
    if let Some(directive) = env.map(str::trim).filter(|d| !d.is_empty()) {
        return directive.to_string();
    }
    match verbosity {
        0 => configured.unwrap_or("off").to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global stderr subscriber
pub fn init(verbosity: u8, configured: Option<&str>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let directive = filter_directive(verbosity, env.as_deref(), configured);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{}'", directive))?;

    set_device_debug(verbosity >= 3 || directive.contains("trace"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;
    Ok(())
}

/// Device debug macro - only traces if device debug is enabled
#[macro_export]
macro_rules! device_debug {
    ($($arg:tt)*) => {
        if $crate::log::is_device_debug_enabled() {
            tracing::trace!($($arg)*);
        }
    };
}
