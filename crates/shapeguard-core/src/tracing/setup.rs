//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the shapeguard tracing/logging system.
///
/// Reads `SHAPEGUARD_LOG` for per-component log levels, e.g.
/// `SHAPEGUARD_LOG=shapeguard_analysis::validation=debug,shapeguard_storage=warn`.
///
/// Falls back to `shapeguard=info` if `SHAPEGUARD_LOG` is unset or invalid.
/// Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("SHAPEGUARD_LOG")
            .unwrap_or_else(|_| EnvFilter::new("shapeguard=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
