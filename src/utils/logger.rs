//! Component-scoped logging on top of the `log` facade
//!
//! Features:
//! - Component prefix on every record
//! - Debug records compiled out of release builds
//! - `env_logger` backend honoring `RUST_LOG`

use std::fmt::Display;

/// Install the `env_logger` backend. Safe to call more than once.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

/// Log a debug message (only in debug builds)
#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            ::log::debug!("[{}] {}", $component, format!($($arg)*));
        }
    };
}

/// Log an info message
#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        ::log::info!("[{}] {}", $component, format!($($arg)*))
    };
}

/// Log a warning message
#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        ::log::warn!("[{}] {}", $component, format!($($arg)*))
    };
}

/// Logger struct for scoped logging
pub struct Logger {
    component: String,
}

impl Logger {
    /// Create a new logger for a specific component
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    /// Log a debug message (only in debug builds)
    #[cfg(debug_assertions)]
    pub fn debug(&self, message: impl Display) {
        log::debug!("[{}] {}", self.component, message);
    }

    /// Log a debug message (no-op in release builds)
    #[cfg(not(debug_assertions))]
    pub fn debug(&self, _message: impl Display) {}

    /// Log an error with additional context
    pub fn error_with_context(&self, message: impl Display, error: &dyn std::error::Error) {
        log::error!("[{}] {}: {}", self.component, message, error);
    }

    /// Time an operation and log its duration at debug level
    pub fn time<F, R>(&self, operation: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = std::time::Instant::now();
        let result = f();
        let duration = start.elapsed();

        self.debug(format!(
            "{} completed in {:.2}ms",
            operation,
            duration.as_secs_f64() * 1000.0
        ));

        result
    }
}
