//! Quiet-mode aware logging. When SRA_QUIET=1, `info_log!` is suppressed.

#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        if !$crate::log::is_quiet() {
            tracing::info!($($arg)*);
        }
    }};
}

pub fn is_quiet() -> bool {
    sra_core::config::ObservabilityConfig::from_env().quiet
}
