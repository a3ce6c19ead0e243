//! Tracing/logging setup shared by the booking binaries.

/// Initialize process-wide observability (tracing/logging).
///
/// The output format comes from `BOOKING_LOG_FORMAT` (see [`LogFormat::from_env`]).
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    crate::tracing::init(LogFormat::from_env());
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::LogFormat;

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
        ::tracing::info!("still logging after a second init");
    }
}
