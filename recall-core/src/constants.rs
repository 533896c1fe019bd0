/// Crate version, surfaced for diagnostics and the engine-metadata record.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
