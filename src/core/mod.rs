pub mod config;
pub mod db;
pub mod error;
pub mod host;
pub mod names;
pub mod session;

pub type Address = u64;

/// An address relative to its image base. Signed so that names below the
/// analysis-time base survive the round trip.
pub type Offset = i64;
