//! Date and timestamp formats used on the wire.

/// Calendar date, e.g. `2024-01-15`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time of day, e.g. `13:45:00`.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// UTC timestamp with microseconds, e.g. `2024-01-15T13:45:00.123456Z`.
pub const ZULU_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
