pub mod mem {
    use std::num::ParseFloatError;

    use derive_more::derive::{Deref, Display, Into};
    use thiserror::Error;

    /// Memory figure from the accounting log, in bytes. `qacct` prints these
    /// either with a binary-unit suffix (`19.888G`, `512M`) or as a bare
    /// byte count.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deref, Display, Into)]
    pub struct MemSize(pub u64);

    impl MemSize {
        /// Strips a trailing `M`/`G`/`T` and scales by the matching power of
        /// 1024; any other string goes to the float parser whole. The result
        /// truncates toward zero.
        pub fn parse(raw: &str) -> Result<Self, MemParseError> {
            let (scalar, scale) = match raw.chars().last() {
                Some('M') => (&raw[..raw.len() - 1], 1u64 << 20),
                Some('G') => (&raw[..raw.len() - 1], 1u64 << 30),
                Some('T') => (&raw[..raw.len() - 1], 1u64 << 40),
                _ => (raw, 1),
            };
            let scalar: f64 = scalar.parse()?;
            Ok(MemSize((scalar * scale as f64) as u64))
        }
    }

    #[derive(Debug, Clone, Error)]
    pub enum MemParseError {
        #[error("scalar part is not a number")]
        InvalidScalar(#[from] ParseFloatError),
    }
}

pub mod timestamp {
    use chrono::{Local, NaiveDateTime};
    use thiserror::Error;

    /// `qacct` prints submit/start/end times like `01/15/2024 10:30:00.123456`.
    const QSUB_TIME_FMT: &str = "%m/%d/%Y %H:%M:%S%.f";

    /// Epoch seconds for an accounting timestamp, read as local wall-clock
    /// time the way `mktime` would. The sub-second part is dropped.
    pub fn to_unix_time(raw: &str) -> Result<i64, TimestampError> {
        let naive = NaiveDateTime::parse_from_str(raw, QSUB_TIME_FMT)?;
        let local = naive
            .and_local_timezone(Local)
            .earliest()
            .ok_or_else(|| TimestampError::NonexistentLocalTime(raw.to_owned()))?;
        Ok(local.timestamp())
    }

    #[derive(Debug, Clone, Error)]
    pub enum TimestampError {
        #[error("timestamp does not match the accounting log format")]
        Format(#[from] chrono::ParseError),
        #[error("`{0}` does not exist as a local time (DST gap)")]
        NonexistentLocalTime(String),
    }
}

pub use mem::MemSize;
pub use timestamp::to_unix_time;
