use std::collections::HashMap;

use itertools::Itertools as _;
use thiserror::Error;

/// Marker the submit scripts put on the command line of multi-chain
/// prediction runs.
const MULTIMER_MARKER: &str = "_multimer_v";

/// The accounting fields the usage report keeps per job. `qacct` prints a
/// few dozen more; everything not listed here is dropped at extraction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub jobnumber: String,
    pub hostname: String,
    pub owner: String,
    pub project: String,
    pub submit_cmd: String,
    pub qsub_time: String,
    pub exit_status: String,
    pub failed: String,
    pub wallclock: String,
    pub maxrss: String,
    pub maxvmem: String,
}

#[derive(Debug, Clone, Error)]
pub enum RecordError {
    #[error("accounting record has no `{0}` field")]
    MissingField(&'static str),
}

impl JobRecord {
    /// Parses one record block. Every line is `key value...`; the value is
    /// whatever follows the first token, re-joined with single spaces. A key
    /// printed twice keeps the last value seen.
    pub fn parse(block: &[&str]) -> Result<Self, RecordError> {
        let mut fields = HashMap::new();
        for line in block {
            let mut tokens = line.split_whitespace();
            let Some(key) = tokens.next() else { continue };
            fields.insert(key, tokens.join(" "));
        }

        let take = |key: &'static str| {
            fields
                .get(key)
                .cloned()
                .ok_or(RecordError::MissingField(key))
        };

        Ok(Self {
            jobnumber: take("jobnumber")?,
            hostname: take("hostname")?,
            owner: take("owner")?,
            project: take("project")?,
            submit_cmd: take("submit_cmd")?,
            qsub_time: take("qsub_time")?,
            exit_status: take("exit_status")?,
            failed: take("failed")?,
            wallclock: take("wallclock")?,
            maxrss: take("maxrss")?,
            maxvmem: take("maxvmem")?,
        })
    }

    /// Whether the submit command ran a multimer prediction.
    pub fn is_multimer(&self) -> bool {
        self.submit_cmd.contains(MULTIMER_MARKER)
    }
}
