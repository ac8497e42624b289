use std::process::Command;

use color_eyre::eyre::eyre;
use color_eyre::{Result, Section as _, SectionExt as _};
use log::debug;

use crate::RECORD_DELIMITER;

/// Where the raw accounting text comes from. The production source shells
/// out to `qacct`; tests substitute a canned dump.
pub trait AccountingSource {
    fn dump(&self) -> Result<String>;
}

/// Queries the scheduler's accounting log via `qacct -j <job_group>`.
#[derive(Debug, Clone)]
pub struct Qacct {
    pub job_group: String,
}

impl Qacct {
    pub fn new(job_group: impl Into<String>) -> Self {
        Self {
            job_group: job_group.into(),
        }
    }
}

impl AccountingSource for Qacct {
    fn dump(&self) -> Result<String> {
        let qacct = Command::new("qacct")
            .args(["-j", &self.job_group])
            .output()?;

        if !qacct.status.success() {
            return Err(eyre!("qacct failed with status {:?}", qacct.status.code()).note(
                String::from_utf8_lossy(&qacct.stderr)
                    .trim()
                    .to_string()
                    .header("Stderr:"),
            ));
        }

        let stdout = String::from_utf8_lossy(&qacct.stdout).into_owned();
        debug!("qacct returned {} bytes", stdout.len());
        Ok(stdout)
    }
}

/// Cuts an accounting dump into per-job record blocks.
///
/// A `====…` ruler or a blank line ends the block being accumulated. Either
/// one hitting an empty buffer is just absorbed into the next block, which
/// keeps the dump's leading ruler from producing a phantom record. Whatever
/// is left in the buffer at end of input is the last record.
pub fn split_records(dump: &str) -> Vec<Vec<&str>> {
    let mut records = Vec::new();
    let mut buf: Vec<&str> = Vec::new();

    for line in dump.lines() {
        if (line == RECORD_DELIMITER || line.is_empty()) && !buf.is_empty() {
            records.push(std::mem::take(&mut buf));
        } else {
            buf.push(line);
        }
    }
    if !buf.is_empty() {
        records.push(buf);
    }

    records
}
