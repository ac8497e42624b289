use std::fs::File;
use std::io::Write;
use std::path::Path;

use color_eyre::eyre::WrapErr as _;
use color_eyre::Result;
use serde::Serialize;

use crate::misc::parsing::{to_unix_time, MemSize};
use crate::record::JobRecord;

/// One report line: the raw accounting fields plus the derived columns, in
/// output order.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Count")]
    pub count: usize,
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
    pub submit_time: i64,
    pub multimer_job: bool,
}

/// The assembled usage table, one row per accounting record, in dump order.
#[derive(Debug, Default)]
pub struct UsageReport {
    rows: Vec<ReportRow>,
}

impl UsageReport {
    /// Derives the extra columns for every record. Any malformed value
    /// aborts the build; nothing is written until the whole table is good.
    pub fn build(records: Vec<JobRecord>) -> Result<Self> {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(count, record)| {
                let submit_time = to_unix_time(&record.qsub_time).wrap_err_with(|| {
                    format!("job {}: qsub_time `{}`", record.jobnumber, record.qsub_time)
                })?;
                let multimer_job = record.is_multimer();

                // Byte conversion is validation only for now; the report
                // keeps the raw strings. TODO: carry maxrss/maxvmem as byte
                // counts instead.
                let _maxrss_bytes = MemSize::parse(&record.maxrss).wrap_err_with(|| {
                    format!("job {}: maxrss `{}`", record.jobnumber, record.maxrss)
                })?;
                let _maxvmem_bytes = MemSize::parse(&record.maxvmem).wrap_err_with(|| {
                    format!("job {}: maxvmem `{}`", record.jobnumber, record.maxvmem)
                })?;

                Ok(ReportRow {
                    count,
                    jobnumber: record.jobnumber,
                    hostname: record.hostname,
                    owner: record.owner,
                    project: record.project,
                    submit_cmd: record.submit_cmd,
                    qsub_time: record.qsub_time,
                    exit_status: record.exit_status,
                    failed: record.failed,
                    wallclock: record.wallclock,
                    maxrss: record.maxrss,
                    maxvmem: record.maxvmem,
                    submit_time,
                    multimer_job,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tab-separated, header row first. The sink is a parameter so tests can
    /// write into a buffer instead of the filesystem.
    pub fn write_tsv(&self, sink: impl Write) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(sink);
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the report into `path`, replacing whatever was there.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file =
            File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?;
        self.write_tsv(file)
    }
}
