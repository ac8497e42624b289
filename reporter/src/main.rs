use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;
use log::{debug, info, LevelFilter};

use accounting_data::qacct::{split_records, AccountingSource, Qacct};
use accounting_data::record::JobRecord;
use accounting_data::report::UsageReport;
use accounting_data::{DEFAULT_JOB_GROUP, DEFAULT_REPORT_PATH};

fn main() -> Result<()> {
    init_logger();

    info!("Querying accounting log for job group `{DEFAULT_JOB_GROUP}`");
    let dump = Qacct::new(DEFAULT_JOB_GROUP)
        .dump()
        .map_err(|e| anyhow::Error::msg(e.to_string()))?;

    let blocks = split_records(&dump);
    debug!("Dump holds {} record blocks", blocks.len());

    let records = blocks
        .iter()
        .map(|block| JobRecord::parse(block))
        .collect::<Result<Vec<_>, _>>()
        .context("extracting accounting records")?;

    let report =
        UsageReport::build(records).map_err(|e| anyhow::Error::msg(e.to_string()))?;
    report
        .save(DEFAULT_REPORT_PATH)
        .map_err(|e| anyhow::Error::msg(e.to_string()))?;
    info!("Wrote {} rows to {DEFAULT_REPORT_PATH}", report.len());

    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .init();
}
