use accounting_data::misc::parsing::to_unix_time;
use accounting_data::qacct::{split_records, AccountingSource};
use accounting_data::record::JobRecord;
use accounting_data::report::UsageReport;
use accounting_data::{DEFAULT_REPORT_PATH, RECORD_DELIMITER};
use color_eyre::Result;

/// Stands in for `qacct` so the pipeline runs without a cluster.
struct CannedDump(String);

impl AccountingSource for CannedDump {
    fn dump(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

fn two_record_dump() -> String {
    format!(
        "{RECORD_DELIMITER}\n\
         jobnumber    3866234\n\
         hostname     gpu-node-07\n\
         owner        jdoe\n\
         project      structural_bio\n\
         submit_cmd   qsub run_monomer.sh query.fasta\n\
         qsub_time    01/15/2024 10:30:00.123456\n\
         exit_status  0\n\
         failed       0\n\
         wallclock    3621.5\n\
         maxrss       19.888G\n\
         maxvmem      52.103G\n\
         {RECORD_DELIMITER}\n\
         jobnumber    3866235\n\
         hostname     gpu-node-11\n\
         owner        asmith\n\
         project      structural_bio\n\
         submit_cmd   qsub run_multimer_v2.sh complex.fasta\n\
         qsub_time    01/16/2024 08:05:10.500000\n\
         exit_status  0\n\
         failed       0\n\
         wallclock    8102.2\n\
         maxrss       512M\n\
         maxvmem      1.5G\n"
    )
}

fn run_pipeline(source: &impl AccountingSource) -> Result<UsageReport> {
    let dump = source.dump()?;
    let records = split_records(&dump)
        .iter()
        .map(|block| JobRecord::parse(block))
        .collect::<Result<Vec<_>, _>>()?;
    UsageReport::build(records)
}

#[test]
fn end_to_end_report_file() -> Result<()> {
    let workdir = tempfile::tempdir()?;
    let report_path = workdir.path().join(DEFAULT_REPORT_PATH);

    let report = run_pipeline(&CannedDump(two_record_dump()))?;
    report.save(&report_path)?;

    let written = std::fs::read_to_string(&report_path)?;
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Count\tjobnumber\thostname\towner\tproject\tsubmit_cmd\tqsub_time\t\
         exit_status\tfailed\twallclock\tmaxrss\tmaxvmem\tsubmit_time\tmultimer_job"
    );

    // Derived submit_time depends on the machine's timezone, so expected
    // values come from the same transform rather than hardcoded epochs.
    let first_submit = to_unix_time("01/15/2024 10:30:00.123456")?;
    let second_submit = to_unix_time("01/16/2024 08:05:10.500000")?;
    assert_eq!(
        lines[1],
        format!(
            "0\t3866234\tgpu-node-07\tjdoe\tstructural_bio\tqsub run_monomer.sh query.fasta\t\
             01/15/2024 10:30:00.123456\t0\t0\t3621.5\t19.888G\t52.103G\t{first_submit}\tfalse"
        )
    );
    assert_eq!(
        lines[2],
        format!(
            "1\t3866235\tgpu-node-11\tasmith\tstructural_bio\tqsub run_multimer_v2.sh complex.fasta\t\
             01/16/2024 08:05:10.500000\t0\t0\t8102.2\t512M\t1.5G\t{second_submit}\ttrue"
        )
    );

    Ok(())
}

#[test]
fn missing_field_aborts_before_any_output() {
    let workdir = tempfile::tempdir().expect("creating temp workdir");
    let report_path = workdir.path().join(DEFAULT_REPORT_PATH);

    // Second record has no maxvmem line.
    let dump = two_record_dump().replace("maxvmem      1.5G\n", "");
    let result = run_pipeline(&CannedDump(dump)).and_then(|report| {
        report.save(&report_path)?;
        Ok(report)
    });

    assert!(result.is_err());
    assert!(!report_path.exists());
}
