pub mod misc;
pub mod qacct;
pub mod record;
pub mod report;

/// Ruler line `qacct` prints between accounting records.
pub const RECORD_DELIMITER: &str =
    "==============================================================";

/// Job group whose accounting history the report covers.
pub const DEFAULT_JOB_GROUP: &str = "colabfold";

/// Report file name, written into the working directory.
pub const DEFAULT_REPORT_PATH: &str = "colabfold_stats.txt";
