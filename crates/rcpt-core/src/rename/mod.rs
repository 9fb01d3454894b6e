//! File discovery, rename decisions and the batch driver.

mod batch;
mod decision;
mod scan;

pub use batch::{BatchReport, BatchRunner, FileReport, OutcomeCounts};
pub use decision::{same_content, RenameDecision, RenameExecutor, RenameOutcome, RunMode};
pub use scan::{is_canonical_name, scan_eligible};
