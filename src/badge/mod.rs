//! Status-to-badge decision logic. Everything here is pure: the HTTP layer
//! fetches the build record (and optional results file) and hands the values
//! in.

pub mod colour;
pub mod counts;
pub mod results_file;
pub mod source;
pub mod spec;
pub mod status;

pub use colour::{Colour, Thresholds};
pub use counts::BuildRecord;
pub use results_file::ServiceResult;
pub use source::ResultSource;
pub use spec::{BadgeSpec, TestSummary};
pub use status::BuildStatus;

/// Resolve the badge for one build given whichever result source applies.
pub fn resolve_badge(
    record: BuildRecord,
    file_result: Option<ServiceResult>,
    thresholds: &Thresholds,
) -> BadgeSpec {
    let summary = ResultSource::select(record, file_result).resolve();
    spec::compose(&summary, thresholds)
}
