use super::counts::{extract, BuildRecord};
use super::results_file::ServiceResult;
use super::spec::TestSummary;
use super::status::normalize;

/// Where a badge's numbers come from.
#[derive(Debug, Clone)]
pub enum ResultSource {
    /// Result token and test-count parameters of the Jenkins build itself.
    Upstream(BuildRecord),
    /// Counts read from the configured results file. The service name is
    /// only set when the file had an entry for it.
    File(ServiceResult),
}

impl ResultSource {
    /// Prefer file-backed results when present.
    pub fn select(record: BuildRecord, file_result: Option<ServiceResult>) -> Self {
        match file_result {
            Some(result) => ResultSource::File(result),
            None => ResultSource::Upstream(record),
        }
    }

    pub fn resolve(&self) -> TestSummary {
        match self {
            ResultSource::Upstream(record) => {
                let (passed, total) = extract(record);
                TestSummary::new(normalize(record.result.as_deref()), passed, total, None)
            }
            ResultSource::File(result) => TestSummary::new(
                normalize(result.result.as_deref()),
                result.passed,
                result.total,
                result.service.clone(),
            ),
        }
    }
}
