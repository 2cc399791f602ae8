pub mod job_board;
pub mod outcome_classifier;
pub mod report_writer;
pub mod results_aggregator;
pub mod top_resumes;

pub use job_board::JobBoard;
pub use outcome_classifier::classify;
pub use report_writer::ReportWriter;
pub use results_aggregator::aggregate;
pub use top_resumes::{fetch_top_resumes, TopResumeQuery, FETCH_TOP_RESUMES_FAILED};
