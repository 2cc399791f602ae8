pub mod staging_area;

pub use staging_area::{FileStagingArea, StagingState, SubmissionSnapshot};
