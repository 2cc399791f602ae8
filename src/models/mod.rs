pub mod candidate;
pub mod job;
pub mod loaders;
pub mod outcome;
pub mod staged_file;

pub use candidate::{Candidate, RankedCandidate, ResumeLimit};
pub use job::{CreatedJob, Job, JobId, NewJob};
pub use loaders::{collect_resume_files, stage_paths};
pub use outcome::{BatchResult, ErrorPayload, FailureCause, Outcome, SkipReason, SubmissionResponse};
pub use staged_file::{CandidateInfoDraft, StagedFile, SubmissionRequest};
