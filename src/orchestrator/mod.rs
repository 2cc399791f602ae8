//! 编排层
//!
//! - `app`: 应用主结构，持有全部资源并串联上传流程
//! - `batch_submitter`: 一批简历的并发提交与汇总

pub mod app;
pub mod batch_submitter;

pub use app::App;
pub use batch_submitter::{BatchSubmitter, SubmissionReport};
