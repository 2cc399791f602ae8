//! # Resume Batch Submit
//!
//! 把一批简历提交到远程简历筛选服务的客户端
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 唯一直接发 HTTP 请求的地方
//! - `ScreeningClient` - 职位、候选人、简历上传、排名查询
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `classify` - 单个提交响应 → Success / Skipped / Failed
//! - `aggregate` - 分类结果 → `BatchResult`
//! - `JobBoard` - 职位增删查和唯一的可见错误
//! - `ReportWriter` - 写 upload_report.txt 能力
//! - `fetch_top_resumes` - 排名简历查询
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 暂存区状态机（Idle → Staging → Submitting → Idle）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_submitter` - 一批简历的全量并发提交
//! - `orchestrator/app` - 应用主结构，管理资源并串联流程
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::ScreeningClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{BatchResult, CandidateInfoDraft, JobId, Outcome, StagedFile};
pub use orchestrator::{App, BatchSubmitter};
pub use workflow::{FileStagingArea, StagingState};
