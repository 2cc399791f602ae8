use std::fmt;

use serde::Deserialize;

/// 服务端错误响应体：`{"error": "..."}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
}

/// 单次简历提交的原始响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResponse {
    /// 收到了 HTTP 响应（任意状态码）
    Completed {
        status: u16,
        payload: Option<ErrorPayload>,
    },
    /// 传输层失败，没有收到响应
    TransportFailed { message: String },
    /// 本地文件无法读取，请求未发出
    FileUnreadable { message: String },
}

/// 跳过原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// 候选人已提交过
    DuplicateCandidate,
    /// 简历中没有邮箱或手机号
    MissingContactInfo,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DuplicateCandidate => write!(f, "Duplicate candidate"),
            SkipReason::MissingContactInfo => write!(f, "No email or mobile number found"),
        }
    }
}

/// 失败原因（保留原始错误）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    Status {
        status: u16,
        message: Option<String>,
    },
    Transport(String),
    File(String),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Status {
                status,
                message: Some(message),
            } => write!(f, "HTTP {}: {}", status, message),
            FailureCause::Status {
                status,
                message: None,
            } => write!(f, "HTTP {}", status),
            FailureCause::Transport(message) => write!(f, "传输失败: {}", message),
            FailureCause::File(message) => write!(f, "文件读取失败: {}", message),
        }
    }
}

/// 单个文件的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Skipped(SkipReason),
    Failed(FailureCause),
}

/// 一次批量提交的汇总结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub success_count: usize,
    pub skipped_count: usize,
    pub failed_count: usize,
    pub skipped_file_names: Vec<String>,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.success_count + self.skipped_count + self.failed_count
    }
}
