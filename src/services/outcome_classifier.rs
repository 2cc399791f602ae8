//! 结果分类 - 业务能力层
//!
//! 把一次提交的响应映射为唯一的 `Outcome`，纯函数，不关心流程

use crate::models::{ErrorPayload, FailureCause, Outcome, SkipReason, SubmissionResponse};

/// 服务端在简历中找不到联系方式时返回的错误文本（兼容约定）
pub const MISSING_CONTACT_PHRASE: &str = "No email or mobile number found";

const STATUS_BAD_REQUEST: u16 = 400;
const STATUS_CONFLICT: u16 = 409;

/// 对单次提交响应进行分类
///
/// | 响应 | 结果 |
/// |---|---|
/// | 2xx | Success |
/// | 400 且错误信息包含 [`MISSING_CONTACT_PHRASE`] | Skipped(MissingContactInfo) |
/// | 409 | Skipped(DuplicateCandidate) |
/// | 其他非 2xx / 传输失败 / 读文件失败 | Failed |
pub fn classify(response: &SubmissionResponse) -> Outcome {
    match response {
        SubmissionResponse::Completed { status, .. } if (200..300).contains(status) => {
            Outcome::Success
        }
        SubmissionResponse::Completed { status, payload } => {
            if let Some(reason) = skip_reason(*status, payload.as_ref()) {
                return Outcome::Skipped(reason);
            }
            Outcome::Failed(FailureCause::Status {
                status: *status,
                message: payload.as_ref().and_then(|p| p.error.clone()),
            })
        }
        SubmissionResponse::TransportFailed { message } => {
            Outcome::Failed(FailureCause::Transport(message.clone()))
        }
        SubmissionResponse::FileUnreadable { message } => {
            Outcome::Failed(FailureCause::File(message.clone()))
        }
    }
}

fn skip_reason(status: u16, payload: Option<&ErrorPayload>) -> Option<SkipReason> {
    match status {
        STATUS_CONFLICT => Some(SkipReason::DuplicateCandidate),
        STATUS_BAD_REQUEST => payload
            .and_then(|p| p.error.as_deref())
            .filter(|message| message.contains(MISSING_CONTACT_PHRASE))
            .map(|_| SkipReason::MissingContactInfo),
        _ => None,
    }
}
