//! 文件暂存区 - 流程层
//!
//! 管理"已选择待上传"的简历列表，以及决定手动信息表单何时生效的状态机：
//!
//! ```text
//! Idle ──add_files──▶ Staging ──begin_submit──▶ Submitting
//!  ▲                   │  ▲                         │
//!  └──cancel / 删空────┘  └─ add / remove            │
//!  ▲                                                │
//!  └────────────────────end_submit──────────────────┘
//! ```
//!
//! 提交期间文件列表被冻结，由状态机保证，不使用锁。

use crate::error::StagingError;
use crate::models::{BatchResult, CandidateInfoDraft, StagedFile};

/// 暂存区状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StagingState {
    /// 没有文件，拖放区可用
    #[default]
    Idle,
    /// 至少一个文件，表单可见，可增删
    Staging,
    /// 提交中，文件列表冻结
    Submitting,
}

/// 提交时冻结下来的快照
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionSnapshot {
    pub files: Vec<StagedFile>,
    pub draft: CandidateInfoDraft,
}

/// 文件暂存区
#[derive(Debug, Default)]
pub struct FileStagingArea {
    files: Vec<StagedFile>,
    draft: CandidateInfoDraft,
    state: StagingState,
}

impl FileStagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StagingState {
        self.state
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// 表单是否可见
    pub fn form_visible(&self) -> bool {
        self.state == StagingState::Staging
    }

    /// 拖放区是否可用
    pub fn drop_target_active(&self) -> bool {
        self.state == StagingState::Idle
    }

    /// 追加文件（保持传入顺序，不去重）
    pub fn add_files(&mut self, incoming: impl IntoIterator<Item = StagedFile>) -> Result<(), StagingError> {
        self.ensure_mutable()?;
        self.files.extend(incoming);
        if !self.files.is_empty() {
            self.state = StagingState::Staging;
        }
        Ok(())
    }

    /// 移除指定位置的文件，删空后回到 Idle
    pub fn remove_file(&mut self, index: usize) -> Result<StagedFile, StagingError> {
        self.ensure_mutable()?;
        if index >= self.files.len() {
            return Err(StagingError::IndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }
        let removed = self.files.remove(index);
        if self.files.is_empty() {
            self.state = StagingState::Idle;
        }
        Ok(removed)
    }

    /// 取消：清空文件和草稿，只能在 Staging 下调用
    pub fn cancel(&mut self) -> Result<(), StagingError> {
        if self.state != StagingState::Staging {
            return Err(StagingError::InvalidTransition {
                state: self.state,
                action: "cancel",
            });
        }
        self.clear();
        Ok(())
    }

    /// 切换职位时的重置
    pub fn reset(&mut self) -> Result<(), StagingError> {
        self.ensure_mutable()?;
        self.clear();
        Ok(())
    }

    pub fn draft(&self) -> &CandidateInfoDraft {
        &self.draft
    }

    /// 编辑手动信息草稿（仅 Staging）
    pub fn set_draft(&mut self, draft: CandidateInfoDraft) -> Result<(), StagingError> {
        if self.state != StagingState::Staging {
            return Err(StagingError::InvalidTransition {
                state: self.state,
                action: "set_draft",
            });
        }
        self.draft = draft;
        Ok(())
    }

    /// 会随请求发送的草稿：只有恰好一个文件时才有
    pub fn effective_draft(&self) -> Option<&CandidateInfoDraft> {
        (self.files.len() == 1).then_some(&self.draft)
    }

    /// 进入 Submitting，返回冻结的文件列表和草稿
    pub fn begin_submit(&mut self) -> Result<SubmissionSnapshot, StagingError> {
        if self.state != StagingState::Staging {
            return Err(StagingError::InvalidTransition {
                state: self.state,
                action: "begin_submit",
            });
        }
        self.state = StagingState::Submitting;
        Ok(SubmissionSnapshot {
            files: self.files.clone(),
            draft: self.draft.clone(),
        })
    }

    /// 结束提交：无论结果如何都完全重置回 Idle
    pub fn end_submit(&mut self, result: &BatchResult) -> Result<(), StagingError> {
        if self.state != StagingState::Submitting {
            return Err(StagingError::InvalidTransition {
                state: self.state,
                action: "end_submit",
            });
        }
        tracing::debug!(
            "暂存区重置: 成功 {} / 跳过 {} / 失败 {}",
            result.success_count,
            result.skipped_count,
            result.failed_count
        );
        self.clear();
        Ok(())
    }

    fn ensure_mutable(&self) -> Result<(), StagingError> {
        if self.state == StagingState::Submitting {
            return Err(StagingError::Frozen);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.files.clear();
        self.draft = CandidateInfoDraft::default();
        self.state = StagingState::Idle;
    }
}
