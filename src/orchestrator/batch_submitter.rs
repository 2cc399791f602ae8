//! 批量简历提交器 - 编排层
//!
//! ## 职责
//!
//! 把暂存区冻结下来的文件列表并发提交到筛选服务，等待全部完成后汇总。
//!
//! ## 核心功能
//!
//! 1. **前置检查**：没有选中职位或文件列表为空时什么都不做，不发出任何请求
//! 2. **构建请求**：每个文件一个请求，只有单文件时附带手动信息
//! 3. **全量并发**：不设并发上限，先创建所有请求再统一等待
//! 4. **失败不扩散**：某个文件失败不会取消其他文件
//! 5. **先收集后汇总**：结果按完成顺序追加到列表，全部完成后再顺序折叠
//! 6. **刷新候选人**：批次结束后刷新一次该职位的候选人列表
//!
//! ## 设计特点
//!
//! - 单线程协作式调度：使用 `FuturesUnordered`，不 spawn 任务
//! - 不设超时、不重试，每个结果分类后即为终态
//! - 跳过文件名的顺序反映完成顺序，不保证与暂存顺序一致

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

use crate::clients::ScreeningClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{
    BatchResult, Candidate, CandidateInfoDraft, JobId, Outcome, StagedFile, SubmissionRequest,
};
use crate::services::{aggregate, classify};
use crate::utils::logging::{log_batch_complete, log_batch_start, log_outcome};

/// 一次批量提交的完整结果
#[derive(Debug)]
pub struct SubmissionReport {
    /// 汇总结果
    pub result: BatchResult,
    /// 每个文件的分类结果（完成顺序）
    pub outcomes: Vec<(StagedFile, Outcome)>,
    /// 批次结束后的候选人刷新结果
    pub refreshed_candidates: AppResult<Vec<Candidate>>,
}

/// 批量简历提交器
pub struct BatchSubmitter {
    client: ScreeningClient,
}

impl BatchSubmitter {
    /// 按配置中的服务地址创建
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            client: ScreeningClient::new(config)?,
        })
    }

    /// 复用已有客户端（共享连接池）
    pub fn with_client(client: ScreeningClient) -> Self {
        Self { client }
    }

    /// 并发提交一批简历
    ///
    /// # 参数
    /// - `staged`: 冻结的文件列表（暂存顺序）
    /// - `job_id`: 当前选中的职位
    /// - `draft`: 手动信息草稿，仅单文件时发送
    ///
    /// # 返回
    /// 前置条件不满足时返回 `None`（未发出任何请求）
    pub async fn submit_batch(
        &self,
        staged: &[StagedFile],
        job_id: Option<&JobId>,
        draft: &CandidateInfoDraft,
    ) -> Option<SubmissionReport> {
        let Some(job_id) = job_id else {
            debug!("未选择职位，跳过提交");
            return None;
        };
        if staged.is_empty() {
            debug!("暂存区为空，跳过提交");
            return None;
        }

        let requests = SubmissionRequest::for_batch(staged, job_id, draft);
        log_batch_start(requests.len(), job_id, requests.len() == 1);

        let client = &self.client;
        let mut in_flight: FuturesUnordered<_> = requests
            .into_iter()
            .map(|request| async move {
                let response = client.submit_resume(&request).await;
                let outcome = classify(&response);
                log_outcome(&request.file, &outcome);
                (request.file, outcome)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(staged.len());
        while let Some(pair) = in_flight.next().await {
            outcomes.push(pair);
        }

        let result = aggregate(&outcomes);
        log_batch_complete(&result);

        let refreshed_candidates = self.client.list_candidates(job_id).await;

        Some(SubmissionReport {
            result,
            outcomes,
            refreshed_candidates,
        })
    }
}
