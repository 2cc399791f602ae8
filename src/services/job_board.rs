//! 职位看板 - 业务能力层
//!
//! 职位的增删查、当前选中职位及其候选人列表，以及唯一的"可见错误"状态。
//! 每次操作开始时清空错误，失败时用新的错误覆盖旧的。

use tracing::{error, info};

use crate::clients::ScreeningClient;
use crate::error::{AppError, AppResult};
use crate::models::{Candidate, CreatedJob, Job, JobId, NewJob};

/// 职位看板
pub struct JobBoard {
    client: ScreeningClient,
    jobs: Vec<Job>,
    selected: Option<Job>,
    candidates: Vec<Candidate>,
    error: Option<String>,
}

impl JobBoard {
    pub fn new(client: ScreeningClient) -> Self {
        Self {
            client,
            jobs: Vec::new(),
            selected: None,
            candidates: Vec::new(),
            error: None,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn selected(&self) -> Option<&Job> {
        self.selected.as_ref()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// 当前可见的错误信息
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 刷新职位列表
    pub async fn refresh_jobs(&mut self) -> AppResult<&[Job]> {
        self.error = None;
        match self.client.list_jobs().await {
            Ok(jobs) => {
                self.jobs = jobs;
                Ok(&self.jobs)
            }
            Err(e) => Err(self.fail("Failed to fetch jobs".to_string(), e)),
        }
    }

    /// 创建职位（标题和描述都必填），成功后刷新列表
    pub async fn create_job(&mut self, title: &str, description: &str) -> AppResult<CreatedJob> {
        self.error = None;
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            let message = if title.is_empty() {
                "Missing title"
            } else {
                "Missing description"
            };
            self.error = Some(format!("Error: {}", message));
            return Err(AppError::Other(message.to_string()));
        }

        let new_job = NewJob {
            title: title.to_string(),
            description: description.to_string(),
        };
        let created = match self.client.create_job(&new_job).await {
            Ok(created) => created,
            Err(e) => {
                let message = format!(
                    "Error: {}",
                    e.server_message().unwrap_or("Failed to create job")
                );
                return Err(self.fail(message, e));
            }
        };
        info!("✓ 职位已创建: {} (ID {})", created.title, created.id);

        self.refresh_jobs().await?;
        Ok(created)
    }

    /// 删除职位（服务端级联删除候选人）；删除的是当前选中职位时清空选择
    pub async fn delete_job(&mut self, job_id: &JobId) -> AppResult<()> {
        self.error = None;
        if let Err(e) = self.client.delete_job(job_id).await {
            let message = format!(
                "Error: {}",
                e.server_message().unwrap_or("Failed to delete job")
            );
            return Err(self.fail(message, e));
        }
        info!("🗑️ 职位 {} 已删除", job_id);

        if self.selected.as_ref().is_some_and(|job| &job.id == job_id) {
            self.selected = None;
            self.candidates.clear();
        }

        self.refresh_jobs().await?;
        Ok(())
    }

    /// 选中职位并加载其候选人
    ///
    /// 职位不在当前列表中时会先刷新一次列表
    pub async fn select_job(&mut self, job_id: &JobId) -> AppResult<&Job> {
        if !self.jobs.iter().any(|job| &job.id == job_id) {
            self.refresh_jobs().await?;
        }
        let Some(job) = self.jobs.iter().find(|job| &job.id == job_id).cloned() else {
            let e = AppError::Other(format!("职位 {} 不存在", job_id));
            return Err(self.fail("Error: Job not found".to_string(), e));
        };

        self.selected = Some(job);
        self.candidates.clear();
        self.refresh_candidates().await?;

        self.selected
            .as_ref()
            .ok_or_else(|| AppError::Other("未选择职位".to_string()))
    }

    /// 重新加载当前职位的候选人
    pub async fn refresh_candidates(&mut self) -> AppResult<&[Candidate]> {
        let Some(job_id) = self.selected.as_ref().map(|job| job.id.clone()) else {
            return Ok(&self.candidates);
        };
        self.error = None;
        match self.client.list_candidates(&job_id).await {
            Ok(candidates) => {
                self.set_candidates(candidates);
                Ok(&self.candidates)
            }
            Err(e) => Err(self.fail("Failed to fetch candidates".to_string(), e)),
        }
    }

    /// 使用外部已经获取到的候选人列表（批量提交后的刷新结果）
    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
    }

    /// 记录候选人刷新失败
    pub fn record_candidates_error(&mut self, e: &AppError) {
        error!("获取候选人失败: {}", e);
        self.error = Some("Failed to fetch candidates".to_string());
    }

    fn fail(&mut self, message: String, e: AppError) -> AppError {
        error!("{}: {}", message, e);
        self.error = Some(message);
        e
    }
}
