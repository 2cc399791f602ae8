//! 应用主结构 - 编排层
//!
//! ## 职责
//!
//! 持有客户端、职位看板、暂存区、批量提交器和报告写入器，把一次上传串成完整流程。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：初始化报告文件、输出启动信息、创建共享客户端
//! 2. **职位切换**：切换职位时重置暂存区
//! 3. **文件暂存**：必须先选中职位，目录按扩展名展开
//! 4. **批量提交**：begin_submit → 并发提交 → end_submit → 输出报告 → 保存刷新后的候选人
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有 `FileStagingArea` 的模块
//! - **向下委托**：单个文件的提交和分类交给 `BatchSubmitter`

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::clients::ScreeningClient;
use crate::config::Config;
use crate::error::{AppError, StagingError};
use crate::models::{stage_paths, BatchResult, CandidateInfoDraft, Job, JobId, StagedFile};
use crate::orchestrator::batch_submitter::BatchSubmitter;
use crate::services::{JobBoard, ReportWriter};
use crate::utils::logging::{init_report_file, log_startup};
use crate::workflow::FileStagingArea;

/// 应用主结构
pub struct App {
    config: Config,
    client: ScreeningClient,
    board: JobBoard,
    staging: FileStagingArea,
    submitter: BatchSubmitter,
    reporter: ReportWriter,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        init_report_file(&config.report_log_file).context("初始化报告文件失败")?;

        log_startup(&config);

        let client = ScreeningClient::new(&config).context("创建筛选服务客户端失败")?;

        Ok(Self {
            board: JobBoard::new(client.clone()),
            staging: FileStagingArea::new(),
            submitter: BatchSubmitter::with_client(client.clone()),
            reporter: ReportWriter::with_path(config.report_log_file.clone()),
            client,
            config,
        })
    }

    pub fn client(&self) -> &ScreeningClient {
        &self.client
    }

    pub fn board(&self) -> &JobBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut JobBoard {
        &mut self.board
    }

    pub fn staging(&self) -> &FileStagingArea {
        &self.staging
    }

    /// 切换职位：先重置暂存区，再加载该职位的候选人
    pub async fn select_job(&mut self, job_id: &JobId) -> Result<&Job> {
        self.staging.reset().map_err(AppError::from)?;
        let job = self.board.select_job(job_id).await?;
        info!("📋 当前职位: {} ({})", job.title, job.id);
        Ok(job)
    }

    /// 暂存文件或目录
    ///
    /// # 参数
    /// - `paths`: 文件或目录路径，目录按配置的扩展名展开
    ///
    /// # 返回
    /// 本次新增的文件数
    pub async fn stage_files(&mut self, paths: &[PathBuf]) -> Result<usize> {
        if self.board.selected().is_none() {
            return Err(AppError::from(StagingError::NoJobSelected).into());
        }

        let files = stage_paths(paths, &self.config.accepted_extensions).await?;
        let added = files.len();
        if added == 0 {
            warn!("⚠️ 没有找到可上传的简历文件");
        }
        self.staging.add_files(files).map_err(AppError::from)?;
        info!("📎 已暂存 {} 个文件（共 {} 个）", added, self.staging.len());
        Ok(added)
    }

    /// 移除暂存的文件
    pub fn remove_staged(&mut self, index: usize) -> Result<StagedFile> {
        Ok(self.staging.remove_file(index).map_err(AppError::from)?)
    }

    /// 取消暂存，清空文件和草稿
    pub fn cancel_staging(&mut self) -> Result<()> {
        Ok(self.staging.cancel().map_err(AppError::from)?)
    }

    /// 编辑手动信息（只在恰好一个文件时随请求发送）
    pub fn set_draft(&mut self, draft: CandidateInfoDraft) -> Result<()> {
        Ok(self.staging.set_draft(draft).map_err(AppError::from)?)
    }

    /// 提交当前暂存的全部文件
    ///
    /// # 返回
    /// 没有选中职位或暂存区为空时返回 `None`，不发请求也不改变状态
    pub async fn submit(&mut self) -> Result<Option<BatchResult>> {
        let Some(job_id) = self.board.selected().map(|job| job.id.clone()) else {
            warn!("⚠️ 未选择职位，忽略提交");
            return Ok(None);
        };
        if self.staging.is_empty() {
            return Ok(None);
        }

        let snapshot = self.staging.begin_submit().map_err(AppError::from)?;
        let report = self
            .submitter
            .submit_batch(&snapshot.files, Some(&job_id), &snapshot.draft)
            .await;

        let Some(report) = report else {
            self.staging
                .end_submit(&BatchResult::default())
                .map_err(AppError::from)?;
            return Ok(None);
        };

        self.staging.end_submit(&report.result).map_err(AppError::from)?;

        if let Err(e) = self.reporter.write(&job_id, &report.result) {
            warn!("⚠️ 写入上传报告失败: {}", e);
        }

        match report.refreshed_candidates {
            Ok(candidates) => self.board.set_candidates(candidates),
            Err(e) => self.board.record_candidates_error(&e),
        }

        Ok(Some(report.result))
    }
}
