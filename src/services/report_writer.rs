//! 上传报告 - 业务能力层
//!
//! 只负责把 `BatchResult` 渲染成文本并写入报告文件，不关心流程

use std::fs::OpenOptions;
use std::io::Write;

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{BatchResult, JobId};

/// 上传报告写入服务
///
/// 职责：
/// - 渲染一次批量提交的汇总
/// - 追加写入报告文件
/// - 不修改 `BatchResult`
pub struct ReportWriter {
    report_file_path: String,
}

impl ReportWriter {
    /// 使用指定的报告文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            report_file_path: path.into(),
        }
    }

    /// 渲染报告文本
    ///
    /// 成功数总是显示；跳过、失败只在大于 0 时显示；有跳过文件时列出文件名
    pub fn render(result: &BatchResult) -> String {
        let mut lines = vec![
            "Upload Results".to_string(),
            format!("  Successful: {}", result.success_count),
        ];
        if result.skipped_count > 0 {
            lines.push(format!("  Skipped: {}", result.skipped_count));
        }
        if result.failed_count > 0 {
            lines.push(format!("  Failed: {}", result.failed_count));
        }
        if !result.skipped_file_names.is_empty() {
            lines.push("Skipped Files (missing contact info or duplicates):".to_string());
            lines.extend(result.skipped_file_names.iter().map(|name| format!("  - {}", name)));
        }
        lines.join("\n")
    }

    /// 输出到日志并追加写入报告文件
    ///
    /// # 参数
    /// - `job_id`: 本批次所属职位
    /// - `result`: 汇总结果
    pub fn write(&self, job_id: &JobId, result: &BatchResult) -> AppResult<()> {
        let report = Self::render(result);
        for line in report.lines() {
            info!("{}", line);
        }

        debug!("写入上传报告: {}", self.report_file_path);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.report_file_path)
            .map_err(|e| AppError::file_write_failed(&self.report_file_path, e))?;

        let entry = format!(
            "[{}] 职位 {}\n{}\n\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            job_id,
            report
        );
        file.write_all(entry.as_bytes())
            .map_err(|e| AppError::file_write_failed(&self.report_file_path, e))?;

        Ok(())
    }
}
