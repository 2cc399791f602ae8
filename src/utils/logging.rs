/// 日志工具模块
///
/// 提供日志初始化、报告文件头和批次进度输出的辅助函数
use std::fs;
use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{BatchResult, JobId, Outcome, StagedFile};

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则按是否详细日志选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化报告文件（已存在时保留原内容，只在新建时写入文件头）
///
/// # 参数
/// - `report_file_path`: 报告文件路径
pub fn init_report_file(report_file_path: &str) -> AppResult<()> {
    if Path::new(report_file_path).exists() {
        return Ok(());
    }
    let header = format!(
        "{}\n简历上传报告 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(report_file_path, header).map_err(|e| AppError::file_write_failed(report_file_path, e))
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 简历批量提交");
    info!("🌐 筛选服务: {}", config.api_base_url);
    info!("{}", "=".repeat(60));
}

/// 记录批次开始信息
///
/// # 参数
/// - `total`: 本批文件数
/// - `job_id`: 目标职位
/// - `with_manual_info`: 是否附带手动信息
pub fn log_batch_start(total: usize, job_id: &JobId, with_manual_info: bool) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始提交 {} 份简历 -> 职位 {}", total, job_id);
    if with_manual_info {
        info!("📝 附带手动填写的候选人信息");
    }
    info!("{}", "=".repeat(60));
}

/// 记录单个文件的分类结果
pub fn log_outcome(file: &StagedFile, outcome: &Outcome) {
    match outcome {
        Outcome::Success => info!("✓ {} 提交成功", file.display_name()),
        Outcome::Skipped(reason) => warn!("⚠️ {} 已跳过: {}", file.display_name(), reason),
        Outcome::Failed(cause) => warn!(
            "❌ {} 提交失败: {}",
            file.display_name(),
            truncate_text(&cause.to_string(), 200)
        ),
    }
}

/// 记录批次完成信息
pub fn log_batch_complete(result: &BatchResult) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 批次完成: 成功 {}/{}，跳过 {}，失败 {}",
        result.success_count,
        result.total(),
        result.skipped_count,
        result.failed_count
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
