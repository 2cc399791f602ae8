use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use resume_batch_submit::models::{CandidateInfoDraft, JobId, ResumeLimit};
use resume_batch_submit::services::{fetch_top_resumes, TopResumeQuery, FETCH_TOP_RESUMES_FAILED};
use resume_batch_submit::utils::logging;
use resume_batch_submit::{App, Config};

#[derive(Parser, Debug)]
#[command(name = "resume-submit")]
#[command(author, version, about = "批量提交简历到筛选服务", long_about = None)]
struct Cli {
    /// TOML 配置文件
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 覆盖筛选服务地址
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 职位管理
    Jobs {
        #[command(subcommand)]
        action: JobsAction,
    },
    /// 查看某个职位的候选人
    Candidates { job_id: String },
    /// 上传简历（目录会展开为其中的简历文件）
    Upload {
        job_id: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// 候选人姓名（仅单个文件时发送）
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// 排名靠前的简历
    Top {
        /// 条数: 10 / 20 / 30 / 50 / 100
        #[arg(long, default_value_t = ResumeLimit::Ten)]
        limit: ResumeLimit,
        /// 只看某个职位
        #[arg(long)]
        job: Option<String>,
    },
    /// 查看或下载简历
    Resume {
        path: String,
        #[arg(long)]
        download: bool,
        /// 保存到文件；不指定时只打印地址
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum JobsAction {
    /// 列出所有职位
    List,
    /// 创建职位
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    /// 删除职位（同时删除其全部候选人）
    Delete {
        id: String,
        /// 确认删除
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(cli.config.as_deref()).context("加载配置失败")?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
        config.validate()?;
    }
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    let mut app = App::initialize(config)?;

    match cli.command {
        Command::Jobs { action } => run_jobs(&mut app, action).await,
        Command::Candidates { job_id } => {
            let job = app.select_job(&JobId::new(job_id)).await?.clone();
            println!("{} ({})", job.title, job.id);
            for candidate in app.board().candidates() {
                println!(
                    "  {:>8}  {}{}",
                    candidate.score_label(),
                    candidate.display_name(),
                    candidate
                        .city
                        .as_deref()
                        .map(|city| format!("  [{}]", city))
                        .unwrap_or_default()
                );
            }
            Ok(())
        }
        Command::Upload {
            job_id,
            paths,
            name,
            email,
            mobile,
            city,
        } => {
            let draft = CandidateInfoDraft {
                name,
                email,
                mobile,
                city,
            };
            run_upload(&mut app, JobId::new(job_id), &paths, draft).await
        }
        Command::Top { limit, job } => {
            let query = TopResumeQuery {
                limit,
                job_id: job.map(JobId::new),
            };
            let ranked = fetch_top_resumes(app.client(), &query)
                .await
                .context(FETCH_TOP_RESUMES_FAILED)?;
            for (rank, entry) in ranked.iter().enumerate() {
                println!(
                    "{:>3}. {:>8}  {}  ({})",
                    rank + 1,
                    entry.candidate.score_label(),
                    entry.candidate.display_name(),
                    entry.job_title
                );
            }
            Ok(())
        }
        Command::Resume {
            path,
            download,
            output,
        } => match output {
            Some(output) => {
                let bytes = app.client().fetch_resume(&path, download).await?;
                tokio::fs::write(&output, &bytes)
                    .await
                    .with_context(|| format!("写入 {} 失败", output.display()))?;
                info!("✓ 已保存 {} 字节到 {}", bytes.len(), output.display());
                Ok(())
            }
            None => {
                println!("{}", app.client().resume_url(&path, download));
                Ok(())
            }
        },
    }
}

async fn run_jobs(app: &mut App, action: JobsAction) -> Result<()> {
    let board = app.board_mut();
    match action {
        JobsAction::List => {
            board.refresh_jobs().await?;
            for job in board.jobs() {
                println!("{:>6}  {}", job.id, job.title);
            }
        }
        JobsAction::Create { title, description } => {
            let created = board.create_job(&title, &description).await?;
            println!("{}", created.id);
        }
        JobsAction::Delete { id, yes } => {
            if !yes {
                bail!("删除职位会同时删除其全部候选人，请加 --yes 确认");
            }
            board.delete_job(&JobId::new(id)).await?;
        }
    }
    Ok(())
}

async fn run_upload(
    app: &mut App,
    job_id: JobId,
    paths: &[PathBuf],
    draft: CandidateInfoDraft,
) -> Result<()> {
    app.select_job(&job_id).await?;
    app.stage_files(paths).await?;

    if app.staging().is_empty() {
        return Ok(());
    }
    if !draft.is_empty() {
        if app.staging().len() > 1 {
            warn!("⚠️ 暂存了多个文件，手动填写的候选人信息不会发送");
        }
        app.set_draft(draft)?;
    }

    if app.submit().await?.is_some() {
        if let Some(error) = app.board().error() {
            warn!("⚠️ {}", error);
        }
        info!("📋 当前候选人: {} 位", app.board().candidates().len());
    }
    Ok(())
}
