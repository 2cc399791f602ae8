use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError, FileError};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 筛选服务地址
    pub api_base_url: String,
    /// 扫描文件夹时接受的简历扩展名
    pub accepted_extensions: Vec<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 上传结果报告文件
    pub report_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            accepted_extensions: vec!["pdf".to_string(), "docx".to_string()],
            verbose_logging: false,
            report_log_file: "upload_report.txt".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（可选） → 环境变量
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        let config = base.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置，未出现的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(display.clone(), e))?;
        toml::from_str(&content).map_err(|source| {
            AppError::File(FileError::TomlParseFailed {
                path: display,
                source,
            })
        })
    }

    fn with_env_overrides(self) -> AppResult<Self> {
        let verbose_logging = match std::env::var("VERBOSE_LOGGING") {
            Ok(value) => value.parse().map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: "VERBOSE_LOGGING".to_string(),
                value: value.clone(),
                expected_type: "bool".to_string(),
            })?,
            Err(_) => self.verbose_logging,
        };

        Ok(Self {
            api_base_url: std::env::var("SCREENING_API_URL").unwrap_or(self.api_base_url),
            accepted_extensions: std::env::var("ACCEPTED_EXTENSIONS")
                .map(|v| parse_extensions(&v))
                .unwrap_or(self.accepted_extensions),
            verbose_logging,
            report_log_file: std::env::var("REPORT_LOG_FILE").unwrap_or(self.report_log_file),
        })
    }

    /// 校验服务地址
    pub fn validate(&self) -> AppResult<()> {
        let url = reqwest::Url::parse(&self.api_base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.api_base_url.clone(),
                reason: format!("不支持的协议 {}", url.scheme()),
            }
            .into());
        }
        Ok(())
    }

    /// 指定服务地址（测试和命令行覆盖使用）
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
