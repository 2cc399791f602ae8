use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// 职位 ID
///
/// 服务端返回整数 ID，客户端只把它当作不透明的标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Str(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => JobId(n.to_string()),
            RawId::Str(s) => JobId(s),
        })
    }
}

/// 职位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// 创建职位请求
#[derive(Debug, Clone, Serialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
}

/// 创建职位响应
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedJob {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /api/jobs` 响应
#[derive(Debug, Deserialize)]
pub(crate) struct JobList {
    pub jobs: Vec<Job>,
}
