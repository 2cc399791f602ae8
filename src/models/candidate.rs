use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::job::JobId;

/// 候选人（某个职位下已评分的简历）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    pub candidate_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub score: f64,
    #[serde(default)]
    pub resume_path: Option<String>,
}

impl Candidate {
    /// 显示名称：没有姓名时使用 `Candidate <ID 前 8 位>`
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!(
                "Candidate {}",
                self.candidate_id.chars().take(8).collect::<String>()
            ),
        }
    }

    /// 分数显示（两位小数 + 百分号）
    pub fn score_label(&self) -> String {
        format!("{:.2}%", self.score)
    }
}

/// 排名简历（带职位归属）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(default)]
    pub job_id: Option<JobId>,
    #[serde(default)]
    pub job_title: String,
}

/// `GET /api/jobs/{id}/candidates` 响应
#[derive(Debug, Deserialize)]
pub(crate) struct CandidateList {
    pub candidates: Vec<Candidate>,
}

/// `GET /api/top-resumes` 响应
#[derive(Debug, Deserialize)]
pub(crate) struct TopResumeList {
    pub top_resumes: Vec<RankedCandidate>,
}

/// 排名查询条数（只允许固定几档）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResumeLimit {
    #[default]
    Ten = 10,
    Twenty = 20,
    Thirty = 30,
    Fifty = 50,
    Hundred = 100,
}

impl ResumeLimit {
    pub const ALL: [ResumeLimit; 5] = [
        ResumeLimit::Ten,
        ResumeLimit::Twenty,
        ResumeLimit::Thirty,
        ResumeLimit::Fifty,
        ResumeLimit::Hundred,
    ];

    pub fn get(self) -> usize {
        self as usize
    }

    pub fn from_count(count: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|limit| limit.get() == count)
    }
}

impl fmt::Display for ResumeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl FromStr for ResumeLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_count)
            .ok_or_else(|| format!("limit 只能是 10/20/30/50/100，收到 '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: Option<&str>) -> Candidate {
        Candidate {
            id: 1,
            candidate_id: "3f2a9c7e-11aa-4b6e-9d10-0c5b7e8f9a01".to_string(),
            name: name.map(str::to_string),
            email: None,
            mobile: None,
            city: None,
            score: 42.4567,
            resume_path: None,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_short_id() {
        assert_eq!(candidate(Some("Alice Smith")).display_name(), "Alice Smith");
        assert_eq!(candidate(None).display_name(), "Candidate 3f2a9c7e");
        assert_eq!(candidate(Some("  ")).display_name(), "Candidate 3f2a9c7e");
    }

    #[test]
    fn test_score_label() {
        assert_eq!(candidate(None).score_label(), "42.46%");
    }

    #[test]
    fn test_resume_limit_parse() {
        assert_eq!("20".parse::<ResumeLimit>(), Ok(ResumeLimit::Twenty));
        assert!("25".parse::<ResumeLimit>().is_err());
        assert_eq!(ResumeLimit::default().get(), 10);
    }

    #[test]
    fn test_ranked_candidate_flattens_fields() {
        let json = r#"{
            "id": 5, "candidate_id": "abcdef1234", "name": null, "email": "a@b.io",
            "score": 88.0, "resume_path": "x_cv.pdf", "job_id": 3, "job_title": "Backend"
        }"#;
        let ranked: RankedCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(ranked.job_id, Some(JobId::new("3")));
        assert_eq!(ranked.candidate.email.as_deref(), Some("a@b.io"));
        assert_eq!(ranked.job_title, "Backend");
    }
}
