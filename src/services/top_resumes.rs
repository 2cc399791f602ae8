//! 排名简历查询 - 业务能力层
//!
//! 无状态读取：可选职位过滤 + 固定档位的条数限制

use tracing::{error, warn};

use crate::clients::ScreeningClient;
use crate::error::AppResult;
use crate::models::{JobId, RankedCandidate, ResumeLimit};

/// 排名查询失败时给用户看的信息
pub const FETCH_TOP_RESUMES_FAILED: &str = "Failed to fetch top resumes";

/// 排名查询条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopResumeQuery {
    pub limit: ResumeLimit,
    pub job_id: Option<JobId>,
}

/// 查询排名靠前的简历
///
/// 结果最多 `limit` 条；指定职位时只保留归属该职位的条目
pub async fn fetch_top_resumes(
    client: &ScreeningClient,
    query: &TopResumeQuery,
) -> AppResult<Vec<RankedCandidate>> {
    match client.top_resumes(query.limit, query.job_id.as_ref()).await {
        Ok(ranked) => Ok(narrow(ranked, query)),
        Err(e) => {
            error!("{}: {}", FETCH_TOP_RESUMES_FAILED, e);
            Err(e)
        }
    }
}

fn narrow(mut ranked: Vec<RankedCandidate>, query: &TopResumeQuery) -> Vec<RankedCandidate> {
    if let Some(job_id) = &query.job_id {
        let before = ranked.len();
        ranked.retain(|r| r.job_id.as_ref() == Some(job_id));
        if ranked.len() != before {
            warn!(
                "⚠️ 服务端返回了 {} 条不属于职位 {} 的简历，已过滤",
                before - ranked.len(),
                job_id
            );
        }
    }
    ranked.truncate(query.limit.get());
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Candidate;
    use mockito::{Matcher, Server};

    fn ranked(i: usize, job: &str) -> RankedCandidate {
        RankedCandidate {
            candidate: Candidate {
                id: i as i64,
                candidate_id: format!("cand-{}", i),
                name: None,
                email: None,
                mobile: None,
                city: None,
                score: 100.0 - i as f64,
                resume_path: None,
            },
            job_id: Some(JobId::new(job)),
            job_title: format!("Job {}", job),
        }
    }

    #[test]
    fn test_narrow_truncates_to_limit() {
        let all: Vec<_> = (0..35).map(|i| ranked(i, "J1")).collect();
        let query = TopResumeQuery {
            limit: ResumeLimit::Thirty,
            job_id: None,
        };
        let out = narrow(all, &query);
        assert_eq!(out.len(), 30);
        assert_eq!(out[0].candidate.id, 0);
    }

    #[test]
    fn test_narrow_drops_other_jobs() {
        let all = vec![ranked(0, "J1"), ranked(1, "J2"), ranked(2, "J1")];
        let query = TopResumeQuery {
            limit: ResumeLimit::Ten,
            job_id: Some(JobId::new("J1")),
        };
        let out = narrow(all, &query);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.job_id == Some(JobId::new("J1"))));
    }

    #[test]
    fn test_narrow_drops_unattributed_entries() {
        let mut orphan = ranked(1, "J1");
        orphan.job_id = None;
        orphan.job_title = "Other Job".to_string();
        let all = vec![ranked(0, "J1"), orphan];
        let query = TopResumeQuery {
            limit: ResumeLimit::Twenty,
            job_id: Some(JobId::new("J1")),
        };
        let out = narrow(all, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].job_title, "Job J1");
    }

    #[test]
    fn test_narrow_without_job_keeps_unattributed_entries() {
        let mut orphan = ranked(1, "J1");
        orphan.job_id = None;
        let out = narrow(vec![orphan], &TopResumeQuery::default());
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn test_limit_20_for_job_j1() {
        let entries: Vec<String> = (0..25)
            .map(|i| {
                format!(
                    r#"{{"id": {i}, "candidate_id": "c{i}", "score": {}, "job_id": "J1", "job_title": "Backend"}}"#,
                    90.0 - i as f64
                )
            })
            .collect();
        let body = format!(r#"{{"top_resumes": [{}]}}"#, entries.join(","));

        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/top-resumes")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "20".into()),
                Matcher::UrlEncoded("job_id".into(), "J1".into()),
            ]))
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = ScreeningClient::new(&Config::default().with_base_url(server.url())).unwrap();
        let query = TopResumeQuery {
            limit: ResumeLimit::Twenty,
            job_id: Some(JobId::new("J1")),
        };
        let out = fetch_top_resumes(&client, &query).await.unwrap();
        assert!(out.len() <= 20);
        assert!(out.iter().all(|r| r.job_id.as_ref().map(JobId::as_str) == Some("J1")));
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_server_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/top-resumes")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error": "index unavailable"}"#)
            .create_async()
            .await;

        let client = ScreeningClient::new(&Config::default().with_base_url(server.url())).unwrap();
        let err = fetch_top_resumes(&client, &TopResumeQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.server_message(), Some("index unavailable"));
    }
}
