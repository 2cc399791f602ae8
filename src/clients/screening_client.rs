/// 简历筛选服务 API 客户端
///
/// 封装所有与筛选服务相关的 HTTP 调用，服务地址来自 `Config`，不使用全局默认值
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::candidate::{CandidateList, TopResumeList};
use crate::models::job::JobList;
use crate::models::{
    Candidate, CreatedJob, ErrorPayload, Job, JobId, NewJob, RankedCandidate, ResumeLimit,
    SubmissionRequest, SubmissionResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::debug;

/// 筛选服务客户端
///
/// 内部的 `reqwest::Client` 可以廉价 clone，并发提交时共享同一个连接池
#[derive(Clone)]
pub struct ScreeningClient {
    client: Client,
    base_url: String,
}

impl ScreeningClient {
    /// 创建新的筛选服务客户端（不设置超时，使用传输层默认行为）
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::api_request_failed("client", e))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 获取职位列表
    pub async fn list_jobs(&self) -> AppResult<Vec<Job>> {
        let endpoint = self.endpoint("/api/jobs");
        let response = self.client.get(&endpoint).send().await;
        let list: JobList = self.read_json(&endpoint, response).await?;
        debug!("获取到 {} 个职位", list.jobs.len());
        Ok(list.jobs)
    }

    /// 创建职位
    ///
    /// # 参数
    /// - `job`: 职位标题和描述
    ///
    /// # 返回
    /// 返回服务端创建的职位（ID + 标题）
    pub async fn create_job(&self, job: &NewJob) -> AppResult<CreatedJob> {
        let endpoint = self.endpoint("/api/jobs");
        let response = self.client.post(&endpoint).json(job).send().await;
        self.read_json(&endpoint, response).await
    }

    /// 删除职位（服务端级联删除其候选人）
    pub async fn delete_job(&self, job_id: &JobId) -> AppResult<()> {
        let endpoint = self.endpoint(&format!("/api/jobs/{}", job_id));
        let response = self.client.delete(&endpoint).send().await;
        self.check(&endpoint, response).await?;
        Ok(())
    }

    /// 获取某个职位下的候选人（服务端按分数降序）
    pub async fn list_candidates(&self, job_id: &JobId) -> AppResult<Vec<Candidate>> {
        let endpoint = self.endpoint(&format!("/api/jobs/{}/candidates", job_id));
        let response = self.client.get(&endpoint).send().await;
        let list: CandidateList = self.read_json(&endpoint, response).await?;
        Ok(list.candidates)
    }

    /// 提交单份简历
    ///
    /// 永远不会返回 `Err`：传输失败和本地读文件失败都体现在 `SubmissionResponse` 中，
    /// 由分类器决定如何处理。
    ///
    /// # 参数
    /// - `request`: 职位 ID、文件、可选的手动信息
    pub async fn submit_resume(&self, request: &SubmissionRequest) -> SubmissionResponse {
        let file = &request.file;
        let bytes = match tokio::fs::read(file.path()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return SubmissionResponse::FileUnreadable {
                    message: format!("{}: {}", file.path().display(), e),
                }
            }
        };

        let mut form = Form::new().part(
            "file",
            Part::bytes(bytes).file_name(file.display_name().to_string()),
        );
        if let Some(info) = &request.manual_info {
            for (field, value) in info.fields() {
                form = form.text(field, value.to_string());
            }
        }

        let endpoint = self.endpoint(&format!("/api/jobs/{}/upload-resume", request.job_id));
        debug!("上传简历 {} -> {}", file.display_name(), endpoint);

        let response = match self.client.post(&endpoint).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                return SubmissionResponse::TransportFailed {
                    message: e.to_string(),
                }
            }
        };

        let status = response.status();
        if status.is_success() {
            return SubmissionResponse::Completed {
                status: status.as_u16(),
                payload: None,
            };
        }

        let body = response.text().await.unwrap_or_default();
        SubmissionResponse::Completed {
            status: status.as_u16(),
            payload: parse_error_payload(&body),
        }
    }

    /// 获取排名靠前的简历
    ///
    /// # 参数
    /// - `limit`: 返回条数
    /// - `job_id`: 只看某个职位（可选）
    pub async fn top_resumes(
        &self,
        limit: ResumeLimit,
        job_id: Option<&JobId>,
    ) -> AppResult<Vec<RankedCandidate>> {
        let endpoint = self.endpoint("/api/top-resumes");
        let mut query = vec![("limit", limit.get().to_string())];
        if let Some(job_id) = job_id {
            query.push(("job_id", job_id.to_string()));
        }
        let response = self.client.get(&endpoint).query(&query).send().await;
        let list: TopResumeList = self.read_json(&endpoint, response).await?;
        Ok(list.top_resumes)
    }

    /// 查看 / 下载简历的地址
    pub fn resume_url(&self, resume_path: &str, download: bool) -> String {
        let url = self.endpoint(&format!("/api/resumes/{}", resume_path));
        if download {
            format!("{}?download=true", url)
        } else {
            url
        }
    }

    /// 获取简历内容
    pub async fn fetch_resume(&self, resume_path: &str, download: bool) -> AppResult<Vec<u8>> {
        let endpoint = self.resume_url(resume_path, download);
        let response = self.client.get(&endpoint).send().await;
        let response = self.check(&endpoint, response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint.clone(), e))?;
        Ok(bytes.to_vec())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 检查响应状态，非 2xx 转换为 `BadResponse`（带服务端 error 信息）
    async fn check(
        &self,
        endpoint: &str,
        response: Result<Response, reqwest::Error>,
    ) -> AppResult<Response> {
        let response = response.map_err(|e| AppError::api_request_failed(endpoint, e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = parse_error_payload(&body).and_then(|p| p.error);
        Err(AppError::bad_response(endpoint, status.as_u16(), message))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        response: Result<Response, reqwest::Error>,
    ) -> AppResult<T> {
        let response = self.check(endpoint, response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// 解析错误响应体；不是 JSON 时把原文当作错误信息
fn parse_error_payload(body: &str) -> Option<ErrorPayload> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) => Some(payload),
        Err(_) => Some(ErrorPayload {
            error: Some(body.to_string()),
        }),
    }
}
