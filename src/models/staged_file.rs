use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::job::JobId;

/// 已选择但尚未提交的简历文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    path: PathBuf,
    display_name: String,
}

impl StagedFile {
    /// 显示名称取文件名
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, display_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// 手动填写的候选人信息
///
/// 只在暂存区恰好有一个文件时随请求发送，留空的字段由服务端自动提取
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInfoDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub city: Option<String>,
}

impl CandidateInfoDraft {
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_empty())
    }

    /// 表单字段（未填写的为空字符串）
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("name", self.name.as_deref().unwrap_or("")),
            ("email", self.email.as_deref().unwrap_or("")),
            ("mobile", self.mobile.as_deref().unwrap_or("")),
            ("city", self.city.as_deref().unwrap_or("")),
        ]
    }
}

/// 单个文件的提交请求
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub job_id: JobId,
    pub file: StagedFile,
    pub manual_info: Option<CandidateInfoDraft>,
}

impl SubmissionRequest {
    /// 为一批文件构建请求，草稿仅在单文件时附带
    pub fn for_batch(
        staged: &[StagedFile],
        job_id: &JobId,
        draft: &CandidateInfoDraft,
    ) -> Vec<SubmissionRequest> {
        let manual_info = (staged.len() == 1).then(|| draft.clone());
        staged
            .iter()
            .map(|file| SubmissionRequest {
                job_id: job_id.clone(),
                file: file.clone(),
                manual_info: manual_info.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> CandidateInfoDraft {
        CandidateInfoDraft {
            name: Some("Alice".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_display_name_is_file_name() {
        let file = StagedFile::new("/tmp/resumes/resumeA.pdf");
        assert_eq!(file.display_name(), "resumeA.pdf");
    }

    #[test]
    fn test_single_file_carries_draft() {
        let staged = vec![StagedFile::new("resumeA.pdf")];
        let requests = SubmissionRequest::for_batch(&staged, &JobId::new("1"), &alice());
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].manual_info, Some(alice()));
    }

    #[test]
    fn test_multiple_files_drop_draft() {
        let staged = vec![
            StagedFile::new("a.pdf"),
            StagedFile::new("b.pdf"),
            StagedFile::new("c.docx"),
        ];
        let requests = SubmissionRequest::for_batch(&staged, &JobId::new("1"), &alice());
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.manual_info.is_none()));
        let names: Vec<_> = requests.iter().map(|r| r.file.display_name()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "c.docx"]);
    }

    #[test]
    fn test_draft_fields_default_to_empty_strings() {
        let draft = alice();
        let fields = draft.fields();
        assert_eq!(fields[0], ("name", "Alice"));
        assert_eq!(fields[1], ("email", ""));
        assert!(!draft.is_empty());
        assert!(CandidateInfoDraft::default().is_empty());
    }
}
