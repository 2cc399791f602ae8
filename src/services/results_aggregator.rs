//! 结果汇总 - 业务能力层
//!
//! 在所有提交完成之后，对不可变的结果列表做一次顺序折叠

use crate::models::{BatchResult, Outcome, StagedFile};

/// 把 (文件, 结果) 列表折叠为 `BatchResult`
///
/// 跳过的文件名按折叠顺序追加，也就是调用方记录结果的顺序
pub fn aggregate(outcomes: &[(StagedFile, Outcome)]) -> BatchResult {
    outcomes
        .iter()
        .fold(BatchResult::default(), |mut result, (file, outcome)| {
            match outcome {
                Outcome::Success => result.success_count += 1,
                Outcome::Skipped(_) => {
                    result.skipped_count += 1;
                    result.skipped_file_names.push(file.display_name().to_string());
                }
                Outcome::Failed(_) => result.failed_count += 1,
            }
            result
        })
}
