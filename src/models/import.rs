use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 批量导入请求, `content` 为 UTF-8 CSV 文本
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ImportRequest {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FailedRecord {
    /// 数据行号 (表头之后从 1 开始)
    pub row: usize,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ImportResult {
    pub success: usize,
    pub failed: usize,
    pub failed_records: Vec<FailedRecord>,
}

impl ImportResult {
    pub fn record_failure(&mut self, row: usize, error: impl Into<String>) {
        self.failed += 1;
        self.failed_records.push(FailedRecord {
            row,
            error: error.into(),
        });
    }
}
