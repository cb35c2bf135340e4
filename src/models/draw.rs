use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::draw::{DrawPhase, DrawResult};

/// 抽奖会话状态
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawStatusResponse {
    pub current_round: u32,
    pub total_rounds: u32,
    pub allow_duplicate_winners: bool,
    pub phase: DrawPhase,
    pub results_count: usize,
    /// 会话内剩余奖品数量 (不影响数据库库存)
    pub prizes: Vec<SessionPrize>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionPrize {
    pub id: i64,
    pub name: String,
    pub level: String,
    pub remaining: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawSettingsRequest {
    /// 总轮次, <= 0 时忽略
    pub total_rounds: Option<i64>,
    pub allow_duplicate_winners: Option<bool>,
}

/// 单轮抽奖结果; result 为空表示本轮无结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawRoundResponse {
    pub round: u32,
    pub outcome: String,
    pub result: Option<DrawResult>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ExportRequest {
    #[schema(example = "lottery_results.csv")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExportResponse {
    pub exported: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommitResponse {
    /// 回写库存的奖品数
    pub prizes_updated: usize,
}
