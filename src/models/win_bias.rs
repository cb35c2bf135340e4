use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{WinBias, win_bias_entity};

/// 设置中奖倾向
/// - bias: 0 默认 / 1 必中 / 2 必不中
/// - prize_id: 必中奖品，仅 bias = 1 时保留
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SetWinBiasRequest {
    #[schema(example = 1)]
    pub bias: i32,
    pub prize_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct WinBiasQuery {
    /// 按倾向代码过滤 (0/1/2)
    pub bias: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WinBiasResponse {
    pub id: i64,
    pub participant_id: i64,
    pub bias: WinBias,
    pub bias_code: i32,
    pub prize_id: Option<i64>,
}

impl From<win_bias_entity::Model> for WinBiasResponse {
    fn from(m: win_bias_entity::Model) -> Self {
        WinBiasResponse {
            id: m.id,
            participant_id: m.participant_id,
            bias: m.bias,
            bias_code: m.bias.code(),
            prize_id: m.prize_id,
        }
    }
}
