use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prize_entity;

/// 奖品列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PrizeQuery {
    /// 名称模糊匹配
    pub keyword: Option<String>,
    /// 等级精确匹配
    pub level: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreatePrizeRequest {
    #[schema(example = "iPhone 15")]
    pub name: String,
    #[schema(example = "一等奖")]
    pub level: String,
    /// 数量 (默认 0)
    #[schema(example = 5)]
    #[serde(default)]
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdatePrizeRequest {
    pub name: Option<String>,
    pub level: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: i64,
    pub name: String,
    pub level: String,
    pub quantity: i64,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            name: m.name,
            level: m.level,
            quantity: m.quantity,
        }
    }
}
