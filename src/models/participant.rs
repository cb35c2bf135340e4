use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{WinBias, participant_entity};

/// 人员列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ParticipantQuery {
    /// 用户名模糊匹配
    pub keyword: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateParticipantRequest {
    #[schema(example = "张三")]
    pub username: String,
    #[schema(example = "EMP001")]
    #[serde(default)]
    pub employee_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateParticipantRequest {
    #[schema(example = "张三")]
    pub username: Option<String>,
    #[schema(example = "EMP001")]
    pub employee_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ParticipantResponse {
    pub id: i64,
    pub username: String,
    pub employee_id: String,
}

impl From<participant_entity::Model> for ParticipantResponse {
    fn from(m: participant_entity::Model) -> Self {
        ParticipantResponse {
            id: m.id,
            username: m.username,
            employee_id: m.employee_id,
        }
    }
}

/// 人员及其中奖倾向（无记录时为 default）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantWithBias {
    pub id: i64,
    pub username: String,
    pub employee_id: String,
    pub bias: WinBias,
    pub prize_id: Option<i64>,
}
