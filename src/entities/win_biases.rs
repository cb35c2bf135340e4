use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 中奖倾向, 数据库中以整数存储 (0 默认 / 1 必中 / 2 必不中)
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
pub enum WinBias {
    #[default]
    #[sea_orm(num_value = 0)]
    Default,
    #[sea_orm(num_value = 1)]
    MustWin,
    #[sea_orm(num_value = 2)]
    MustNotWin,
}

impl WinBias {
    pub fn code(self) -> i32 {
        match self {
            WinBias::Default => 0,
            WinBias::MustWin => 1,
            WinBias::MustNotWin => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(WinBias::Default),
            1 => Some(WinBias::MustWin),
            2 => Some(WinBias::MustNotWin),
            _ => None,
        }
    }
}

impl std::fmt::Display for WinBias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinBias::Default => write!(f, "default"),
            WinBias::MustWin => write!(f, "must_win"),
            WinBias::MustNotWin => write!(f, "must_not_win"),
        }
    }
}

/// 中奖倾向实体
/// - participant_id 唯一, 每个人员至多一条
/// - prize_id 仅在 bias = MustWin 时有意义; 写入 MustNotWin 时总是清空
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "win_biases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub participant_id: i64,
    pub bias: WinBias,
    pub prize_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_codes() {
        for bias in [WinBias::Default, WinBias::MustWin, WinBias::MustNotWin] {
            assert_eq!(WinBias::from_code(bias.code()), Some(bias));
        }
        assert_eq!(WinBias::from_code(3), None);
        assert_eq!(WinBias::from_code(-1), None);
    }
}
