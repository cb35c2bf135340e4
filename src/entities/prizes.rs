use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 奖品实体
/// 概念说明:
/// - level: 奖品等级 (自由文本, 如 "一等奖")
/// - quantity: 持久化库存, 抽奖过程只扣减会话内副本, 显式提交时才回写
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub level: String,
    pub quantity: i64,
}

impl Model {
    /// 是否还有库存
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
