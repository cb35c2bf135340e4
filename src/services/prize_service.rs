use crate::entities::{prize_entity as prizes, win_bias_entity as win_biases};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreatePrizeRequest, PaginatedResponse, PaginationParams, PrizeQuery, PrizeResponse,
    UpdatePrizeRequest,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct PrizeService {
    pool: DatabaseConnection,
}

fn validate_quantity(quantity: i64) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::ValidationError(
            "Quantity must not be negative".into(),
        ));
    }
    Ok(())
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 新增奖品
    pub async fn create(&self, request: CreatePrizeRequest) -> AppResult<PrizeResponse> {
        let name = request.name.trim();
        let level = request.level.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError("Prize name must not be empty".into()));
        }
        if level.is_empty() {
            return Err(AppError::ValidationError("Prize level must not be empty".into()));
        }
        validate_quantity(request.quantity)?;

        let model = prizes::ActiveModel {
            name: Set(name.to_string()),
            level: Set(level.to_string()),
            quantity: Set(request.quantity),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::debug!(
            "Prize created: id={} name={} quantity={}",
            model.id,
            model.name,
            model.quantity
        );
        Ok(model.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<PrizeResponse> {
        prizes::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Prize not found".to_string()))
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        Ok(prizes::Entity::find_by_id(id).one(&self.pool).await?.is_some())
    }

    /// 按名称精确查询
    pub async fn get_by_name(&self, name: &str) -> AppResult<PrizeResponse> {
        prizes::Entity::find()
            .filter(prizes::Column::Name.eq(name))
            .order_by_asc(prizes::Column::Id)
            .one(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Prize not found".to_string()))
    }

    /// 按名称模糊查询
    pub async fn search(&self, keyword: &str) -> AppResult<Vec<PrizeResponse>> {
        let list = prizes::Entity::find()
            .filter(prizes::Column::Name.contains(keyword))
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 按等级查询
    pub async fn list_by_level(&self, level: &str) -> AppResult<Vec<PrizeResponse>> {
        let list = prizes::Entity::find()
            .filter(prizes::Column::Level.eq(level))
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 分页列表, 可按名称关键字与等级过滤
    pub async fn list(&self, query: &PrizeQuery) -> AppResult<PaginatedResponse<PrizeResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base_query = prizes::Entity::find();
        if let Some(keyword) = query.keyword.as_deref().filter(|k| !k.is_empty()) {
            base_query = base_query.filter(prizes::Column::Name.contains(keyword));
        }
        if let Some(level) = query.level.as_deref().filter(|l| !l.is_empty()) {
            base_query = base_query.filter(prizes::Column::Level.eq(level));
        }

        let total = base_query.clone().count(&self.pool).await?;

        let items = base_query
            .order_by_asc(prizes::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            &params,
            total,
        ))
    }

    /// 部分更新
    pub async fn update(&self, id: i64, request: UpdatePrizeRequest) -> AppResult<PrizeResponse> {
        if request.name.is_none() && request.level.is_none() && request.quantity.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        if let Some(q) = request.quantity {
            validate_quantity(q)?;
        }
        if request.name.as_deref().is_some_and(|n| n.trim().is_empty())
            || request.level.as_deref().is_some_and(|l| l.trim().is_empty())
        {
            return Err(AppError::ValidationError(
                "Prize name and level must not be empty".into(),
            ));
        }

        let mut model = prizes::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Prize not found".to_string()))?
            .into_active_model();
        if let Some(name) = &request.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(level) = &request.level {
            model.level = Set(level.trim().to_string());
        }
        if let Some(quantity) = request.quantity {
            model.quantity = Set(quantity);
        }
        let updated = model.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// 删除奖品, 同时清空指向该奖品的必中设置
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        win_biases::Entity::update_many()
            .col_expr(win_biases::Column::PrizeId, Expr::value(Option::<i64>::None))
            .filter(win_biases::Column::PrizeId.eq(id))
            .exec(&txn)
            .await?;

        let res = prizes::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Prize not found".to_string()));
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::models::{CreateParticipantRequest, SetWinBiasRequest};
    use crate::services::{ParticipantService, WinBiasService};

    fn req(name: &str, level: &str, quantity: i64) -> CreatePrizeRequest {
        CreatePrizeRequest {
            name: name.to_string(),
            level: level.to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_validation() {
        let service = PrizeService::new(memory_pool().await);
        assert!(matches!(
            service.create(req("", "一等奖", 1)).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            service.create(req("iPhone 15", " ", 1)).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            service.create(req("iPhone 15", "一等奖", -1)).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_filters() {
        let service = PrizeService::new(memory_pool().await);
        service.create(req("iPhone 15", "一等奖", 1)).await.unwrap();
        service.create(req("AirPods Pro", "二等奖", 5)).await.unwrap();
        service.create(req("AirTag", "二等奖", 10)).await.unwrap();

        assert_eq!(service.list_by_level("二等奖").await.unwrap().len(), 2);
        assert_eq!(service.search("Air").await.unwrap().len(), 2);
        assert_eq!(service.get_by_name("AirTag").await.unwrap().quantity, 10);

        let page = service
            .list(&PrizeQuery {
                keyword: Some("Air".into()),
                level: Some("二等奖".into()),
                page: None,
                per_page: None,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_update_quantity() {
        let service = PrizeService::new(memory_pool().await);
        let prize = service.create(req("iPhone 15", "一等奖", 1)).await.unwrap();
        let updated = service
            .update(
                prize.id,
                UpdatePrizeRequest {
                    quantity: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.name, "iPhone 15");

        assert!(matches!(
            service
                .update(
                    prize.id,
                    UpdatePrizeRequest {
                        quantity: Some(-2),
                        ..Default::default()
                    }
                )
                .await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_clears_bias_targets() {
        let pool = memory_pool().await;
        let service = PrizeService::new(pool.clone());
        let participants = ParticipantService::new(pool.clone());
        let biases = WinBiasService::new(pool);

        let prize = service.create(req("iPhone 15", "一等奖", 1)).await.unwrap();
        let p = participants
            .create(CreateParticipantRequest {
                username: "张三".into(),
                employee_id: "EMP001".into(),
            })
            .await
            .unwrap();
        biases
            .set(
                p.id,
                SetWinBiasRequest {
                    bias: 1,
                    prize_id: Some(prize.id),
                },
            )
            .await
            .unwrap();

        service.delete(prize.id).await.unwrap();
        let bias = biases.get(p.id).await.unwrap();
        assert_eq!(bias.prize_id, None);
        assert_eq!(bias.bias_code, 1);
    }
}
