use crate::entities::{participant_entity as participants, win_bias_entity as win_biases};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateParticipantRequest, PaginatedResponse, PaginationParams, ParticipantQuery,
    ParticipantResponse, UpdateParticipantRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct ParticipantService {
    pool: DatabaseConnection,
}

impl ParticipantService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 新增人员
    pub async fn create(&self, request: CreateParticipantRequest) -> AppResult<ParticipantResponse> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(AppError::ValidationError("Username must not be empty".into()));
        }

        let model = participants::ActiveModel {
            username: Set(username.to_string()),
            employee_id: Set(request.employee_id.trim().to_string()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::debug!("Participant created: id={} username={}", model.id, model.username);
        Ok(model.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<ParticipantResponse> {
        participants::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))
    }

    /// 按用户名精确查询（同名时返回 id 最小的一条）
    pub async fn get_by_username(&self, username: &str) -> AppResult<ParticipantResponse> {
        participants::Entity::find()
            .filter(participants::Column::Username.eq(username))
            .order_by_asc(participants::Column::Id)
            .one(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))
    }

    /// 按用户名模糊查询
    pub async fn search(&self, keyword: &str) -> AppResult<Vec<ParticipantResponse>> {
        let list = participants::Entity::find()
            .filter(participants::Column::Username.contains(keyword))
            .order_by_asc(participants::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 分页列表, 可选关键字过滤
    pub async fn list(
        &self,
        query: &ParticipantQuery,
    ) -> AppResult<PaginatedResponse<ParticipantResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base_query = participants::Entity::find();
        if let Some(keyword) = query.keyword.as_deref().filter(|k| !k.is_empty()) {
            base_query = base_query.filter(participants::Column::Username.contains(keyword));
        }

        let total = base_query.clone().count(&self.pool).await?;

        let items = base_query
            .order_by_asc(participants::Column::Id)
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

    /// 部分更新, 至少需要一个字段
    pub async fn update(
        &self,
        id: i64,
        request: UpdateParticipantRequest,
    ) -> AppResult<ParticipantResponse> {
        if request.username.is_none() && request.employee_id.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        if let Some(username) = &request.username {
            if username.trim().is_empty() {
                return Err(AppError::ValidationError("Username must not be empty".into()));
            }
        }

        let mut model = participants::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))?
            .into_active_model();
        if let Some(username) = &request.username {
            model.username = Set(username.trim().to_string());
        }
        if let Some(employee_id) = &request.employee_id {
            model.employee_id = Set(employee_id.trim().to_string());
        }
        let updated = model.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// 删除人员, 先删除其中奖倾向记录
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        win_biases::Entity::delete_many()
            .filter(win_biases::Column::ParticipantId.eq(id))
            .exec(&txn)
            .await?;

        let res = participants::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Participant not found".to_string()));
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::models::SetWinBiasRequest;
    use crate::services::WinBiasService;

    fn req(username: &str, employee_id: &str) -> CreateParticipantRequest {
        CreateParticipantRequest {
            username: username.to_string(),
            employee_id: employee_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let service = ParticipantService::new(memory_pool().await);
        let created = service.create(req(" 张三 ", "EMP001")).await.unwrap();
        assert_eq!(created.username, "张三");

        assert_eq!(service.get(created.id).await.unwrap(), created);
        assert_eq!(service.get_by_username("张三").await.unwrap(), created);
        assert!(matches!(
            service.get_by_username("李四").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = ParticipantService::new(memory_pool().await);
        assert!(matches!(
            service.create(req("   ", "EMP001")).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_search_and_paginate() {
        let service = ParticipantService::new(memory_pool().await);
        for name in ["Alice", "Alina", "Bob"] {
            service.create(req(name, "")).await.unwrap();
        }

        let found = service.search("Ali").await.unwrap();
        assert_eq!(found.len(), 2);

        let page = service
            .list(&ParticipantQuery {
                keyword: None,
                page: Some(2),
                per_page: Some(2),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].username, "Bob");
    }

    #[tokio::test]
    async fn test_update_requires_fields() {
        let service = ParticipantService::new(memory_pool().await);
        let created = service.create(req("张三", "EMP001")).await.unwrap();

        assert!(matches!(
            service
                .update(created.id, UpdateParticipantRequest::default())
                .await,
            Err(AppError::ValidationError(_))
        ));

        let updated = service
            .update(
                created.id,
                UpdateParticipantRequest {
                    username: None,
                    employee_id: Some("EMP009".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "张三");
        assert_eq!(updated.employee_id, "EMP009");
    }

    #[tokio::test]
    async fn test_delete_removes_bias() {
        let pool = memory_pool().await;
        let service = ParticipantService::new(pool.clone());
        let bias_service = WinBiasService::new(pool);
        let created = service.create(req("张三", "EMP001")).await.unwrap();
        bias_service
            .set(
                created.id,
                SetWinBiasRequest {
                    bias: 2,
                    prize_id: None,
                },
            )
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();
        assert!(bias_service.list(None).await.unwrap().is_empty());
        assert!(matches!(
            service.delete(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
