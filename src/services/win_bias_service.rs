use crate::entities::{
    WinBias, participant_entity as participants, prize_entity as prizes,
    win_bias_entity as win_biases,
};
use crate::error::{AppError, AppResult};
use crate::models::{ParticipantWithBias, SetWinBiasRequest, WinBiasResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct WinBiasService {
    pool: DatabaseConnection,
}

impl WinBiasService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 设置（新增或更新）人员的中奖倾向
    ///
    /// - 必不中 (2) 总是清空必中奖品
    /// - 指定的奖品必须存在
    pub async fn set(
        &self,
        participant_id: i64,
        request: SetWinBiasRequest,
    ) -> AppResult<WinBiasResponse> {
        let bias = WinBias::from_code(request.bias).ok_or_else(|| {
            AppError::ValidationError(format!("Unknown bias code: {}", request.bias))
        })?;
        let prize_id = match bias {
            WinBias::MustNotWin => None,
            _ => request.prize_id,
        };

        participants::Entity::find_by_id(participant_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))?;

        if let Some(prize_id) = prize_id {
            if prizes::Entity::find_by_id(prize_id)
                .one(&self.pool)
                .await?
                .is_none()
            {
                return Err(AppError::ValidationError(format!(
                    "Prize {prize_id} does not exist"
                )));
            }
        }

        let existing = win_biases::Entity::find()
            .filter(win_biases::Column::ParticipantId.eq(participant_id))
            .one(&self.pool)
            .await?;

        let model = match existing {
            Some(m) => {
                let mut am = m.into_active_model();
                am.bias = Set(bias);
                am.prize_id = Set(prize_id);
                am.update(&self.pool).await?
            }
            None => {
                win_biases::ActiveModel {
                    participant_id: Set(participant_id),
                    bias: Set(bias),
                    prize_id: Set(prize_id),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?
            }
        };

        log::info!("Win bias set: participant={participant_id} bias={bias} prize={prize_id:?}");
        Ok(model.into())
    }

    /// 恢复默认 (bias = 0, 无必中奖品)
    pub async fn reset(&self, participant_id: i64) -> AppResult<WinBiasResponse> {
        self.set(
            participant_id,
            SetWinBiasRequest {
                bias: WinBias::Default.code(),
                prize_id: None,
            },
        )
        .await
    }

    pub async fn get(&self, participant_id: i64) -> AppResult<WinBiasResponse> {
        win_biases::Entity::find()
            .filter(win_biases::Column::ParticipantId.eq(participant_id))
            .one(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Win bias not found".to_string()))
    }

    /// 所有倾向记录, 可按代码过滤
    pub async fn list(&self, bias_code: Option<i32>) -> AppResult<Vec<WinBiasResponse>> {
        let mut query = win_biases::Entity::find();
        if let Some(code) = bias_code {
            let bias = WinBias::from_code(code).ok_or_else(|| {
                AppError::ValidationError(format!("Unknown bias code: {code}"))
            })?;
            query = query.filter(win_biases::Column::Bias.eq(bias));
        }
        let list = query
            .order_by_asc(win_biases::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 所有人员及其倾向, 无记录的人员视为默认
    pub async fn list_participants_with_bias(&self) -> AppResult<Vec<ParticipantWithBias>> {
        let biases: HashMap<i64, win_biases::Model> = win_biases::Entity::find()
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|b| (b.participant_id, b))
            .collect();

        let list = participants::Entity::find()
            .order_by_asc(participants::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(list
            .into_iter()
            .map(|p| {
                let bias = biases.get(&p.id);
                ParticipantWithBias {
                    id: p.id,
                    username: p.username,
                    employee_id: p.employee_id,
                    bias: bias.map(|b| b.bias).unwrap_or_default(),
                    prize_id: bias.and_then(|b| b.prize_id),
                }
            })
            .collect())
    }

    /// 按记录 ID 删除
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let res = win_biases::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Win bias not found".to_string()));
        }
        Ok(())
    }
}
