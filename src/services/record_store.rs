use crate::draw::{BiasEntry, Participant, Prize, RecordStore};
use crate::entities::{
    participant_entity as participants, prize_entity as prizes, win_bias_entity as win_biases,
};
use crate::error::AppResult;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

/// 基于数据库的记录源, 按 id 升序（即插入顺序）返回
#[derive(Clone)]
pub struct DbRecordStore {
    pool: DatabaseConnection,
}

impl DbRecordStore {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

impl RecordStore for DbRecordStore {
    async fn list_participants(&self) -> AppResult<Vec<Participant>> {
        let list = participants::Entity::find()
            .order_by_asc(participants::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list
            .into_iter()
            .map(|m| Participant {
                id: m.id,
                name: m.username,
                ref_code: m.employee_id,
            })
            .collect())
    }

    async fn list_prizes(&self) -> AppResult<Vec<Prize>> {
        let list = prizes::Entity::find()
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list
            .into_iter()
            .map(|m| Prize {
                id: m.id,
                name: m.name,
                category: m.level,
                quantity: m.quantity,
            })
            .collect())
    }

    async fn list_bias(&self) -> AppResult<Vec<BiasEntry>> {
        let list = win_biases::Entity::find()
            .order_by_asc(win_biases::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list
            .into_iter()
            .map(|m| BiasEntry {
                participant_id: m.participant_id,
                bias: m.bias,
                target_prize_id: m.prize_id,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::draw::Snapshot;
    use crate::entities::WinBias;
    use crate::models::{CreateParticipantRequest, CreatePrizeRequest, SetWinBiasRequest};
    use crate::services::{ParticipantService, PrizeService, WinBiasService};

    #[tokio::test]
    async fn test_snapshot_in_insertion_order() {
        let pool = memory_pool().await;
        let participants = ParticipantService::new(pool.clone());
        for (name, code) in [("张三", "EMP001"), ("李四", ""), ("王五", "EMP003")] {
            participants
                .create(CreateParticipantRequest {
                    username: name.into(),
                    employee_id: code.into(),
                })
                .await
                .unwrap();
        }
        let prize = PrizeService::new(pool.clone())
            .create(CreatePrizeRequest {
                name: "iPhone 15".into(),
                level: "一等奖".into(),
                quantity: 2,
            })
            .await
            .unwrap();
        let second = participants.get_by_username("李四").await.unwrap();
        WinBiasService::new(pool.clone())
            .set(
                second.id,
                SetWinBiasRequest {
                    bias: 1,
                    prize_id: Some(prize.id),
                },
            )
            .await
            .unwrap();

        let snap = Snapshot::load(&DbRecordStore::new(pool)).await.unwrap();
        let names: Vec<&str> = snap.participants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["张三", "李四", "王五"]);
        assert_eq!(snap.participants[1].ref_code, "");
        assert_eq!(snap.prizes[0].category, "一等奖");
        assert_eq!(snap.prizes[0].quantity, 2);
        assert_eq!(
            snap.biases,
            vec![BiasEntry {
                participant_id: second.id,
                bias: WinBias::MustWin,
                target_prize_id: Some(prize.id),
            }]
        );
    }
}
