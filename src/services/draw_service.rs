use crate::config::DrawConfig;
use crate::draw::{self, DrawResult, DrawSession, RoundOutcome, Snapshot};
use crate::entities::prize_entity as prizes;
use crate::error::{AppError, AppResult};
use crate::models::{
    CommitResponse, DrawRoundResponse, DrawSettingsRequest, DrawStatusResponse, SessionPrize,
};
use crate::services::DbRecordStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 会话与其随机源放在同一把锁里, 保证每轮抽奖原子执行
struct SessionSlot {
    session: DrawSession,
    rng: StdRng,
}

/// 抽奖会话服务
///
/// 进程内只有一个会话; 数据库只在初始化、重置、重新加载和提交时访问,
/// 抽奖过程本身不触碰数据库。
#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    store: DbRecordStore,
    slot: Arc<Mutex<SessionSlot>>,
}

impl DrawService {
    pub async fn new(pool: DatabaseConnection, config: &DrawConfig) -> AppResult<Self> {
        let store = DbRecordStore::new(pool.clone());
        let snapshot = Snapshot::load(&store).await?;
        log::info!(
            "Draw session loaded: {} participants, {} prizes, {} bias entries",
            snapshot.participants.len(),
            snapshot.prizes.len(),
            snapshot.biases.len()
        );

        if !(1..=i64::from(u32::MAX)).contains(&config.total_rounds) {
            log::warn!(
                "Invalid draw.total_rounds {}, falling back to 1 round",
                config.total_rounds
            );
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = DrawSession::new(
            snapshot,
            config.total_rounds,
            config.allow_duplicate_winners,
        );

        Ok(Self {
            pool,
            store,
            slot: Arc::new(Mutex::new(SessionSlot { session, rng })),
        })
    }

    fn status_of(session: &DrawSession) -> DrawStatusResponse {
        let state = session.state();
        DrawStatusResponse {
            current_round: state.current_round(),
            total_rounds: state.total_rounds(),
            allow_duplicate_winners: state.allow_duplicate_winners(),
            phase: session.phase(),
            results_count: session.results().len(),
            prizes: session
                .snapshot()
                .prizes
                .iter()
                .map(|p| SessionPrize {
                    id: p.id,
                    name: p.name.clone(),
                    level: p.category.clone(),
                    remaining: state.remaining_quantity(p.id),
                })
                .collect(),
        }
    }

    pub async fn status(&self) -> DrawStatusResponse {
        let slot = self.slot.lock().await;
        Self::status_of(&slot.session)
    }

    /// 修改总轮次 / 是否允许重复中奖; 非正的轮次被忽略
    pub async fn update_settings(&self, request: DrawSettingsRequest) -> DrawStatusResponse {
        let mut slot = self.slot.lock().await;
        if let Some(n) = request.total_rounds {
            slot.session.set_total_rounds(n);
        }
        if let Some(allow) = request.allow_duplicate_winners {
            slot.session.set_allow_duplicate_winners(allow);
        }
        Self::status_of(&slot.session)
    }

    /// 抽取一轮
    pub async fn draw_one(&self) -> DrawRoundResponse {
        let mut guard = self.slot.lock().await;
        let SessionSlot { session, rng } = &mut *guard;
        let outcome = session.draw_one_round(rng);
        let round = session.state().current_round();

        match &outcome {
            RoundOutcome::Winner(r) => log::info!(
                "Round {round}: {} ({}) won {} [{}]",
                r.participant_name,
                r.ref_code,
                r.prize_name,
                r.prize_category
            ),
            other => log::info!("Round {round}: no result ({})", other.reason()),
        }

        DrawRoundResponse {
            round,
            outcome: outcome.reason().to_string(),
            result: outcome.into_result(),
        }
    }

    /// 连续抽取直到会话结束, 返回本次抽出的结果
    pub async fn draw_remaining(&self) -> Vec<DrawResult> {
        let mut guard = self.slot.lock().await;
        let SessionSlot { session, rng } = &mut *guard;
        let drawn = session.draw_remaining(rng);
        log::info!(
            "Drew remaining rounds: {} winners, session at round {}/{}",
            drawn.len(),
            session.state().current_round(),
            session.state().total_rounds()
        );
        drawn
    }

    pub async fn results(&self) -> Vec<DrawResult> {
        self.slot.lock().await.session.results().to_vec()
    }

    /// 清空结果与计数, 并从数据库重新加载
    pub async fn reset(&self) -> AppResult<DrawStatusResponse> {
        let snapshot = Snapshot::load(&self.store).await?;
        let mut slot = self.slot.lock().await;
        slot.session.reset(snapshot);
        log::info!("Draw session reset");
        Ok(Self::status_of(&slot.session))
    }

    /// 重新加载人员/奖品/倾向, 保留已抽结果与轮次
    pub async fn reload(&self) -> AppResult<DrawStatusResponse> {
        let snapshot = Snapshot::load(&self.store).await?;
        let mut slot = self.slot.lock().await;
        slot.session.reload(snapshot);
        log::info!("Draw session data reloaded");
        Ok(Self::status_of(&slot.session))
    }

    /// 导出结果到文件, 失败时返回 false
    pub async fn export_to_file(&self, path: &str) -> AppResult<bool> {
        let path = path.trim();
        if path.is_empty() {
            return Err(AppError::ValidationError(
                "Export path must not be empty".into(),
            ));
        }
        let results = self.results().await;
        Ok(draw::export_to_path(&results, Path::new(path)))
    }

    /// 导出结果为 CSV 内容
    pub async fn export_csv(&self) -> AppResult<Vec<u8>> {
        let results = self.results().await;
        let mut buf = Vec::new();
        draw::write_results(&results, &mut buf)?;
        Ok(buf)
    }

    /// 将会话内剩余数量回写为奖品库存
    pub async fn commit(&self) -> AppResult<CommitResponse> {
        let remaining: Vec<(i64, i64)> = {
            let slot = self.slot.lock().await;
            let state = slot.session.state();
            slot.session
                .snapshot()
                .prizes
                .iter()
                .map(|p| (p.id, state.remaining_quantity(p.id)))
                .collect()
        };

        let txn = self.pool.begin().await?;
        let mut prizes_updated = 0;
        for (id, quantity) in &remaining {
            let res = prizes::Entity::update_many()
                .col_expr(prizes::Column::Quantity, Expr::value(*quantity))
                .filter(prizes::Column::Id.eq(*id))
                .exec(&txn)
                .await?;
            prizes_updated += res.rows_affected as usize;
        }
        txn.commit().await?;

        log::info!("Committed session quantities for {prizes_updated} prizes");
        Ok(CommitResponse { prizes_updated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::draw::DrawPhase;
    use crate::models::{CreateParticipantRequest, CreatePrizeRequest, SetWinBiasRequest};
    use crate::services::{ParticipantService, PrizeService, WinBiasService};

    fn config(total_rounds: i64) -> DrawConfig {
        DrawConfig {
            total_rounds,
            allow_duplicate_winners: true,
            seed: Some(7),
        }
    }

    async fn seed_data(pool: &DatabaseConnection) -> (Vec<i64>, i64) {
        let participants = ParticipantService::new(pool.clone());
        let mut ids = Vec::new();
        for (name, code) in [("张三", "EMP001"), ("李四", "EMP002"), ("王五", "EMP003")] {
            let p = participants
                .create(CreateParticipantRequest {
                    username: name.into(),
                    employee_id: code.into(),
                })
                .await
                .unwrap();
            ids.push(p.id);
        }
        let prize = PrizeService::new(pool.clone())
            .create(CreatePrizeRequest {
                name: "iPhone 15".into(),
                level: "一等奖".into(),
                quantity: 2,
            })
            .await
            .unwrap();
        (ids, prize.id)
    }

    #[tokio::test]
    async fn test_draw_does_not_touch_stored_quantity_until_commit() {
        let pool = memory_pool().await;
        let (_, prize_id) = seed_data(&pool).await;
        let service = DrawService::new(pool.clone(), &config(3)).await.unwrap();

        let drawn = service.draw_remaining().await;
        assert_eq!(drawn.len(), 2);
        let status = service.status().await;
        assert_eq!(status.phase, DrawPhase::Complete);
        assert_eq!(status.current_round, 3);
        assert_eq!(status.prizes[0].remaining, 0);

        let prizes = PrizeService::new(pool.clone());
        assert_eq!(prizes.get(prize_id).await.unwrap().quantity, 2);

        let committed = service.commit().await.unwrap();
        assert_eq!(committed.prizes_updated, 1);
        assert_eq!(prizes.get(prize_id).await.unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn test_reset_picks_up_external_edits() {
        let pool = memory_pool().await;
        let (ids, _) = seed_data(&pool).await;
        let service = DrawService::new(pool.clone(), &config(1)).await.unwrap();

        let first = service.draw_one().await;
        assert_eq!(first.round, 1);
        assert!(first.result.is_some());
        let again = service.draw_one().await;
        assert_eq!(again.outcome, "session_complete");
        assert!(again.result.is_none());

        WinBiasService::new(pool.clone())
            .set(
                ids[2],
                SetWinBiasRequest {
                    bias: 1,
                    prize_id: None,
                },
            )
            .await
            .unwrap();

        let status = service.reset().await.unwrap();
        assert_eq!(status.current_round, 0);
        assert_eq!(status.results_count, 0);

        let round = service.draw_one().await;
        assert_eq!(round.result.unwrap().participant_id, ids[2]);
    }

    #[tokio::test]
    async fn test_settings_ignore_invalid_rounds() {
        let pool = memory_pool().await;
        seed_data(&pool).await;
        let service = DrawService::new(pool, &config(4)).await.unwrap();

        let status = service
            .update_settings(DrawSettingsRequest {
                total_rounds: Some(0),
                allow_duplicate_winners: Some(false),
            })
            .await;
        assert_eq!(status.total_rounds, 4);
        assert!(!status.allow_duplicate_winners);
    }

    #[tokio::test]
    async fn test_invalid_configured_rounds_fall_back_to_one() {
        let pool = memory_pool().await;
        seed_data(&pool).await;
        for total_rounds in [0, -3, i64::from(u32::MAX) + 1] {
            let service = DrawService::new(pool.clone(), &config(total_rounds))
                .await
                .unwrap();
            let status = service.status().await;
            assert_eq!(status.total_rounds, 1);
            assert_eq!(status.phase, DrawPhase::Idle);
        }
    }

    #[tokio::test]
    async fn test_draw_remaining_with_huge_total_completes_once_prizes_run_out() {
        let pool = memory_pool().await;
        seed_data(&pool).await;
        let service = DrawService::new(pool, &config(i64::from(u32::MAX)))
            .await
            .unwrap();

        let drawn = service.draw_remaining().await;
        assert_eq!(drawn.len(), 2);
        let status = service.status().await;
        assert_eq!(status.current_round, u32::MAX);
        assert_eq!(status.phase, DrawPhase::Complete);
    }

    #[tokio::test]
    async fn test_export_csv_and_file() {
        let pool = memory_pool().await;
        seed_data(&pool).await;
        let service = DrawService::new(pool, &config(2)).await.unwrap();
        service.draw_remaining().await;

        let csv = String::from_utf8(service.export_csv().await.unwrap()).unwrap();
        assert_eq!(csv.lines().count(), 3);

        assert!(matches!(
            service.export_to_file("  ").await,
            Err(AppError::ValidationError(_))
        ));
        let bad = std::env::temp_dir()
            .join("no-such-draw-dir")
            .join("out.csv");
        assert!(!service.export_to_file(bad.to_str().unwrap()).await.unwrap());
    }
}
