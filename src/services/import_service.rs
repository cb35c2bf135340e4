use crate::error::{AppError, AppResult};
use crate::models::{CreateParticipantRequest, CreatePrizeRequest, ImportResult};
use crate::services::{ParticipantService, PrizeService};
use csv::{ReaderBuilder, StringRecord, Trim};

const PARTICIPANT_HEADERS: [&str; 2] = ["username", "employee_id"];
const PRIZE_HEADERS: [&str; 3] = ["name", "level", "quantity"];

/// 批量导入（CSV, UTF-8）
///
/// 每一行独立写入, 失败的行记录行号与原因, 不影响其它行。
#[derive(Clone)]
pub struct ImportService {
    participant_service: ParticipantService,
    prize_service: PrizeService,
}

/// 按表头名称取值, 列缺失时视为空
struct Row<'a> {
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl Row<'_> {
    fn get(&self, column: &str) -> &str {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|i| self.record.get(i))
            .unwrap_or("")
    }
}

fn template(headers: &[&str], rows: &[&[&str]]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(*row)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::InternalError(e.to_string()))
}

fn reader(content: &str) -> csv::Reader<&[u8]> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes())
}

impl ImportService {
    pub fn new(participant_service: ParticipantService, prize_service: PrizeService) -> Self {
        Self {
            participant_service,
            prize_service,
        }
    }

    /// 人员导入模板
    pub fn participant_template(&self) -> AppResult<String> {
        template(
            &PARTICIPANT_HEADERS,
            &[&["张三", "EMP001"], &["李四", "EMP002"]],
        )
    }

    /// 奖品导入模板
    pub fn prize_template(&self) -> AppResult<String> {
        template(
            &PRIZE_HEADERS,
            &[&["iPhone 15", "一等奖", "5"], &["AirPods Pro", "二等奖", "10"]],
        )
    }

    pub async fn import_participants(&self, content: &str) -> AppResult<ImportResult> {
        let mut rdr = reader(content);
        let headers = rdr.headers()?.clone();
        let mut result = ImportResult::default();

        for (i, record) in rdr.records().enumerate() {
            let row_no = i + 1;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    result.record_failure(row_no, e.to_string());
                    continue;
                }
            };
            let row = Row {
                headers: &headers,
                record: &record,
            };

            let username = row.get("username");
            if username.is_empty() {
                result.record_failure(row_no, "用户名不能为空");
                continue;
            }
            let request = CreateParticipantRequest {
                username: username.to_string(),
                employee_id: row.get("employee_id").to_string(),
            };
            match self.participant_service.create(request).await {
                Ok(_) => result.success += 1,
                Err(e) => result.record_failure(row_no, e.to_string()),
            }
        }

        log::info!(
            "Participant import finished: {} succeeded, {} failed",
            result.success,
            result.failed
        );
        Ok(result)
    }

    pub async fn import_prizes(&self, content: &str) -> AppResult<ImportResult> {
        let mut rdr = reader(content);
        let headers = rdr.headers()?.clone();
        let mut result = ImportResult::default();

        for (i, record) in rdr.records().enumerate() {
            let row_no = i + 1;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    result.record_failure(row_no, e.to_string());
                    continue;
                }
            };
            let row = Row {
                headers: &headers,
                record: &record,
            };

            let name = row.get("name");
            let level = row.get("level");
            if name.is_empty() {
                result.record_failure(row_no, "奖品名称不能为空");
                continue;
            }
            if level.is_empty() {
                result.record_failure(row_no, "奖品等级不能为空");
                continue;
            }
            // 数量无法解析时按 0 处理
            let quantity = row.get("quantity").parse::<i64>().unwrap_or(0);

            let request = CreatePrizeRequest {
                name: name.to_string(),
                level: level.to_string(),
                quantity,
            };
            match self.prize_service.create(request).await {
                Ok(_) => result.success += 1,
                Err(e) => result.record_failure(row_no, e.to_string()),
            }
        }

        log::info!(
            "Prize import finished: {} succeeded, {} failed",
            result.success,
            result.failed
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::models::PrizeQuery;

    async fn service() -> (ImportService, PrizeService) {
        let pool = memory_pool().await;
        let prizes = PrizeService::new(pool.clone());
        (
            ImportService::new(ParticipantService::new(pool), prizes.clone()),
            prizes,
        )
    }

    #[tokio::test]
    async fn test_templates_round_trip_through_import() {
        let (svc, _) = service().await;
        let template = svc.participant_template().unwrap();
        assert!(template.starts_with("username,employee_id\n"));
        let result = svc.import_participants(&template).await.unwrap();
        assert_eq!(result.success, 2);
        assert_eq!(result.failed, 0);

        let template = svc.prize_template().unwrap();
        assert!(template.starts_with("name,level,quantity\n"));
        assert_eq!(svc.import_prizes(&template).await.unwrap().success, 2);
    }

    #[tokio::test]
    async fn test_import_participants_collects_failures() {
        let (svc, _) = service().await;
        let content = "\u{feff}username,employee_id\n张三,EMP001\n ,EMP002\n李四,\n";
        let result = svc.import_participants(content).await.unwrap();
        assert_eq!(result.success, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.failed_records[0].row, 2);
    }

    #[tokio::test]
    async fn test_import_prizes_defaults_bad_quantity() {
        let (svc, prizes) = service().await;
        let content = "name,level,quantity\niPhone 15,一等奖,abc\nAirTag,,3\n,三等奖,1\nMug,三等奖,-4\n";
        let result = svc.import_prizes(content).await.unwrap();
        assert_eq!(result.success, 1);
        assert_eq!(result.failed, 3);

        let list = prizes
            .list(&PrizeQuery {
                keyword: None,
                level: None,
                page: None,
                per_page: None,
            })
            .await
            .unwrap();
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].name, "iPhone 15");
        assert_eq!(list.data[0].quantity, 0);
    }
}
