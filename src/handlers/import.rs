use crate::models::*;
use crate::services::ImportService;
use actix_web::{HttpResponse, ResponseError, Result, web};

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

fn csv_attachment(filename: &str, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(CSV_CONTENT_TYPE)
        .append_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(body)
}

#[utoipa::path(
    get,
    path = "/import/templates/participants",
    tag = "import",
    responses(
        (status = 200, description = "人员导入模板 (CSV)", content_type = "text/csv")
    )
)]
pub async fn participant_template(service: web::Data<ImportService>) -> Result<HttpResponse> {
    match service.participant_template() {
        Ok(body) => Ok(csv_attachment("participants_template.csv", body)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/import/templates/prizes",
    tag = "import",
    responses(
        (status = 200, description = "奖品导入模板 (CSV)", content_type = "text/csv")
    )
)]
pub async fn prize_template(service: web::Data<ImportService>) -> Result<HttpResponse> {
    match service.prize_template() {
        Ok(body) => Ok(csv_attachment("prizes_template.csv", body)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/import/participants",
    tag = "import",
    request_body = ImportRequest,
    responses(
        (status = 200, description = "导入完成, 返回成功/失败统计", body = ImportResult),
        (status = 400, description = "CSV 表头无法解析")
    )
)]
/// 批量导入人员, 单行失败不影响其它行
pub async fn import_participants(
    service: web::Data<ImportService>,
    body: web::Json<ImportRequest>,
) -> Result<HttpResponse> {
    match service.import_participants(&body.content).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/import/prizes",
    tag = "import",
    request_body = ImportRequest,
    responses(
        (status = 200, description = "导入完成, 返回成功/失败统计", body = ImportResult),
        (status = 400, description = "CSV 表头无法解析")
    )
)]
/// 批量导入奖品, 数量无法解析时按 0 处理
pub async fn import_prizes(
    service: web::Data<ImportService>,
    body: web::Json<ImportRequest>,
) -> Result<HttpResponse> {
    match service.import_prizes(&body.content).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn import_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/import")
            .route("/templates/participants", web::get().to(participant_template))
            .route("/templates/prizes", web::get().to(prize_template))
            .route("/participants", web::post().to(import_participants))
            .route("/prizes", web::post().to(import_prizes)),
    );
}
