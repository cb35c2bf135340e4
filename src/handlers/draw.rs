use crate::draw::DrawResult;
use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/draw/status",
    tag = "draw",
    responses(
        (status = 200, description = "当前会话状态", body = DrawStatusResponse)
    )
)]
/// 当前轮次、设置与会话内剩余奖品
pub async fn get_status(service: web::Data<DrawService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(service.status().await)))
}

#[utoipa::path(
    put,
    path = "/draw/settings",
    tag = "draw",
    request_body = DrawSettingsRequest,
    responses(
        (status = 200, description = "设置已更新", body = DrawStatusResponse)
    )
)]
/// 修改总轮次 / 是否允许重复中奖
/// 总轮次 <= 0 时保持原值
pub async fn update_settings(
    service: web::Data<DrawService>,
    body: web::Json<DrawSettingsRequest>,
) -> Result<HttpResponse> {
    let status = service.update_settings(body.into_inner()).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
}

#[utoipa::path(
    post,
    path = "/draw/round",
    tag = "draw",
    responses(
        (status = 200, description = "抽取一轮; outcome 为 winner 时带结果", body = DrawRoundResponse)
    )
)]
pub async fn draw_round(service: web::Data<DrawService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(service.draw_one().await)))
}

#[utoipa::path(
    post,
    path = "/draw/remaining",
    tag = "draw",
    responses(
        (status = 200, description = "抽完剩余轮次, 返回本次产生的结果", body = [DrawResult])
    )
)]
pub async fn draw_remaining(service: web::Data<DrawService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(service.draw_remaining().await)))
}

#[utoipa::path(
    get,
    path = "/draw/results",
    tag = "draw",
    responses(
        (status = 200, description = "本次会话全部结果 (按轮次顺序)", body = [DrawResult])
    )
)]
pub async fn get_results(service: web::Data<DrawService>) -> Result<HttpResponse> {
    let results: Vec<DrawResult> = service.results().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(results)))
}

#[utoipa::path(
    post,
    path = "/draw/reset",
    tag = "draw",
    responses(
        (status = 200, description = "会话已重置并重新加载数据", body = DrawStatusResponse)
    )
)]
pub async fn reset_session(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.reset().await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw/reload",
    tag = "draw",
    responses(
        (status = 200, description = "数据已重新加载, 已抽结果保留", body = DrawStatusResponse)
    )
)]
pub async fn reload_session(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.reload().await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw/export",
    tag = "draw",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "exported 表示是否写入成功", body = ExportResponse),
        (status = 400, description = "路径为空")
    )
)]
/// 导出结果到服务器本地文件
pub async fn export_to_file(
    service: web::Data<DrawService>,
    body: web::Json<ExportRequest>,
) -> Result<HttpResponse> {
    match service.export_to_file(&body.path).await {
        Ok(exported) => Ok(HttpResponse::Ok().json(ApiResponse::success(ExportResponse { exported }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draw/export.csv",
    tag = "draw",
    responses(
        (status = 200, description = "下载结果 CSV", content_type = "text/csv")
    )
)]
pub async fn download_csv(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.export_csv().await {
        Ok(body) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .append_header((
                "Content-Disposition",
                "attachment; filename=\"lottery_results.csv\"",
            ))
            .body(body)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw/commit",
    tag = "draw",
    responses(
        (status = 200, description = "会话剩余数量已写回奖品库存", body = CommitResponse)
    )
)]
pub async fn commit_session(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.commit().await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/draw")
            .route("/status", web::get().to(get_status))
            .route("/settings", web::put().to(update_settings))
            .route("/round", web::post().to(draw_round))
            .route("/remaining", web::post().to(draw_remaining))
            .route("/results", web::get().to(get_results))
            .route("/reset", web::post().to(reset_session))
            .route("/reload", web::post().to(reload_session))
            .route("/export", web::post().to(export_to_file))
            .route("/export.csv", web::get().to(download_csv))
            .route("/commit", web::post().to(commit_session)),
    );
}
