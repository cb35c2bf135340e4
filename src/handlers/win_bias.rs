use crate::models::*;
use crate::services::WinBiasService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/win-biases",
    tag = "win_bias",
    params(("bias" = Option<i32>, Query, description = "按倾向代码过滤: 0 默认 / 1 必中 / 2 必不中")),
    responses(
        (status = 200, description = "获取中奖倾向列表成功", body = [WinBiasResponse]),
        (status = 400, description = "倾向代码无效")
    )
)]
/// 获取中奖倾向列表
pub async fn list_win_biases(
    service: web::Data<WinBiasService>,
    query: web::Query<WinBiasQuery>,
) -> Result<HttpResponse> {
    match service.list(query.bias).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/win-biases/participants",
    tag = "win_bias",
    responses(
        (status = 200, description = "获取人员及其中奖倾向成功", body = [ParticipantWithBias])
    )
)]
/// 人员列表连同倾向, 未设置的人员视为默认
pub async fn list_participants_with_bias(
    service: web::Data<WinBiasService>,
) -> Result<HttpResponse> {
    match service.list_participants_with_bias().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/win-biases/participant/{participant_id}",
    tag = "win_bias",
    params(("participant_id" = i64, Path, description = "人员ID")),
    responses(
        (status = 200, description = "获取成功", body = WinBiasResponse),
        (status = 404, description = "未设置中奖倾向")
    )
)]
pub async fn get_win_bias(
    service: web::Data<WinBiasService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/win-biases/participant/{participant_id}",
    tag = "win_bias",
    params(("participant_id" = i64, Path, description = "人员ID")),
    request_body = SetWinBiasRequest,
    responses(
        (status = 200, description = "设置成功", body = WinBiasResponse),
        (status = 400, description = "倾向代码无效或目标奖品不存在"),
        (status = 404, description = "人员不存在")
    )
)]
/// 设置（或覆盖）人员的中奖倾向
pub async fn set_win_bias(
    service: web::Data<WinBiasService>,
    path: web::Path<i64>,
    body: web::Json<SetWinBiasRequest>,
) -> Result<HttpResponse> {
    match service.set(path.into_inner(), body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/win-biases/participant/{participant_id}/reset",
    tag = "win_bias",
    params(("participant_id" = i64, Path, description = "人员ID")),
    responses(
        (status = 200, description = "已恢复为默认", body = WinBiasResponse),
        (status = 404, description = "人员不存在")
    )
)]
pub async fn reset_win_bias(
    service: web::Data<WinBiasService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.reset(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/win-biases/{id}",
    tag = "win_bias",
    params(("id" = i64, Path, description = "倾向记录ID")),
    responses(
        (status = 200, description = "删除成功"),
        (status = 404, description = "记录不存在")
    )
)]
pub async fn delete_win_bias(
    service: web::Data<WinBiasService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(true, "中奖倾向已删除"))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn win_bias_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/win-biases")
            .route("", web::get().to(list_win_biases))
            .route("/participants", web::get().to(list_participants_with_bias))
            .route("/participant/{participant_id}", web::get().to(get_win_bias))
            .route("/participant/{participant_id}", web::put().to(set_win_bias))
            .route(
                "/participant/{participant_id}/reset",
                web::post().to(reset_win_bias),
            )
            .route("/{id}", web::delete().to(delete_win_bias)),
    );
}
