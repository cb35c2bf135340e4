use crate::models::*;
use crate::services::ParticipantService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/participants",
    tag = "participant",
    params(
        ("keyword" = Option<String>, Query, description = "用户名模糊匹配"),
        ("page" = Option<u64>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u64>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取人员列表成功", body = ParticipantPage)
    )
)]
/// 分页获取人员列表
pub async fn list_participants(
    service: web::Data<ParticipantService>,
    query: web::Query<ParticipantQuery>,
) -> Result<HttpResponse> {
    match service.list(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/participants",
    tag = "participant",
    request_body = CreateParticipantRequest,
    responses(
        (status = 200, description = "创建成功", body = ParticipantResponse),
        (status = 400, description = "用户名为空")
    )
)]
pub async fn create_participant(
    service: web::Data<ParticipantService>,
    body: web::Json<CreateParticipantRequest>,
) -> Result<HttpResponse> {
    match service.create(body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/participants/{id}",
    tag = "participant",
    params(("id" = i64, Path, description = "人员ID")),
    responses(
        (status = 200, description = "获取成功", body = ParticipantResponse),
        (status = 404, description = "人员不存在")
    )
)]
pub async fn get_participant(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/participants/by-name/{username}",
    tag = "participant",
    params(("username" = String, Path, description = "用户名 (精确匹配)")),
    responses(
        (status = 200, description = "获取成功", body = ParticipantResponse),
        (status = 404, description = "人员不存在")
    )
)]
pub async fn get_participant_by_name(
    service: web::Data<ParticipantService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match service.get_by_username(&path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/participants/{id}",
    tag = "participant",
    params(("id" = i64, Path, description = "人员ID")),
    request_body = UpdateParticipantRequest,
    responses(
        (status = 200, description = "更新成功", body = ParticipantResponse),
        (status = 400, description = "没有需要更新的字段"),
        (status = 404, description = "人员不存在")
    )
)]
pub async fn update_participant(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
    body: web::Json<UpdateParticipantRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/participants/{id}",
    tag = "participant",
    params(("id" = i64, Path, description = "人员ID")),
    responses(
        (status = 200, description = "删除成功（同时删除中奖倾向）"),
        (status = 404, description = "人员不存在")
    )
)]
pub async fn delete_participant(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(true, "人员已删除"))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn participant_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/participants")
            .route("", web::get().to(list_participants))
            .route("", web::post().to(create_participant))
            .route("/by-name/{username}", web::get().to(get_participant_by_name))
            .route("/{id}", web::get().to(get_participant))
            .route("/{id}", web::put().to(update_participant))
            .route("/{id}", web::delete().to(delete_participant)),
    );
}
