use crate::models::*;
use crate::services::PrizeService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "prize",
    params(
        ("keyword" = Option<String>, Query, description = "名称模糊匹配"),
        ("level" = Option<String>, Query, description = "等级精确匹配"),
        ("page" = Option<u64>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u64>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取奖品列表成功", body = PrizePage)
    )
)]
/// 分页获取奖品列表
pub async fn list_prizes(
    service: web::Data<PrizeService>,
    query: web::Query<PrizeQuery>,
) -> Result<HttpResponse> {
    match service.list(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/prizes",
    tag = "prize",
    request_body = CreatePrizeRequest,
    responses(
        (status = 200, description = "创建成功", body = PrizeResponse),
        (status = 400, description = "名称/等级为空或数量为负")
    )
)]
pub async fn create_prize(
    service: web::Data<PrizeService>,
    body: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.create(body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/prizes/{id}",
    tag = "prize",
    params(("id" = i64, Path, description = "奖品ID")),
    responses(
        (status = 200, description = "获取成功", body = PrizeResponse),
        (status = 404, description = "奖品不存在")
    )
)]
pub async fn get_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/prizes/by-name/{name}",
    tag = "prize",
    params(("name" = String, Path, description = "奖品名称 (精确匹配)")),
    responses(
        (status = 200, description = "获取成功", body = PrizeResponse),
        (status = 404, description = "奖品不存在")
    )
)]
pub async fn get_prize_by_name(
    service: web::Data<PrizeService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match service.get_by_name(&path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/prizes/{id}",
    tag = "prize",
    params(("id" = i64, Path, description = "奖品ID")),
    request_body = UpdatePrizeRequest,
    responses(
        (status = 200, description = "更新成功", body = PrizeResponse),
        (status = 400, description = "参数错误"),
        (status = 404, description = "奖品不存在")
    )
)]
pub async fn update_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
    body: web::Json<UpdatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/prizes/{id}",
    tag = "prize",
    params(("id" = i64, Path, description = "奖品ID")),
    responses(
        (status = 200, description = "删除成功"),
        (status = 404, description = "奖品不存在")
    )
)]
pub async fn delete_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(true, "奖品已删除"))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/prizes")
            .route("", web::get().to(list_prizes))
            .route("", web::post().to(create_prize))
            .route("/by-name/{name}", web::get().to(get_prize_by_name))
            .route("/{id}", web::get().to(get_prize))
            .route("/{id}", web::put().to(update_prize))
            .route("/{id}", web::delete().to(delete_prize)),
    );
}
