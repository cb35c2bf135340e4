use actix_cors::Cors;

/// 内网部署的前端与接口可能不同源, 放开所有来源
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .expose_headers(vec!["Content-Disposition"])
        .max_age(3600)
}
