use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::draw::{DrawPhase, DrawResult};
use crate::entities::WinBias;
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::participant::list_participants,
        handlers::participant::create_participant,
        handlers::participant::get_participant,
        handlers::participant::get_participant_by_name,
        handlers::participant::update_participant,
        handlers::participant::delete_participant,
        handlers::prize::list_prizes,
        handlers::prize::create_prize,
        handlers::prize::get_prize,
        handlers::prize::get_prize_by_name,
        handlers::prize::update_prize,
        handlers::prize::delete_prize,
        handlers::win_bias::list_win_biases,
        handlers::win_bias::list_participants_with_bias,
        handlers::win_bias::get_win_bias,
        handlers::win_bias::set_win_bias,
        handlers::win_bias::reset_win_bias,
        handlers::win_bias::delete_win_bias,
        handlers::import::participant_template,
        handlers::import::prize_template,
        handlers::import::import_participants,
        handlers::import::import_prizes,
        handlers::draw::get_status,
        handlers::draw::update_settings,
        handlers::draw::draw_round,
        handlers::draw::draw_remaining,
        handlers::draw::get_results,
        handlers::draw::reset_session,
        handlers::draw::reload_session,
        handlers::draw::export_to_file,
        handlers::draw::download_csv,
        handlers::draw::commit_session,
    ),
    components(
        schemas(
            ApiError,
            ParticipantResponse,
            ParticipantPage,
            CreateParticipantRequest,
            UpdateParticipantRequest,
            ParticipantWithBias,
            PrizeResponse,
            PrizePage,
            CreatePrizeRequest,
            UpdatePrizeRequest,
            WinBias,
            WinBiasResponse,
            SetWinBiasRequest,
            ImportRequest,
            ImportResult,
            FailedRecord,
            DrawPhase,
            DrawResult,
            DrawStatusResponse,
            SessionPrize,
            DrawSettingsRequest,
            DrawRoundResponse,
            ExportRequest,
            ExportResponse,
            CommitResponse,
        )
    ),
    tags(
        (name = "participant", description = "Participant management API"),
        (name = "prize", description = "Prize management API"),
        (name = "win_bias", description = "Win bias (must win / must not win) API"),
        (name = "import", description = "CSV batch import API"),
        (name = "draw", description = "Draw session API"),
    ),
    info(
        title = "Prize Draw Backend API",
        version = "1.0.0",
        description = "Prize draw backend REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
