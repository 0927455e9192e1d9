use actix_web::web;

pub mod amateur;
pub mod backend_health;
pub mod prode;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Amateur match routes (require authentication)
    cfg.service(
        web::scope("/amateur")
            .wrap(AuthMiddleware)
            .service(amateur::create_match)
            .service(amateur::list_group_matches)
            .service(amateur::delete_match)
            .service(amateur::add_player)
            .service(amateur::remove_player)
            .service(amateur::open_voting)
            .service(amateur::close_match)
            .service(amateur::cast_vote)
            .service(amateur::match_summary)
            .service(amateur::player_detail)
            .service(amateur::get_formations),
    );
    // Prediction contest routes (require authentication)
    cfg.service(
        web::scope("/prode")
            .wrap(AuthMiddleware)
            .service(prode::list_predictions)
            .service(prode::upsert_prediction)
            .service(prode::delete_prediction)
            .service(prode::score_finalized)
            .service(prode::simulate),
    );
}
