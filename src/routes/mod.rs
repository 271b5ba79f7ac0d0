use actix_web::web;

pub mod admin;
pub mod announcements;
pub mod auth;
pub mod backend_health;
pub mod matches;
pub mod me;
pub mod teams;
pub mod tournaments;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Public auth routes
    cfg.service(
        web::scope("/auth")
            .service(auth::signup)
            .service(auth::login)
            .service(auth::logout)
    );
    cfg.service(
        web::scope("/me")
            .wrap(AuthMiddleware)
            .service(me::get_me)
            .service(me::update_me)
            .service(me::change_password)
    );
    // Literal segments before `{id}` so they are not parsed as ids
    cfg.service(
        web::scope("/tournaments")
            .wrap(AuthMiddleware)
            .service(tournaments::list_tournaments)
            .service(tournaments::create_tournament)
            .service(tournaments::get_assigned_tournaments)
            .service(tournaments::get_tournament)
            .service(tournaments::update_tournament)
            .service(tournaments::delete_tournament)
            .service(tournaments::change_tournament_status)
            .service(tournaments::register_team)
            .service(tournaments::get_tournament_teams)
            .service(tournaments::create_match)
            .service(tournaments::get_tournament_matches)
            .service(tournaments::get_standings)
    );
    cfg.service(
        web::scope("/teams")
            .wrap(AuthMiddleware)
            .service(teams::get_my_teams)
            .service(teams::get_team)
            .service(teams::update_team)
            .service(teams::delete_team)
            .service(teams::approve_team)
            .service(teams::reject_team)
            .service(teams::eliminate_team)
            .service(teams::get_team_matches)
    );
    cfg.service(
        web::scope("/matches")
            .wrap(AuthMiddleware)
            .service(matches::get_match)
            .service(matches::update_match)
            .service(matches::delete_match)
            .service(matches::update_match_score)
            .service(matches::cancel_match)
    );
    cfg.service(
        web::scope("/announcements")
            .wrap(AuthMiddleware)
            .service(announcements::list_announcements)
            .service(announcements::create_announcement)
            .service(announcements::get_announcement)
            .service(announcements::update_announcement)
            .service(announcements::delete_announcement)
    );

    admin::init_admin_routes(cfg);
}
