use actix_web::web;

use crate::handlers::admin::user_handler;
use crate::middleware::admin::AdminMiddleware;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            // User management routes
            .service(
                web::resource("/users")
                    .route(web::get().to(user_handler::get_users))
            )
            .service(
                web::resource("/users/management")
                    .route(web::post().to(user_handler::create_management_user))
            )
            .service(
                web::resource("/users/captain")
                    .route(web::post().to(user_handler::create_captain_user))
            )
            .service(
                web::resource("/users/{id}")
                    .route(web::get().to(user_handler::get_user_by_id))
                    .route(web::delete().to(user_handler::delete_user))
            )
            // Tournament assignment of management users
            .service(
                web::resource("/users/{id}/tournaments/{tournament_id}")
                    .route(web::post().to(user_handler::assign_tournament))
                    .route(web::delete().to(user_handler::unassign_tournament))
            )
    );
}
