//! Route table for the user resource.

use actix_web::web;

use super::users::{create_user, delete_user, get_user, list_users};

/// Register the user endpoints under `/users`.
///
/// Expects [`super::state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use roster::domain::UsersService;
/// use roster::inbound::http::routes::configure_user_routes;
/// use roster::inbound::http::state::HttpState;
/// use roster::outbound::persistence::InMemoryUserRepository;
///
/// let service = Arc::new(UsersService::new(Arc::new(InMemoryUserRepository::new())));
/// let _app = App::new()
///     .app_data(web::Data::new(HttpState::from_service(service)))
///     .configure(configure_user_routes);
/// ```
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(
                web::resource("")
                    .route(web::post().to(create_user))
                    .route(web::get().to(list_users)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_user))
                    .route(web::delete().to(delete_user)),
            ),
    );
}
