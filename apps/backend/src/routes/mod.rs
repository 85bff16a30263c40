use actix_web::web;

pub mod games;
pub mod health;
pub mod rooms;

/// Register every route. `main.rs` and the HTTP tests share this so both see
/// the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(
        web::scope("/api/rooms")
            .configure(rooms::configure_routes)
            .configure(games::configure_routes),
    );
}
