use actix_web::web;

pub mod dto;
pub mod health;
pub mod modules;
pub mod turns;

use crate::extractors::query_config;

/// Register every HTTP route. Shared by `main` and the test app builder.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config());

    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/module").configure(modules::configure_routes));
    cfg.service(web::scope("/turn").configure(turns::configure_routes));
}
