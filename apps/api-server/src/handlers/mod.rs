//! HTTP handlers and route configuration.

mod graphql;
mod health;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, graphiql: bool) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/graphql", web::post().to(graphql::graphql));

    if graphiql {
        cfg.route("/graphql", web::get().to(graphql::graphiql));
    }
}
