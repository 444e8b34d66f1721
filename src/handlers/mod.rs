pub mod recipe_handlers;

use actix_web::{HttpResponse, web};

/// Register every route. Used by main and by the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(|| async {
        HttpResponse::SeeOther()
            .insert_header(("Location", "/recipes/add"))
            .finish()
    }))
    .route(recipe_handlers::ADD_FORM_PATH, web::get().to(recipe_handlers::add_form))
    .route("/recipes/add/steps.json", web::get().to(recipe_handlers::steps_json))
    // Default 404 handler (must be registered last)
    .default_service(web::to(not_found));
}

pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
