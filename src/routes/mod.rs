pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::me)
            .service(auth::logout),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::list_todos)
            .service(tasks::create_todo)
            .service(tasks::get_todo)
            .service(tasks::update_todo)
            .service(tasks::delete_todo)
            .service(tasks::toggle_todo_completion),
    );
}
