use crate::{
    api::{attendance, health, student},
    auth::handlers,
    config::Config,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .service(web::resource("/health").route(web::get().to(health::health)))
            .service(web::resource("/login").route(web::post().to(handlers::login)))
            .service(
                web::scope("/students")
                    // /students
                    .service(
                        web::resource("")
                            .route(web::get().to(student::list_students))
                            .route(web::post().to(student::create_student)),
                    )
                    // /students/{name}
                    .service(
                        web::resource("/{name}").route(web::delete().to(student::delete_student)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(web::resource("").route(web::post().to(attendance::mark_attendance)))
                    // /attendance/date/{date}
                    .service(
                        web::resource("/date/{date}")
                            .route(web::get().to(attendance::attendance_by_date)),
                    )
                    // /attendance/{name}
                    .service(
                        web::resource("/{name}")
                            .route(web::get().to(attendance::student_attendance)),
                    ),
            ),
    );
}

// Mutating routes take an `AdminKey` argument; the client resends the
// `x-admin-key` header on every such call.
