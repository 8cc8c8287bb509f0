use crate::{
    api::{attendance, leave, leave_type, user, work_break},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    governor::middleware::NoOpMiddleware, Governor, GovernorConfigBuilder, PeerIpKeyExtractor,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

/// Per-route limiter. A zero rate clamps to one request per minute;
/// both the replenish period and the burst size must stay non-zero or
/// the governor config refuses to build.
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap();
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let signin_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let signup_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/signin")
                    .wrap(signin_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/signup")
                    .wrap(signup_limiter)
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter)
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(signin_limiter)
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&format!("{}/v1", config.api_prefix))
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(web::resource("/me").route(web::get().to(handlers::me)))
            .service(
                web::scope("/users")
                    .service(web::resource("").route(web::get().to(user::list_users)))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(user::get_user))
                            .route(web::put().to(user::update_user))
                            .route(web::delete().to(user::delete_user)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::create_attendance))
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    .service(
                        web::resource("/check-in")
                            .route(web::post().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/check-out")
                            .route(web::post().to(attendance::check_out)),
                    )
                    .service(
                        web::scope("/user")
                            .service(
                                web::resource("/{user_id}")
                                    .route(web::get().to(attendance::get_user_attendance)),
                            )
                            .service(
                                web::resource("/{user_id}/range")
                                    .route(web::get().to(attendance::get_user_attendance_range)),
                            )
                            .service(
                                web::resource("/{user_id}/recent")
                                    .route(web::get().to(attendance::get_recent_attendance)),
                            ),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(attendance::get_attendance))
                            .route(web::put().to(attendance::update_attendance))
                            .route(web::delete().to(attendance::delete_attendance)),
                    ),
            )
            .service(
                web::scope("/breaks")
                    .service(
                        web::resource("")
                            .route(web::post().to(work_break::create_break))
                            .route(web::get().to(work_break::list_breaks)),
                    )
                    .service(
                        web::resource("/attendance/{attendance_id}")
                            .route(web::get().to(work_break::get_breaks_by_attendance)),
                    )
                    .service(
                        web::resource("/{id}/end").route(web::put().to(work_break::end_break)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(work_break::get_break))
                            .route(web::put().to(work_break::update_break))
                            .route(web::delete().to(work_break::delete_break)),
                    ),
            )
            .service(
                web::scope("/leaves")
                    .service(
                        web::resource("")
                            .route(web::post().to(leave::create_leave))
                            .route(web::get().to(leave::list_leaves)),
                    )
                    .service(
                        web::resource("/pending")
                            .route(web::get().to(leave::list_pending_leaves)),
                    )
                    .service(
                        web::scope("/user")
                            .service(
                                web::resource("/{user_id}")
                                    .route(web::get().to(leave::get_user_leaves)),
                            )
                            .service(
                                web::resource("/{user_id}/range")
                                    .route(web::get().to(leave::get_user_leaves_by_range)),
                            )
                            .service(
                                web::resource("/{user_id}/balance")
                                    .route(web::get().to(leave::get_user_leave_balance)),
                            ),
                    )
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave::approve_leave)),
                    )
                    .service(
                        web::resource("/{id}/reject").route(web::put().to(leave::reject_leave)),
                    )
                    .service(
                        web::resource("/{id}/cancel").route(web::put().to(leave::cancel_leave)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(leave::get_leave))
                            .route(web::put().to(leave::update_leave))
                            .route(web::delete().to(leave::delete_leave)),
                    ),
            )
            .service(
                web::scope("/leave-types")
                    .service(
                        web::resource("")
                            .route(web::post().to(leave_type::create_leave_type))
                            .route(web::get().to(leave_type::list_leave_types)),
                    )
                    .service(
                        web::resource("/active")
                            .route(web::get().to(leave_type::list_active_leave_types)),
                    )
                    .service(
                        web::resource("/stats")
                            .route(web::get().to(leave_type::leave_type_stats)),
                    )
                    .service(
                        web::resource("/code/{code}")
                            .route(web::get().to(leave_type::get_leave_type_by_code)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(leave_type::get_leave_type))
                            .route(web::put().to(leave_type::update_leave_type))
                            .route(web::delete().to(leave_type::delete_leave_type)),
                    ),
            ),
    );
}
