use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{get, App, HttpServer, Responder};
use dotenvy::dotenv;
use std::sync::Arc;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod repository;
mod routes;
mod service;

use config::Config;
use db::{init_db, init_schema, seed_leave_types};
use repository::{
    MySqlAttendanceRepository, MySqlBreakRepository, MySqlLeaveRepository,
    MySqlLeaveTypeRepository, MySqlUserRepository,
};
use service::{AttendanceService, BreakService, LeaveService, LeaveTypeService, UserService};

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "HRM attendance & leave service"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await;
    init_schema(&pool).await.expect("Failed to create schema");
    seed_leave_types(&pool).await.expect("Failed to seed leave types");

    let user_repo = Arc::new(MySqlUserRepository::new(pool.clone()));
    let attendance_repo = Arc::new(MySqlAttendanceRepository::new(pool.clone()));
    let break_repo = Arc::new(MySqlBreakRepository::new(pool.clone()));
    let leave_repo = Arc::new(MySqlLeaveRepository::new(pool.clone()));
    let leave_type_repo = Arc::new(MySqlLeaveTypeRepository::new(pool.clone()));

    let user_service = Data::new(UserService::new(user_repo.clone()));
    let attendance_service = Data::new(AttendanceService::new(
        attendance_repo.clone(),
        user_repo.clone(),
    ));
    let break_service = Data::new(BreakService::new(break_repo, attendance_repo));
    let leave_service = Data::new(LeaveService::new(leave_repo, user_repo));
    let leave_type_service = Data::new(LeaveTypeService::new(leave_type_repo));

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(user_service.clone())
            .app_data(attendance_service.clone())
            .app_data(break_service.clone())
            .app_data(leave_service.clone())
            .app_data(leave_type_service.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
