use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::SqlitePool;
use std::net::TcpListener;

use crate::configuration::JwtSettings;
use crate::logger::LoggerMiddleware;
use crate::middleware::JwtMiddleware;
use crate::routes::{
    create_category, create_goal, create_recurring_transaction, create_transaction,
    delete_category, delete_goal, delete_recurring_transaction, delete_transaction,
    get_current_user, get_transaction, health_check, list_categories, list_goals,
    list_recurring_transactions, list_transactions, login, register, summary_report,
    update_goal, update_recurring_transaction, update_transaction,
};

pub fn run(
    listener: TcpListener,
    connection: SqlitePool,
    jwt_config: JwtSettings,
) -> Result<Server, std::io::Error> {
    let connection = web::Data::new(connection);
    let jwt_config_data = web::Data::new(jwt_config.clone());

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(LoggerMiddleware)

            // Shared state
            .app_data(connection.clone())
            .app_data(jwt_config_data.clone())

            // Public routes (no authentication required)
            .route("/health_check", web::get().to(health_check))
            .route("/auth/register", web::post().to(register))
            .route("/auth/login", web::post().to(login))

            // Protected routes (require JWT authentication)
            .service(
                web::scope("/api")
                    .wrap(JwtMiddleware::new(jwt_config.clone()))
                    .route("/me", web::get().to(get_current_user))
                    .route("/transactions", web::post().to(create_transaction))
                    .route("/transactions", web::get().to(list_transactions))
                    .route("/transactions/{id}", web::get().to(get_transaction))
                    .route("/transactions/{id}", web::put().to(update_transaction))
                    .route("/transactions/{id}", web::delete().to(delete_transaction))
                    .route("/categories", web::post().to(create_category))
                    .route("/categories", web::get().to(list_categories))
                    .route("/categories/{id}", web::delete().to(delete_category))
                    .route(
                        "/recurring-transactions",
                        web::post().to(create_recurring_transaction),
                    )
                    .route(
                        "/recurring-transactions",
                        web::get().to(list_recurring_transactions),
                    )
                    .route(
                        "/recurring-transactions/{id}",
                        web::put().to(update_recurring_transaction),
                    )
                    .route(
                        "/recurring-transactions/{id}",
                        web::delete().to(delete_recurring_transaction),
                    )
                    .route("/goals", web::post().to(create_goal))
                    .route("/goals", web::get().to(list_goals))
                    .route("/goals/{id}", web::put().to(update_goal))
                    .route("/goals/{id}", web::delete().to(delete_goal))
                    .route("/reports/summary", web::get().to(summary_report)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
