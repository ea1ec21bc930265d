use std::net::TcpListener;

use fintrack::configuration::get_configuration;
use fintrack::startup::run;
use fintrack::store::{create_tables, get_connection_pool};
use fintrack::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // 구조화된 로깅 초기화
    init_telemetry();

    tracing::info!("Starting application");

    // 설정 로드
    let configuration = match get_configuration() {
        Ok(config) => {
            tracing::info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            tracing::error!("Failed to read configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Configuration error",
            ));
        }
    };

    // 데이터베이스 연결 풀 생성 및 스키마 준비
    tracing::info!(path = %configuration.database.path, "Opening database");

    let pool = get_connection_pool(&configuration.database)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create connection pool: {}", e);
            std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Database connection error",
            )
        })?;

    create_tables(&pool).await.map_err(|e| {
        tracing::error!("Failed to create database schema: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, "Database schema error")
    })?;

    tracing::info!("Database ready");

    // 서버 주소 설정
    let address = configuration.application.address();
    tracing::info!("Binding server to address: {}", address);

    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    // JWT 설정 저장
    let jwt_config = configuration.jwt.clone();

    // 서버 실행
    let server = run(listener, pool, jwt_config)?;
    tracing::info!("Server started successfully");

    let _ = server.await;

    Ok(())
}
