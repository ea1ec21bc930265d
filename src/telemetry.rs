use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 구조화된 JSON 로깅을 초기화합니다.
/// RUST_LOG 환경 변수로 로그 레벨을 제어하며, 기본값은 info입니다.
pub fn init_telemetry() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let formatting_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(formatting_layer)
        .init();
}
