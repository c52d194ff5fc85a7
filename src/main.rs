use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, error, warn};

use school_records::config::AppConfig;
use school_records::runtime::lifetime;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 记录程序启动时间
    let start_datetime = chrono::Utc::now();

    // 初始化配置
    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        std::process::exit(1);
    }
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    warn!(
        "Starting {}...
        Project: {}
        Version: {}
        Authors: {}",
        config.app.system_name,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );

    let startup = match lifetime::startup::prepare_startup(config).await {
        Ok(startup) => startup,
        Err(e) => {
            #[cfg(debug_assertions)]
            let message = if config.is_development() {
                e.format_colored()
            } else {
                e.format_simple()
            };
            #[cfg(not(debug_assertions))]
            let message = e.format_simple();
            error!(code = e.code(), "Startup failed: {}", message);
            std::process::exit(1);
        }
    };

    debug!(
        "Startup completed in {} ms (admin created: {})",
        chrono::Utc::now()
            .signed_duration_since(start_datetime)
            .num_milliseconds(),
        startup.admin_created
    );

    if let Err(e) = startup.client.disconnect().await {
        error!("Failed to close database connection: {}", e);
        std::process::exit(1);
    }
}
