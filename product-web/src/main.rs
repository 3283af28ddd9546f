use product_web::config::Config;
use product_web::error::AppError;
use product_web::logging::init_logging;
use product_web::server::{self, create_app, init_repository};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    init_logging(&config)?;

    tracing::info!("Starting product service ({})", config.server.environment);

    // 初始化仓储
    let products = init_repository(&config).await?;

    // 创建应用状态
    let app_state = server::AppState {
        config: config.clone(),
        products,
    };

    // 创建并启动服务器
    let app = create_app(app_state);
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", &addr);

    axum::serve(listener, app).await?;
    Ok(())
}
