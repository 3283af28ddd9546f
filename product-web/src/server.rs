use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::products;
use crate::config::Config;
use crate::domain::models::product::Product;
use crate::domain::repositories::Repository;
use crate::error::AppError;
use crate::infrastructure::database::memory::InMemoryRepository;
use crate::infrastructure::database::mysql::{init_mysql, MySqlProductRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub products: Arc<dyn Repository<Product>>,
}

/// 演示数据
pub fn demo_products() -> Vec<Product> {
    vec![
        Product::new(1, "Pen", 100.0, 50, "Red"),
        Product::new(2, "Notebook", 200.0, 500, "Blue"),
    ]
}

/// 配置了数据库地址时连接 MySQL, 否则使用内存仓储
pub async fn init_repository(config: &Config) -> Result<Arc<dyn Repository<Product>>, AppError> {
    if let Some(url) = &config.database.url {
        let pool = init_mysql(config, url).await?;
        return Ok(Arc::new(MySqlProductRepository::new(pool)));
    }

    tracing::warn!("No database configured, products are kept in memory");
    let repository = if config.storage.seed_demo_data {
        InMemoryRepository::with_entities(demo_products())
    } else {
        InMemoryRepository::new()
    };

    Ok(Arc::new(repository))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "environment": state.config.server.environment,
    }))
}

pub fn create_app(state: AppState) -> Router {
    let app_state = Arc::new(state);

    // 健康检查路由
    let health_route = Router::new().route("/health", get(health));

    Router::new()
        .nest(products::BASE_PATH, products::routes())
        .merge(health_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(app_state)
}
