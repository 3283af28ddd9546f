use std::str::FromStr;

use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

use crate::config::Config;
use crate::error::AppError;

/// 日志输出格式, 对应配置项 `logging.format`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(AppError::Config(config::ConfigError::Message(format!(
                "unknown logging.format '{}', expected json, pretty or compact",
                other
            )))),
        }
    }
}

/// 未设置 RUST_LOG 时使用的过滤规则
pub fn default_directives(config: &Config) -> String {
    let level = &config.logging.level;
    format!("{level},product_web={level},tower_http=debug,sqlx=warn")
}

pub fn init_logging(config: &Config) -> Result<(), AppError> {
    let format: LogFormat = config.logging.format.parse()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let formatting_layer = match format {
        LogFormat::Json => fmt::layer().json().with_current_span(true).boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_thread_ids(true).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(false).boxed(),
    };

    registry()
        .with(env_filter)
        .with(formatting_layer)
        .try_init()
        .map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!("Logging initialized with {:?} format", format);
    Ok(())
}
