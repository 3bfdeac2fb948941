/// Logging setup
///
/// log.level 기본 필터, RUST_LOG가 있으면 RUST_LOG 우선
/// log.format: json (구조화 로그) / text (개발용)
use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::shared::config::{LogConfig, LogFormat};

/// 전역 subscriber 설치 (프로세스당 1회)
/// Install the global tracing subscriber
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let env_filter = build_filter(&config.level)?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false))
            .try_init(),
    }
    .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| anyhow!("invalid log level {:?}: {}", level, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directives_parse() {
        assert!(EnvFilter::try_new("info").is_ok());
        assert!(EnvFilter::try_new("market_api=debug,tower_http=info").is_ok());
    }

    #[test]
    fn test_init_twice_reports_error_instead_of_panicking() {
        let config = LogConfig {
            level: "info".to_string(),
            format: LogFormat::Text,
        };

        let first = init_logging(&config);
        let second = init_logging(&config);

        // 다른 테스트가 먼저 설치했을 수 있으므로 두 번째 호출만 확인
        let _ = first;
        assert!(second.is_err());
    }
}
