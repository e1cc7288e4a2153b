//! 可观测性模块
//!
//! 提供提交计数指标、健康检查和结构化日志初始化。

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::client::QueryClient;
use crate::config::config::LoggingConfig;
use crate::error::AppError;

// ===== Simple Metrics =====

/// 表单提交指标
#[derive(Clone, Default)]
pub struct AppMetrics {
    pub submissions_total: Arc<AtomicU64>,
    pub submissions_answered: Arc<AtomicU64>,
    pub validation_errors_total: Arc<AtomicU64>,
    pub request_errors_total: Arc<AtomicU64>,
    pub network_errors_total: Arc<AtomicU64>,
    pub render_errors_total: Arc<AtomicU64>,
    pub submission_duration_sum: Arc<AtomicU64>,
}

impl AppMetrics {
    /// 记录一次提交的结果与耗时
    pub fn record_submission(&self, outcome: &Result<(), AppError>, duration_ms: u64) {
        self.submissions_total.fetch_add(1, Ordering::SeqCst);
        self.submission_duration_sum
            .fetch_add(duration_ms, Ordering::SeqCst);

        let counter = match outcome {
            Ok(()) => &self.submissions_answered,
            Err(e) if e.is_validation() => &self.validation_errors_total,
            Err(AppError::Request { .. }) => &self.request_errors_total,
            Err(AppError::Network(_)) => &self.network_errors_total,
            Err(_) => &self.render_errors_total,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP submissions_total Total form submissions
# TYPE submissions_total counter
submissions_total {}
# HELP submissions_answered Submissions that rendered an answer
# TYPE submissions_answered counter
submissions_answered {}
# HELP submission_errors_total Submissions that ended in the error display
# TYPE submission_errors_total counter
submission_errors_total{{kind="validation"}} {}
submission_errors_total{{kind="request"}} {}
submission_errors_total{{kind="network"}} {}
submission_errors_total{{kind="render"}} {}
# HELP submission_duration_seconds Submission duration in seconds
# TYPE submission_duration_seconds summary
submission_duration_seconds_sum {}
submission_duration_seconds_count {}
"#,
            self.submissions_total.load(Ordering::SeqCst),
            self.submissions_answered.load(Ordering::SeqCst),
            self.validation_errors_total.load(Ordering::SeqCst),
            self.request_errors_total.load(Ordering::SeqCst),
            self.network_errors_total.load(Ordering::SeqCst),
            self.render_errors_total.load(Ordering::SeqCst),
            self.submission_duration_sum.load(Ordering::SeqCst) as f64 / 1000.0,
            self.submissions_total.load(Ordering::SeqCst),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// 可观测性状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub client: Arc<dyn QueryClient>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String, client: Arc<dyn QueryClient>, metrics: Arc<AppMetrics>) -> Self {
        Self {
            metrics,
            client,
            start_time: Utc::now(),
            version,
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }

    /// 探测后端
    pub async fn check_backend(&self) -> HealthCheck {
        let started = Instant::now();
        let result = self.client.health().await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let (healthy, message) = match result {
            Ok(health) if health.is_healthy() => (true, "backend reachable".to_string()),
            Ok(health) => (false, format!("backend reported status '{}'", health.status)),
            Err(e) => (false, e.to_string()),
        };

        HealthCheck {
            name: "backend".to_string(),
            status: status_label(healthy).to_string(),
            message: Some(message),
            latency_ms: Some(latency_ms),
        }
    }
}

fn status_label(healthy: bool) -> &'static str {
    if healthy { "healthy" } else { "unhealthy" }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态（包含后端探测）
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let backend = state.check_backend().await;
    let all_healthy = backend.status == "healthy";

    let health_status = HealthStatus {
        status: status_label(all_healthy).to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks: vec![backend],
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// `RUST_LOG` 优先于配置中的日志级别。配置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 需要保持到进程结束。
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true);

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{}.log", service_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let builder = builder.with_writer(writer).with_ansi(false);
            if config.structured {
                builder.json().init();
            } else {
                builder.init();
            }
            Some(guard)
        }
        None => {
            let builder = builder.with_writer(std::io::stderr);
            if config.structured {
                builder.json().init();
            } else {
                builder.init();
            }
            None
        }
    }
}
