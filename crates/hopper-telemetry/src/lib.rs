//! Tracing setup shared by Hopper binaries.
//!
//! [`init`] installs a global subscriber made of an [`EnvFilter`], a text or
//! JSON formatter, and, when an OTLP endpoint is configured, an
//! OpenTelemetry layer exporting spans over gRPC. Records emitted through
//! the `log` facade are forwarded into tracing.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};
use typed_builder::TypedBuilder;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directive}': {message}")]
    Filter { directive: String, message: String },
    #[error("failed to build OTLP exporter: {0}")]
    Exporter(String),
    #[error("failed to install log bridge: {0}")]
    LogBridge(String),
    #[error("failed to install global subscriber: {0}")]
    Subscriber(String),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct TelemetryConfig {
    #[builder(setter(into))]
    service_name: String,
    /// Filter used when `RUST_LOG` is unset, e.g. `info` or `hopper=debug`.
    #[builder(default = "info".to_string(), setter(into))]
    default_directive: String,
    #[builder(default)]
    format: LogFormat,
    /// OTLP/gRPC collector endpoint, e.g. `http://localhost:4317`.
    #[builder(default)]
    otlp_endpoint: Option<String>,
}

/// Keeps the span exporter alive. Dropping it flushes pending spans.
#[must_use = "dropping the guard shuts the exporter down"]
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("failed to shut down tracer provider: {e}");
            }
        }
    }
}

/// Installs the global tracing subscriber.
///
/// Must be called once, before any other subscriber is set.
pub fn init(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let filter = build_filter(&config.default_directive)?;

    let fmt_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };

    let provider = config
        .otlp_endpoint
        .as_deref()
        .map(|endpoint| build_provider(&config.service_name, endpoint))
        .transpose()?;

    let otel_layer = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(config.service_name.clone()))
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer);

    tracing_log::LogTracer::init().map_err(|e| TelemetryError::LogBridge(e.to_string()))?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| TelemetryError::Subscriber(e.to_string()))?;

    if let Some(provider) = &provider {
        opentelemetry::global::set_tracer_provider(provider.clone());
    }

    Ok(TelemetryGuard { provider })
}

fn build_filter(default_directive: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directive).map_err(|e| TelemetryError::Filter {
            directive: default_directive.to_string(),
            message: e.to_string(),
        }),
    }
}

fn build_provider(service_name: &str, endpoint: &str) -> Result<SdkTracerProvider, TelemetryError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build())
}
