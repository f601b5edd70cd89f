//! Logging and OpenTelemetry tracing initialization.
//!
//! Responsibilities:
//! - Install the global `tracing` subscriber with a level filter and line format
//!   derived from settings.
//! - Attach an OTLP gRPC span exporter when telemetry is enabled and an endpoint is set.
//! - Flush pending spans on shutdown.
//!
//! Does NOT handle:
//! - Deciding whether telemetry is enabled (see `TelemetrySettings::active_endpoint`).
//!
//! Invariants:
//! - `RUST_LOG`, when set and valid, replaces the level from `LOG_LEVEL`.
//! - Log output goes to stderr; stdout is reserved for command output.
//! - Exporter header values never appear in errors or logs.

use backend_config::{LogFormat, LogLevel, Settings};
use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::time::Duration;
use tonic::metadata::{MetadataKey, MetadataMap, MetadataValue};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const TRACER_NAME: &str = "backend";

/// Configuration for logging and OpenTelemetry tracing.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// OTLP gRPC endpoint (e.g., "http://localhost:4317")
    pub otlp_endpoint: Option<String>,
    /// gRPC metadata sent with every export request
    pub otlp_headers: Vec<(String, String)>,
    /// Service name for trace attribution
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Level used when `RUST_LOG` is not set
    pub log_level: LogLevel,
    /// Text or JSON log lines
    pub log_format: LogFormat,
    /// Export timeout
    pub timeout: Duration,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: None,
            otlp_headers: Vec::new(),
            service_name: backend_config::constants::DEFAULT_SERVICE_NAME.to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: LogLevel::default(),
            log_format: LogFormat::default(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl TracingConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the config from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut config = Self::new()
            .with_service_name(settings.service_name())
            .with_service_version(settings.app.version.clone())
            .with_log_level(settings.log_level)
            .with_log_format(settings.log_format);

        if let Some(endpoint) = settings.telemetry.active_endpoint() {
            config = config
                .with_otlp_endpoint(endpoint.as_str())
                .with_otlp_headers(settings.telemetry.headers());
        }
        config
    }

    /// Builder method to set OTLP endpoint.
    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    /// Builder method to set exporter headers.
    pub fn with_otlp_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.otlp_headers = headers;
        self
    }

    /// Builder method to set service name.
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Builder method to set service version.
    pub fn with_service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    /// Builder method to set the fallback log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Builder method to set the log line format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Filter from `RUST_LOG`, falling back to the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.filter_directive()))
    }

    /// Initialize the tracing subscriber, with an OpenTelemetry layer if an
    /// endpoint is configured.
    ///
    /// # Returns
    /// A guard that must be held until application shutdown to ensure
    /// all spans are flushed.
    ///
    /// # Errors
    /// Returns an error if the OTLP pipeline fails to initialize or a global
    /// subscriber is already installed.
    pub fn init(&self) -> Result<TracingGuard, TracingError> {
        use tracing_subscriber::fmt;

        let provider = match self.otlp_endpoint {
            Some(ref endpoint) => Some(self.create_tracer_provider(endpoint)?),
            None => None,
        };

        let otel_layer = provider
            .as_ref()
            .map(|provider| tracing_opentelemetry::layer().with_tracer(provider.tracer(TRACER_NAME)));
        let (text_layer, json_layer) = match self.log_format {
            LogFormat::Text => (Some(fmt::layer().with_writer(std::io::stderr)), None),
            LogFormat::Json => (None, Some(fmt::layer().json().with_writer(std::io::stderr))),
        };

        let result = tracing_subscriber::registry()
            .with(self.env_filter())
            .with(otel_layer)
            .with(text_layer)
            .with(json_layer)
            .try_init();
        result.map_err(|e| TracingError::InitError(e.to_string()))?;

        if let Some(ref endpoint) = self.otlp_endpoint {
            tracing::debug!(endpoint = %endpoint, service = %self.service_name, "exporting spans over OTLP");
        }

        Ok(TracingGuard { provider })
    }

    fn metadata(&self) -> Result<MetadataMap, TracingError> {
        let mut metadata = MetadataMap::new();
        for (key, value) in &self.otlp_headers {
            let name = MetadataKey::from_bytes(key.as_bytes())
                .map_err(|_| TracingError::InvalidHeader { key: key.clone() })?;
            let value = MetadataValue::try_from(value.as_str())
                .map_err(|_| TracingError::InvalidHeader { key: key.clone() })?;
            metadata.insert(name, value);
        }
        Ok(metadata)
    }

    fn create_tracer_provider(&self, endpoint: &str) -> Result<SdkTracerProvider, TracingError> {
        use opentelemetry_otlp::{Protocol, WithExportConfig, WithTonicConfig};
        use opentelemetry_sdk::trace::{BatchConfig, BatchSpanProcessor, Sampler};

        let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .with_timeout(self.timeout)
            .with_protocol(Protocol::Grpc)
            .with_metadata(self.metadata()?)
            .build()
            .map_err(|e| TracingError::InitError(e.to_string()))?;

        let batch_processor = BatchSpanProcessor::builder(otlp_exporter)
            .with_batch_config(BatchConfig::default())
            .build();

        let resource = opentelemetry_sdk::Resource::builder()
            .with_attributes(vec![
                opentelemetry::KeyValue::new("service.name", self.service_name.clone()),
                opentelemetry::KeyValue::new("service.version", self.service_version.clone()),
                opentelemetry::KeyValue::new("telemetry.sdk.name", "opentelemetry-rust"),
                opentelemetry::KeyValue::new("telemetry.sdk.language", "rust"),
            ])
            .build();

        let provider = SdkTracerProvider::builder()
            .with_span_processor(batch_processor)
            .with_resource(resource)
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
            .build();

        Ok(provider)
    }
}

/// Guard that holds tracer resources.
///
/// Must be kept alive until application shutdown to ensure all
/// pending spans are exported.
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl TracingGuard {
    /// Whether spans are being exported.
    pub fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }

    /// Shutdown the tracer and flush any pending spans.
    pub fn shutdown(&self) {
        if let Some(ref provider) = self.provider
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Failed to flush spans: {e}");
        }
    }
}

/// Errors that can occur during tracing initialization.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Failed to initialize OpenTelemetry: {0}")]
    InitError(String),

    /// SAFETY: Only the header name is reported; values usually carry credentials.
    #[error("Invalid OTEL_EXPORTER_OTLP_HEADERS entry '{key}'")]
    InvalidHeader { key: String },
}
