//! Tracing initialization and subscriber setup.

use std::path::Path;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::file_writer::{FileWriter, RotatingMakeWriter};
use super::tracer::{self, SCOPE_NAME};
use crate::Config;

/// Plain-text log file inside the data directory.
pub const LOG_FILE_NAME: &str = "practice-feed.log";

/// Span export file inside the data directory.
pub const TRACE_FILE_NAME: &str = "practice-feed-spans.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an `EnvFilter`, a text log layer and an
/// OpenTelemetry layer, both writing to rotating files under the data dir.
///
/// The filter comes from `RUST_LOG` if set, else `config.trace_level`, else
/// `info`. Does nothing if the data directory cannot be created, and only the
/// first call in a process takes effect.
pub fn init_tracing(config: &Config) {
    let data_dir = config.resolved_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let directives = resolve_directives(
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        config.trace_level.as_deref(),
    );
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    install(&data_dir, filter);
}

fn install(data_dir: &Path, filter: EnvFilter) {
    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SCOPE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    let log_writer = RotatingMakeWriter::new(FileWriter::new(data_dir.join(LOG_FILE_NAME)));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(log_writer);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}

/// Picks the filter directives: environment, then configuration, then `info`.
fn resolve_directives(env: Option<String>, configured: Option<&str>) -> String {
    env.filter(|v| !v.trim().is_empty())
        .or_else(|| {
            configured
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_wins_over_configuration() {
        assert_eq!(
            resolve_directives(Some("practice_feed=trace".into()), Some("debug")),
            "practice_feed=trace"
        );
        assert_eq!(resolve_directives(None, Some(" debug ")), "debug");
        assert_eq!(resolve_directives(Some(String::new()), None), "info");
    }
}
