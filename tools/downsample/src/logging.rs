//! Console logging for the downsample tool
//!
//! Writes `timestamp [LEVEL] message` lines to stderr so the output file and
//! stdout summary stay clean.

use tracing_subscriber::{
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::error::{Result, ToolError};

/// Plain `2025-12-02T00:50:44.809Z [INFO] message` lines, no color
struct BracketedLevelFormat;

impl<S, N> FormatEvent<S, N> for BracketedLevelFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        write!(
            writer,
            "{} [{}] ",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Filter directive in effect: a non-empty `RUST_LOG` wins over the configured level
fn filter_directive(level: &str, rust_log: Option<String>) -> String {
    match rust_log {
        Some(env_str) if !env_str.trim().is_empty() => env_str,
        _ => level.to_string(),
    }
}

fn build_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| ToolError::config(format!("Invalid log filter '{}': {}", directive, e)))
}

/// Install the global subscriber
pub fn init(level: &str) -> Result<()> {
    let directive = filter_directive(level, std::env::var("RUST_LOG").ok());
    let filter = build_filter(&directive)?;

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .event_format(BracketedLevelFormat);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()
        .map_err(|e| ToolError::config(format!("Logging already initialized: {}", e)))
}

// Tests never call `init`: a global subscriber would shadow the
// per-test subscribers installed by `#[traced_test]`.
#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_wins_over_level() {
        assert_eq!(filter_directive("info", Some("debug".to_string())), "debug");
        assert_eq!(filter_directive("info", Some("  ".to_string())), "info");
        assert_eq!(filter_directive("warn", None), "warn");
    }

    #[test]
    fn test_build_filter_accepts_directives() {
        assert!(build_filter("warn").is_ok());
        assert!(build_filter("info,voltage_downsample=trace").is_ok());
    }

    #[test]
    fn test_build_filter_rejects_bad_level() {
        let err = build_filter("downsample=loud").unwrap_err();
        assert!(matches!(err, ToolError::Config(_)));
        assert!(err.to_string().contains("downsample=loud"));
    }
}
