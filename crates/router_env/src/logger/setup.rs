//!
//! Setup logging subsystem.
//!

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter, Layer,
    Registry,
};

use super::config::{self, LogFormat};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the non-blocking log writers alive; buffered lines are flushed when it is dropped.
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

///
/// Setup logging sub-system specifying.
/// Expects config and list of names of crates to watch.
///
/// `RUST_LOG`, when set, overrides the configured console level and directive.
///
pub fn setup<Str: AsRef<str>>(
    conf: &config::Log,
    service_name: &str,
    crates_to_watch: impl IntoIterator<Item = Str>,
) -> Result<TelemetryGuard, TryInitError> {
    let crates_to_watch = crates_to_watch
        .into_iter()
        .map(|name| name.as_ref().to_owned())
        .collect::<Vec<_>>();
    let mut guards = Vec::new();
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if conf.file.enabled {
        let path = crate::env::workspace_path().join(&conf.file.path);
        let file_appender = tracing_appender::rolling::hourly(path, &conf.file.file_name);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        guards.push(guard);

        let file_filter = build_filter(
            conf.file.filtering_directive.as_deref(),
            &crates_to_watch,
            conf.file.level.into_level(),
        );
        layers.push(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(file_writer)
                .with_filter(file_filter)
                .boxed(),
        );
    }

    if conf.console.enabled {
        let (console_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        let console_filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(_) => EnvFilter::from_default_env(),
            Err(_) => build_filter(
                conf.console.filtering_directive.as_deref(),
                &crates_to_watch,
                conf.console.level.into_level(),
            ),
        };

        let console_layer = match conf.console.log_format {
            LogFormat::Default => fmt::layer()
                .with_timer(fmt::time::uptime())
                .with_span_events(fmt::format::FmtSpan::CLOSE)
                .pretty()
                .with_writer(console_writer)
                .with_filter(console_filter)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(console_writer)
                .with_filter(console_filter)
                .boxed(),
        };
        layers.push(console_layer);
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    tracing::debug!(
        service = service_name,
        env = %crate::env::which(),
        "logging initialised"
    );

    // Returning the WorkerGuard for logs to be printed until it is dropped
    Ok(TelemetryGuard {
        _log_guards: guards,
    })
}

/// Everything outside the watched crates is limited to warnings unless an explicit
/// directive says otherwise.
fn build_filter(
    filtering_directive: Option<&str>,
    crates_to_watch: &[String],
    level: tracing::Level,
) -> EnvFilter {
    let directive = filtering_directive.map(ToOwned::to_owned).unwrap_or_else(|| {
        let level = level.as_str().to_lowercase();
        crates_to_watch
            .iter()
            .fold(String::from("warn"), |mut directive, krate| {
                directive.push_str(&format!(",{krate}={level}"));
                directive
            })
    });

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_directive_lists_watched_crates() {
        let filter = build_filter(
            None,
            &["storefront".to_string(), "common_utils".to_string()],
            tracing::Level::DEBUG,
        );
        let rendered = filter.to_string();
        assert!(rendered.contains("storefront=debug"));
        assert!(rendered.contains("common_utils=debug"));
        assert!(rendered.contains("warn"));
    }

    #[test]
    fn explicit_directive_wins() {
        let filter = build_filter(Some("storefront=trace"), &[], tracing::Level::INFO);
        assert_eq!(filter.to_string(), "storefront=trace");
    }
}
