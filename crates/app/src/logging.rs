use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Workspace crates log at the requested level, everything else stays at
/// WARN.
pub(crate) fn setup_tracing(level: Level) {
    let filter_layer = tracing_subscriber::filter::filter_fn(move |metadata| {
        let target = metadata.target();
        let is_workspace = target.starts_with("anchora")
            || target.starts_with("core")
            || target.starts_with("render");
        let effective_level = if is_workspace { level } else { Level::WARN };
        metadata.level() <= &effective_level
    });
    let fmt_layer = tracing_subscriber::fmt::layer().with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter_layer))
        .init();
}

pub(crate) fn parse_level(value: &str) -> Result<Level, String> {
    match value {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => Err(format!("unknown log level {other}")),
    }
}
