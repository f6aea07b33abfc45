//! Logging integration for the regform workspace.
//!
//! Provides a helper for configuring [`tracing`]-based logging and for
//! creating per-event spans around form editing and submission handling.

/// Sets up the global tracing subscriber.
///
/// `filter` is an env-filter directive string (e.g. "debug", "info",
/// "regform_forms=debug"). With `pretty` a human-readable format is used;
/// otherwise a structured JSON format suitable for log aggregation.
///
/// Installing a second subscriber is silently ignored, so tests may call
/// this freely.
pub fn init_logging(filter: &str, pretty: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if pretty {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for work scoped to one event's form.
///
/// Attach this span around builder sessions or submission handling so all
/// log entries carry the event identifier.
///
/// # Examples
///
/// ```
/// use regform_core::logging::event_span;
///
/// let span = event_span("summer-fest-2026");
/// let _guard = span.enter();
/// tracing::info!("saving form definition");
/// ```
pub fn event_span(event_id: &str) -> tracing::Span {
    tracing::info_span!("event_form", event = event_id)
}
