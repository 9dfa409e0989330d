//! Structured logging initialization
//!
//! Provides consistent logging initialization across the SuiteCRM tools.
//! Output always goes to stderr: stdout carries rendered configuration and
//! CGI responses.

use tracing::span::EnteredSpan;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Guard that keeps the tracing subscriber active.
/// Drop this at the end of main to flush logs.
pub struct LogGuard {
    _span: Option<EnteredSpan>,
}

/// Initialize structured logging for a component.
///
/// `RUST_LOG` adjusts the filter (default `info`). `LOG_FORMAT=json` switches to
/// one JSON object per line, each carrying the component name in its `span`
/// object for as long as the guard lives.
///
/// # Example
/// ```ignore
/// let _guard = init_logging("repair");
/// info!("Starting up...");
/// ```
pub fn init_logging(component: &str) -> LogGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let span = if json {
        json_subscriber(filter, std::io::stderr).init();
        Some(component_span(component).entered())
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
        None
    };

    tracing::debug!(component, "Logging initialized");
    LogGuard { _span: span }
}

fn json_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(writer),
    )
}

// Error level so that no filter drops it.
fn component_span(component: &str) -> tracing::Span {
    tracing::error_span!("app", component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_json_lines_carry_component() {
        let buffer = Buffer::default();
        let subscriber = json_subscriber(EnvFilter::new("warn"), buffer.clone());

        tracing::subscriber::with_default(subscriber, || {
            let _span = component_span("repair").entered();
            tracing::warn!("Repair session exited unsuccessfully");
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let line = output.lines().next().unwrap();
        assert!(line.contains(r#""component":"repair""#), "{}", line);
        assert!(line.contains("Repair session exited unsuccessfully"));
    }
}
