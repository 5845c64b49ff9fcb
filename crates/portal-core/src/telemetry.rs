//! Telemetry shim
//!
//! Tags every event with the configured site name and hands it to an
//! analytics sink. Without a sink, tracking is a no-op.

use crate::config::PortalConfig;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Property added to every event
pub const SITE_NAME_PROPERTY: &str = "sitename";

/// Analytics backend
pub trait TelemetrySink: Send + Sync {
    /// Record one event
    fn track(&self, event: &str, properties: &Map<String, Value>);
}

/// Sink that emits events as `tracing` records
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn track(&self, event: &str, properties: &Map<String, Value>) {
        let properties = Value::Object(properties.clone());
        tracing::info!(
            target: "portal::telemetry",
            event,
            properties = %properties,
            "telemetry event"
        );
    }
}

/// Event tracker
#[derive(Clone)]
pub struct TelemetryService {
    site_name: String,
    sink: Option<Arc<dyn TelemetrySink>>,
}

impl TelemetryService {
    /// Create tracker without a sink
    #[must_use]
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            site_name: config.site_name.clone(),
            sink: None,
        }
    }

    /// Attach a sink
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Whether events go anywhere
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Track an event
    ///
    /// The site name overwrites any caller-supplied `sitename` property.
    pub fn track(&self, event: &str, properties: Option<Map<String, Value>>) {
        let Some(sink) = &self.sink else {
            return;
        };
        let mut properties = properties.unwrap_or_default();
        properties.insert(
            SITE_NAME_PROPERTY.to_string(),
            Value::String(self.site_name.clone()),
        );
        sink.track(event, &properties);
    }
}

impl fmt::Debug for TelemetryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryService")
            .field("site_name", &self.site_name)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn disabled_without_sink() {
        let service = TelemetryService::new(&PortalConfig::default());
        assert!(!service.is_enabled());
        service.track("ignored", None);
    }

    #[test]
    fn tracing_sink_emits_tagged_event() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let service =
            TelemetryService::new(&PortalConfig::default()).with_sink(Arc::new(TracingSink));
        assert!(service.is_enabled());
        let mut properties = Map::new();
        properties.insert("count".to_string(), Value::from(3));
        tracing::subscriber::with_default(subscriber, || {
            service.track("opened", Some(properties));
        });

        let output = String::from_utf8(log.0.lock().clone()).unwrap();
        assert!(output.contains("portal::telemetry"), "{output}");
        assert!(output.contains("telemetry event"), "{output}");
        assert!(output.contains("opened"), "{output}");
        assert!(output.contains(r#""sitename":"azurefunctions""#), "{output}");
        assert!(output.contains(r#""count":3"#), "{output}");
    }

    #[test]
    fn debug_hides_sink() {
        let service = TelemetryService::new(&PortalConfig::default());
        let text = format!("{service:?}");
        assert!(text.contains("azurefunctions"));
        assert!(text.contains("enabled: false"));
    }
}
