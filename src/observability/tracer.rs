//! Tracer provider that exports finished spans to a local OTLP JSON file.

use super::file_writer::RotatingFile;
use super::span_formatter::otlp_document;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Span exporter writing one OTLP document per batch to a [`RotatingFile`].
#[derive(Debug)]
struct FileSpanExporter {
    /// Destination file, rotated by size.
    file: RotatingFile,
    /// Resource attributes written with every batch.
    resource: Resource,
    /// Set by `shutdown`; later exports fail.
    stopped: bool,
}

impl FileSpanExporter {
    /// Creates an exporter appending to `path`.
    ///
    /// # Parameters
    ///
    /// * `path` - Trace file, created on the first export
    /// * `resource` - Resource attributes (service name, version)
    fn new(path: PathBuf, resource: Resource) -> Self {
        Self {
            file: RotatingFile::new(path),
            resource,
            stopped: false,
        }
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("file exporter already shut down"))
        } else {
            let line = otlp_document(&self.resource, &batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(format!("{}: {e}", self.file.path().display())))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = self.resource.merge(resource);
    }
}

/// Builds a provider whose spans are exported synchronously to `path`.
///
/// # Parameters
///
/// * `path` - Trace file receiving one OTLP JSON document per export
/// * `resource` - Resource attributes attached to the provider and each document
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otlp.json");
        let provider = file_tracer_provider(
            path.clone(),
            Resource::new(vec![KeyValue::new("service.name", "countrydeck-test")]),
        );

        provider.tracer("test").in_span("fetch_countries", |_cx| {});
        let _ = provider.shutdown();

        let text = std::fs::read_to_string(&path).unwrap();
        let first = text.lines().next().unwrap();
        let doc: serde_json::Value = serde_json::from_str(first).unwrap();
        assert_eq!(
            doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0]["name"],
            "fetch_countries"
        );
    }

    #[test]
    fn export_after_shutdown_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otlp.json");
        let mut exporter = FileSpanExporter::new(path.clone(), Resource::empty());

        exporter.shutdown();
        let result = futures_util::FutureExt::now_or_never(exporter.export(Vec::new()));

        assert!(matches!(result, Some(Err(_))));
        assert!(!path.exists());
    }
}
