// Metric sinks

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io::Write;

/// Receives metrics and non-fatal per-line errors from a collection pass
#[cfg_attr(test, mockall::automock)]
pub trait Accumulator {
    fn add_fields(
        &mut self,
        measurement: &str,
        fields: BTreeMap<String, i64>,
        tags: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
    );

    fn add_error(&mut self, error: anyhow::Error);
}

/// A single metric row as handed to an accumulator
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub measurement: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, i64>,
    pub timestamp: DateTime<Utc>,
}

impl Metric {
    /// Render as one line of InfluxDB line protocol (without trailing newline)
    pub fn to_line_protocol(&self) -> String {
        let mut line = escape(&self.measurement, &[',', ' ']);

        for (key, value) in &self.tags {
            // Empty tag values are invalid in line protocol
            if value.is_empty() {
                continue;
            }
            line.push(',');
            line.push_str(&escape(key, &[',', '=', ' ']));
            line.push('=');
            line.push_str(&escape(value, &[',', '=', ' ']));
        }

        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(key, value)| format!("{}={}i", escape(key, &[',', '=', ' ']), value))
            .collect();
        line.push(' ');
        line.push_str(&fields.join(","));

        if let Some(nanos) = self.timestamp.timestamp_nanos_opt() {
            line.push(' ');
            line.push_str(&nanos.to_string());
        }

        line
    }
}

fn escape(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if special.contains(&c) || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Writes metrics as line protocol and logs errors through tracing
pub struct LineProtocolSink<W: Write> {
    writer: W,
    metrics_written: usize,
    errors_seen: usize,
}

impl<W: Write> LineProtocolSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            metrics_written: 0,
            errors_seen: 0,
        }
    }

    pub fn metrics_written(&self) -> usize {
        self.metrics_written
    }

    pub fn errors_seen(&self) -> usize {
        self.errors_seen
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Accumulator for LineProtocolSink<W> {
    fn add_fields(
        &mut self,
        measurement: &str,
        fields: BTreeMap<String, i64>,
        tags: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
    ) {
        let metric = Metric {
            measurement: measurement.to_string(),
            tags,
            fields,
            timestamp,
        };

        match writeln!(self.writer, "{}", metric.to_line_protocol()) {
            Ok(()) => self.metrics_written += 1,
            Err(e) => tracing::error!("Failed to write metric: {}", e),
        }
    }

    fn add_error(&mut self, error: anyhow::Error) {
        self.errors_seen += 1;
        tracing::warn!("{}", error);
    }
}

/// Keeps everything in memory; useful for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryAccumulator {
    pub metrics: Vec<Metric>,
    pub errors: Vec<anyhow::Error>,
}

impl Accumulator for MemoryAccumulator {
    fn add_fields(
        &mut self,
        measurement: &str,
        fields: BTreeMap<String, i64>,
        tags: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
    ) {
        self.metrics.push(Metric {
            measurement: measurement.to_string(),
            tags,
            fields,
            timestamp,
        });
    }

    fn add_error(&mut self, error: anyhow::Error) {
        self.errors.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_metric() -> Metric {
        Metric {
            measurement: "systemd_units".to_string(),
            tags: BTreeMap::from([
                ("name".to_string(), "foo.service".to_string()),
                ("state".to_string(), "enabled".to_string()),
                ("load".to_string(), "loaded".to_string()),
                ("sub".to_string(), "running".to_string()),
            ]),
            fields: BTreeMap::from([
                ("load_code".to_string(), 0),
                ("active_code".to_string(), 0),
                ("sub_code".to_string(), 0),
                ("state_code".to_string(), 1),
            ]),
            timestamp: Utc.timestamp_opt(1_700_000_000, 5).unwrap(),
        }
    }

    #[test]
    fn test_line_protocol_format() {
        assert_eq!(
            sample_metric().to_line_protocol(),
            "systemd_units,load=loaded,name=foo.service,state=enabled,sub=running \
             active_code=0i,load_code=0i,state_code=1i,sub_code=0i 1700000000000000005"
        );
    }

    #[test]
    fn test_line_protocol_escapes_tags() {
        let mut metric = sample_metric();
        metric
            .tags
            .insert("name".to_string(), "dev-disk-by\\x2dlabel a,b=c.device".to_string());
        let line = metric.to_line_protocol();
        assert!(line.contains("name=dev-disk-by\\\\x2dlabel\\ a\\,b\\=c.device,"));
    }

    #[test]
    fn test_line_protocol_skips_empty_tags() {
        let mut metric = sample_metric();
        metric.tags.insert("sub".to_string(), String::new());
        assert!(!metric.to_line_protocol().contains("sub="));
    }

    #[test]
    fn test_sink_counts_and_writes() {
        let mut sink = LineProtocolSink::new(Vec::new());
        let metric = sample_metric();
        sink.add_fields(
            &metric.measurement,
            metric.fields.clone(),
            metric.tags.clone(),
            metric.timestamp,
        );
        sink.add_error(anyhow::anyhow!("bad line"));

        assert_eq!(sink.metrics_written(), 1);
        assert_eq!(sink.errors_seen(), 1);

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, format!("{}\n", metric.to_line_protocol()));
    }
}
