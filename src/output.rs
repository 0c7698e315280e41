//! Output rendering and threshold evaluation.
//!
//! Two presentation modes over one selection of readings:
//!
//! - plain listings (full table, or filtered `locator name value unit`
//!   lines, or bare values in numeric mode)
//! - Nagios check output: one status line per reading, an accumulated
//!   performance-data line, and an aggregate [`Severity`] driving the
//!   process exit code.

use std::fmt;

use crate::sensors::{Row, SensorReading, SensorTable};

/// Check severity, ordered OK < WARNING < CRITICAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    /// Nagios status label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Nagios plugin exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Threshold settings applied uniformly to every selected reading.
#[derive(Debug, Clone)]
pub struct ThresholdConfig {
    pub label: String,
    pub unit: String,
    pub warning: f64,
    pub critical: f64,
    pub operator: String,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            label: "sensor".to_string(),
            unit: String::new(),
            warning: 0.0,
            critical: 0.0,
            operator: ">".to_string(),
        }
    }
}

/// True iff `value <operator> thresh` under floating-point comparison.
///
/// Operators are `<`, `>`, `<=`, `>=`. Any other operator string never
/// matches; that is the defined fallback, not an error.
pub fn thresh_exceeded(value: f64, thresh: f64, operator: &str) -> bool {
    match operator {
        "<" => value < thresh,
        ">" => value > thresh,
        "<=" => value <= thresh,
        ">=" => value >= thresh,
        _ => false,
    }
}

/// Result of one Nagios evaluation pass.
#[derive(Debug, Clone)]
pub struct NagiosReport {
    /// Status lines plus, when any reading was evaluated, the trailing
    /// host/performance-data line.
    pub lines: Vec<String>,
    /// Worst severity across all evaluated readings; `Ok` if none.
    pub severity: Severity,
}

/// Evaluate selected readings against thresholds, Nagios style.
///
/// Readings are processed in selection order with a 1-based label index.
/// Critical wins over warning; the report severity is the maximum across
/// all readings.
pub fn nagios_report(
    host: &str,
    selected: &[(&str, &SensorReading)],
    config: &ThresholdConfig,
) -> NagiosReport {
    let mut lines = Vec::new();
    let mut perf = String::new();
    let mut severity = Severity::Ok;

    for (index, (_, reading)) in selected.iter().enumerate() {
        let labelindex = index + 1;

        let level = if thresh_exceeded(reading.value, config.critical, &config.operator) {
            Severity::Critical
        } else if thresh_exceeded(reading.value, config.warning, &config.operator) {
            Severity::Warning
        } else {
            Severity::Ok
        };

        lines.push(format!(
            "{}: {}{}={}{} (w: {}, c: {}, op: {})",
            level.label(),
            config.label,
            labelindex,
            reading.value,
            config.unit,
            config.warning,
            config.critical,
            config.operator
        ));

        perf.push_str(&format!(
            " {}{}={}{};{};{}",
            config.label, labelindex, reading.value, config.unit, config.warning, config.critical
        ));

        severity = severity.max(level);
    }

    if !perf.is_empty() {
        lines.push(format!("{} |{}", host, perf));
    }

    NagiosReport { lines, severity }
}

/// Render filtered readings as plain lines.
///
/// Default format is `locator name value unit`; numeric mode prints the
/// bare value only.
pub fn plain_lines(selected: &[(&str, &SensorReading)], numeric: bool) -> Vec<String> {
    selected
        .iter()
        .map(|(locator, reading)| {
            if numeric {
                format!("{}", reading.value)
            } else {
                format!(
                    "{} {} {} {}",
                    locator, reading.name, reading.value, reading.unit
                )
            }
        })
        .collect()
}

/// Render the full unfiltered table, instance headers interleaved with
/// tab-indented readings, as the device enumerates them.
pub fn listing_lines(table: &SensorTable) -> Vec<String> {
    table
        .rows()
        .iter()
        .map(|row| match row {
            Row::Header { indent, id, name } => {
                format!("{}{} {}", "\t".repeat(*indent), id, name)
            }
            Row::Reading {
                indent,
                locator,
                reading,
            } => format!(
                "{}{} {} {} {}",
                "\t".repeat(*indent),
                locator,
                reading.value,
                reading.unit,
                reading.name
            ),
        })
        .collect()
}
