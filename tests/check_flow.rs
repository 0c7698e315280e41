//! End-to-end checks over a fixture status document: flatten, filter,
//! and both output modes, as the CLI wires them together.

use gude_doctor::output::{listing_lines, nagios_report, plain_lines};
use gude_doctor::{SensorTable, Severity, StatusDocument, ThresholdConfig};

fn fixture() -> StatusDocument {
    serde_json::from_value(serde_json::json!({
        "sensor_descr": [
            {
                "type": 14,
                "fields": [
                    { "name": "voltage", "unit": "V" },
                    { "name": "current", "unit": "A" }
                ],
                "properties": [ { "id": "A", "name": "power port" } ]
            }
        ],
        "sensor_values": [
            { "values": [ [ { "v": 230 }, { "v": 1.5 } ] ] }
        ]
    }))
    .unwrap()
}

#[test]
fn plain_listing_without_filter() {
    let table = SensorTable::from_document(&fixture()).unwrap();
    let lines = listing_lines(&table);

    assert_eq!(lines[0], "A power port");
    assert_eq!(lines[1], "\t14.0.0 230 V voltage");
    assert_eq!(lines[2], "\t14.0.1 1.5 A current");
}

#[test]
fn plain_filtered_output() {
    let table = SensorTable::from_document(&fixture()).unwrap();
    let selected = table.matching("14.0.*").unwrap();
    let lines = plain_lines(&selected, false);

    assert_eq!(lines, vec!["14.0.0 voltage 230 V", "14.0.1 current 1.5 A"]);
}

#[test]
fn numeric_filtered_output() {
    let table = SensorTable::from_document(&fixture()).unwrap();
    let selected = table.matching("14.0.*").unwrap();
    let lines = plain_lines(&selected, true);

    assert_eq!(lines, vec!["230", "1.5"]);
}

#[test]
fn nagios_critical_with_exit_severity() {
    let doc: StatusDocument = serde_json::from_value(serde_json::json!({
        "sensor_descr": [
            {
                "type": 8,
                "fields": [ { "name": "load", "unit": "%" } ],
                "properties": [ { "id": "L", "name": "bank load" } ]
            }
        ],
        "sensor_values": [
            { "values": [ [ { "v": 95 } ] ] }
        ]
    }))
    .unwrap();

    let table = SensorTable::from_document(&doc).unwrap();
    let selected = table.matching("8.*").unwrap();
    let config = ThresholdConfig {
        warning: 80.0,
        critical: 90.0,
        ..Default::default()
    };

    let report = nagios_report("10.0.0.5", &selected, &config);
    assert_eq!(report.severity, Severity::Critical);
    assert_eq!(report.severity.exit_code(), 2);
    assert_eq!(report.lines[0], "CRITICAL: sensor1=95 (w: 80, c: 90, op: >)");
    assert_eq!(report.lines[1], "10.0.0.5 | sensor1=95;80;90");
}

#[test]
fn nagios_no_match_emits_no_performance_line() {
    let table = SensorTable::from_document(&fixture()).unwrap();
    let selected = table.matching("99.*").unwrap();

    let report = nagios_report("10.0.0.5", &selected, &ThresholdConfig::default());
    assert!(report.lines.is_empty());
    assert_eq!(report.severity, Severity::Ok);
    assert_eq!(report.severity.exit_code(), 0);
}
