// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # gude-doctor
//!
//! A Nagios-style check and library for querying sensor readings from Gude
//! power-distribution units.
//!
//! The device exposes a JSON status document at `/status.json` describing
//! its sensors in two parallel arrays: static schema (`sensor_descr`) and
//! nested readings (`sensor_values`). This crate fetches that document,
//! flattens the sensor tree into a flat table keyed by dotted positional
//! locators, and renders the result either as plain listings or as Nagios
//! check output with threshold evaluation.
//!
//! ## Architecture
//!
//! ```text
//! fetch ──▶ parse ──▶ flatten ──▶ filter ──▶ format ──▶ exit code
//! client    status    sensors     sensors    output
//! ```
//!
//! - **[`client`]**: HTTP fetch of the status document ([`GudeClient`]),
//!   with basic auth and the device's self-signed-TLS quirk
//! - **[`status`]**: serde mirror of the device's JSON format
//! - **[`sensors`]**: the flatten pass producing an insertion-ordered
//!   [`SensorTable`], plus glob filtering over locators
//! - **[`output`]**: severity model, threshold checks, and the plain /
//!   numeric / Nagios render modes
//! - **[`error`]**: tagged failure taxonomy ([`CollectorError`])
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # List every sensor the device reports
//! gude-doctor --host 10.0.0.5
//!
//! # Nagios check: alert when reading 14.0.0 exceeds thresholds
//! gude-doctor --host 10.0.0.5 --sensor "14.0.0" --nagios -w 80 -c 90
//! ```
//!
//! ### As a library
//!
//! ```rust,no_run
//! use gude_doctor::GudeClient;
//!
//! # async fn example() -> Result<(), gude_doctor::CollectorError> {
//! let client = GudeClient::builder().host("10.0.0.5").build();
//! let table = client.collect().await?;
//! for (locator, reading) in table.readings() {
//!     println!("{locator} = {}{}", reading.value, reading.unit);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod output;
pub mod sensors;
pub mod status;

pub use client::GudeClient;
pub use error::CollectorError;
pub use output::{nagios_report, thresh_exceeded, NagiosReport, Severity, ThresholdConfig};
pub use sensors::{SensorReading, SensorTable};
pub use status::StatusDocument;
