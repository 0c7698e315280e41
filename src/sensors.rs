//! Sensor table construction - flattening the status document.
//!
//! This module walks the parallel `sensor_descr` / `sensor_values` arrays
//! and merges them into a flat, insertion-ordered table of readings keyed
//! by dotted positional locators:
//!
//! - `type.instance.field` for simple (ungrouped) sensors
//! - `type.instance.group.member.field` for grouped sensors
//!
//! Array position is the correlation key between the two source arrays, so
//! any index that the descriptors promise but the values don't deliver is a
//! structural error ([`CollectorError::MalformedDocument`]).

use glob::{Pattern, PatternError};

use crate::error::CollectorError;
use crate::status::{StatusDocument, ValueNode};

/// One flattened scalar measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub value: f64,
    pub unit: String,
    pub name: String,
}

/// One row of the flattened table.
///
/// Header rows carry the instance/member metadata that the device interleaves
/// with its readings; they only matter for the unfiltered listing output.
#[derive(Debug, Clone)]
pub enum Row {
    /// Instance or group-member id line.
    Header {
        indent: usize,
        id: String,
        name: String,
    },
    /// A single measurement.
    Reading {
        indent: usize,
        locator: String,
        reading: SensorReading,
    },
}

/// Flat, insertion-ordered table of sensor readings.
///
/// Built exactly once per collection pass and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct SensorTable {
    rows: Vec<Row>,
}

impl SensorTable {
    /// Flatten a status document into a sensor table.
    ///
    /// Fails fast with [`CollectorError::MalformedDocument`] if the
    /// descriptor and value arrays disagree in length or nesting.
    pub fn from_document(doc: &StatusDocument) -> Result<Self, CollectorError> {
        if doc.sensor_descr.len() != doc.sensor_values.len() {
            return Err(CollectorError::malformed(format!(
                "sensor_descr has {} entries, sensor_values has {}",
                doc.sensor_descr.len(),
                doc.sensor_values.len()
            )));
        }

        let mut table = SensorTable::default();

        for (descr, value_set) in doc.sensor_descr.iter().zip(&doc.sensor_values) {
            let st = descr.sensor_type;

            for (si, prop) in descr.properties.iter().enumerate() {
                if let Some(id) = &prop.id {
                    table.rows.push(Row::Header {
                        indent: 0,
                        id: id.clone(),
                        name: prop.name.clone().unwrap_or_default(),
                    });
                }

                // Simple ungrouped sensors: values[si][sf].v
                if let Some(fields) = &descr.fields {
                    let instance = branch_at(&value_set.values, si, st, "instance")?;
                    for (sf, field) in fields.iter().enumerate() {
                        let locator = format!("{}.{}.{}", st, si, sf);
                        let value = leaf_at(instance, sf, &locator)?;
                        table.rows.push(Row::Reading {
                            indent: 1,
                            locator,
                            reading: SensorReading {
                                value,
                                unit: field.unit.clone(),
                                name: field.name.clone(),
                            },
                        });
                    }
                }

                // Grouped sensors: values[si][gi][grm][sf].v, member metadata
                // comes from the instance property, field schema from the type.
                if let Some(group_specs) = &descr.groups {
                    let member_meta = prop.groups.as_deref().ok_or_else(|| {
                        CollectorError::malformed(format!(
                            "sensor type {} instance {} declares groups but carries no member metadata",
                            st, si
                        ))
                    })?;
                    let instance = branch_at(&value_set.values, si, st, "instance")?;

                    for (gi, members) in member_meta.iter().enumerate() {
                        let spec = group_specs.get(gi).ok_or_else(|| {
                            CollectorError::malformed(format!(
                                "sensor type {} has no schema for group {}",
                                st, gi
                            ))
                        })?;
                        let group_values = branch_at(instance, gi, st, "group")?;

                        for (grm, member) in members.iter().enumerate() {
                            if let Some(id) = &member.id {
                                table.rows.push(Row::Header {
                                    indent: 1,
                                    id: id.clone(),
                                    name: member.name.clone().unwrap_or_default(),
                                });
                            }
                            let member_values = branch_at(group_values, grm, st, "member")?;

                            for (sf, field) in spec.fields.iter().enumerate() {
                                let locator = format!("{}.{}.{}.{}.{}", st, si, gi, grm, sf);
                                let value = leaf_at(member_values, sf, &locator)?;
                                table.rows.push(Row::Reading {
                                    indent: 2,
                                    locator,
                                    reading: SensorReading {
                                        value,
                                        unit: field.unit.clone(),
                                        name: field.name.clone(),
                                    },
                                });
                            }
                        }
                    }
                }
            }
        }

        Ok(table)
    }

    /// All rows, listing order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// All readings in insertion order, header rows skipped.
    pub fn readings(&self) -> impl Iterator<Item = (&str, &SensorReading)> {
        self.rows.iter().filter_map(|row| match row {
            Row::Reading {
                locator, reading, ..
            } => Some((locator.as_str(), reading)),
            Row::Header { .. } => None,
        })
    }

    /// Number of readings in the table.
    pub fn len(&self) -> usize {
        self.readings().count()
    }

    /// True if the table holds no readings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up one reading by its locator.
    pub fn get(&self, locator: &str) -> Option<&SensorReading> {
        self.readings()
            .find(|(l, _)| *l == locator)
            .map(|(_, r)| r)
    }

    /// Readings whose locator matches a shell-glob pattern
    /// (`*`, `?`, `[...]`; case-sensitive), insertion order.
    ///
    /// A pattern matching nothing yields an empty selection, not an error.
    pub fn matching(
        &self,
        pattern: &str,
    ) -> Result<Vec<(&str, &SensorReading)>, PatternError> {
        let pattern = Pattern::new(pattern)?;
        Ok(self
            .readings()
            .filter(|(locator, _)| pattern.matches(locator))
            .collect())
    }
}

fn branch_at<'a>(
    nodes: &'a [ValueNode],
    idx: usize,
    sensor_type: u32,
    level: &str,
) -> Result<&'a [ValueNode], CollectorError> {
    nodes
        .get(idx)
        .and_then(ValueNode::branch)
        .ok_or_else(|| {
            CollectorError::malformed(format!(
                "sensor type {}: missing {} array at index {}",
                sensor_type, level, idx
            ))
        })
}

fn leaf_at(nodes: &[ValueNode], idx: usize, locator: &str) -> Result<f64, CollectorError> {
    nodes.get(idx).and_then(ValueNode::leaf).ok_or_else(|| {
        CollectorError::malformed(format!("no scalar value for locator {}", locator))
    })
}
