//! Shared types for the device status document.
//!
//! These types match the JSON emitted by a Gude PDU's `/status.json`
//! endpoint when queried with the sensor component selector. The document
//! carries two parallel arrays: `sensor_descr` (static schema per sensor
//! type) and `sensor_values` (the readings, nested to match the shape the
//! descriptor declares). Correlation between the two is positional.

use serde::Deserialize;

/// Top-level status document.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusDocument {
    /// Schema entries, one per sensor type.
    pub sensor_descr: Vec<SensorDescriptor>,
    /// Reading entries, parallel to `sensor_descr`.
    pub sensor_values: Vec<SensorValueSet>,
}

/// Static schema for one sensor type.
///
/// A descriptor may declare flat `fields` (simple sensors), nested `groups`
/// (grouped sensors), or both for the same instances.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorDescriptor {
    /// Numeric sensor type code, first component of every locator.
    #[serde(rename = "type")]
    pub sensor_type: u32,

    /// Per-field schema for simple (ungrouped) readings.
    #[serde(default)]
    pub fields: Option<Vec<FieldSpec>>,

    /// Per-group schema for grouped readings.
    #[serde(default)]
    pub groups: Option<Vec<GroupSpec>>,

    /// One entry per physical sensor instance of this type.
    #[serde(default)]
    pub properties: Vec<InstanceProperty>,
}

/// Name and unit of one scalar field.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit: String,
}

/// Field schema shared by every member of one group.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSpec {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// Metadata for one sensor instance.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceProperty {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Member metadata for grouped sensors: one inner list per group.
    #[serde(default)]
    pub groups: Option<Vec<Vec<MemberProperty>>>,
}

/// Metadata for one group member.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberProperty {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Readings for one sensor type.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorValueSet {
    /// One entry per instance, nested per the descriptor's shape.
    #[serde(default)]
    pub values: Vec<ValueNode>,
}

/// One node in the value tree.
///
/// Simple sensors nest two levels (`values[instance][field]` is a leaf),
/// grouped sensors four (`values[instance][group][member][field]`). The
/// depth is dictated by the descriptor, so the tree is parsed shape-agnostic
/// and walked with [`ValueNode::branch`] / [`ValueNode::leaf`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValueNode {
    Leaf(FieldValue),
    Branch(Vec<ValueNode>),
}

/// A single scalar reading.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldValue {
    /// The measured value.
    pub v: f64,
}

impl ValueNode {
    /// Descend into a nested array node, `None` if this node is a leaf.
    pub fn branch(&self) -> Option<&[ValueNode]> {
        match self {
            ValueNode::Branch(nodes) => Some(nodes),
            ValueNode::Leaf(_) => None,
        }
    }

    /// The scalar value of a leaf node, `None` if this node nests further.
    pub fn leaf(&self) -> Option<f64> {
        match self {
            ValueNode::Leaf(field) => Some(field.v),
            ValueNode::Branch(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_simple_sensor() {
        let json = r#"{
            "sensor_descr": [
                {
                    "type": 14,
                    "fields": [
                        { "name": "voltage", "unit": "V" },
                        { "name": "current", "unit": "A" }
                    ],
                    "properties": [
                        { "id": "A", "name": "power port 1" }
                    ]
                }
            ],
            "sensor_values": [
                {
                    "type": 14,
                    "values": [
                        [ { "v": 230 }, { "v": 1.5 } ]
                    ]
                }
            ]
        }"#;

        let doc: StatusDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.sensor_descr.len(), 1);
        assert_eq!(doc.sensor_values.len(), 1);

        let descr = &doc.sensor_descr[0];
        assert_eq!(descr.sensor_type, 14);
        let fields = descr.fields.as_ref().unwrap();
        assert_eq!(fields[0].name, "voltage");
        assert_eq!(fields[1].unit, "A");
        assert!(descr.groups.is_none());

        let instance = doc.sensor_values[0].values[0].branch().unwrap();
        assert_eq!(instance[0].leaf(), Some(230.0));
        assert_eq!(instance[1].leaf(), Some(1.5));
    }

    #[test]
    fn test_deserialize_grouped_sensor() {
        let json = r#"{
            "sensor_descr": [
                {
                    "type": 9,
                    "groups": [
                        { "fields": [ { "name": "temperature", "unit": "C" } ] }
                    ],
                    "properties": [
                        {
                            "id": "S1",
                            "name": "sensor bus",
                            "groups": [ [ { "id": "p1", "name": "probe 1" } ] ]
                        }
                    ]
                }
            ],
            "sensor_values": [
                {
                    "values": [
                        [ [ [ { "v": 21.5 } ] ] ]
                    ]
                }
            ]
        }"#;

        let doc: StatusDocument = serde_json::from_str(json).unwrap();
        let descr = &doc.sensor_descr[0];
        assert!(descr.fields.is_none());
        assert_eq!(descr.groups.as_ref().unwrap()[0].fields[0].name, "temperature");

        let members = descr.properties[0].groups.as_ref().unwrap();
        assert_eq!(members[0][0].name.as_deref(), Some("probe 1"));

        let leaf = doc.sensor_values[0].values[0]
            .branch()
            .and_then(|g| g[0].branch())
            .and_then(|m| m[0].branch())
            .and_then(|f| f[0].leaf());
        assert_eq!(leaf, Some(21.5));
    }

    #[test]
    fn test_leaf_branch_are_exclusive() {
        let leaf: ValueNode = serde_json::from_str(r#"{ "v": 3.3 }"#).unwrap();
        assert_eq!(leaf.leaf(), Some(3.3));
        assert!(leaf.branch().is_none());

        let branch: ValueNode = serde_json::from_str(r#"[ { "v": 1 } ]"#).unwrap();
        assert!(branch.leaf().is_none());
        assert_eq!(branch.branch().unwrap().len(), 1);
    }
}
