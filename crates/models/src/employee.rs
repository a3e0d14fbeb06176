use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Employee identifier as it appears on the wire: a JSON integer or a JSON string.
///
/// Serializes back in the form it was read, so `100` stays a number and `"E-7"` stays a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmployeeId {
    Number(i64),
    Text(String),
}

impl EmployeeId {
    /// Build an id from a directory key or URL segment.
    /// Only keys that round-trip through `i64` unchanged become numbers (`"007"` stays text).
    pub fn from_key(key: &str) -> Self {
        match key.parse::<i64>() {
            Ok(n) if n.to_string() == key => Self::Number(n),
            _ => Self::Text(key.to_string()),
        }
    }

    /// Directory key for this id.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<EmployeeId> for Value {
    fn from(id: EmployeeId) -> Self {
        match id {
            EmployeeId::Number(n) => Value::from(n),
            EmployeeId::Text(s) => Value::String(s),
        }
    }
}

/// One entry of the employee directory: any JSON object.
///
/// `employeeId`, `firstName` and `lastName` are the fields clients read, but none of them is
/// required and no other shape rule applies. The object is stored and echoed back verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeRecord(pub Map<String, Value>);

impl EmployeeRecord {
    pub fn new(employee_id: EmployeeId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("employeeId".into(), employee_id.into());
        fields.insert("firstName".into(), Value::String(first_name.into()));
        fields.insert("lastName".into(), Value::String(last_name.into()));
        Self(fields)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// `employeeId` if present and an integer or a string.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.field("employeeId").and_then(|v| EmployeeId::deserialize(v).ok())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.field("firstName").and_then(Value::as_str)
    }

    pub fn last_name(&self) -> Option<&str> {
        self.field("lastName").and_then(Value::as_str)
    }
}

/// Persisted layout of the data file: `{ "employees": { "<id>": record, ... } }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryDocument {
    pub employees: HashMap<String, EmployeeRecord>,
}

/// Client-side view of a record: the three fields the UI binds, nothing else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
}

impl From<EmployeeView> for EmployeeRecord {
    fn from(view: EmployeeView) -> Self {
        Self::new(view.employee_id, view.first_name, view.last_name)
    }
}
