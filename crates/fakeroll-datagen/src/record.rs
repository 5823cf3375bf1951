//! The record handed to callers.

use crate::fields::RecordFields;
use serde::Serialize;

/// A finished record. Field order here is the serialized column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub index: u64,
    pub identifier: String,
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Record {
    /// Column names, in serialization order.
    pub const FIELD_NAMES: [&'static str; 5] = ["index", "identifier", "name", "address", "phone"];

    pub fn new(index: u64, fields: RecordFields) -> Self {
        let RecordFields {
            identifier,
            name,
            address,
            phone,
        } = fields;
        Self {
            index,
            identifier,
            name,
            address,
            phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_order() {
        let record = Record {
            index: 1,
            identifier: "id".to_string(),
            name: "n".to_string(),
            address: "a".to_string(),
            phone: "p".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"index":1,"identifier":"id","name":"n","address":"a","phone":"p"}"#
        );
    }
}
