use crate::domain::model::{ParameterSet, SourceRecord};
use crate::utils::error::MappingError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Source field path for each upsert parameter. Nested fields use dots (`address.city`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    pub name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub country: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            email: "email".to_string(),
            street: "address.street".to_string(),
            city: "address.city".to_string(),
            country: "address.country".to_string(),
        }
    }
}

impl FieldMapping {
    /// 舊版 `clientes` 集合使用的西班牙文欄位
    pub fn legacy() -> Self {
        Self {
            name: "nombre".to_string(),
            email: "correo".to_string(),
            street: "direccion.calle".to_string(),
            city: "direccion.ciudad".to_string(),
            country: "direccion.pais".to_string(),
        }
    }

    pub fn paths(&self) -> [&str; 5] {
        [
            self.name.as_str(),
            self.email.as_str(),
            self.street.as_str(),
            self.city.as_str(),
            self.country.as_str(),
        ]
    }
}

/// Maps source documents to upsert parameters. Values are copied verbatim.
#[derive(Debug, Clone, Default)]
pub struct RecordTransformer {
    mapping: FieldMapping,
}

impl RecordTransformer {
    pub fn new(mapping: FieldMapping) -> Self {
        Self { mapping }
    }

    pub fn transform(&self, record: &SourceRecord) -> Result<ParameterSet, MappingError> {
        Ok(ParameterSet {
            p_name: text_at(record, &self.mapping.name)?,
            p_email: text_at(record, &self.mapping.email)?,
            p_street: text_at(record, &self.mapping.street)?,
            p_city: text_at(record, &self.mapping.city)?,
            p_country: text_at(record, &self.mapping.country)?,
        })
    }
}

fn text_at(record: &SourceRecord, path: &str) -> Result<String, MappingError> {
    let mut segments = path.split('.');
    let first = segments.next().unwrap_or_default();
    let mut current = record
        .data
        .get(first)
        .ok_or_else(|| MappingError::missing(path))?;

    for segment in segments {
        let obj = current
            .as_object()
            .ok_or_else(|| MappingError::wrong_type(path, "object", json_type(current)))?;
        current = obj.get(segment).ok_or_else(|| MappingError::missing(path))?;
    }

    match current {
        Value::String(s) => Ok(s.clone()),
        other => Err(MappingError::wrong_type(path, "string", json_type(other))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::MappingIssue;
    use serde_json::json;

    fn record(value: Value) -> SourceRecord {
        SourceRecord::from_json(value).unwrap()
    }

    #[test]
    fn test_transform_copies_fields() {
        let transformer = RecordTransformer::default();
        let params = transformer
            .transform(&record(json!({
                "name": "Ana",
                "email": "a@x.com",
                "address": {"street": "Main 1", "city": "Lima", "country": "PE"}
            })))
            .unwrap();

        assert_eq!(
            params,
            ParameterSet {
                p_name: "Ana".to_string(),
                p_email: "a@x.com".to_string(),
                p_street: "Main 1".to_string(),
                p_city: "Lima".to_string(),
                p_country: "PE".to_string(),
            }
        );
    }

    #[test]
    fn test_transform_preserves_text_verbatim() {
        let transformer = RecordTransformer::default();
        let params = transformer
            .transform(&record(json!({
                "name": "  José Ñúñez ",
                "email": "MiXeD@Example.COM",
                "address": {"street": "Av. 28 de Julio\t#5", "city": "", "country": "pe"}
            })))
            .unwrap();

        assert_eq!(params.p_name, "  José Ñúñez ");
        assert_eq!(params.p_email, "MiXeD@Example.COM");
        assert_eq!(params.p_street, "Av. 28 de Julio\t#5");
        assert_eq!(params.p_city, "");
        assert_eq!(params.p_country, "pe");
    }

    #[test]
    fn test_missing_nested_field_reports_path() {
        let transformer = RecordTransformer::default();
        let err = transformer
            .transform(&record(json!({
                "name": "Ana",
                "email": "a@x.com",
                "address": {"street": "Main 1", "country": "PE"}
            })))
            .unwrap_err();

        assert_eq!(err.field, "address.city");
        assert_eq!(err.issue, MappingIssue::Missing);
    }

    #[test]
    fn test_missing_address_reports_first_nested_path() {
        let transformer = RecordTransformer::default();
        let err = transformer
            .transform(&record(json!({"name": "Ana", "email": "a@x.com"})))
            .unwrap_err();

        assert_eq!(err.field, "address.street");
        assert_eq!(err.issue, MappingIssue::Missing);
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let transformer = RecordTransformer::default();

        let err = transformer
            .transform(&record(json!({
                "name": "Ana",
                "email": null,
                "address": {"street": "Main 1", "city": "Lima", "country": "PE"}
            })))
            .unwrap_err();
        assert_eq!(err, MappingError::wrong_type("email", "string", "null"));

        let err = transformer
            .transform(&record(json!({
                "name": "Ana",
                "email": "a@x.com",
                "address": "Main 1, Lima"
            })))
            .unwrap_err();
        assert_eq!(err, MappingError::wrong_type("address.street", "object", "string"));

        let err = transformer
            .transform(&record(json!({
                "name": "Ana",
                "email": "a@x.com",
                "address": {"street": 1, "city": "Lima", "country": "PE"}
            })))
            .unwrap_err();
        assert_eq!(err, MappingError::wrong_type("address.street", "string", "number"));
    }

    #[test]
    fn test_legacy_mapping() {
        let transformer = RecordTransformer::new(FieldMapping::legacy());
        let params = transformer
            .transform(&record(json!({
                "nombre": "Ana",
                "correo": "a@x.com",
                "direccion": {"calle": "Main 1", "ciudad": "Lima", "pais": "PE"}
            })))
            .unwrap();

        assert_eq!(params.p_name, "Ana");
        assert_eq!(params.p_city, "Lima");
        assert_eq!(params.p_country, "PE");
    }
}
