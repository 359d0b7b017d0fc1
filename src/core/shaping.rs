//! Data shaping: projecting resources onto a caller-chosen field list

use crate::core::error::{ConfigError, ShapingResult};
use crate::core::resource::Resource;
use indexmap::IndexMap;
use serde_json::Value;

/// An object reduced to a subset of its fields, in output order
pub type ShapedRecord = IndexMap<String, Value>;

/// Resolve a `fields` clause to declared field names of `T`
///
/// An empty clause selects every declared field. Tokens are trimmed and
/// matched case-insensitively; a repeated field is kept at its first
/// position. An unknown token is a configuration error here: the caller
/// must have rejected it with
/// [`type_has_properties`](crate::core::type_helper::type_has_properties).
pub fn resolve_fields<T: Resource>(fields: Option<&str>) -> ShapingResult<Vec<&'static str>> {
    let tokens: Vec<&str> = fields
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        return Ok(T::field_names().to_vec());
    }

    let mut selected: Vec<&'static str> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let field = T::resolve_field(token).ok_or_else(|| ConfigError::UnknownShapeField {
            resource: T::resource_type().to_string(),
            field: token.to_string(),
        })?;
        if !selected.contains(&field) {
            selected.push(field);
        }
    }
    Ok(selected)
}

fn shape_with<T: Resource>(source: &T, fields: &[&'static str]) -> ShapingResult<ShapedRecord> {
    let mut record = ShapedRecord::with_capacity(fields.len());
    for field in fields {
        let value = source
            .field_value(field)
            .ok_or_else(|| ConfigError::MissingFieldValue {
                resource: T::resource_type().to_string(),
                field: field.to_string(),
            })?;
        record.insert(field.to_string(), value.into_json());
    }
    Ok(record)
}

/// Shape a single resource
pub fn shape_data<T: Resource>(source: &T, fields: Option<&str>) -> ShapingResult<ShapedRecord> {
    let fields = resolve_fields::<T>(fields)?;
    shape_with(source, &fields)
}

/// Shape a sequence of resources with one `fields` clause
///
/// Either every record is shaped or an error is returned.
pub fn shape_collection<T: Resource>(
    sources: &[T],
    fields: Option<&str>,
) -> ShapingResult<Vec<ShapedRecord>> {
    let fields = resolve_fields::<T>(fields)?;
    sources
        .iter()
        .map(|source| shape_with(source, &fields))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[derive(Debug, Clone)]
    struct Writer {
        id: Uuid,
        first_name: String,
        last_name: String,
        genre: String,
        age: i32,
    }

    crate::impl_resource!(Writer, "writer", {
        "id" => id,
        "firstName" => first_name,
        "lastName" => last_name,
        "genre" => genre,
        "age" => age,
    });

    fn bob() -> Writer {
        Writer {
            id: Uuid::from_u128(7),
            first_name: "Bob".to_string(),
            last_name: "Z".to_string(),
            genre: "Sci-Fi".to_string(),
            age: 40,
        }
    }

    fn keys(record: &ShapedRecord) -> Vec<&str> {
        record.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_explicit_fields_in_request_order() {
        let shaped = shape_data(&bob(), Some("firstName,genre")).unwrap();
        assert_eq!(keys(&shaped), vec!["firstName", "genre"]);
        assert_eq!(shaped["firstName"], json!("Bob"));
        assert_eq!(shaped["genre"], json!("Sci-Fi"));

        let shaped = shape_data(&bob(), Some("genre, firstName")).unwrap();
        assert_eq!(keys(&shaped), vec!["genre", "firstName"]);
    }

    #[test]
    fn test_no_fields_gives_all_in_declared_order() {
        let shaped = shape_data(&bob(), None).unwrap();
        assert_eq!(keys(&shaped), vec!["id", "firstName", "lastName", "genre", "age"]);
        assert_eq!(shaped["age"], json!(40));
        assert_eq!(shaped["id"], json!(Uuid::from_u128(7).to_string()));

        let shaped = shape_data(&bob(), Some("  ")).unwrap();
        assert_eq!(shaped.len(), 5);
    }

    #[test]
    fn test_fields_are_case_insensitive_and_use_declared_spelling() {
        let shaped = shape_data(&bob(), Some(" FIRSTNAME , Age ")).unwrap();
        assert_eq!(keys(&shaped), vec!["firstName", "age"]);
    }

    #[test]
    fn test_duplicate_field_appears_once() {
        let shaped = shape_data(&bob(), Some("genre,firstName,GENRE")).unwrap();
        assert_eq!(keys(&shaped), vec!["genre", "firstName"]);
    }

    #[test]
    fn test_shaping_is_idempotent() {
        let source = bob();
        let first = shape_data(&source, Some("lastName,id")).unwrap();
        let second = shape_data(&source, Some("lastName,id")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shaped_values_are_copies() {
        let mut source = bob();
        let shaped = shape_data(&source, Some("firstName")).unwrap();
        source.first_name = "Changed".to_string();
        assert_eq!(shaped["firstName"], json!("Bob"));
    }

    #[test]
    fn test_unknown_field_is_config_error() {
        let err = shape_data(&bob(), Some("firstName,nickname")).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_collection_shaping() {
        let mut alice = bob();
        alice.id = Uuid::from_u128(8);
        alice.first_name = "Alice".to_string();

        let shaped = shape_collection(&[bob(), alice], Some("firstName")).unwrap();
        assert_eq!(shaped.len(), 2);
        assert_eq!(shaped[0]["firstName"], json!("Bob"));
        assert_eq!(shaped[1]["firstName"], json!("Alice"));
        assert!(shaped.iter().all(|r| r.len() == 1));
    }

    #[test]
    fn test_collection_shaping_is_all_or_nothing() {
        assert!(shape_collection(&[bob(), bob()], Some("nickname")).is_err());
        assert!(shape_collection::<Writer>(&[], Some("firstName")).unwrap().is_empty());
    }
}
