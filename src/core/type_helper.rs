//! Field-name validation for `fields` clauses

use crate::core::resource::Resource;

/// Check a `fields` clause against a known set of field names
///
/// An empty clause is valid. Otherwise every non-empty trimmed token must
/// match a known name, ignoring case.
pub fn fields_exist(known: &[&str], fields: Option<&str>) -> bool {
    let Some(fields) = fields else {
        return true;
    };

    fields
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .all(|token| known.iter().any(|name| name.eq_ignore_ascii_case(token)))
}

/// Check a `fields` clause against the public fields of `T`
pub fn type_has_properties<T: Resource>(fields: Option<&str>) -> bool {
    fields_exist(T::field_names(), fields)
}
