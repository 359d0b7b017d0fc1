//! Resource trait describing a shapeable, sortable type

use crate::core::field::FieldValue;
use uuid::Uuid;

/// Base trait for every type the shaping core can sort or project.
///
/// A resource exposes:
/// - a stable type tag used to key property mappings
/// - its unique identifier (the implicit sort tie-break)
/// - the ordered list of its public field names
/// - dynamic access to field values by (declared) name
///
/// Implementations are usually generated with [`impl_resource!`](crate::impl_resource).
pub trait Resource: Send + Sync + 'static {
    /// Type tag (e.g. "author", "author_dto")
    fn resource_type() -> &'static str;

    /// Public field names in declaration order
    fn field_names() -> &'static [&'static str];

    /// Unique identifier of this instance
    fn id(&self) -> Uuid;

    /// Value of a declared field, `None` when the name is not declared
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Declared spelling of a field, matched case-insensitively
    fn resolve_field(name: &str) -> Option<&'static str> {
        let name = name.trim();
        Self::field_names()
            .iter()
            .copied()
            .find(|declared| declared.eq_ignore_ascii_case(name))
    }
}
