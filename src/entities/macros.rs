//! Macros for reducing boilerplate when declaring resources
//!
//! The shaping core only needs three things from a type: a tag, a declared
//! list of public field names and a way to read those fields by name.
//! `impl_resource!` derives all of it from a single field table.

/// Implement [`Resource`](crate::core::resource::Resource) for an existing struct
///
/// Each row maps a public (caller-facing) field name to a struct field. The
/// row order is the declaration order used when shaping without an explicit
/// field list. The struct must have an `id: Uuid` field, and every mapped
/// field type must convert into [`FieldValue`](crate::core::field::FieldValue).
///
/// # Example
/// ```rust,ignore
/// pub struct AuthorDto {
///     pub id: Uuid,
///     pub name: String,
///     pub age: i32,
/// }
///
/// impl_resource!(AuthorDto, "author_dto", {
///     "id" => id,
///     "name" => name,
///     "age" => age,
/// });
/// ```
#[macro_export]
macro_rules! impl_resource {
    (
        $type:ty,
        $type_tag:expr,
        {
            $( $public:literal => $field:ident ),+ $(,)?
        }
    ) => {
        impl $crate::core::resource::Resource for $type {
            fn resource_type() -> &'static str {
                $type_tag
            }

            fn field_names() -> &'static [&'static str] {
                &[ $( $public ),+ ]
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    $(
                        $public => Some($crate::core::field::FieldValue::from(
                            ::std::clone::Clone::clone(&self.$field),
                        )),
                    )+
                    _ => None,
                }
            }
        }
    };
}
