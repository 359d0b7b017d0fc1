//! Dynamic multi-key sorting driven by an `orderBy` clause
//!
//! # Clause format
//!
//! - `name` or `name asc` (ascending)
//! - `name desc` (descending)
//! - `genre, name desc` (genre first, then name)
//!
//! Names and direction keywords are case-insensitive. Every public name is
//! resolved through a [`PropertyMapping`]; the resource identifier is always
//! appended as the last key so that equal rows keep a stable, repeatable
//! order across pages.

use crate::core::error::{ConfigError, ShapingResult, ValidationError};
use crate::core::field::FieldValue;
use crate::core::mapping::PropertyMapping;
use crate::core::resource::Resource;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Reverse the sort direction (Asc <-> Desc)
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// One parsed token of an `orderBy` clause
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortTerm {
    /// Public field name, trimmed
    pub field: String,
    pub direction: SortDirection,
}

/// Parsed `orderBy` clause
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortClause(Vec<SortTerm>);

impl SortClause {
    /// Parse a raw clause
    ///
    /// Empty tokens are skipped, so `None`, `""` and `" , "` all give an
    /// empty clause. A token with more than a name and one `asc`/`desc`
    /// keyword is malformed.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let Some(raw) = raw else {
            return Ok(Self::default());
        };

        let mut terms = Vec::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            let mut words = token.split_whitespace();
            let field = words.next().unwrap_or_default();
            let direction = match words.next() {
                None => SortDirection::Ascending,
                Some(word) if word.eq_ignore_ascii_case("asc") => SortDirection::Ascending,
                Some(word) if word.eq_ignore_ascii_case("desc") => SortDirection::Descending,
                Some(_) => {
                    return Err(ValidationError::MalformedOrderBy {
                        token: token.to_string(),
                    });
                }
            };
            if words.next().is_some() {
                return Err(ValidationError::MalformedOrderBy {
                    token: token.to_string(),
                });
            }

            terms.push(SortTerm {
                field: field.to_string(),
                direction,
            });
        }

        Ok(Self(terms))
    }

    pub fn terms(&self) -> &[SortTerm] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A resolved storage sort key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    /// Declared storage field name on the sorted resource
    pub field: &'static str,
    pub direction: SortDirection,
}

/// Resolve a clause into storage sort keys for resource `T`
///
/// Multi-field entries expand in entry order; each key's direction is the
/// requested direction, reversed when the entry's revert flag is set.
pub fn resolve_sort_keys<T: Resource>(
    clause: &SortClause,
    mapping: &PropertyMapping,
) -> ShapingResult<Vec<SortKey>> {
    let mut keys = Vec::new();

    for term in clause.terms() {
        let value = mapping
            .get(&term.field)
            .ok_or_else(|| ValidationError::UnknownOrderByField {
                field: term.field.clone(),
            })?;

        let direction = if value.revert {
            term.direction.reverse()
        } else {
            term.direction
        };

        for property in &value.destination_properties {
            let field = T::resolve_field(property).ok_or_else(|| ConfigError::UnknownStorageField {
                resource: T::resource_type().to_string(),
                field: property.clone(),
            })?;
            keys.push(SortKey { field, direction });
        }
    }

    Ok(keys)
}

/// Sort a candidate set according to an `orderBy` clause
///
/// An empty clause orders by identifier ascending. An unmapped name is a
/// validation error and nothing is sorted. The identifier is always the final
/// tie-break, so the output order is total.
pub fn apply_sort<T: Resource>(
    source: Vec<T>,
    order_by: Option<&str>,
    mapping: &PropertyMapping,
) -> ShapingResult<Vec<T>> {
    let clause = SortClause::parse(order_by)?;
    let keys = resolve_sort_keys::<T>(&clause, mapping)?;

    tracing::trace!(
        resource = T::resource_type(),
        keys = keys.len(),
        candidates = source.len(),
        "sorting candidate set"
    );

    // Read every key once per row instead of once per comparison
    let mut decorated: Vec<(Vec<FieldValue>, FieldValue, T)> = source
        .into_iter()
        .map(|item| {
            let values = keys
                .iter()
                .map(|key| item.field_value(key.field).unwrap_or(FieldValue::Null))
                .collect();
            (values, FieldValue::Uuid(item.id()), item)
        })
        .collect();

    decorated.sort_by(|(a_values, a_id, _), (b_values, b_id, _)| {
        keys.iter()
            .zip(a_values.iter().zip(b_values.iter()))
            .map(|(key, (a, b))| key.direction.apply(a.total_cmp(b)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a_id.total_cmp(b_id))
    });

    Ok(decorated.into_iter().map(|(_, _, item)| item).collect())
}
