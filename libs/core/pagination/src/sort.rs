use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumString};

/// Direction of a single sort key
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Apply the direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// One sort key: an opaque property name plus a direction.
///
/// The property is never checked against a schema here. Repositories decide
/// whether an unknown property is ignored or rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(property: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(property, SortDirection::Asc)
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(property, SortDirection::Desc)
    }

    /// Parse the `property[,direction]` query form, e.g. `name,desc`.
    ///
    /// A missing or unrecognized direction falls back to ascending. Returns
    /// `None` only when there is no property at all.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(2, ',');
        let property = parts.next().map(str::trim).unwrap_or_default();
        if property.is_empty() {
            return None;
        }

        let direction = parts
            .next()
            .and_then(|d| d.trim().parse().ok())
            .unwrap_or_default();

        Some(Self::new(property, direction))
    }
}

/// Stable multi-key sort of `items` by `orders`, in request order.
///
/// Only properties listed in `sortable` take part; `compare` is never called
/// with any other name. Returns the skipped property names.
pub fn sort_by_orders<'o, T, F>(
    items: &mut [T],
    orders: &'o [SortOrder],
    sortable: &[&str],
    compare: F,
) -> Vec<&'o str>
where
    F: Fn(&T, &T, &str) -> Ordering,
{
    let (known, skipped): (Vec<&SortOrder>, Vec<&SortOrder>) = orders
        .iter()
        .partition(|order| sortable.contains(&order.property.as_str()));

    if !known.is_empty() {
        items.sort_by(|a, b| {
            known
                .iter()
                .map(|order| order.direction.apply(compare(a, b, &order.property)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }

    skipped.into_iter().map(|order| order.property.as_str()).collect()
}
