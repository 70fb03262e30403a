//! Order-preserving group-by shared by the division and zip loaders.

use std::collections::HashMap;

/// Append each `(key, value)` pair to its key's group.
///
/// Input order does not matter for correctness: rows for one key may be
/// scattered through the source. Within a group, values keep source order.
pub(crate) fn group_into<V>(
  groups: &mut HashMap<String, Vec<V>>,
  pairs: impl IntoIterator<Item = (String, V)>,
) {
  for (key, value) in pairs {
    groups.entry(key).or_default().push(value);
  }
}
