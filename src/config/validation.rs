//! Required-key validation.

use std::collections::BTreeMap;

/// Return the required keys absent from `values`, in the order given.
pub fn missing_keys<'a, S: AsRef<str>>(
    values: &BTreeMap<String, String>,
    required: &'a [S],
) -> Vec<&'a str> {
    required
        .iter()
        .map(AsRef::as_ref)
        .filter(|key| !values.contains_key(*key))
        .collect()
}
