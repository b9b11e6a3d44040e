//! Column address parsing
//!
//! Splits `family:qualifier` column keys, defaulting the family for bare
//! qualifiers.

/// A resolved (family, qualifier) column address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnAddress {
    pub family: String,
    pub qualifier: String,
}

impl ColumnAddress {
    pub fn new(family: impl Into<String>, qualifier: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            qualifier: qualifier.into(),
        }
    }

    /// The fully qualified `family:qualifier` form
    pub fn qualified(&self) -> String {
        format!("{}:{}", self.family, self.qualifier)
    }
}

/// Parse a column key into its (family, qualifier) address.
///
/// Splits on the first `:`. A key without a colon resolves to
/// `(default_family, key)`. This function cannot fail; validation of the
/// resulting address is the store's concern.
pub fn parse_column_key(key: &str, default_family: &str) -> ColumnAddress {
    match key.split_once(':') {
        Some((family, qualifier)) => ColumnAddress::new(family, qualifier),
        None => ColumnAddress::new(default_family, key),
    }
}
