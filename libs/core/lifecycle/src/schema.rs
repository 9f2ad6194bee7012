use std::fmt;

/// A required request field that was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField(pub &'static str);

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for MissingField {}

/// Unwrap a required field, naming it on failure.
///
/// Request DTOs declare every field as `Option` so that presence is checked
/// in a fixed order and the first missing field is the one reported.
pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, MissingField> {
    value.ok_or(MissingField(field))
}
