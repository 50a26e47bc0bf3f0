use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field} is required")]
pub struct ValidationError {
    pub field: String,
}

/// Checks that every named value is non-empty, reporting the first empty one
/// in the order given.
pub fn validate(fields: &[(&str, &str)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| value.is_empty()) {
        Some((name, _)) => Err(ValidationError {
            field: name.to_string(),
        }),
        None => Ok(()),
    }
}
