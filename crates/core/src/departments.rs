//! Department / crew validation.

use crate::error::CoreError;
use crate::validation::require_non_empty;

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    require_non_empty("name", name)
}
