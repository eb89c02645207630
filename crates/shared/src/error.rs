use thiserror::Error;

use crate::domain::ContactId;

/// Message surfaced whenever a required contact field is blank.
pub const VALIDATION_MESSAGE: &str = "All fields must be filled";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,
    #[error("contact has no store-assigned identifier")]
    Unassigned,
    #[error("contact {0} is already persisted")]
    AlreadyPersisted(ContactId),
    #[error("contact {0} not found")]
    NotFound(ContactId),
}
