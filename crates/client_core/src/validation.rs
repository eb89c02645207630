//! Field rules shared by every contact mutation.
//!
//! Add and update go through the same check: each field is trimmed, a field that is empty after
//! trimming rejects the whole request, and only the trimmed values are ever handed to the store.

use shared::{domain::Contact, error::ContactError};

/// Trimmed, non-empty contact fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

impl ContactFields {
    pub fn into_new_contact(self) -> Contact {
        Contact::new(self.name, self.phone_number, self.email)
    }

    pub fn apply_to(self, contact: &Contact) -> Contact {
        contact.with_fields(self.name, self.phone_number, self.email)
    }
}

pub fn validate_fields(
    name: &str,
    phone_number: &str,
    email: &str,
) -> Result<ContactFields, ContactError> {
    let fields = ContactFields {
        name: name.trim().to_string(),
        phone_number: phone_number.trim().to_string(),
        email: email.trim().to_string(),
    };

    if fields.name.is_empty() || fields.phone_number.is_empty() || fields.email.is_empty() {
        return Err(ContactError::Validation);
    }
    Ok(fields)
}

pub fn validate_contact(contact: &Contact) -> Result<Contact, ContactError> {
    validate_fields(&contact.name, &contact.phone_number, &contact.email)
        .map(|fields| fields.apply_to(contact))
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
