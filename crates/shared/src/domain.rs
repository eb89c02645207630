use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ContactId);

impl ContactId {
    /// Placeholder carried by a contact that has not been persisted yet.
    pub const UNASSIGNED: Self = Self(0);

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub id: ContactId,
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

impl Contact {
    /// Builds a contact that the store has not seen yet.
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: ContactId::UNASSIGNED,
            name: name.into(),
            phone_number: phone_number.into(),
            email: email.into(),
        }
    }

    /// Full-record replacement keeping the identifier.
    pub fn with_fields(
        &self,
        name: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: self.id,
            name: name.into(),
            phone_number: phone_number.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_contact_is_unassigned() {
        let contact = Contact::new("Ann", "555", "a@b.com");
        assert_eq!(contact.id, ContactId::UNASSIGNED);
        assert!(!contact.id.is_assigned());
    }

    #[test]
    fn with_fields_keeps_identifier() {
        let stored = Contact {
            id: ContactId(7),
            ..Contact::new("Ann", "555", "a@b.com")
        };
        let replaced = stored.with_fields("Anna", "556", "anna@b.com");
        assert_eq!(replaced.id, ContactId(7));
        assert_eq!(replaced.name, "Anna");
        assert_eq!(replaced.phone_number, "556");
        assert_eq!(replaced.email, "anna@b.com");
    }

    #[test]
    fn deserializes_without_id_as_unassigned() {
        let contact: Contact =
            serde_json::from_str(r#"{"name":"Bob","phone_number":"123","email":"b@x.com"}"#)
                .expect("contact json");
        assert!(!contact.id.is_assigned());
        assert_eq!(contact.name, "Bob");
    }
}
