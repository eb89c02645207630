//! Form state machine over the draft.
//!
//! `Hidden` always carries an empty draft. Leaving a visible form, by cancel or submit, resets
//! the draft and returns to `Hidden`.

use shared::domain::Contact;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Hidden,
    Creating,
    Editing(Contact),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    PhoneNumber,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

impl Draft {
    fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone_number: contact.phone_number.clone(),
            email: contact.email.clone(),
        }
    }
}

/// What the controller is asked to do when a visible form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitIntent {
    Add {
        name: String,
        phone_number: String,
        email: String,
    },
    Update(Contact),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresentationState {
    mode: FormMode,
    draft: Draft,
}

impl PresentationState {
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_form_visible(&self) -> bool {
        self.mode != FormMode::Hidden
    }

    /// The add button. An open edit form is left untouched.
    pub fn toggle_add(&mut self) {
        match self.mode {
            FormMode::Hidden => self.mode = FormMode::Creating,
            FormMode::Creating => self.reset(),
            FormMode::Editing(_) => {}
        }
    }

    pub fn begin_edit(&mut self, contact: &Contact) {
        self.draft = Draft::from_contact(contact);
        self.mode = FormMode::Editing(contact.clone());
    }

    /// Returns false when no form is open; the draft is left empty in that case.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> bool {
        if !self.is_form_visible() {
            return false;
        }
        let slot = match field {
            DraftField::Name => &mut self.draft.name,
            DraftField::PhoneNumber => &mut self.draft.phone_number,
            DraftField::Email => &mut self.draft.email,
        };
        *slot = value.into();
        true
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn submit(&mut self) -> Option<SubmitIntent> {
        let draft = std::mem::take(&mut self.draft);
        match std::mem::take(&mut self.mode) {
            FormMode::Hidden => None,
            FormMode::Creating => Some(SubmitIntent::Add {
                name: draft.name,
                phone_number: draft.phone_number,
                email: draft.email,
            }),
            FormMode::Editing(contact) => Some(SubmitIntent::Update(contact.with_fields(
                draft.name,
                draft.phone_number,
                draft.email,
            ))),
        }
    }

    fn reset(&mut self) {
        self.mode = FormMode::Hidden;
        self.draft = Draft::default();
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
