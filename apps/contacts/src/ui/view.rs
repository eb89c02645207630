use std::fmt;

use shared::domain::{Contact, ContactId};

use crate::controller::reducer::{FormMode, PresentationState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub id: ContactId,
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub fields: [FormField; 3],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactsView {
    pub rows: Vec<ContactRow>,
    pub form: Option<FormView>,
    pub notice: Option<String>,
}

/// Rebuilds the whole screen from the latest snapshot, the form state and the pending error.
pub fn render(
    snapshot: &[Contact],
    state: &PresentationState,
    error: Option<&str>,
) -> ContactsView {
    let rows = snapshot
        .iter()
        .map(|c| ContactRow {
            id: c.id,
            name: c.name.clone(),
            phone_number: c.phone_number.clone(),
            email: c.email.clone(),
        })
        .collect();

    let form = match state.mode() {
        FormMode::Hidden => None,
        mode => {
            let editing = matches!(mode, FormMode::Editing(_));
            let draft = state.draft();
            let error = error.map(str::to_ascii_lowercase).unwrap_or_default();
            Some(FormView {
                title: if editing { "Edit Contact" } else { "New Contact" },
                submit_label: if editing { "Update Contact" } else { "Add Contact" },
                fields: [
                    FormField {
                        label: "name",
                        value: draft.name.clone(),
                        flagged: error.contains("name"),
                    },
                    FormField {
                        label: "phone",
                        value: draft.phone_number.clone(),
                        flagged: error.contains("phone"),
                    },
                    FormField {
                        label: "email",
                        value: draft.email.clone(),
                        flagged: error.contains("email"),
                    },
                ],
            })
        }
    };

    ContactsView {
        rows,
        form,
        notice: error.map(str::to_string),
    }
}

impl fmt::Display for ContactsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Contacts ({}) ==", self.rows.len())?;
        if self.rows.is_empty() {
            writeln!(f, "  (no contacts)")?;
        }
        for row in &self.rows {
            writeln!(
                f,
                "  [{}] {} | {} | {}",
                row.id, row.name, row.phone_number, row.email
            )?;
        }

        if let Some(form) = &self.form {
            writeln!(f, "-- {} --", form.title)?;
            for field in &form.fields {
                let marker = if field.flagged { "!" } else { " " };
                writeln!(f, " {marker}{:<6}: {}", field.label, field.value)?;
            }
            writeln!(f, "  [submit] {}   [cancel]", form.submit_label)?;
        }

        if let Some(notice) = &self.notice {
            writeln!(f, "! {notice}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
