use super::*;
use crate::controller::reducer::DraftField;

fn snapshot() -> Vec<Contact> {
    vec![
        Contact {
            id: ContactId(1),
            ..Contact::new("Ann", "555", "a@b.com")
        },
        Contact {
            id: ContactId(2),
            ..Contact::new("Bob", "123", "b@x.com")
        },
    ]
}

#[test]
fn hidden_state_renders_rows_only() {
    let view = render(&snapshot(), &PresentationState::default(), None);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[1].id, ContactId(2));
    assert_eq!(view.rows[1].name, "Bob");
    assert!(view.form.is_none());
    assert!(view.notice.is_none());
}

#[test]
fn create_and_edit_forms_use_distinct_labels() {
    let mut state = PresentationState::default();
    state.toggle_add();
    let form = render(&[], &state, None).form.expect("form");
    assert_eq!(form.title, "New Contact");
    assert_eq!(form.submit_label, "Add Contact");

    state.begin_edit(&snapshot()[0]);
    let form = render(&snapshot(), &state, None).form.expect("form");
    assert_eq!(form.title, "Edit Contact");
    assert_eq!(form.submit_label, "Update Contact");
    assert_eq!(form.fields[0].value, "Ann");
}

#[test]
fn error_mentioning_a_field_flags_it() {
    let mut state = PresentationState::default();
    state.toggle_add();
    state.set_field(DraftField::Email, "nope");

    let view = render(&[], &state, Some("Failed to add contact: invalid EMAIL"));
    let form = view.form.expect("form");
    assert!(!form.fields[0].flagged);
    assert!(!form.fields[1].flagged);
    assert!(form.fields[2].flagged);
    assert_eq!(
        view.notice.as_deref(),
        Some("Failed to add contact: invalid EMAIL")
    );
}

#[test]
fn display_lists_rows_form_and_notice() {
    let mut state = PresentationState::default();
    state.toggle_add();
    state.set_field(DraftField::Name, "Cid");

    let text = render(&snapshot(), &state, Some("All fields must be filled")).to_string();
    assert!(text.starts_with("== Contacts (2) ==\n"));
    assert!(text.contains("  [1] Ann | 555 | a@b.com\n"));
    assert!(text.contains("-- New Contact --\n"));
    assert!(text.contains("  name  : Cid\n"));
    assert!(text.contains("[submit] Add Contact"));
    assert!(text.ends_with("! All fields must be filled\n"));
}

#[test]
fn empty_snapshot_says_so() {
    let text = render(&[], &PresentationState::default(), None).to_string();
    assert_eq!(text, "== Contacts (0) ==\n  (no contacts)\n");
}
