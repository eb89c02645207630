use std::sync::Arc;

use shared::{domain::Contact, error::ContactError};
use storage::{ContactStore, ContactStream};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{info, warn};

pub mod validation;
pub use validation::{validate_contact, validate_fields, ContactFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactOperation {
    Add,
    Update,
    Delete,
}

impl ContactOperation {
    fn verb(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Single writer path between the front end and the contact store.
///
/// Mutations run as spawned tasks. Their outcome is visible through the next store snapshot or
/// through the error signal, which holds at most one message until [`clear_error`] is called.
///
/// [`clear_error`]: ContactController::clear_error
pub struct ContactController {
    store: Arc<dyn ContactStore>,
    error: watch::Sender<Option<String>>,
}

impl ContactController {
    pub fn new(store: Arc<dyn ContactStore>) -> Arc<Self> {
        let (error, _) = watch::channel(None);
        Arc::new(Self { store, error })
    }

    pub fn observe_contacts(&self) -> ContactStream {
        self.store.select_all()
    }

    pub fn add_contact(
        self: &Arc<Self>,
        name: &str,
        phone_number: &str,
        email: &str,
    ) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        let (name, phone_number, email) = (
            name.to_string(),
            phone_number.to_string(),
            email.to_string(),
        );
        tokio::spawn(async move {
            let contact = match validate_fields(&name, &phone_number, &email) {
                Ok(fields) => fields.into_new_contact(),
                Err(err) => return controller.reject(ContactOperation::Add, err),
            };
            match controller.store.insert(&contact).await {
                Ok(contact_id) => info!(contact_id = contact_id.0, "contact added"),
                Err(error) => controller.report_failure(ContactOperation::Add, &error),
            }
        })
    }

    pub fn update_contact(self: &Arc<Self>, contact: Contact) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let contact = match validate_contact(&contact) {
                Ok(contact) => contact,
                Err(err) => return controller.reject(ContactOperation::Update, err),
            };
            match controller.store.update(&contact).await {
                Ok(()) => info!(contact_id = contact.id.0, "contact updated"),
                Err(error) => controller.report_failure(ContactOperation::Update, &error),
            }
        })
    }

    pub fn delete_contact(self: &Arc<Self>, contact: Contact) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            match controller.store.delete(&contact).await {
                Ok(()) => info!(contact_id = contact.id.0, "contact deleted"),
                Err(error) => controller.report_failure(ContactOperation::Delete, &error),
            }
        })
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn subscribe_errors(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    pub fn clear_error(&self) {
        self.error.send_if_modified(|slot| slot.take().is_some());
    }

    /// Clears the signal only if it still holds `shown`. A message raised after `shown` was read
    /// stays pending.
    pub fn acknowledge_error(&self, shown: &str) {
        self.error.send_if_modified(|slot| {
            if slot.as_deref() == Some(shown) {
                *slot = None;
                true
            } else {
                false
            }
        });
    }

    fn reject(&self, operation: ContactOperation, err: ContactError) {
        warn!(operation = operation.verb(), %err, "contact request rejected");
        self.set_error(err.to_string());
    }

    fn report_failure(&self, operation: ContactOperation, error: &anyhow::Error) {
        warn!(
            operation = operation.verb(),
            error = %format!("{error:#}"),
            "contact store write failed"
        );
        self.set_error(format!("Failed to {} contact: {error:#}", operation.verb()));
    }

    // Overwrites any message the consumer has not acknowledged yet.
    fn set_error(&self, message: String) {
        self.error.send_replace(Some(message));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
