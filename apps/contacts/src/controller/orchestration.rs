//! Forwarding of form intents and row actions to the contact controller.

use std::sync::Arc;

use client_core::ContactController;
use shared::domain::Contact;
use tokio::task::JoinHandle;

use crate::controller::reducer::SubmitIntent;

pub struct Orchestrator {
    controller: Arc<ContactController>,
    in_flight: Vec<JoinHandle<()>>,
}

impl Orchestrator {
    pub fn new(controller: Arc<ContactController>) -> Self {
        Self {
            controller,
            in_flight: Vec::new(),
        }
    }

    pub fn controller(&self) -> &Arc<ContactController> {
        &self.controller
    }

    pub fn dispatch_submit(&mut self, intent: SubmitIntent) {
        let handle = match intent {
            SubmitIntent::Add {
                name,
                phone_number,
                email,
            } => {
                tracing::debug!(command = "add_contact", "queued contact mutation");
                self.controller.add_contact(&name, &phone_number, &email)
            }
            SubmitIntent::Update(contact) => {
                tracing::debug!(
                    command = "update_contact",
                    contact_id = contact.id.0,
                    "queued contact mutation"
                );
                self.controller.update_contact(contact)
            }
        };
        self.track(handle);
    }

    pub fn dispatch_delete(&mut self, contact: Contact) {
        tracing::debug!(
            command = "delete_contact",
            contact_id = contact.id.0,
            "queued contact mutation"
        );
        let handle = self.controller.delete_contact(contact);
        self.track(handle);
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.iter().filter(|h| !h.is_finished()).count()
    }

    /// Waits for every queued mutation. Mutations are never cancelled.
    pub async fn drain(&mut self) {
        for handle in self.in_flight.drain(..) {
            if let Err(error) = handle.await {
                tracing::error!(%error, "contact mutation task panicked");
            }
        }
    }

    fn track(&mut self, handle: JoinHandle<()>) {
        self.in_flight.retain(|h| !h.is_finished());
        self.in_flight.push(handle);
    }
}
