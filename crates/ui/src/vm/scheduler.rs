use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;
use services::quiz::{AdvanceScheduler, AdvanceTicket};

/// Advance timer running as a Dioxus task.
///
/// Fired tickets are handed to `on_fire`; the task is cancelled when the
/// quiz cancels or replaces the pending advance.
pub struct DioxusScheduler {
    on_fire: Callback<AdvanceTicket>,
    task: Option<Task>,
}

impl DioxusScheduler {
    #[must_use]
    pub fn new(on_fire: Callback<AdvanceTicket>) -> Self {
        Self {
            on_fire,
            task: None,
        }
    }
}

impl AdvanceScheduler for DioxusScheduler {
    fn schedule(&mut self, ticket: AdvanceTicket, delay: Duration) {
        self.cancel();
        let on_fire = self.on_fire;
        self.task = Some(spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire.call(ticket);
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }
}
