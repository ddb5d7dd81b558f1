use tokio::sync::mpsc;
use tracing::trace;

use crate::app::App;
use crate::brew::{CatalogMessage, CommandMessage, InfoMessage, InstalledMessage, SearchMessage};
use crate::task::TaskEvent;

/// Everything a background worker can report back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    Task(TaskEvent),
    Catalog(CatalogMessage),
    Search(SearchMessage),
    Installed(InstalledMessage),
    Info(InfoMessage),
    Command(CommandMessage),
}

impl From<TaskEvent> for AppEvent {
    fn from(event: TaskEvent) -> Self {
        Self::Task(event)
    }
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

pub fn create_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Drains the queue in arrival order. Returns true if anything was applied.
pub fn process_pending_events(app: &mut App, rx: &mut EventReceiver, tx: &EventSender) -> bool {
    let mut received = false;
    while let Ok(event) = rx.try_recv() {
        apply_event(app, event, tx);
        received = true;
    }
    received
}

pub fn apply_event(app: &mut App, event: AppEvent, tx: &EventSender) {
    let refresh_installed = match event {
        AppEvent::Task(event) => {
            trace!(pkg = %event.pkg(), "task event");
            app.apply_task_event(event)
        }
        AppEvent::Catalog(message) => {
            app.apply_catalog_message(message);
            false
        }
        AppEvent::Search(message) => {
            app.apply_search_message(message);
            false
        }
        AppEvent::Installed(message) => {
            app.apply_installed_message(message);
            app.take_queued_installed_refresh()
        }
        AppEvent::Info(message) => {
            app.apply_info_message(message);
            false
        }
        AppEvent::Command(message) => app.apply_command_message(message),
    };

    if refresh_installed {
        app.request_installed(tx);
    }
}
