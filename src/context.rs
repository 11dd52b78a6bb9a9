//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;

/// Top-level screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    City(String),
    Admin,
    Manage,
    About,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload data from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload data from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Current screen - read
    pub page: ReadSignal<Page>,
    /// Current screen - write
    set_page: WriteSignal<Page>,
    /// Whether the admin PIN was entered this session
    pub admin_unlocked: ReadSignal<bool>,
    set_admin_unlocked: WriteSignal<bool>,
    /// Browser connectivity, for the offline badge
    pub online: ReadSignal<bool>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        page: (ReadSignal<Page>, WriteSignal<Page>),
        admin_unlocked: (ReadSignal<bool>, WriteSignal<bool>),
        online: ReadSignal<bool>,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            page: page.0,
            set_page: page.1,
            admin_unlocked: admin_unlocked.0,
            set_admin_unlocked: admin_unlocked.1,
            online,
        }
    }

    /// Trigger a reload of summaries and settings
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn navigate(&self, page: Page) {
        self.set_page.set(page);
    }

    pub fn unlock_admin(&self) {
        self.set_admin_unlocked.set(true);
    }

    pub fn lock_admin(&self) {
        self.set_admin_unlocked.set(false);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Drag state shared by every list. The document listeners are bound once in
/// `App`; the mounted page registers where a drop goes.
#[derive(Clone, Copy)]
pub struct DragContext {
    pub dnd: DndSignals,
    on_drop: StoredValue<Option<Callback<(String, String)>>>,
}

impl DragContext {
    pub fn new(dnd: DndSignals) -> Self {
        Self {
            dnd,
            on_drop: StoredValue::new(None),
        }
    }

    pub fn set_drop_handler(&self, handler: Callback<(String, String)>) {
        self.on_drop.set_value(Some(handler));
    }

    pub fn clear_drop_handler(&self) {
        let _ = self.on_drop.try_set_value(None);
    }

    /// Forward a finished drag to the registered page, if any
    pub fn dispatch(&self, dragged: String, target: String) {
        if let Some(handler) = self.on_drop.try_get_value().flatten() {
            handler.run((dragged, target));
        }
    }
}

pub fn use_drag_context() -> DragContext {
    expect_context::<DragContext>()
}
