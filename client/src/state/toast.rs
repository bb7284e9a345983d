//! Transient notification queue.
//!
//! Toasts carry the short "what happened" summary next to the inline
//! message areas. Only the newest `TOAST_LIMIT` toasts are kept.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

pub const TOAST_LIMIT: usize = 1;
pub const TOAST_DURATION_MS: u64 = 5_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue a toast, evicting the oldest beyond the limit. Returns its id.
    pub fn push(&mut self, title: impl Into<String>, description: impl Into<String>, variant: ToastVariant) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, title: title.into(), description: description.into(), variant });
        if self.toasts.len() > TOAST_LIMIT {
            let excess = self.toasts.len() - TOAST_LIMIT;
            self.toasts.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}
