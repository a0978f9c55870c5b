use std::collections::VecDeque;
use std::rc::Rc;

use yew::prelude::*;

use crate::error::AppError;

const DEFAULT_LIMIT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    /// How long a toast stays on screen before it dismisses itself.
    pub fn lifetime_ms(&self) -> u32 {
        match self {
            ToastKind::Error => 8_000,
            ToastKind::Success | ToastKind::Info => 4_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastQueue {
    items: VecDeque<Toast>,
    next_id: u64,
    limit: usize,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }
}

impl ToastQueue {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: VecDeque::new(),
            next_id: 0,
            limit: limit.max(1),
        }
    }

    /// Adds a toast, dropping the oldest ones past the limit.
    pub fn push(&mut self, kind: ToastKind, title: String, message: Option<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push_back(Toast {
            id,
            kind,
            title,
            message,
        });
        while self.items.len() > self.limit {
            self.items.pop_front();
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub enum ToastAction {
    Push {
        kind: ToastKind,
        title: String,
        message: Option<String>,
    },
    Dismiss(u64),
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push {
                kind,
                title,
                message,
            } => {
                next.push(kind, title, message);
            }
            ToastAction::Dismiss(id) => next.dismiss(id),
        }
        Rc::new(next)
    }
}

/// Context handle used by pages to raise toasts.
#[derive(Clone)]
pub struct Toaster(UseReducerHandle<ToastQueue>);

impl PartialEq for Toaster {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl Toaster {
    pub fn new(handle: UseReducerHandle<ToastQueue>) -> Self {
        Self(handle)
    }

    pub fn queue(&self) -> &ToastQueue {
        &self.0
    }

    pub fn success(&self, title: &str, message: Option<String>) {
        self.0.dispatch(ToastAction::Push {
            kind: ToastKind::Success,
            title: title.to_string(),
            message,
        });
    }

    pub fn info(&self, title: &str, message: Option<String>) {
        self.0.dispatch(ToastAction::Push {
            kind: ToastKind::Info,
            title: title.to_string(),
            message,
        });
    }

    pub fn error(&self, title: &str, err: &AppError) {
        tracing::warn!(%err, "{title}");
        self.0.dispatch(ToastAction::Push {
            kind: ToastKind::Error,
            title: title.to_string(),
            message: Some(err.user_message()),
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.0.dispatch(ToastAction::Dismiss(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_toasts() {
        let mut queue = ToastQueue::with_limit(2);
        queue.push(ToastKind::Info, "one".into(), None);
        queue.push(ToastKind::Info, "two".into(), None);
        queue.push(ToastKind::Error, "three".into(), Some("boom".into()));
        let titles: Vec<&str> = queue.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["two", "three"]);
    }

    #[test]
    fn dismiss_removes_by_id() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Success, "saved".into(), None);
        let second = queue.push(ToastKind::Success, "saved again".into(), None);
        assert_ne!(first, second);
        queue.dismiss(first);
        queue.dismiss(99);
        assert_eq!(queue.iter().count(), 1);
        assert_eq!(queue.iter().next().map(|t| t.id), Some(second));
    }

    #[test]
    fn reducer_applies_actions() {
        let queue = Rc::new(ToastQueue::default());
        let queue = queue.reduce(ToastAction::Push {
            kind: ToastKind::Error,
            title: "Could not load products".into(),
            message: None,
        });
        assert_eq!(queue.iter().count(), 1);
        let id = queue.iter().next().map(|t| t.id).unwrap();
        let queue = queue.reduce(ToastAction::Dismiss(id));
        assert!(queue.is_empty());
    }

    #[test]
    fn every_kind_expires_and_errors_linger() {
        for kind in [ToastKind::Success, ToastKind::Info, ToastKind::Error] {
            assert!(kind.lifetime_ms() > 0);
        }
        assert!(ToastKind::Error.lifetime_ms() > ToastKind::Success.lifetime_ms());
    }

    #[test]
    fn zero_limit_still_shows_one() {
        let mut queue = ToastQueue::with_limit(0);
        queue.push(ToastKind::Info, "a".into(), None);
        queue.push(ToastKind::Info, "b".into(), None);
        assert_eq!(queue.iter().count(), 1);
    }
}
