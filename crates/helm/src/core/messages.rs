use std::cell::RefCell;
use std::rc::Rc;
use crate::api::types::Importance;

/// A transient on-screen message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub importance: Importance,
}

/// The scrolling message log. Clones share one log, so collaborators on the
/// frame thread can post to it alongside the controller.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Rc<RefCell<Vec<Message>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, text: impl Into<String>, importance: Importance) {
        let text = text.into();
        log::info!("message: {}", text);
        self.entries.borrow_mut().push(Message { text, importance });
    }

    /// Take every message posted since the last drain.
    pub fn drain(&self) -> Vec<Message> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }

    pub fn last(&self) -> Option<Message> {
        self.entries.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let log = MessageLog::new();
        let other = log.clone();
        other.add("Unable to send hail.", Importance::High);
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().unwrap().importance, Importance::High);

        let drained = log.drain();
        assert_eq!(drained[0].text, "Unable to send hail.");
        assert!(other.is_empty());
    }
}
