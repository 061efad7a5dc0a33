use crossbeam_channel::{unbounded, Receiver, Sender, TryIter};
use crate::world::government::GovernmentRef;

/// Something a dismissed surface wants the flight controller to follow up on.
#[derive(Debug, Clone)]
pub enum Completion {
    /// The landing surface closed and the player is departing.
    LandingComplete,
    /// The hail surface closed after the player paid off `government`.
    HailBribe(GovernmentRef),
}

/// Handed to surfaces so they can report their dismissal.
#[derive(Debug, Clone)]
pub struct CompletionSender(Sender<Completion>);

impl CompletionSender {
    pub fn send(&self, completion: Completion) {
        if self.0.send(completion).is_err() {
            log::debug!("completion dropped: controller is gone");
        }
    }
}

/// The controller's end of the mailbox.
#[derive(Debug)]
pub struct CompletionReceiver(Receiver<Completion>);

impl CompletionReceiver {
    pub fn try_iter(&self) -> TryIter<'_, Completion> {
        self.0.try_iter()
    }
}

pub fn completion_channel() -> (CompletionSender, CompletionReceiver) {
    let (tx, rx) = unbounded();
    (CompletionSender(tx), CompletionReceiver(rx))
}
