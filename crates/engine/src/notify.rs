use crate::types::QuizEvent;

/// Receiver of quiz notifications, called in emission order.
pub trait Notifier {
    fn notify(&mut self, event: &QuizEvent);
}

/// Buffers events until the owner drains them.
impl Notifier for Vec<QuizEvent> {
    fn notify(&mut self, event: &QuizEvent) {
        self.push(*event);
    }
}

/// Drops every event.
impl Notifier for () {
    fn notify(&mut self, _event: &QuizEvent) {}
}
