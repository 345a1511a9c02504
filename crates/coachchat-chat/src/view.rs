/// Display surface for a chat session.
///
/// Views hold no conversation state; the session tells them what to show.
pub trait ChatView {
    /// Remove every rendered message
    fn clear(&mut self);

    /// Append one message from `sender`
    fn show_message(&mut self, sender: &str, text: &str);

    /// Called with `true` when a request goes out and `false` once it resolves
    fn set_busy(&mut self, _busy: bool) {}
}

impl<V: ChatView + ?Sized> ChatView for Box<V> {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn show_message(&mut self, sender: &str, text: &str) {
        (**self).show_message(sender, text)
    }

    fn set_busy(&mut self, busy: bool) {
        (**self).set_busy(busy)
    }
}
