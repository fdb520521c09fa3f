//! Events-changed notification.
//!
//! An explicit subscription registry injected into the views, replacing the
//! module-level pub/sub a surrounding application might reach for. The
//! registry is single-threaded (UI event loop) and notification iterates a
//! snapshot, so a callback may subscribe or unsubscribe re-entrantly.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`ChangeNotifier::subscribe`]; pass it back to
/// [`ChangeNotifier::unsubscribe`] when the subscriber is torn down.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription(u64);

/// Registry of callbacks interested in "the event collection changed".
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: RefCell<Vec<(u64, Rc<dyn Fn()>)>>,
    next_token: Cell<u64>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; fires on every [`notify`](Self::notify).
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let token = self.next_token.get();
        self.next_token.set(token + 1);
        self.subscribers
            .borrow_mut()
            .push((token, Rc::new(callback)));
        Subscription(token)
    }

    /// Remove a subscription. Unknown handles are ignored.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.subscribers
            .borrow_mut()
            .retain(|(token, _)| *token != subscription.0);
    }

    /// Invoke every currently registered callback.
    pub fn notify(&self) {
        let snapshot: Vec<Rc<dyn Fn()>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in snapshot {
            callback();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_reaches_subscriber() {
        let notifier = ChangeNotifier::new();
        let hits = Rc::new(Cell::new(0u32));

        let hits_clone = Rc::clone(&hits);
        let _sub = notifier.subscribe(move || hits_clone.set(hits_clone.get() + 1));

        notifier.notify();
        notifier.notify();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let notifier = ChangeNotifier::new();
        let hits = Rc::new(Cell::new(0u32));

        let hits_clone = Rc::clone(&hits);
        let sub = notifier.subscribe(move || hits_clone.set(hits_clone.get() + 1));

        notifier.notify();
        notifier.unsubscribe(sub);
        notifier.notify();

        assert_eq!(hits.get(), 1);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn test_multiple_subscribers_all_fire() {
        let notifier = ChangeNotifier::new();
        let hits = Rc::new(Cell::new(0u32));

        let a = Rc::clone(&hits);
        let b = Rc::clone(&hits);
        let _sub_a = notifier.subscribe(move || a.set(a.get() + 1));
        let _sub_b = notifier.subscribe(move || b.set(b.get() + 10));

        notifier.notify();
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn test_reentrant_unsubscribe_does_not_panic() {
        let notifier = Rc::new(ChangeNotifier::new());
        let sub_holder: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let notifier_clone = Rc::clone(&notifier);
        let holder_clone = Rc::clone(&sub_holder);
        let sub = notifier.subscribe(move || {
            if let Some(sub) = holder_clone.borrow_mut().take() {
                notifier_clone.unsubscribe(sub);
            }
        });
        *sub_holder.borrow_mut() = Some(sub);

        notifier.notify();
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
