//! Viewport width notifications.
//!
//! The host (a terminal, a window) publishes its width through a
//! [`ViewportSignal`]; the UI shell holds a [`ViewportSubscription`] for as
//! long as it is alive. Dropping the subscription unsubscribes.

use tokio::sync::watch;

/// Widths at or below this many logical pixels are treated as narrow
pub const NARROW_BREAKPOINT_PX: u32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in logical pixels
    pub width: u32,
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    /// Convert a terminal width in columns using a fixed cell width
    pub fn from_columns(columns: u16, cell_width_px: u32) -> Self {
        Self {
            width: u32::from(columns).saturating_mul(cell_width_px.max(1)),
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.width <= NARROW_BREAKPOINT_PX
    }
}

/// Source of viewport changes
#[derive(Debug)]
pub struct ViewportSignal {
    tx: watch::Sender<Viewport>,
}

impl ViewportSignal {
    pub fn new(initial: Viewport) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Record a new width. Every publication counts as a change, even when
    /// the width is the same, so subscribers re-evaluate on each resize.
    pub fn publish(&self, viewport: Viewport) {
        self.tx.send_replace(viewport);
    }

    pub fn current(&self) -> Viewport {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> ViewportSubscription {
        ViewportSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live registration on a [`ViewportSignal`]
#[derive(Debug)]
pub struct ViewportSubscription {
    rx: watch::Receiver<Viewport>,
}

impl ViewportSubscription {
    pub fn current(&self) -> Viewport {
        *self.rx.borrow()
    }

    /// The latest viewport, if one was published since the last poll
    pub fn poll(&mut self) -> Option<Viewport> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }

    /// Wait for the next publication. `None` once the signal is dropped.
    pub async fn changed(&mut self) -> Option<Viewport> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_inclusive() {
        assert!(Viewport::new(900).is_narrow());
        assert!(Viewport::new(320).is_narrow());
        assert!(!Viewport::new(901).is_narrow());
    }

    #[test]
    fn test_from_columns() {
        assert_eq!(Viewport::from_columns(112, 8).width, 896);
        assert!(Viewport::from_columns(112, 8).is_narrow());
        assert!(!Viewport::from_columns(113, 8).is_narrow());
        // zero cell width is clamped so the viewport still scales
        assert_eq!(Viewport::from_columns(10, 0).width, 10);
    }

    #[test]
    fn test_poll_only_reports_new_publications() {
        let signal = ViewportSignal::new(Viewport::new(1200));
        let mut sub = signal.subscribe();
        assert_eq!(sub.current(), Viewport::new(1200));
        assert_eq!(sub.poll(), None);

        signal.publish(Viewport::new(600));
        assert_eq!(sub.poll(), Some(Viewport::new(600)));
        assert_eq!(sub.poll(), None);

        // same width again still counts as a resize
        signal.publish(Viewport::new(600));
        assert_eq!(sub.poll(), Some(Viewport::new(600)));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let signal = ViewportSignal::new(Viewport::new(1000));
        assert_eq!(signal.subscriber_count(), 0);
        let first = signal.subscribe();
        let second = signal.subscribe();
        assert_eq!(signal.subscriber_count(), 2);
        drop(first);
        assert_eq!(signal.subscriber_count(), 1);
        drop(second);
        assert_eq!(signal.subscriber_count(), 0);

        // publishing with nobody listening is fine
        signal.publish(Viewport::new(400));
        assert_eq!(signal.current(), Viewport::new(400));
    }

    #[tokio::test]
    async fn test_changed_waits_for_publication() {
        let signal = ViewportSignal::new(Viewport::new(1000));
        let mut sub = signal.subscribe();

        let waiter = tokio::spawn(async move { sub.changed().await });
        tokio::task::yield_now().await;
        signal.publish(Viewport::new(700));

        assert_eq!(waiter.await.unwrap(), Some(Viewport::new(700)));
    }

    #[tokio::test]
    async fn test_changed_ends_when_signal_dropped() {
        let signal = ViewportSignal::new(Viewport::new(1000));
        let mut sub = signal.subscribe();
        drop(signal);
        assert_eq!(sub.changed().await, None);
    }
}
