//! Signal bus for cross-stage notifications
//!
//! Stages never call each other. When the search stage produces a new result
//! set it publishes [`TableSignal::FilterChanged`]; the pagination stage,
//! which subscribed when the table was built, drains its receiver before
//! slicing and jumps back to page 1. The rendering layer can subscribe the
//! same way.
//!
//! Publishing and draining are synchronous and need no async runtime.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::trace;

/// Signals buffered per receiver before the oldest are dropped.
pub const SIGNAL_CAPACITY: usize = 64;

/// Something downstream stages or observers may need to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSignal {
    /// The searched view was recomputed; `matched` rows survived the filter.
    FilterChanged { matched: usize },
    /// The caller supplied a new baseline data set.
    DataReplaced { rows: usize },
}

/// Broadcast channel shared by the stages of one table.
#[derive(Debug, Clone)]
pub struct SignalBus {
    tx: broadcast::Sender<TableSignal>,
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(SIGNAL_CAPACITY);
        Self { tx }
    }

    /// Register a new subscriber. It only sees signals published afterwards.
    pub fn subscribe(&self) -> SignalReceiver {
        SignalReceiver {
            rx: self.tx.subscribe(),
        }
    }

    /// Publish to every current subscriber. Without subscribers this is a no-op.
    pub fn publish(&self, signal: TableSignal) {
        match self.tx.send(signal) {
            Ok(receivers) => trace!(receivers, "Signal published"),
            Err(broadcast::error::SendError(signal)) => {
                trace!(?signal, "Signal dropped, no subscribers")
            }
        }
    }

    /// Number of live receivers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// One subscription to a [`SignalBus`].
#[derive(Debug)]
pub struct SignalReceiver {
    rx: broadcast::Receiver<TableSignal>,
}

/// Outcome of draining a receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drained {
    pub signals: Vec<TableSignal>,
    /// Signals were lost because the receiver fell too far behind.
    pub lagged: bool,
}

impl SignalReceiver {
    /// Take every pending signal without blocking.
    pub fn drain(&mut self) -> Drained {
        let mut drained = Drained::default();
        loop {
            match self.rx.try_recv() {
                Ok(signal) => drained.signals.push(signal),
                Err(TryRecvError::Lagged(skipped)) => {
                    trace!(skipped, "Signal receiver lagged");
                    drained.lagged = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = SignalBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(TableSignal::FilterChanged { matched: 3 });
    }

    #[test]
    fn test_every_subscriber_sees_signal() {
        let bus = SignalBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(TableSignal::FilterChanged { matched: 2 });

        assert_eq!(a.drain().signals, vec![TableSignal::FilterChanged { matched: 2 }]);
        assert_eq!(b.drain().signals, vec![TableSignal::FilterChanged { matched: 2 }]);
        assert!(a.drain().signals.is_empty());
    }

    #[test]
    fn test_late_subscriber_misses_earlier_signals() {
        let bus = SignalBus::new();
        let _keep = bus.subscribe();
        bus.publish(TableSignal::DataReplaced { rows: 1 });
        let mut late = bus.subscribe();
        assert!(late.drain().signals.is_empty());
    }

    #[test]
    fn test_lag_is_reported() {
        let bus = SignalBus::new();
        let mut rx = bus.subscribe();
        for matched in 0..SIGNAL_CAPACITY + 5 {
            bus.publish(TableSignal::FilterChanged { matched });
        }
        let drained = rx.drain();
        assert!(drained.lagged);
        assert_eq!(drained.signals.len(), SIGNAL_CAPACITY);
    }
}
