//! Anomaly sink.
//!
//! The tracker reports every recoverable anomaly here exactly once, at the
//! point where it is detected. The default sink logs through `tracing`.

use parking_lot::Mutex;
use tracing::warn;

use crate::error::Anomaly;

/// Receives anomalies raised by tracker operations. Fire and forget.
pub trait AnomalySink: Send + Sync {
    fn report(&self, anomaly: &Anomaly);
}

/// Logs each anomaly at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnomalySink for TracingSink {
    fn report(&self, anomaly: &Anomaly) {
        warn!(code = anomaly.code(), "{}", anomaly);
    }
}

/// Collects anomalies in memory. Handy for replay checks and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<Anomaly>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, oldest first.
    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.seen.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }

    pub fn clear(&self) {
        self.seen.lock().clear();
    }
}

impl AnomalySink for RecordingSink {
    fn report(&self, anomaly: &Anomaly) {
        self.seen.lock().push(anomaly.clone());
    }
}

impl<T: AnomalySink + ?Sized> AnomalySink for std::sync::Arc<T> {
    fn report(&self, anomaly: &Anomaly) {
        (**self).report(anomaly);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.report(&Anomaly::NoSuchNick("a".into()));
        sink.report(&Anomaly::NoSuchChannel("#b".into()));
        assert_eq!(
            sink.anomalies(),
            vec![
                Anomaly::NoSuchNick("a".into()),
                Anomaly::NoSuchChannel("#b".into())
            ]
        );
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn arc_forwards_to_inner_sink() {
        let inner = Arc::new(RecordingSink::new());
        let sink: Box<dyn AnomalySink> = Box::new(inner.clone());
        sink.report(&Anomaly::NickCollision("x".into()));
        assert_eq!(inner.len(), 1);
    }
}
