use std::sync::{mpsc, Mutex};

pub const CANDIDATES_UPDATED_EVENT: &str = "job-candidates-updated";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatesUpdated {
    pub job_id: Option<String>,
}

/// Same-process notification channel. Candidate writers emit here right
/// after a write so mounted views refresh without waiting on the storage
/// watcher.
#[derive(Default)]
pub struct EventBus {
    listeners: Mutex<Vec<mpsc::Sender<CandidatesUpdated>>>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus::default()
    }

    pub fn subscribe(&self) -> mpsc::Receiver<CandidatesUpdated> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(tx);
        }
        rx
    }

    pub fn emit(&self, event: CandidatesUpdated) {
        tracing::debug!("{}: {:?}", CANDIDATES_UPDATED_EVENT, &event);
        let Ok(mut listeners) = self.listeners.lock() else {
            return;
        };
        listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    #[traced_test]
    fn test_emit_reaches_all_subscribers() {
        let bus = EventBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();
        bus.emit(CandidatesUpdated {
            job_id: Some("job_20250101_1".into()),
        });
        assert_eq!(
            first.try_recv().unwrap().job_id.as_deref(),
            Some("job_20250101_1")
        );
        assert_eq!(
            second.try_recv().unwrap().job_id.as_deref(),
            Some("job_20250101_1")
        );
    }

    #[test]
    #[traced_test]
    fn test_closed_subscribers_are_pruned() {
        let bus = EventBus::new();
        drop(bus.subscribe());
        bus.emit(CandidatesUpdated { job_id: None });
        bus.emit(CandidatesUpdated { job_id: None });
    }
}
