//! I define how client code can follow, or interrupt, the work of an
//! [`InferenceModel`](crate::InferenceModel).
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What an [`InferenceModel`](crate::InferenceModel) reports to its observers,
/// after each successful mutating operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InferenceEvent {
    /// Statements were asserted, and `inferred` statements were derived from them.
    StatementsAdded {
        /// number of statements asserted
        asserted: usize,
        /// number of statements inferred
        inferred: usize,
    },
    /// Statements were retracted, with the inference graphs depending on them.
    StatementsRemoved {
        /// number of statements directly removed
        removed: usize,
        /// number of inference graphs dropped as a consequence
        inference_graphs_dropped: usize,
    },
    /// A full inference pass was performed.
    InferencePerformed {
        /// number of statements inferred
        inferred: usize,
    },
    /// All inferred statements were removed.
    InferenceCleared {
        /// number of inference graphs dropped
        graphs: usize,
    },
}

/// Receives [`InferenceEvent`]s.
///
/// Any `FnMut(&InferenceEvent)` closure is an observer.
pub trait InferenceObserver {
    /// Called synchronously, once the operation described by `event` is complete.
    fn on_event(&mut self, event: &InferenceEvent);
}

impl<F: FnMut(&InferenceEvent)> InferenceObserver for F {
    fn on_event(&mut self, event: &InferenceEvent) {
        self(event)
    }
}

/// A shared flag used to interrupt a long inference pass
/// (see [`InferenceModel::perform_inference_with`](crate::InferenceModel::perform_inference_with)).
///
/// Clones share the same flag, and can be sent to other threads.
#[derive(Clone, Debug, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Build a new flag, not raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise this flag.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether this flag has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Lower this flag, so that it can be reused.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn closures_are_observers() {
        let mut seen = vec![];
        {
            let mut obs = |e: &InferenceEvent| seen.push(e.clone());
            obs.on_event(&InferenceEvent::InferenceCleared { graphs: 2 });
        }
        assert_eq!(seen, vec![InferenceEvent::InferenceCleared { graphs: 2 }]);
    }

    #[test]
    fn cancellation_flag_is_shared() {
        let flag = CancellationFlag::new();
        let other = flag.clone();
        assert!(!flag.is_cancelled());
        std::thread::spawn(move || other.cancel()).join().unwrap();
        assert!(flag.is_cancelled());
        flag.reset();
        assert!(!flag.is_cancelled());
    }
}
