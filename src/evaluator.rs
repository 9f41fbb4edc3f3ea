// Edge-triggered alert latches, one per resource kind.
// A notification fires only on the below-to-above threshold transition;
// recovery resets the latch silently.

use crate::models::{AlertEvent, ResourceKind, ResourceSample};

/// Armed flags per kind. armed == true means the alert for the current
/// excursion above threshold has already been sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertStates {
    cpu: bool,
    memory: bool,
    root_storage: bool,
    data_storage: bool,
}

impl AlertStates {
    pub fn is_armed(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Cpu => self.cpu,
            ResourceKind::Memory => self.memory,
            ResourceKind::RootStorage => self.root_storage,
            ResourceKind::DataStorage => self.data_storage,
        }
    }

    fn flag_mut(&mut self, kind: ResourceKind) -> &mut bool {
        match kind {
            ResourceKind::Cpu => &mut self.cpu,
            ResourceKind::Memory => &mut self.memory,
            ResourceKind::RootStorage => &mut self.root_storage,
            ResourceKind::DataStorage => &mut self.data_storage,
        }
    }
}

/// Owned by the monitor loop; single-threaded, so no locking.
#[derive(Debug, Default)]
pub struct ThresholdEvaluator {
    states: AlertStates,
}

impl ThresholdEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample. Returns an event only on the upward crossing.
    ///
    /// A kind with no sample this tick must simply not be fed; its latch
    /// keeps its prior value.
    pub fn evaluate(&mut self, sample: &ResourceSample, threshold: f64) -> Option<AlertEvent> {
        let armed = self.states.flag_mut(sample.kind);
        if sample.usage_percent > threshold {
            if *armed {
                // Still above threshold, already notified.
                return None;
            }
            *armed = true;
            Some(AlertEvent {
                sample: sample.clone(),
                threshold,
            })
        } else {
            // At or below threshold: reset silently, no recovery notification.
            *armed = false;
            None
        }
    }

    pub fn is_armed(&self, kind: ResourceKind) -> bool {
        self.states.is_armed(kind)
    }
}
