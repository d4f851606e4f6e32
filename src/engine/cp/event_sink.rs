use enumset::EnumSet;

use super::DomainEvent;
use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;

/// While propagation runs, the domain changes it performs are captured as events in the event
/// sink. Between propagator invocations the sink is drained to schedule all the propagators
/// which subscribe to those events.
///
/// The event sink ensures duplicate events are ignored.
#[derive(Debug, Default, Clone)]
pub(crate) struct EventSink {
    present: KeyedVec<DomainId, EnumSet<DomainEvent>>,
    events: Vec<(DomainEvent, DomainId)>,
}

impl EventSink {
    pub(crate) fn grow(&mut self) {
        let _ = self.present.push(EnumSet::new());
    }

    pub(crate) fn event_occurred(&mut self, event: DomainEvent, domain: DomainId) {
        let elem = &mut self.present[domain];

        if elem.contains(event) {
            // The event was already triggered.
            return;
        }

        let _ = elem.insert(event);
        self.events.push((event, domain));
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (DomainEvent, DomainId)> + '_ {
        self.events.drain(..).inspect(|&(event, domain)| {
            let _ = self.present[domain].remove(event);
        })
    }
}
