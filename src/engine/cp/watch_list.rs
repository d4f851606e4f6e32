use super::DomainEvent;
use super::DomainEvents;
use super::PropagatorId;
use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;

/// For every variable, the propagators to schedule when a domain event on that variable fires,
/// partitioned per event kind.
#[derive(Debug, Default)]
pub(crate) struct WatchList {
    watchers: KeyedVec<DomainId, WatcherList>,
}

#[derive(Debug, Default, Clone)]
struct WatcherList {
    lower_bound: Vec<PropagatorId>,
    upper_bound: Vec<PropagatorId>,
    assign: Vec<PropagatorId>,
    removal: Vec<PropagatorId>,
}

impl WatchList {
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(WatcherList::default());
    }

    pub(crate) fn num_domains(&self) -> usize {
        self.watchers.len()
    }

    pub(crate) fn watch(
        &mut self,
        propagator_id: PropagatorId,
        domain_id: DomainId,
        events: DomainEvents,
    ) {
        let watcher = &mut self.watchers[domain_id];

        for event in events.get_events() {
            let event_watchers = match event {
                DomainEvent::LowerBound => &mut watcher.lower_bound,
                DomainEvent::UpperBound => &mut watcher.upper_bound,
                DomainEvent::Assign => &mut watcher.assign,
                DomainEvent::Removal => &mut watcher.removal,
            };

            if !event_watchers.contains(&propagator_id) {
                event_watchers.push(propagator_id);
            }
        }
    }

    pub(crate) fn get_affected_propagators(
        &self,
        event: DomainEvent,
        domain_id: DomainId,
    ) -> &[PropagatorId] {
        let watcher = &self.watchers[domain_id];

        match event {
            DomainEvent::LowerBound => &watcher.lower_bound,
            DomainEvent::UpperBound => &watcher.upper_bound,
            DomainEvent::Assign => &watcher.assign,
            DomainEvent::Removal => &watcher.removal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watchers_are_partitioned_per_event() {
        let mut watch_list = WatchList::default();
        watch_list.grow();

        let d1 = DomainId::new(0);
        watch_list.watch(PropagatorId(0), d1, DomainEvents::BOUNDS);
        watch_list.watch(PropagatorId(1), d1, DomainEvents::ASSIGN);

        assert_eq!(
            watch_list.get_affected_propagators(DomainEvent::LowerBound, d1),
            &[PropagatorId(0)]
        );
        assert_eq!(
            watch_list.get_affected_propagators(DomainEvent::UpperBound, d1),
            &[PropagatorId(0)]
        );
        assert_eq!(
            watch_list.get_affected_propagators(DomainEvent::Assign, d1),
            &[PropagatorId(1)]
        );
        assert!(watch_list
            .get_affected_propagators(DomainEvent::Removal, d1)
            .is_empty());
    }

    #[test]
    fn watching_twice_registers_once() {
        let mut watch_list = WatchList::default();
        watch_list.grow();

        let d1 = DomainId::new(0);
        watch_list.watch(PropagatorId(0), d1, DomainEvents::ASSIGN);
        watch_list.watch(PropagatorId(0), d1, DomainEvents::ASSIGN);

        assert_eq!(
            watch_list.get_affected_propagators(DomainEvent::Assign, d1),
            &[PropagatorId(0)]
        );
    }
}
