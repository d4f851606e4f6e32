use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use fnv::FnvHashSet;

use super::PropagatorId;
use crate::marrow_assert_moderate;

/// The pending set of the propagation engine. Propagators are served per priority class, lowest
/// priority value first, and in FIFO order within one class. A propagator which is already
/// pending is not enqueued a second time.
///
/// The class ordering is a scheduling heuristic; the fixpoint reached is the same for any order.
/// The FIFO-within-class rule is what makes search node counts reproducible for logically
/// equivalent models.
#[derive(Debug)]
pub(crate) struct PropagatorQueue {
    queues: Vec<VecDeque<PropagatorId>>,
    present_propagators: FnvHashSet<PropagatorId>,
    present_priorities: BinaryHeap<Reverse<u32>>,
}

impl PropagatorQueue {
    pub(crate) fn new(num_priority_levels: u32) -> PropagatorQueue {
        PropagatorQueue {
            queues: vec![VecDeque::new(); num_priority_levels as usize],
            present_propagators: FnvHashSet::default(),
            present_priorities: BinaryHeap::new(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.present_propagators.is_empty()
    }

    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, priority: u32) {
        marrow_assert_moderate!((priority as usize) < self.queues.len());

        if !self.is_propagator_enqueued(propagator_id) {
            if self.queues[priority as usize].is_empty() {
                self.present_priorities.push(Reverse(priority));
            }
            self.queues[priority as usize].push_back(propagator_id);
            let _ = self.present_propagators.insert(propagator_id);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let top_priority = self.present_priorities.peek()?.0 as usize;
        marrow_assert_moderate!(!self.queues[top_priority].is_empty());

        let next_propagator_id = self.queues[top_priority].pop_front()?;
        let _ = self.present_propagators.remove(&next_propagator_id);

        if self.queues[top_priority].is_empty() {
            let _ = self.present_priorities.pop();
        }

        Some(next_propagator_id)
    }

    pub(crate) fn clear(&mut self) {
        while let Some(Reverse(priority)) = self.present_priorities.pop() {
            self.queues[priority as usize].clear();
        }
        self.present_propagators.clear();
    }

    fn is_propagator_enqueued(&self, propagator_id: PropagatorId) -> bool {
        self.present_propagators.contains(&propagator_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagators_are_served_by_priority_then_fifo() {
        let mut queue = PropagatorQueue::new(4);

        queue.enqueue_propagator(PropagatorId(0), 2);
        queue.enqueue_propagator(PropagatorId(1), 0);
        queue.enqueue_propagator(PropagatorId(2), 2);
        queue.enqueue_propagator(PropagatorId(3), 0);

        assert_eq!(queue.pop(), Some(PropagatorId(1)));
        assert_eq!(queue.pop(), Some(PropagatorId(3)));
        assert_eq!(queue.pop(), Some(PropagatorId(0)));
        assert_eq!(queue.pop(), Some(PropagatorId(2)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn a_pending_propagator_is_not_enqueued_twice() {
        let mut queue = PropagatorQueue::new(4);

        queue.enqueue_propagator(PropagatorId(0), 1);
        queue.enqueue_propagator(PropagatorId(0), 1);

        assert_eq!(queue.pop(), Some(PropagatorId(0)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn clearing_empties_the_queue() {
        let mut queue = PropagatorQueue::new(4);

        queue.enqueue_propagator(PropagatorId(0), 1);
        queue.enqueue_propagator(PropagatorId(1), 3);
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}
