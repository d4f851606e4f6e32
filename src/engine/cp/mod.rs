mod assignments;
mod domain_events;
mod event_sink;
mod propagation_context;
mod propagator_id;
mod propagator_queue;
mod watch_list;

pub(crate) use assignments::Assignments;
pub(crate) use assignments::EmptyDomain;
pub(crate) use domain_events::DomainEvent;
pub(crate) use domain_events::DomainEvents;
pub(crate) use event_sink::EventSink;
pub(crate) use propagation_context::PropagationContext;
pub(crate) use propagation_context::PropagationContextMut;
pub(crate) use propagation_context::ReadDomains;
pub(crate) use propagator_id::PropagatorId;
pub(crate) use propagator_queue::PropagatorQueue;
pub(crate) use watch_list::WatchList;
