use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A single kind of change to the domain of an integer variable.
#[derive(Debug, EnumSetType, Hash)]
pub(crate) enum DomainEvent {
    /// Event where the domain becomes fixed, i.e. the lower bound and upper bound coincide
    Assign,
    /// Event where the lower bound of the domain is tightened
    LowerBound,
    /// Event where the upper bound of the domain is tightened
    UpperBound,
    /// Event where a single value in the interior of the domain is removed
    Removal,
}

/// A set of [`DomainEvent`]s, used by propagators to declare which changes to a variable they
/// must be rescheduled for.
#[derive(Debug, Copy, Clone)]
pub(crate) struct DomainEvents {
    events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// DomainEvents with both lower and upper bound tightening (but not other value removal).
    pub(crate) const BOUNDS: DomainEvents = DomainEvents::create(enum_set!(
        DomainEvent::LowerBound | DomainEvent::UpperBound
    ));
    /// DomainEvents with only assignment to a single value.
    pub(crate) const ASSIGN: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::Assign));

    const fn create(events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub(crate) fn get_events(&self) -> EnumSet<DomainEvent> {
        self.events
    }
}
