//! Containers which are specialised for the solver.

mod keyed_vec;

pub use keyed_vec::KeyedVec;
pub use keyed_vec::StorageKey;
