//! Marrow is a propagation-based constraint solver over finite integer domains.
//!
//! A model is built by creating integer variables on a [`Solver`] and posting linear
//! constraints over them. Linear constraints are compiled into specialised propagators; the
//! search interleaves propagation to a fixpoint with depth-first branching and restores
//! domains exactly on backtracking.
//!
//! # Example
//! ```rust
//! use marrow_solver::results::SatisfactionResult;
//! use marrow_solver::termination::Indefinite;
//! use marrow_solver::Solver;
//!
//! let mut solver = Solver::default();
//! let x = solver.new_bounded_integer(0, 3);
//! let y = solver.new_bounded_integer(0, 3);
//!
//! // x + 2y <= 5
//! let _ = solver
//!     .linear(
//!         vec![(1, x), (2, y)],
//!         marrow_solver::constraints::RelationalOperator::LessOrEqual,
//!         5,
//!     )
//!     .expect("the constraint is feasible at the root");
//!
//! let mut brancher = solver.default_brancher();
//! match solver.satisfy(&mut brancher, &mut Indefinite) {
//!     SatisfactionResult::Satisfiable(solution) => {
//!         assert!(solution.value(x) + 2 * solution.value(y) <= 5);
//!     }
//!     SatisfactionResult::Unsatisfiable => panic!("the model is satisfiable"),
//!     SatisfactionResult::Unknown => panic!("no termination condition was set"),
//! }
//! ```

pub(crate) mod basic_types;
pub(crate) mod containers;
pub(crate) mod engine;
pub(crate) mod marrow_asserts;
pub(crate) mod propagators;

#[cfg(doc)]
use crate::branching::Brancher;
#[cfg(doc)]
use crate::termination::TerminationCondition;

pub mod branching;
pub mod constraints;
pub mod statistics;

pub use rand;

// We declare a private module with public use, so that all exports from the API are exports
// directly from the crate.
//
// Example:
// `use marrow_solver::Solver;`
// vs.
// `use marrow_solver::api::Solver;`
mod api;

pub use api::*;

pub use crate::api::solver::Solver;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Random;
pub use crate::propagators::PropagatorKind;
