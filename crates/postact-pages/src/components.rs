//! Control-flow components.
//!
//! Small helpers that build driven fragments out of [`Derived`] values, so
//! the realization engine re-renders only the affected branch:
//!
//! - [`show`]: a branch per `Option` state
//! - [`for_each`]: one node per list item
//! - [`conditional`]: a boolean gate with a memoized branch
//! - [`Suspense`]: fallback content while [`Later`] values are pending
//!
//! Each helper also has a `_static` variant taking plain values.
//!
//! [`Derived`]: postact_core::Derived
//! [`Later`]: postact_core::Later

mod conditional;
mod for_each;
mod show;
mod suspense;

pub use conditional::{conditional, conditional_static};
pub use for_each::{for_each, for_each_static};
pub use show::{show, show_static};
pub use suspense::{Suspense, SuspenseState};
