//! Data carried through one extraction invocation.
//!
//! Every value here is created, used and dropped within a single
//! invocation; none of them are shared between invocations.

pub mod analysis;
pub mod event;
pub mod metadata;
pub mod record;
pub mod response;
