//! Implementation modules for dispatched test behaviors.
//!
//! Each submodule exposes a `register` function that inserts its
//! handlers into the registry by name; [`modules`] is the discovery
//! list [`crate::registry::HandlerRegistry::collect`] iterates. Adding
//! a module here is the whole registration story, no manifest beyond
//! this list.

use crate::registry::HandlerRegistry;

pub mod dashboard;
pub mod settings;

type RegisterFn = fn(&mut HandlerRegistry);

pub(crate) fn modules() -> [RegisterFn; 2] {
    [dashboard::register, settings::register]
}
