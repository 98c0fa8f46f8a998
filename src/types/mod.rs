//! The HAL data model.
//!
//! - [`Rel`]: a relation type, either [`RegisteredRel`] or [`CustomRel`]
//! - [`Link`]: a HAL link object
//! - [`Resource`]: a HAL resource with state, links and embedded resources
//! - [`OneOrMany`]: the single-or-list value of a relation

mod link;
mod registered_rel;
mod rel;
mod resource;

pub use link::Link;
pub use registered_rel::RegisteredRel;
pub use rel::{CustomRel, Rel};
pub use resource::{OneOrMany, Resource};
