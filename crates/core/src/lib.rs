//! Core authorization and workflow logic for Worklane.
//!
//! This crate contains pure decision logic with ZERO web or database
//! dependencies. Every function is a pure function of its arguments and
//! static configuration tables; the engine never fetches or persists
//! data.
//!
//! # Modules
//!
//! - `roles` - Organisation and project role registries
//! - `matrix` - Static (entity, action) → roles permission tables
//! - `rules` - Object-level predicates refining matrix verdicts
//! - `actor` - Actors and the effective-role resolver
//! - `workflow` - Approval state machines and the transition engine
//! - `decision` - The facade collaborators call

pub mod actor;
pub mod decision;
pub mod matrix;
pub mod roles;
pub mod rules;
pub mod workflow;
