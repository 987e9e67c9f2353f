//! # stackforge-compose
//!
//! Template merge engine for compose service fragments.
//!
//! Handles:
//! - **Template**: In-memory model of the base compose document.
//! - **Options**: Per-service user overrides.
//! - **Codec**: The `external:internal[/proto]`, `external:internal[:mode]`
//!   and `KEY=VALUE` entry grammars.
//! - **Interpolate / Generate**: `{placeholder}` resolution and the values
//!   generated for it.
//! - **Mutators / Merge**: Field-level rewrites applied in a fixed order.
//! - **Registry / Providers**: Statically registered service descriptions.
//! - **Conflicts**: Host port clashes across merged services.

pub mod codec;
pub mod conflicts;
pub mod generate;
pub mod interpolate;
pub mod merge;
pub mod mutators;
pub mod options;
pub mod providers;
pub mod registry;
pub mod template;
