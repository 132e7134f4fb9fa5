//! # Twine Conduction
//!
//! Steady-state heat conduction models for
//! [Twine](https://github.com/isentropic-dev/twine), built on a 2D
//! finite-difference mesh.
//!
//! ## Crate layout
//!
//! - [`models`]: The conduction model, its [`twine_core::Model`] adapter, and
//!   parameter studies built on top of it.
//! - [`support`]: Supporting utilities used by models.
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
