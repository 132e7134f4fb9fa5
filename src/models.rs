//! Public Twine models.
//!
//! Models are organized into domain-specific submodules. Each model keeps its
//! computation in an internal `core` module and exposes a thin
//! [`twine_core::Model`] adapter over it.

pub mod thermal;
