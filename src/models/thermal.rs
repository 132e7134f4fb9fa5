//! Thermal systems models.
//!
//! This module contains models for steady-state conduction through solid
//! regions with internal generation and surface exchange.

pub mod conduction;
