//! Supporting utilities shared by models.

pub mod constraint;
pub mod units;
