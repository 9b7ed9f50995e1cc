//! Event types.
//!
//! - [`input`] – logical keys, press/release actions and the events the
//!   input backend dispatches during a pump

pub mod input;
