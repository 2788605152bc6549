//! Individual compliance rules.

pub mod datev;
pub mod invoice_logic;
pub mod mandatory;
pub mod standards;
pub mod supplier;
pub mod tax;
