//! One module per constraint family (spec §4.2.1), each exposing a
//! `validate_*` function that returns a `FamilyReport`.

pub mod balance;
pub mod ctype;
pub mod demand;
pub mod fixed_supply;
pub mod price_volume;
pub mod priority;
