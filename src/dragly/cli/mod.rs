//! Terminal output for the `dragly` binary. Not part of the library API.

pub(crate) mod print;
