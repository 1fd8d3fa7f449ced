//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod fetch;
pub(crate) mod out;

pub(crate) use fetch::InArgs;
pub(crate) use out::OutArgs;
