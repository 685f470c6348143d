//! Flutter bridge for the Duralex dashboard core.

pub mod api;
