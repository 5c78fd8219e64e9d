//! Flutter-facing bindings for `taskdeck_core`.

pub mod api;
