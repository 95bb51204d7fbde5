//! Course authoring. Every route here sits behind `require_admin`.

pub mod controller;
pub mod router;
pub mod service;

pub use router::init_admin_router;
