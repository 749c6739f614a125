//! Service layer — route-independent logic.

pub mod diagram;
