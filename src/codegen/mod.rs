//! Per-kind TypeScript text generators.

pub mod controller;
pub mod dto;
pub mod enums;
pub mod naming;

pub use controller::{generate_controller, request_spec, RequestSpec};
pub use dto::generate_dto;
pub use enums::generate_enum;
