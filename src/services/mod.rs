// Business logic services

pub mod plan_generation_service;

pub use plan_generation_service::{PlanGenerationService, RequestType};
