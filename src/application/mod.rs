// Application layer - mapping, validation and the resource use cases
pub mod dashboard_repository;
pub mod dashboard_resource;
pub mod expand;
pub mod flatten;
pub mod plan;
pub mod schema;
pub mod validation;
