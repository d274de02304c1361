// Domain layer - remote dashboard objects and the host attribute model
pub mod attributes;
pub mod dashboard;
pub mod visualization;
