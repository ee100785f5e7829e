pub mod domain;
pub mod loops;
pub mod orchestrator;
pub mod ports;
pub mod services;
pub mod use_cases;
