use std::time::Instant;

use guard::PayloadValidator;
use prometheus::Registry;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self {
            started_at: Instant::now(),
            registry,
        }
    }
}

/// State for the body validation middleware
#[derive(Clone)]
pub struct GuardState {
    pub validator: &'static PayloadValidator,
    pub max_body_bytes: usize,
}

impl GuardState {
    pub fn new(validator: &'static PayloadValidator, max_body_bytes: usize) -> Self {
        Self {
            validator,
            max_body_bytes,
        }
    }
}
