//! Application services for guarding operations with a circuit breaker.

mod guard;

pub use guard::CircuitBreaker;
