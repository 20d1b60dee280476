pub mod greetings;
pub mod health;

pub use greetings::{root, say_hello};
pub use health::{health_check, readiness_check};
