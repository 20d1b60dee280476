pub mod greetings;

pub use greetings::MessageResponse;
