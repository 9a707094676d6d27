#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod model;
pub mod random;
pub mod time;

pub use error::Error;
pub use generator::{CountryPool, GeneratorError, QuestionGenerator};
pub use random::RandomSource;
pub use time::Clock;
