//! fracquiz-core: fraction/decimal quiz engine.
//!
//! Question generation per level, exact fractions, answer parsing and
//! grading, and score/level progression over explicit session values. No
//! I/O happens here apart from loading configuration files.

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod rational;
pub mod session;
pub mod traits;

pub use config::{AdvancePolicy, QuizConfig};
pub use engine::{Evaluation, MessageKind, QuizEngine, Verdict};
pub use error::{ConfigError, ConversionError, ParseError};
pub use model::{CanonicalAnswer, Direction, Level, Question};
pub use rational::Rational;
pub use session::GameSession;
pub use traits::{RandomSource, ScriptedSource};
