//! Kernel perceptron classifier
//!
//! `KernelPerceptron` holds the dual weight matrix and the chosen
//! [`Decomposition`]. Training (`training`), prediction (`perceptron`) and
//! evaluation (`evaluation`) are implemented as separate `impl` blocks.

pub mod decomposition;
pub mod evaluation;
pub mod perceptron;
pub mod training;

pub use self::decomposition::{Decomposition, OneVsAll, OneVsOne};
pub use self::evaluation::EvaluationReport;
pub use self::perceptron::KernelPerceptron;
pub use self::training::{EpochRecord, StopReason, TrainingReport};
