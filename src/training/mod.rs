//! Retraining: labeled examples in, evaluated and persisted model pair out.

pub mod coordinator;
pub mod example;
pub mod split;

pub use coordinator::{RetrainingCoordinator, TrainingReport};
pub use example::{load_examples, seed_examples, TrainingExample};
pub use split::{accuracy, holdout_split, Split};
