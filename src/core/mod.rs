pub mod barcode;
pub mod estimator;
pub mod explanation;
pub mod heuristic;
pub mod voice;

pub use crate::domain::model::{PlatesSavedEstimate, PostCount};
pub use crate::domain::ports::{ExplanationProvider, PostStore, TextGenerator};
pub use crate::utils::error::Result;
