pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    http_generator::{GeneratorSettings, HttpTextGenerator},
    post_ledger::{MemoryPostStore, PostLedger},
    storage::LocalStorage,
};
pub use config::TomlConfig;
pub use self::core::{
    barcode::scan_offline,
    estimator::PlatesSavedEstimator,
    explanation::{FixedExplanation, GeneratedExplanation, DEFAULT_EXPLANATION},
    heuristic::calculate_plates_saved,
    voice::interpret_offline,
};
pub use domain::model::{
    BarcodeFormat, BarcodeScan, LeftoverPost, NewLeftoverPost, PlatesSavedEstimate, PostCount,
    VoiceAction, VoiceCommand,
};
pub use domain::ports::{ExplanationProvider, PostStore, TextGenerator};
pub use utils::error::{GenerationError, ImpactError, Result};
