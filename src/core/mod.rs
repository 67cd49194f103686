pub mod charts;
pub mod errors;
pub mod export;
pub mod filter;
pub mod http;
pub mod models;
pub mod session;
pub mod stats;
pub mod table;
pub mod tasks;

pub use errors::SentimentError;
pub use models::{
    ClassProbability,
    PerClass,
    PredictionResult,
    SentimentClass,
};
