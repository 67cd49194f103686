use crate::core::{
    session::BatchRequest,
    PredictionResult,
    SentimentError,
};

#[derive(Debug)]
pub enum TaskResult {
    TextPrediction(Result<PredictionResult, SentimentError>),
    BatchPrediction { request: BatchRequest, result: Result<Vec<PredictionResult>, SentimentError> },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::TextPrediction(_) => "text_prediction",
            TaskResult::BatchPrediction { .. } => "batch_prediction",
        }
    }
}
