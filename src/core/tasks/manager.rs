use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::core::{
    http::SentimentClient,
    session::BatchRequest,
    SentimentError,
};

/// Runs service requests off the UI thread. Results are picked up by `poll_results` once
/// per frame, so completion handlers never interleave.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    client: SentimentClient,
}

impl TaskManager {
    pub fn new(client: SentimentClient) -> Result<Self, SentimentError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, client })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    /// Requests already in flight keep the client they started with.
    pub fn set_client(&mut self, client: SentimentClient) {
        tracing::info!("Prediction service set to {}", client.base_url());
        self.client = client;
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>, SentimentClient) {
        (self.sender.clone(), self.runtime.clone(), self.client.clone())
    }

    pub fn predict_text(&self, text: String) {
        let (sender, runtime, client) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async { client.predict_text(&text).await });

            let _ = sender.send(TaskResult::TextPrediction(result));
        });
    }

    pub fn predict_batch(&self, request: BatchRequest) {
        let (sender, runtime, client) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                match &request {
                    BatchRequest::File(path) => client.predict_file(path).await,
                    BatchRequest::Texts(texts) => client.predict_multiple(texts).await,
                    BatchRequest::YouTube(url) => client.predict_youtube(url).await,
                }
            });

            let _ = sender.send(TaskResult::BatchPrediction { request, result });
        });
    }
}
