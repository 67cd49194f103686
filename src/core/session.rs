use std::path::{
    Path,
    PathBuf,
};

use chrono::{
    DateTime,
    Datelike,
    Local,
    TimeZone,
    Timelike,
};

use super::{
    charts::{
        confidence_chart,
        proportion_chart,
        ChartRegistry,
        ChartSize,
        ChartSlot,
    },
    export,
    filter::{
        filter_results,
        FilterCriteria,
    },
    models::{
        format_percent,
        PredictionResult,
        SentimentClass,
    },
    stats::AggregateStats,
    table::TableView,
    SentimentError,
};

/// UI state of one request flow. Loading is the only state in which the submit control
/// is disabled and the spinner shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for FlowState<T> {
    fn default() -> Self {
        FlowState::Idle
    }
}

impl<T> FlowState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FlowState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            FlowState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FlowState::Error(message) => Some(message),
            _ => None,
        }
    }

    fn begin(&mut self) -> Result<(), SentimentError> {
        if self.is_loading() {
            return Err(SentimentError::Busy);
        }
        *self = FlowState::Loading;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceBar {
    pub label: String,
    pub percent: f64,
    pub color: [u8; 3],
}

impl ConfidenceBar {
    pub fn formatted(&self) -> String {
        format_percent(self.percent)
    }
}

/// One bar per probability pair, in the order the service sent them.
pub fn confidence_bars(result: &PredictionResult) -> Vec<ConfidenceBar> {
    result
        .probabilities
        .iter()
        .map(|p| ConfidenceBar {
            label: p.label.clone(),
            percent: p.probability * 100.0,
            color: SentimentClass::from_label(&p.label)
                .map(|class| class.color())
                .unwrap_or([0x9c, 0xa3, 0xaf]),
        })
        .collect()
}

/// Single-text flow.
#[derive(Debug, Default)]
pub struct TextSession {
    pub input: String,
    state: FlowState<PredictionResult>,
}

impl TextSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlowState<PredictionResult> {
        &self.state
    }

    /// Clears the previous result or error and hands back the text to send. A second
    /// submission while one is in flight is rejected.
    pub fn begin_submit(&mut self) -> Result<String, SentimentError> {
        self.state.begin()?;
        Ok(self.input.clone())
    }

    pub fn complete(&mut self, outcome: Result<PredictionResult, SentimentError>) {
        self.state = match outcome {
            Ok(result) => FlowState::Success(result),
            Err(e) => {
                tracing::warn!("Text prediction failed: {}", e);
                FlowState::Error(e.inline_message())
            }
        };
    }
}

/// What the last batch was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchRequest {
    File(PathBuf),
    Texts(Vec<String>),
    YouTube(String),
}

impl BatchRequest {
    pub fn source_label(&self) -> String {
        match self {
            BatchRequest::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            BatchRequest::Texts(texts) => format!("ข้อความที่วาง ({} บรรทัด)", texts.len()),
            BatchRequest::YouTube(url) => url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchMetadata {
    pub source: String,
    pub total_rows: usize,
    pub uploaded_at: DateTime<Local>,
}

impl BatchMetadata {
    pub fn line(&self) -> String {
        format!(
            "ไฟล์: {} | ข้อความทั้งหมด: {} | อัปโหลด: {}",
            self.source,
            self.total_rows,
            thai_timestamp(&self.uploaded_at)
        )
    }
}

const THAI_MONTHS_SHORT: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];
const BUDDHIST_ERA_OFFSET: i32 = 543;

/// `16 ต.ค. 2569 14:05`: short Thai month, Buddhist-era year, 24-hour clock.
pub fn thai_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!(
        "{} {} {} {:02}:{:02}",
        at.day(),
        THAI_MONTHS_SHORT[at.month0() as usize],
        at.year() + BUDDHIST_ERA_OFFSET,
        at.hour(),
        at.minute()
    )
}

/// Batch flow. Owns the result set and both chart slots; everything else is derived.
#[derive(Debug, Default)]
pub struct BatchSession {
    results: Vec<PredictionResult>,
    charts: ChartRegistry,
    criteria: FilterCriteria,
    state: FlowState<BatchMetadata>,
}

impl BatchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlowState<BatchMetadata> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Hides the current results until the new request completes.
    pub fn begin_submit(&mut self) -> Result<(), SentimentError> {
        self.state.begin()
    }

    /// Leaves Loading before any view is derived, so a failure while building views can
    /// never strand the spinner.
    pub fn complete(
        &mut self,
        source: &BatchRequest,
        outcome: Result<Vec<PredictionResult>, SentimentError>,
    ) {
        match outcome {
            Ok(results) => self.load_batch(results, source.source_label()),
            Err(e) => {
                tracing::warn!("Batch prediction for {} failed: {}", source.source_label(), e);
                self.fail(e.inline_message());
            }
        }
    }

    /// Replaces the result set wholesale and rebuilds both charts.
    pub fn load_batch(&mut self, results: Vec<PredictionResult>, source: String) {
        self.state = FlowState::Success(BatchMetadata {
            source,
            total_rows: results.len(),
            uploaded_at: Local::now(),
        });
        self.results = results;

        let stats = self.stats();
        self.charts.replace(ChartSlot::Proportion, proportion_chart(&stats));
        self.charts.replace(ChartSlot::Confidence, confidence_chart(&stats));

        tracing::info!("Loaded batch of {} results", self.results.len());
    }

    /// Drops the previous batch along with its charts, so nothing stale can be exported.
    pub fn fail(&mut self, message: String) {
        self.state = FlowState::Error(message);
        self.results.clear();
        self.charts.clear();
    }

    pub fn results(&self) -> &[PredictionResult] {
        &self.results
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn reset_filter(&mut self) {
        self.apply_filter(FilterCriteria::default());
    }

    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    pub fn apply_filter(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Always over the full set, never the filtered view.
    pub fn stats(&self) -> AggregateStats {
        AggregateStats::compute(&self.results)
    }

    pub fn filtered(&self) -> Vec<&PredictionResult> {
        filter_results(&self.results, &self.criteria)
    }

    pub fn table(&self) -> TableView {
        TableView::build(&self.results, &self.criteria)
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    pub fn resize_charts(&mut self, size: ChartSize) -> bool {
        self.charts.resize(size)
    }

    pub fn metadata_line(&self) -> Option<String> {
        self.state.success().map(BatchMetadata::line)
    }

    /// Exports the rows passing the filter as it stands right now.
    pub fn export_table(&self, dir: &Path) -> Result<PathBuf, SentimentError> {
        export::export_table(dir, &self.filtered())
    }

    pub fn export_images(&self, dir: &Path) -> Result<Vec<PathBuf>, SentimentError> {
        export::export_images(dir, &self.charts)
    }
}
