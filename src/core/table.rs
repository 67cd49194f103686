use super::{
    filter::{
        filter_results,
        FilterCriteria,
    },
    models::PredictionResult,
};

pub const TABLE_HEADERS: [&str; 3] = ["ข้อความ", "อารมณ์", "ความมั่นใจ"];
pub const NO_MATCH_MESSAGE: &str = "ไม่มีผลการค้นหาที่คุณต้องการ";

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub text: String,
    pub sentiment: String,
    pub confidence: String,
}

impl From<&PredictionResult> for ResultRow {
    fn from(result: &PredictionResult) -> Self {
        Self {
            text: result.text.clone(),
            sentiment: result.sentiment.label().to_string(),
            confidence: result.formatted_confidence(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    Result(ResultRow),
    /// Full-width row spanning every column.
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub shown: usize,
    pub total: usize,
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// Rebuilt from scratch on every filter change.
    pub fn build(results: &[PredictionResult], criteria: &FilterCriteria) -> Self {
        let filtered = filter_results(results, criteria);

        let rows = if filtered.is_empty() {
            vec![TableRow::Placeholder(NO_MATCH_MESSAGE.to_string())]
        } else {
            filtered.iter().map(|result| TableRow::Result(ResultRow::from(*result))).collect()
        };

        Self { shown: filtered.len(), total: results.len(), rows }
    }

    pub fn info(&self) -> String {
        format!("Showing {} of {} results", self.shown, self.total)
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder().is_some()
    }

    /// Message for the full-width row shown instead of results.
    pub fn placeholder(&self) -> Option<&str> {
        match self.rows.as_slice() {
            [TableRow::Placeholder(message)] => Some(message),
            _ => None,
        }
    }

    /// Rows that map onto the three columns; never includes the placeholder.
    pub fn result_rows(&self) -> Vec<&ResultRow> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                TableRow::Result(result) => Some(result),
                TableRow::Placeholder(_) => None,
            })
            .collect()
    }
}
