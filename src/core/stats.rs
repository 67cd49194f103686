use super::models::{
    round_one_decimal,
    PerClass,
    PredictionResult,
};

/// Summary over the whole result set. Filters never feed into this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateStats {
    pub counts: PerClass<usize>,
    pub percentages: PerClass<f64>,
    pub average_confidence: PerClass<f64>,
}

impl AggregateStats {
    pub fn compute(results: &[PredictionResult]) -> Self {
        let mut counts = PerClass::<usize>::default();
        let mut confidence_sums = PerClass::<f64>::default();

        for result in results {
            counts[result.sentiment] += 1;
            confidence_sums[result.sentiment] += result.selected_confidence();
        }

        let total = results.len();
        let percentages = PerClass::from_fn(|class| {
            if total == 0 {
                0.0
            } else {
                counts[class] as f64 / total as f64 * 100.0
            }
        });
        let average_confidence = PerClass::from_fn(|class| {
            if counts[class] == 0 {
                0.0
            } else {
                round_one_decimal(confidence_sums[class] / counts[class] as f64)
            }
        });

        Self { counts, percentages, average_confidence }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| *count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Lines of the localized summary list.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("จำนวนข้อความทั้งหมด: {}", self.total())];
        for (class, count) in self.counts.iter() {
            lines.push(format!("{}: {} ({:.1}%)", class.name(), count, self.percentages[class]));
        }
        lines
    }
}
