use super::models::{
    PredictionResult,
    SentimentClass,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassFilter {
    #[default]
    All,
    Only(SentimentClass),
}

impl ClassFilter {
    pub const OPTIONS: [ClassFilter; 4] = [
        ClassFilter::All,
        ClassFilter::Only(SentimentClass::Negative),
        ClassFilter::Only(SentimentClass::Neutral),
        ClassFilter::Only(SentimentClass::Positive),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClassFilter::All => "ทั้งหมด",
            ClassFilter::Only(class) => class.label(),
        }
    }

    pub fn accepts(&self, class: SentimentClass) -> bool {
        match self {
            ClassFilter::All => true,
            ClassFilter::Only(wanted) => *wanted == class,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub class: ClassFilter,
    pub keyword: String,
    pub min_confidence_percent: f64,
}

impl FilterCriteria {
    pub fn new(class: ClassFilter, keyword: impl Into<String>, min_confidence_percent: f64) -> Self {
        Self { class, keyword: keyword.into(), min_confidence_percent }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.class == ClassFilter::All
            && self.keyword.trim().is_empty()
            && self.min_confidence_percent <= 0.0
    }

    pub fn matches(&self, result: &PredictionResult) -> bool {
        let keyword = self.keyword.trim();
        let threshold = self.min_confidence_percent.clamp(0.0, 100.0);

        self.class.accepts(result.sentiment)
            && (keyword.is_empty() || result.text.contains(keyword))
            && result.selected_confidence() >= threshold
    }
}

/// Results passing every predicate of `criteria`, in input order.
pub fn filter_results<'a>(
    results: &'a [PredictionResult],
    criteria: &FilterCriteria,
) -> Vec<&'a PredictionResult> {
    results.iter().filter(|result| criteria.matches(result)).collect()
}
