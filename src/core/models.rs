use std::{
    fmt,
    ops::{
        Index,
        IndexMut,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use super::SentimentError;

/// The three classes the service predicts, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SentimentClass {
    Negative,
    Neutral,
    Positive,
}

impl SentimentClass {
    pub const ALL: [SentimentClass; 3] =
        [SentimentClass::Negative, SentimentClass::Neutral, SentimentClass::Positive];

    /// Label exactly as the service sends it.
    pub fn label(&self) -> &'static str {
        match self {
            SentimentClass::Negative => "เชิงลบ 😡",
            SentimentClass::Neutral => "เป็นกลาง 😐",
            SentimentClass::Positive => "เชิงบวก 😄",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SentimentClass::Negative => "เชิงลบ",
            SentimentClass::Neutral => "เป็นกลาง",
            SentimentClass::Positive => "เชิงบวก",
        }
    }

    /// Fixed display color as `[r, g, b]`.
    pub fn color(&self) -> [u8; 3] {
        match self {
            SentimentClass::Negative => [0xef, 0x44, 0x44],
            SentimentClass::Neutral => [0x81, 0x8c, 0xf8],
            SentimentClass::Positive => [0x22, 0xc5, 0x5e],
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|class| class.label() == label || class.name() == label)
    }
}

impl fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for SentimentClass {
    type Error = SentimentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SentimentClass::from_label(&value).ok_or(SentimentError::UnknownLabel(value))
    }
}

impl From<SentimentClass> for String {
    fn from(class: SentimentClass) -> Self {
        class.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub text: String,
    pub sentiment: SentimentClass,
    #[serde(default)]
    pub probabilities: Vec<ClassProbability>,
    // Only the single-text endpoint is guaranteed to carry this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl PredictionResult {
    /// Probability of the predicted class as a percentage. A result without a matching
    /// pair reports 0 rather than failing.
    pub fn selected_confidence(&self) -> f64 {
        self.probability_of(self.sentiment).map(|p| p * 100.0).unwrap_or(0.0)
    }

    pub fn formatted_confidence(&self) -> String {
        format_percent(self.selected_confidence())
    }

    pub fn probability_of(&self, class: SentimentClass) -> Option<f64> {
        self.probabilities
            .iter()
            .find(|p| SentimentClass::from_label(&p.label) == Some(class))
            .map(|p| p.probability)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchResponse {
    pub result: Vec<PredictionResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// `85.0%` style formatting shared by the table, CSV and text panel.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One value per sentiment class.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerClass<T> {
    pub negative: T,
    pub neutral: T,
    pub positive: T,
}

impl<T> PerClass<T> {
    pub fn from_fn(mut f: impl FnMut(SentimentClass) -> T) -> Self {
        Self {
            negative: f(SentimentClass::Negative),
            neutral: f(SentimentClass::Neutral),
            positive: f(SentimentClass::Positive),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SentimentClass, &T)> {
        SentimentClass::ALL.into_iter().map(move |class| (class, &self[class]))
    }
}

impl<T> Index<SentimentClass> for PerClass<T> {
    type Output = T;

    fn index(&self, class: SentimentClass) -> &T {
        match class {
            SentimentClass::Negative => &self.negative,
            SentimentClass::Neutral => &self.neutral,
            SentimentClass::Positive => &self.positive,
        }
    }
}

impl<T> IndexMut<SentimentClass> for PerClass<T> {
    fn index_mut(&mut self, class: SentimentClass) -> &mut T {
        match class {
            SentimentClass::Negative => &mut self.negative,
            SentimentClass::Neutral => &mut self.neutral,
            SentimentClass::Positive => &mut self.positive,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn result(text: &str, sentiment: SentimentClass, probs: [f64; 3]) -> PredictionResult {
        PredictionResult {
            text: text.to_string(),
            sentiment,
            probabilities: SentimentClass::ALL
                .iter()
                .zip(probs)
                .map(|(class, probability)| ClassProbability {
                    label: class.label().to_string(),
                    probability,
                })
                .collect(),
            summary: None,
        }
    }

    #[test]
    fn test_decode_service_payload() {
        let json = r#"{
            "text": "ดีมาก",
            "sentiment": "เชิงบวก 😄",
            "summary": "โมเดลมั่นใจ 85.0% ว่าเป็นข้อความเชิงบวก 😄",
            "probabilities": [
                {"label": "เชิงลบ 😡", "probability": 0.05},
                {"label": "เป็นกลาง 😐", "probability": 0.1},
                {"label": "เชิงบวก 😄", "probability": 0.85}
            ]
        }"#;
        let parsed: PredictionResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.sentiment, SentimentClass::Positive);
        assert_eq!(parsed.formatted_confidence(), "85.0%");
        assert!(parsed.summary.as_deref().unwrap().starts_with("โมเดลมั่นใจ"));
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let json = r#"{"text": "x", "sentiment": "angry", "probabilities": []}"#;
        assert!(serde_json::from_str::<PredictionResult>(json).is_err());
    }

    #[test]
    fn test_bare_name_is_accepted() {
        assert_eq!(SentimentClass::from_label("เป็นกลาง"), Some(SentimentClass::Neutral));
        assert_eq!(SentimentClass::from_label(" เชิงลบ 😡 "), Some(SentimentClass::Negative));
    }

    #[test]
    fn test_missing_pair_falls_back_to_zero() {
        let mut r = result("ข้อความ", SentimentClass::Negative, [0.7, 0.2, 0.1]);
        r.probabilities.retain(|p| p.label != SentimentClass::Negative.label());
        assert_eq!(r.selected_confidence(), 0.0);
        assert_eq!(r.formatted_confidence(), "0.0%");
    }

    #[test]
    fn test_per_class_indexing() {
        let mut counts = PerClass::<usize>::default();
        counts[SentimentClass::Positive] += 2;
        counts[SentimentClass::Negative] += 1;
        let collected: Vec<_> = counts.iter().map(|(_, c)| *c).collect();
        assert_eq!(collected, vec![1, 0, 2]);
    }
}
