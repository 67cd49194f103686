use uuid::Uuid;

use super::{
    models::SentimentClass,
    stats::AggregateStats,
};

pub const DEFAULT_CHART_SIZE: ChartSize = ChartSize { width: 480, height: 400 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub class: SentimentClass,
    pub label: String,
    pub value: f64,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub series_label: String,
    pub points: Vec<ChartPoint>,
    /// Pinned value axis, when the chart has one.
    pub value_range: Option<(f64, f64)>,
}

impl ChartSpec {
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

fn points(value: impl Fn(SentimentClass) -> f64) -> Vec<ChartPoint> {
    SentimentClass::ALL
        .into_iter()
        .map(|class| ChartPoint {
            class,
            label: class.label().to_string(),
            value: value(class),
            color: class.color(),
        })
        .collect()
}

/// Pie chart of how many texts landed in each class.
pub fn proportion_chart(stats: &AggregateStats) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Pie,
        title: "สัดส่วนอารมณ์จากไฟล์".to_string(),
        series_label: "สัดส่วนอารมณ์".to_string(),
        points: points(|class| stats.counts[class] as f64),
        value_range: None,
    }
}

/// Bar chart of average confidence per class on a fixed 0–100 axis.
pub fn confidence_chart(stats: &AggregateStats) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: "ความมั่นใจเฉลี่ยต่ออารมณ์".to_string(),
        series_label: "ความมั่นใจเฉลี่ย (%)".to_string(),
        points: points(|class| stats.average_confidence[class]),
        value_range: Some((0.0, 100.0)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    Proportion,
    Confidence,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 2] = [ChartSlot::Proportion, ChartSlot::Confidence];

    pub fn export_file_name(&self) -> &'static str {
        match self {
            ChartSlot::Proportion => "sentiment_pie_chart.png",
            ChartSlot::Confidence => "confidence_bar_chart.png",
        }
    }

    fn index(&self) -> usize {
        match self {
            ChartSlot::Proportion => 0,
            ChartSlot::Confidence => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartInstance {
    pub id: Uuid,
    pub spec: ChartSpec,
    pub size: ChartSize,
}

/// Holds at most one live chart per slot.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    slots: [Option<ChartInstance>; 2],
    size: Option<ChartSize>,
    destroyed: usize,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroys whatever occupies `slot`, then creates a fresh instance for `spec`.
    pub fn replace(&mut self, slot: ChartSlot, spec: ChartSpec) -> &ChartInstance {
        self.destroy(slot);
        let instance = ChartInstance {
            id: Uuid::new_v4(),
            spec,
            size: self.size.unwrap_or(DEFAULT_CHART_SIZE),
        };
        tracing::debug!("Created {:?} chart {}", slot, instance.id);
        self.slots[slot.index()].insert(instance)
    }

    pub fn destroy(&mut self, slot: ChartSlot) {
        if let Some(old) = self.slots[slot.index()].take() {
            tracing::debug!("Destroyed {:?} chart {}", slot, old.id);
            self.destroyed += 1;
        }
    }

    pub fn clear(&mut self) {
        for slot in ChartSlot::ALL {
            self.destroy(slot);
        }
    }

    /// Resizes live charts in place. Returns whether anything changed.
    pub fn resize(&mut self, size: ChartSize) -> bool {
        if self.size == Some(size) {
            return false;
        }
        self.size = Some(size);
        for instance in self.slots.iter_mut().flatten() {
            instance.size = size;
        }
        true
    }

    pub fn get(&self, slot: ChartSlot) -> Option<&ChartInstance> {
        self.slots[slot.index()].as_ref()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        tests::result,
        PerClass,
    };

    fn stats() -> AggregateStats {
        AggregateStats::compute(&[
            result("a", SentimentClass::Negative, [0.7, 0.2, 0.1]),
            result("b", SentimentClass::Positive, [0.05, 0.10, 0.85]),
            result("c", SentimentClass::Positive, [0.1, 0.1, 0.8]),
        ])
    }

    #[test]
    fn test_proportion_chart_uses_counts() {
        let spec = proportion_chart(&stats());
        assert_eq!(spec.kind, ChartKind::Pie);
        let values: Vec<f64> = spec.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 0.0, 2.0]);
        assert_eq!(spec.points[0].color, [0xef, 0x44, 0x44]);
        assert_eq!(spec.total(), 3.0);
    }

    #[test]
    fn test_confidence_chart_is_pinned() {
        let spec = confidence_chart(&stats());
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.value_range, Some((0.0, 100.0)));
        assert_eq!(spec.points[2].value, 82.5);
        assert_eq!(spec.points[1].value, 0.0);
    }

    #[test]
    fn test_replace_destroys_previous_instance() {
        let mut registry = ChartRegistry::new();
        for _ in 0..5 {
            let stats = stats();
            registry.replace(ChartSlot::Proportion, proportion_chart(&stats));
            registry.replace(ChartSlot::Confidence, confidence_chart(&stats));
        }
        assert_eq!(registry.live_count(), 2);
        assert_eq!(registry.destroyed_count(), 8);
    }

    #[test]
    fn test_resize_keeps_instances() {
        let mut registry = ChartRegistry::new();
        let stats = AggregateStats {
            counts: PerClass { negative: 1, neutral: 1, positive: 1 },
            ..Default::default()
        };
        let pie_id = registry.replace(ChartSlot::Proportion, proportion_chart(&stats)).id;
        let bar_id = registry.replace(ChartSlot::Confidence, confidence_chart(&stats)).id;

        let size = ChartSize { width: 300, height: 250 };
        assert!(registry.resize(size));
        assert!(!registry.resize(size));

        let pie = registry.get(ChartSlot::Proportion).unwrap();
        let bar = registry.get(ChartSlot::Confidence).unwrap();
        assert_eq!((pie.id, pie.size), (pie_id, size));
        assert_eq!((bar.id, bar.size), (bar_id, size));
        assert_eq!(registry.destroyed_count(), 0);
    }

    #[test]
    fn test_new_instances_pick_up_last_size() {
        let mut registry = ChartRegistry::new();
        let size = ChartSize { width: 200, height: 160 };
        registry.resize(size);
        let instance = registry.replace(ChartSlot::Confidence, confidence_chart(&stats()));
        assert_eq!(instance.size, size);
    }
}
