use std::{
    f64::consts::TAU,
    fs::File,
    io::{
        BufWriter,
        Write,
    },
    path::{
        Path,
        PathBuf,
    },
};

use image::{
    ImageFormat,
    Rgba,
    RgbaImage,
};

use super::{
    charts::{
        ChartInstance,
        ChartKind,
        ChartRegistry,
        ChartSlot,
        ChartSpec,
    },
    models::PredictionResult,
    table::TABLE_HEADERS,
    SentimentError,
};

pub const TABLE_EXPORT_FILE: &str = "sentiment_result.csv";
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS: Rgba<u8> = Rgba([120, 120, 120, 255]);
const GRID: Rgba<u8> = Rgba([225, 225, 225, 255]);
const EMPTY_PIE: Rgba<u8> = Rgba([210, 210, 210, 255]);

/// Writes the table as CSV. Fields holding commas, quotes or newlines get quoted.
pub fn write_table_csv<W: Write>(
    mut writer: W,
    results: &[&PredictionResult],
) -> Result<(), SentimentError> {
    // Spreadsheet tools need the BOM to pick UTF-8 for Thai text.
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(TABLE_HEADERS)?;
    for result in results {
        csv_writer.write_record([
            result.text.as_str(),
            result.sentiment.label(),
            result.formatted_confidence().as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_table(dir: &Path, results: &[&PredictionResult]) -> Result<PathBuf, SentimentError> {
    let path = dir.join(TABLE_EXPORT_FILE);
    let file = File::create(&path).map_err(|e| {
        SentimentError::Custom(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write_table_csv(&mut writer, results)?;
    writer.flush()?;

    tracing::info!("Exported {} rows to {}", results.len(), path.display());
    Ok(path)
}

/// Writes one PNG per live chart.
pub fn export_images(dir: &Path, registry: &ChartRegistry) -> Result<Vec<PathBuf>, SentimentError> {
    if registry.is_empty() {
        return Err(SentimentError::NoCharts);
    }

    let mut written = Vec::new();
    for slot in ChartSlot::ALL {
        let Some(instance) = registry.get(slot) else {
            continue;
        };
        let path = dir.join(slot.export_file_name());
        render_chart(instance).save_with_format(&path, ImageFormat::Png)?;
        tracing::info!("Exported {:?} chart to {}", slot, path.display());
        written.push(path);
    }
    Ok(written)
}

/// Rasterizes a chart at its instance size.
pub fn render_chart(instance: &ChartInstance) -> RgbaImage {
    let width = instance.size.width.max(1);
    let height = instance.size.height.max(1);
    let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);

    match instance.spec.kind {
        ChartKind::Pie => draw_pie(&mut image, &instance.spec),
        ChartKind::Bar => draw_bars(&mut image, &instance.spec),
    }
    image
}

fn rgba(color: [u8; 3]) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 255])
}

fn draw_pie(image: &mut RgbaImage, spec: &ChartSpec) {
    let (width, height) = image.dimensions();
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let radius = width.min(height) as f64 * 0.4;
    let total = spec.total();

    // Cumulative end angle of each slice, clockwise from twelve o'clock.
    let mut boundaries = Vec::with_capacity(spec.points.len());
    let mut acc = 0.0;
    for point in &spec.points {
        acc += if total > 0.0 { point.value / total * TAU } else { 0.0 };
        boundaries.push((acc, rgba(point.color)));
    }

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        if dx * dx + dy * dy > radius * radius {
            continue;
        }
        if total <= 0.0 {
            *pixel = EMPTY_PIE;
            continue;
        }

        let mut angle = dx.atan2(-dy);
        if angle < 0.0 {
            angle += TAU;
        }
        if let Some((_, color)) = boundaries.iter().find(|(end, _)| angle < *end) {
            *pixel = *color;
        } else if let Some((_, color)) = boundaries.iter().rev().find(|(end, _)| *end > 0.0) {
            *pixel = *color;
        }
    }
}

fn draw_bars(image: &mut RgbaImage, spec: &ChartSpec) {
    let (width, height) = image.dimensions();
    let left = (width / 10).max(1);
    let right = width.saturating_sub((width / 20).max(1));
    let top = (height / 10).max(1);
    let bottom = height.saturating_sub((height / 10).max(1));
    if right <= left || bottom <= top {
        return;
    }

    let (min, max) = spec.value_range.unwrap_or_else(|| {
        let highest = spec.points.iter().map(|p| p.value).fold(0.0, f64::max);
        (0.0, if highest > 0.0 { highest } else { 1.0 })
    });
    let plot_height = (bottom - top) as f64;
    let to_y = |value: f64| {
        let fraction = ((value - min) / (max - min)).clamp(0.0, 1.0);
        bottom - (fraction * plot_height).round() as u32
    };

    for step in 1..=5 {
        let y = to_y(min + (max - min) * step as f64 / 5.0);
        for x in left..right {
            image.put_pixel(x, y, GRID);
        }
    }

    let slot_width = (right - left) as f64 / spec.points.len().max(1) as f64;
    for (i, point) in spec.points.iter().enumerate() {
        let start = left + (slot_width * (i as f64 + 0.2)).round() as u32;
        let end = left + (slot_width * (i as f64 + 0.8)).round() as u32;
        let bar_top = to_y(point.value);
        let color = rgba(point.color);
        for x in start..end.min(right) {
            for y in bar_top..bottom {
                image.put_pixel(x, y, color);
            }
        }
    }

    for y in top..=bottom.min(height - 1) {
        image.put_pixel(left, y, AXIS);
    }
    for x in left..right {
        image.put_pixel(x, bottom.min(height - 1), AXIS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        charts::{
            confidence_chart,
            proportion_chart,
            ChartSize,
        },
        filter::FilterCriteria,
        models::{
            tests::result,
            SentimentClass,
        },
        stats::AggregateStats,
        table::{
            TableRow,
            TableView,
        },
    };

    fn sample() -> Vec<PredictionResult> {
        vec![
            result("ดีมาก", SentimentClass::Positive, [0.05, 0.10, 0.85]),
            result("แพง, แต่อร่อย", SentimentClass::Neutral, [0.2, 0.5, 0.3]),
            result("เขาว่า \"ห่วย\"\nจริงๆ", SentimentClass::Negative, [0.9, 0.05, 0.05]),
        ]
    }

    fn read_back(bytes: &[u8]) -> Vec<Vec<String>> {
        let body = bytes.strip_prefix(UTF8_BOM).expect("missing BOM");
        let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(body);
        reader
            .records()
            .map(|record| record.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_csv_round_trips_against_table_view() {
        let data = sample();
        let refs: Vec<&PredictionResult> = data.iter().collect();
        let mut buffer = Vec::new();
        write_table_csv(&mut buffer, &refs).unwrap();

        let records = read_back(&buffer);
        assert_eq!(records[0], TABLE_HEADERS.map(str::to_string).to_vec());

        let view = TableView::build(&data, &FilterCriteria::default());
        assert_eq!(records.len() - 1, view.rows.len());
        for (record, row) in records[1..].iter().zip(&view.rows) {
            let TableRow::Result(row) = row else {
                panic!("unexpected placeholder");
            };
            assert_eq!(record, &vec![row.text.clone(), row.sentiment.clone(), row.confidence.clone()]);
        }
    }

    #[test]
    fn test_csv_quotes_delimiters() {
        let data = sample();
        let refs: Vec<&PredictionResult> = data.iter().collect();
        let mut buffer = Vec::new();
        write_table_csv(&mut buffer, &refs).unwrap();

        let text = String::from_utf8(buffer[UTF8_BOM.len()..].to_vec()).unwrap();
        assert!(text.contains("\"แพง, แต่อร่อย\""));
        assert!(text.contains("\"เขาว่า \"\"ห่วย\"\"\nจริงๆ\""));
        assert_eq!(read_back(&buffer).len(), 4);
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let mut buffer = Vec::new();
        write_table_csv(&mut buffer, &[]).unwrap();
        assert_eq!(read_back(&buffer).len(), 1);
    }

    #[test]
    fn test_export_table_writes_fixed_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample();
        let refs: Vec<&PredictionResult> = data.iter().take(1).collect();
        let path = export_table(dir.path(), &refs).unwrap();

        assert_eq!(path.file_name().unwrap(), TABLE_EXPORT_FILE);
        let records = read_back(&std::fs::read(&path).unwrap());
        assert_eq!(records[1], vec!["ดีมาก", "เชิงบวก 😄", "85.0%"]);
    }

    #[test]
    fn test_export_images_requires_charts() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ChartRegistry::new();
        assert!(matches!(export_images(dir.path(), &registry), Err(SentimentError::NoCharts)));
    }

    #[test]
    fn test_export_images_writes_both_charts_at_current_size() {
        let dir = tempfile::tempdir().unwrap();
        let stats = AggregateStats::compute(&sample());
        let mut registry = ChartRegistry::new();
        registry.replace(ChartSlot::Proportion, proportion_chart(&stats));
        registry.replace(ChartSlot::Confidence, confidence_chart(&stats));
        registry.resize(ChartSize { width: 120, height: 90 });

        let written = export_images(dir.path(), &registry).unwrap();
        let names: Vec<_> =
            written.iter().map(|p| p.file_name().unwrap().to_string_lossy().to_string()).collect();
        assert_eq!(names, vec!["sentiment_pie_chart.png", "confidence_bar_chart.png"]);

        let decoded = image::open(&written[0]).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 90));
    }

    #[test]
    fn test_pie_slices_follow_counts() {
        let data = vec![result("a", SentimentClass::Positive, [0.1, 0.1, 0.8])];
        let stats = AggregateStats::compute(&data);
        let mut registry = ChartRegistry::new();
        registry.resize(ChartSize { width: 100, height: 100 });
        let image = render_chart(registry.replace(ChartSlot::Proportion, proportion_chart(&stats)));

        assert_eq!(*image.get_pixel(50, 50), rgba(SentimentClass::Positive.color()));
        assert_eq!(*image.get_pixel(1, 1), BACKGROUND);
    }

    #[test]
    fn test_empty_pie_is_neutral_grey() {
        let stats = AggregateStats::compute(&[]);
        let mut registry = ChartRegistry::new();
        registry.resize(ChartSize { width: 100, height: 100 });
        let image = render_chart(registry.replace(ChartSlot::Proportion, proportion_chart(&stats)));
        assert_eq!(*image.get_pixel(50, 50), EMPTY_PIE);
    }

    #[test]
    fn test_bar_height_tracks_pinned_axis() {
        let data = vec![result("a", SentimentClass::Negative, [1.0, 0.0, 0.0])];
        let stats = AggregateStats::compute(&data);
        let mut registry = ChartRegistry::new();
        registry.resize(ChartSize { width: 200, height: 100 });
        let image = render_chart(registry.replace(ChartSlot::Confidence, confidence_chart(&stats)));

        // Negative bar sits in the first third and reaches the top of the plot.
        let negative = rgba(SentimentClass::Negative.color());
        assert_eq!(*image.get_pixel(60, 15), negative);
        // Empty neutral bar leaves its column blank above the axis.
        assert_ne!(*image.get_pixel(100, 50), rgba(SentimentClass::Neutral.color()));
    }
}
