use super::{BoxPlotStats, HistogramBin, confusion_heatmap_cells, ylgnbu};
use crate::dataset::Column;
use crate::error::PlotError;
use crate::metric::ConfusionMatrix;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Pixel size of every rendered image
pub const IMAGE_SIZE: (u32, u32) = (800, 600);

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Opens a PNG canvas at `path`, runs `draw` on it and writes the file.
fn render<F>(path: &Path, draw: F) -> Result<(), PlotError>
where
    F: FnOnce(&Canvas<'_>) -> Result<(), Box<dyn Error>>,
{
    let result = (|| -> Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
        Ok(())
    })();

    result.map_err(|e| PlotError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!("saved {}", path.display());
    Ok(())
}

/// File name of the histogram of `column`
pub fn histogram_file_name(column: Column) -> String {
    format!("{}histogram.png", column.name())
}

/// File name of the box plot of `column`
pub fn boxplot_file_name(column: Column) -> String {
    format!("{}boxplot.png", column.name())
}

/// File name of the confusion matrix heat map
pub const CONFUSION_MATRIX_FILE: &str = "confusion_matrix.png";

/// Draws the histogram of `column` as `<column>histogram.png` inside `output_dir`.
///
/// # Parameters
///
/// - `output_dir` - Directory receiving the image
/// - `column` - Column the bins were computed from; names the title, axes and file
/// - `bins` - Bars to draw, as produced by `histogram_bins`
///
/// # Returns
///
/// - `Ok(PathBuf)` - Path of the written image
/// - `Err(PlotError)` - If `bins` is empty or the image cannot be written
pub fn draw_histogram(
    output_dir: &Path,
    column: Column,
    bins: &[HistogramBin],
) -> Result<PathBuf, PlotError> {
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Err(PlotError::InvalidData {
            column: column.name().to_string(),
            reason: "no histogram bins".to_string(),
        });
    };
    let path = output_dir.join(histogram_file_name(column));
    let x_range = first.start..last.end;
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;

    render(&path, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(format!("Histogram of {}", column.name()), ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, 0f64..max_count * 1.05)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(column.name())
            .y_desc(column.name())
            .draw()?;

        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLUE.mix(0.6).filled())
        }))?;
        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new(
                [(b.start, 0.0), (b.end, b.count as f64)],
                BLACK.stroke_width(1),
            )
        }))?;
        Ok(())
    })?;
    Ok(path)
}

/// Draws the box plot of `column` as `<column>boxplot.png` inside `output_dir`.
///
/// The box spans the quartiles, whiskers reach the furthest observation within
/// 1.5 IQR of the box and every distinct value beyond them is drawn as a hollow circle.
pub fn draw_boxplot(
    output_dir: &Path,
    column: Column,
    stats: &BoxPlotStats,
) -> Result<PathBuf, PlotError> {
    let path = output_dir.join(boxplot_file_name(column));
    let (lo, hi) = stats.extent();
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    let name = column.name();

    render(&path, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(format!("Box Plot of {}", name), ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..2f64, (lo - pad)..(hi + pad))?;

        let x_formatter = |x: &f64| {
            if (*x - 1.0).abs() < 1e-9 {
                name.to_string()
            } else {
                String::new()
            }
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(3)
            .x_label_formatter(&x_formatter)
            .y_desc(name)
            .draw()?;

        let (left, right) = (0.75, 1.25);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, stats.q1), (right, stats.q3)],
            BLUE.mix(0.3).filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, stats.q1), (right, stats.q3)],
            BLACK.stroke_width(1),
        )))?;

        chart.draw_series(std::iter::once(PathElement::new(
            vec![(left, stats.median), (right, stats.median)],
            RED.stroke_width(2),
        )))?;
        let segments = vec![
            vec![(1.0, stats.q3), (1.0, stats.upper_whisker)],
            vec![(1.0, stats.q1), (1.0, stats.lower_whisker)],
            vec![(0.9, stats.upper_whisker), (1.1, stats.upper_whisker)],
            vec![(0.9, stats.lower_whisker), (1.1, stats.lower_whisker)],
        ];
        chart.draw_series(
            segments
                .into_iter()
                .map(|points| PathElement::new(points, BLACK.stroke_width(1))),
        )?;

        chart.draw_series(
            stats
                .fliers
                .iter()
                .map(|&v| Circle::new((1.0, v), 3, BLACK.stroke_width(1))),
        )?;
        Ok(())
    })?;
    Ok(path)
}

/// Draws the confusion matrix of the test predictions as an annotated heat map.
///
/// Rows are the actual classes (negative on top) and columns the predicted classes,
/// each cell labelled with its count.
///
/// # Returns
///
/// - `Ok(PathBuf)` - Path of `confusion_matrix.png` inside `output_dir`
/// - `Err(PlotError::Render)` - If the image cannot be written
pub fn draw_confusion_heatmap(
    output_dir: &Path,
    matrix: &ConfusionMatrix,
) -> Result<PathBuf, PlotError> {
    let path = output_dir.join(CONFUSION_MATRIX_FILE);
    let cells = confusion_heatmap_cells(matrix.as_array());
    let max_count = cells.iter().map(|c| c.count).max().unwrap_or(0).max(1) as f64;

    render(&path, |root| {
        let chart = ChartBuilder::on(root)
            .caption("Confusion Matrix", ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(150)
            .build_cartesian_2d(0f64..2f64, 0f64..2f64)?;
        let plotting_area = chart.plotting_area();

        for cell in &cells {
            let (r, g, b) = ylgnbu(cell.count as f64 / max_count);
            let corners = [(cell.x, cell.y), (cell.x + 1.0, cell.y + 1.0)];
            plotting_area.draw(&Rectangle::new(corners, RGBColor(r, g, b).filled()))?;
            plotting_area.draw(&Rectangle::new(corners, WHITE.stroke_width(2)))?;

            let ink = if cell.count as f64 / max_count > 0.5 {
                &WHITE
            } else {
                &BLACK
            };
            let style = ("sans-serif", 28)
                .into_font()
                .color(ink)
                .pos(Pos::new(HPos::Center, VPos::Center));
            plotting_area.draw(&Text::new(cell.count.to_string(), cell.center(), style))?;
        }

        // class labels sit in the label areas, outside the plotting area
        let x_style = ("sans-serif", 16)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        let y_style = ("sans-serif", 16)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        for (predicted, label) in ["Predict Negative:0", "Predict Positive:1"].iter().enumerate() {
            let (px, py) = chart.backend_coord(&(predicted as f64 + 0.5, 0.0));
            root.draw(&Text::new(label.to_string(), (px, py + 10), x_style.clone()))?;
        }
        for (actual, label) in ["Actual Negative:0", "Actual Positive:1"].iter().enumerate() {
            let (px, py) = chart.backend_coord(&(0.0, 1.5 - actual as f64));
            root.draw(&Text::new(label.to_string(), (px - 10, py), y_style.clone()))?;
        }
        Ok(())
    })?;
    Ok(path)
}
