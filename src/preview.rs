#![cfg(feature = "preview")]
//! Thumbnail previews of cartesian charts.
//!
//! The interactive chart is drawn in the browser from the options object.
//! This module renders a quick PNG thumbnail on the server with plotters so
//! saved charts can be listed with a picture. Thumbnails carry no text, which
//! keeps rendering independent of the fonts installed on the host.

use crate::catalog::ChartType;
use crate::config::ChartConfig;
use crate::dataset::parse_number;
use crate::error::{Result, StudioError};
use crate::theme::parse_hex_color;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use plotters::prelude::*;

/// Size of the rendered thumbnail
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewOptions {
    /// Width of the image in pixels
    pub width: u32,

    /// Height of the image in pixels
    pub height: u32,
}

impl Default for PreviewOptions {
    /// 640x400, large enough for a card in the saved-charts list
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
        }
    }
}

/// One value column prepared for drawing
struct PlotSeries {
    color: RGBColor,
    values: Vec<Option<f64>>,
}

/// Renders a chart configuration to PNG bytes
///
/// Supports the cartesian chart types (line, area, bar, horizontal bar and
/// scatter). Other types are drawn by the front end only and yield
/// `StudioError::Unsupported`.
///
/// # Arguments
/// * `config` - Chart configuration; validated before drawing
/// * `options` - Image dimensions
///
/// # Returns
/// * `Result<Vec<u8>>` - PNG-encoded image data
///
/// # Implementation Notes
/// * Draws into an in-memory RGB buffer, then encodes it with the `image` crate
/// * Grid margins from the configuration become pixel margins of the plot area
/// * Stacked series are drawn cumulatively, treating gaps as zero
pub fn render_preview(config: &ChartConfig, options: &PreviewOptions) -> Result<Vec<u8>> {
    if !config.chart_type.is_cartesian() {
        return Err(StudioError::Unsupported(format!(
            "No thumbnail renderer for {} charts",
            config.chart_type
        )));
    }
    if options.width < 32 || options.height < 32 || options.width > 4096 || options.height > 4096
    {
        return Err(StudioError::invalid(format!(
            "Preview size {}x{} is outside 32..=4096",
            options.width, options.height
        )));
    }
    config.validate()?;
    if config.data.dataset.is_empty() {
        return Err(StudioError::invalid("Nothing to preview: the dataset is empty"));
    }

    let (width, height) = (options.width, options.height);
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        let palette = config.theme.palette();
        let background = config
            .colors
            .background
            .as_deref()
            .and_then(parse_hex_color)
            .or_else(|| parse_hex_color(palette.background))
            .map(|(r, g, b)| RGBColor(r, g, b))
            .unwrap_or(WHITE);
        root.fill(&background).map_err(render_err)?;

        match config.chart_type {
            ChartType::Scatter => draw_scatter(&root, config, width, height)?,
            _ => draw_category_chart(&root, config, width, height)?,
        }

        root.present().map_err(render_err)?;
    }

    let mut png_data = Vec::new();
    PngEncoder::new(&mut png_data)
        .write_image(&buffer, width, height, image::ColorType::Rgb8)
        .map_err(render_err)?;

    log::debug!(
        "rendered {}x{} {} preview ({} bytes)",
        width,
        height,
        config.chart_type,
        png_data.len()
    );
    Ok(png_data)
}

fn render_err<E: std::fmt::Display>(e: E) -> StudioError {
    StudioError::Render(e.to_string())
}

/// Series colours, cycling through the configured palette or the theme's
fn series_colors(config: &ChartConfig, count: usize) -> Vec<RGBColor> {
    let theme_colors = config.theme.palette().colors;
    let mut parsed: Vec<RGBColor> = config
        .colors
        .palette
        .iter()
        .filter_map(|c| parse_hex_color(c))
        .map(|(r, g, b)| RGBColor(r, g, b))
        .collect();
    if parsed.is_empty() {
        parsed = theme_colors
            .iter()
            .filter_map(|c| parse_hex_color(c))
            .map(|(r, g, b)| RGBColor(r, g, b))
            .collect();
    }
    if parsed.is_empty() {
        parsed.push(BLUE);
    }
    (0..count).map(|i| parsed[i % parsed.len()]).collect()
}

fn theme_line_colors(config: &ChartConfig) -> (RGBColor, RGBColor) {
    let palette = config.theme.palette();
    let to_rgb = |hex: &str| {
        parse_hex_color(hex)
            .map(|(r, g, b)| RGBColor(r, g, b))
            .unwrap_or(BLACK)
    };
    (to_rgb(palette.axis_line), to_rgb(palette.split_line))
}

fn pixel_margins(config: &ChartConfig, width: u32, height: u32) -> (u32, u32, u32, u32) {
    let g = &config.grid;
    (
        width * g.left as u32 / 100,
        width * g.right as u32 / 100,
        height * g.top as u32 / 100,
        height * g.bottom as u32 / 100,
    )
}

/// Value range covering every value, widened to include zero when asked
/// and overridden by the configured axis bounds
///
/// A single bound on the wrong side of the data keeps the automatic span
/// on its other side, so the axis always runs upwards.
fn value_range(config: &ChartConfig, values: &[f64], include_zero: bool) -> (f64, f64) {
    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        lo = 0.0;
        hi = 1.0;
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    let pad = (hi - lo) * 0.05;
    let auto_lo = lo - if include_zero && lo == 0.0 { 0.0 } else { pad };
    let auto_hi = hi + pad;
    let span = auto_hi - auto_lo;
    let (y_min, y_max) = (config.axes.y_min, config.axes.y_max);
    let lo = y_min.unwrap_or(auto_lo);
    let hi = y_max.unwrap_or(auto_hi);
    if hi > lo {
        (lo, hi)
    } else if y_min.is_none() {
        (hi - span, hi)
    } else {
        (lo, lo + span)
    }
}

fn prepare_series(config: &ChartConfig) -> Result<Vec<PlotSeries>> {
    let columns = &config.data.value_columns;
    let colors = series_colors(config, columns.len());
    let mut series = Vec::with_capacity(columns.len());

    for (column, color) in columns.iter().zip(colors) {
        let values: Vec<Option<f64>> = config
            .data
            .dataset
            .column_text(column)?
            .iter()
            .map(|cell| parse_number(cell))
            .collect();
        series.push(PlotSeries { color, values });
    }

    if config.series.stacked {
        let rows = config.data.dataset.row_count();
        let mut running = vec![0.0; rows];
        for s in series.iter_mut() {
            for (row, value) in s.values.iter_mut().enumerate() {
                running[row] += value.unwrap_or(0.0);
                *value = Some(running[row]);
            }
        }
    }
    Ok(series)
}

fn draw_category_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    config: &ChartConfig,
    width: u32,
    height: u32,
) -> Result<()> {
    let series = prepare_series(config)?;
    let rows = config.data.dataset.row_count();
    let bars = matches!(config.chart_type, ChartType::Bar | ChartType::HorizontalBar);
    let horizontal = config.chart_type == ChartType::HorizontalBar;

    let all_values: Vec<f64> = series.iter().flat_map(|s| s.values.iter().flatten()).copied().collect();
    let include_zero = bars || config.chart_type == ChartType::Area;
    let (v_lo, v_hi) = value_range(config, &all_values, include_zero);

    // Category axis: one unit per row, centred on the row index
    let c_lo = -0.5;
    let c_hi = rows as f64 - 0.5;

    let (left, right, top, bottom) = pixel_margins(config, width, height);
    let (x_range, y_range) = if horizontal {
        (v_lo..v_hi, c_lo..c_hi)
    } else {
        (c_lo..c_hi, v_lo..v_hi)
    };
    let mut chart = ChartBuilder::on(root)
        .margin_left(left)
        .margin_right(right)
        .margin_top(top)
        .margin_bottom(bottom)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    let (axis_color, split_color) = theme_line_colors(config);

    // Value grid lines at five even steps
    let show_value_lines = if horizontal {
        config.grid.show_x_lines
    } else {
        config.grid.show_y_lines
    };
    if show_value_lines {
        let step = (v_hi - v_lo) / 5.0;
        let lines = (1..5).map(|i| {
            let v = v_lo + step * i as f64;
            let points = if horizontal {
                vec![(v, c_lo), (v, c_hi)]
            } else {
                vec![(c_lo, v), (c_hi, v)]
            };
            PathElement::new(points, split_color.stroke_width(1))
        });
        chart.draw_series(lines).map_err(render_err)?;
    }

    // Baseline and category axis
    let baseline = v_lo.max(0.0).min(v_hi);
    let axes = if horizontal {
        vec![
            PathElement::new(vec![(baseline, c_lo), (baseline, c_hi)], axis_color.stroke_width(1)),
            PathElement::new(vec![(v_lo, c_lo), (v_hi, c_lo)], axis_color.stroke_width(1)),
        ]
    } else {
        vec![
            PathElement::new(vec![(c_lo, baseline), (c_hi, baseline)], axis_color.stroke_width(1)),
            PathElement::new(vec![(c_lo, v_lo), (c_lo, v_hi)], axis_color.stroke_width(1)),
        ]
    };
    chart.draw_series(axes).map_err(render_err)?;

    if bars {
        let group = 0.8;
        let slot = group / series.len().max(1) as f64;
        for (j, s) in series.iter().enumerate().rev() {
            // Stacked bars share one slot and are drawn tallest first
            let (offset, bar_width) = if config.series.stacked {
                (-group / 2.0, group)
            } else {
                (-group / 2.0 + slot * j as f64, slot)
            };
            let rects = s.values.iter().enumerate().filter_map(|(row, value)| {
                let v = (*value)?;
                let c0 = row as f64 + offset;
                let c1 = c0 + bar_width;
                let corners = if horizontal {
                    [(baseline, c0), (v, c1)]
                } else {
                    [(c0, baseline), (c1, v)]
                };
                Some(Rectangle::new(corners, s.color.filled()))
            });
            chart.draw_series(rects).map_err(render_err)?;
        }
        return Ok(());
    }

    for s in series.iter().rev() {
        let points: Vec<(f64, f64)> = s
            .values
            .iter()
            .enumerate()
            .filter_map(|(row, value)| value.map(|v| (row as f64, v)))
            .collect();

        if config.chart_type == ChartType::Area {
            chart
                .draw_series(
                    AreaSeries::new(points.clone(), baseline, s.color.mix(0.3).filled())
                        .border_style(s.color.stroke_width(2)),
                )
                .map_err(render_err)?;
        } else {
            chart
                .draw_series(LineSeries::new(points.clone(), s.color.stroke_width(2)))
                .map_err(render_err)?;
        }

        let radius = (config.series.symbol_size / 2).max(1) as i32;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), radius, s.color.filled())),
            )
            .map_err(render_err)?;
    }
    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    config: &ChartConfig,
    width: u32,
    height: u32,
) -> Result<()> {
    let x_column = config
        .data
        .category_column
        .as_deref()
        .ok_or_else(|| StudioError::invalid("Scatter charts need an x column"))?;
    let columns = &config.data.value_columns;
    let colors = series_colors(config, columns.len());
    let dataset = &config.data.dataset;

    let mut all_points = Vec::with_capacity(columns.len());
    for column in columns {
        all_points.push(dataset.numeric_pairs(x_column, column)?);
    }

    let xs: Vec<f64> = all_points.iter().flatten().map(|p| p.0).collect();
    let ys: Vec<f64> = all_points.iter().flatten().map(|p| p.1).collect();
    if xs.is_empty() {
        return Err(StudioError::invalid("Scatter chart has no numeric points"));
    }

    let mut x_lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let mut x_hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (x_hi - x_lo).abs() < f64::EPSILON {
        x_lo -= 1.0;
        x_hi += 1.0;
    }
    let x_pad = (x_hi - x_lo) * 0.05;
    let (y_lo, y_hi) = value_range(config, &ys, false);

    let (left, right, top, bottom) = pixel_margins(config, width, height);
    let mut chart = ChartBuilder::on(root)
        .margin_left(left)
        .margin_right(right)
        .margin_top(top)
        .margin_bottom(bottom)
        .build_cartesian_2d((x_lo - x_pad)..(x_hi + x_pad), y_lo..y_hi)
        .map_err(render_err)?;

    let (axis_color, _) = theme_line_colors(config);
    chart
        .draw_series(vec![
            PathElement::new(
                vec![(x_lo - x_pad, y_lo), (x_hi + x_pad, y_lo)],
                axis_color.stroke_width(1),
            ),
            PathElement::new(
                vec![(x_lo - x_pad, y_lo), (x_lo - x_pad, y_hi)],
                axis_color.stroke_width(1),
            ),
        ])
        .map_err(render_err)?;

    let radius = (config.series.symbol_size / 2).max(1) as i32;
    for (points, color) in all_points.iter().zip(colors) {
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), radius, color.filled())),
            )
            .map_err(render_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ChartType;

    fn with_bounds(y_min: Option<f64>, y_max: Option<f64>) -> ChartConfig {
        let mut config = ChartConfig::new(ChartType::Line);
        config.axes.y_min = y_min;
        config.axes.y_max = y_max;
        config
    }

    #[test]
    fn bounds_override_the_data_range() {
        let (lo, hi) = value_range(&with_bounds(Some(-5.0), Some(50.0)), &[1.0, 10.0], false);
        assert_eq!((lo, hi), (-5.0, 50.0));

        let (lo, hi) = value_range(&with_bounds(None, None), &[0.0, 10.0], true);
        assert_eq!(lo, 0.0);
        assert!(hi > 10.0);
    }

    #[test]
    fn minimum_above_the_data_keeps_the_axis_upright() {
        let (lo, hi) = value_range(&with_bounds(Some(100.0), None), &[1.0, 10.0], false);
        assert_eq!(lo, 100.0);
        assert!(hi > lo, "inverted range {}..{}", lo, hi);
    }

    #[test]
    fn maximum_below_the_data_keeps_the_axis_upright() {
        let (lo, hi) = value_range(&with_bounds(None, Some(-20.0)), &[1.0, 10.0], true);
        assert_eq!(hi, -20.0);
        assert!(lo < hi, "inverted range {}..{}", lo, hi);
    }
}
