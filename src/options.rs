//! Chart options builder.
//!
//! Turns a [`ChartConfig`] into the option object of the charting library the
//! front end renders with (ECharts schema). The mapping is pure: the same
//! configuration always yields the same JSON, and nothing here touches the
//! store or the network.

use crate::catalog::ChartType;
use crate::config::{Align, ChartConfig, LegendPosition, Orientation, TooltipTrigger};
use crate::dataset::parse_number;
use crate::error::{Result, StudioError};
use serde_json::{Map, Value, json};

/// Headroom added above the largest value on radar axes and gauges
const AXIS_HEADROOM: f64 = 1.2;

/// Build the charting-library options for a configuration
///
/// The configuration is validated first; an invalid configuration yields
/// `StudioError::Validation` listing every problem.
///
/// # Arguments
/// * `config` - The chart configuration to map
///
/// # Returns
/// * `Result<Value>` - The options object, ready to hand to the renderer
///
/// # Examples
/// ```
/// use chartstudio::catalog::ChartType;
/// use chartstudio::config::ChartConfig;
/// use chartstudio::dataset::Dataset;
/// use chartstudio::options::build_options;
///
/// let data = Dataset::from_csv_str("month,sales\nJan,10\nFeb,12\n").unwrap();
/// let config = ChartConfig::new(ChartType::Bar).with_data(data, Some("month"), &["sales"]);
/// let options = build_options(&config).unwrap();
/// assert_eq!(options["series"][0]["type"], "bar");
/// assert_eq!(options["xAxis"]["data"][1], "Feb");
/// ```
pub fn build_options(config: &ChartConfig) -> Result<Value> {
    config.validate()?;

    let palette = config.theme.palette();
    let mut options = Map::new();

    options.insert("title".into(), title_options(config, palette.text));
    options.insert("tooltip".into(), tooltip_options(config));
    options.insert("legend".into(), legend_options(config, palette.text)?);

    let colors: Vec<Value> = if config.colors.palette.is_empty() {
        palette.colors.iter().map(|c| json!(c)).collect()
    } else {
        config.colors.palette.iter().map(|c| json!(c)).collect()
    };
    options.insert("color".into(), Value::Array(colors));
    options.insert(
        "backgroundColor".into(),
        json!(
            config
                .colors
                .background
                .as_deref()
                .unwrap_or(palette.background)
        ),
    );
    options.insert("textStyle".into(), json!({ "color": palette.text }));

    options.insert("animation".into(), json!(config.animation.enabled));
    options.insert(
        "animationDuration".into(),
        json!(config.animation.duration_ms),
    );
    options.insert(
        "animationEasing".into(),
        json!(config.animation.easing.as_str()),
    );

    match config.chart_type {
        ChartType::Line
        | ChartType::Bar
        | ChartType::HorizontalBar
        | ChartType::Area
        | ChartType::Scatter => cartesian_options(config, &mut options)?,
        ChartType::Pie | ChartType::Doughnut => {
            options.insert("series".into(), json!([pie_series(config)?]));
        }
        ChartType::Radar => radar_options(config, &mut options)?,
        ChartType::Funnel => {
            options.insert("series".into(), json!([funnel_series(config)?]));
        }
        ChartType::Gauge => {
            options.insert("series".into(), json!([gauge_series(config)?]));
        }
    }

    log::debug!(
        "built {} options for '{}'",
        config.chart_type,
        config.title.text
    );
    Ok(Value::Object(options))
}

/// Category labels for every row; 1-based row numbers when no column is bound
pub fn categories(config: &ChartConfig) -> Result<Vec<String>> {
    let dataset = &config.data.dataset;
    match &config.data.category_column {
        Some(column) => dataset.column_text(column),
        None => Ok((1..=dataset.row_count()).map(|i| i.to_string()).collect()),
    }
}

/// One value per row, `null` where the cell is not a number
fn column_values(config: &ChartConfig, column: &str) -> Result<Vec<Value>> {
    Ok(config
        .data
        .dataset
        .column_text(column)?
        .iter()
        .map(|cell| parse_number(cell).map(Value::from).unwrap_or(Value::Null))
        .collect())
}

/// `{name, value}` items for the single value column, skipping non-numeric rows
fn named_items(config: &ChartConfig) -> Result<Vec<(String, f64)>> {
    let column = first_value_column(config)?;
    let names = categories(config)?;
    let values = config.data.dataset.column_text(column)?;
    Ok(names
        .into_iter()
        .zip(values.iter())
        .filter_map(|(name, cell)| parse_number(cell).map(|v| (name, v)))
        .collect())
}

fn first_value_column(config: &ChartConfig) -> Result<&str> {
    config
        .data
        .value_columns
        .first()
        .map(String::as_str)
        .ok_or_else(|| StudioError::invalid("No value column bound"))
}

fn title_options(config: &ChartConfig, text_color: &str) -> Value {
    let align = match config.title.align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    };
    json!({
        "show": config.title.show,
        "text": config.title.text,
        "subtext": config.title.subtext,
        "left": align,
        "textStyle": { "color": text_color },
    })
}

fn tooltip_options(config: &ChartConfig) -> Value {
    let trigger = match config.tooltip.trigger {
        TooltipTrigger::Axis => "axis",
        TooltipTrigger::Item => "item",
        TooltipTrigger::None => "none",
    };
    let mut tooltip = json!({
        "show": config.tooltip.show,
        "trigger": trigger,
    });
    if let Some(formatter) = &config.tooltip.formatter {
        tooltip["formatter"] = json!(formatter);
    }
    tooltip
}

fn legend_options(config: &ChartConfig, text_color: &str) -> Result<Value> {
    let names: Vec<String> = match config.chart_type {
        ChartType::Pie | ChartType::Doughnut | ChartType::Funnel => named_items(config)?
            .into_iter()
            .map(|(name, _)| name)
            .collect(),
        ChartType::Radar => categories(config)?,
        _ => config.data.value_columns.clone(),
    };

    let mut legend = json!({
        "show": config.legend.show,
        "orient": match config.legend.orient {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        },
        "data": names,
        "textStyle": { "color": text_color },
    });
    match config.legend.position {
        LegendPosition::Top => legend["top"] = json!("top"),
        LegendPosition::Bottom => legend["bottom"] = json!("bottom"),
        LegendPosition::Left => {
            legend["left"] = json!("left");
            legend["top"] = json!("middle");
        }
        LegendPosition::Right => {
            legend["right"] = json!("right");
            legend["top"] = json!("middle");
        }
    }
    Ok(legend)
}

fn grid_options(config: &ChartConfig) -> Value {
    let g = &config.grid;
    json!({
        "left": format!("{}%", g.left),
        "right": format!("{}%", g.right),
        "top": format!("{}%", g.top),
        "bottom": format!("{}%", g.bottom),
        "containLabel": g.contain_label,
    })
}

fn cartesian_options(config: &ChartConfig, options: &mut Map<String, Value>) -> Result<()> {
    let palette = config.theme.palette();
    let axes = &config.axes;
    let grid = &config.grid;
    let axis_line = json!({ "lineStyle": { "color": palette.axis_line } });
    let split_line = |show: bool| json!({ "show": show, "lineStyle": { "color": palette.split_line } });

    let mut value_axis = json!({
        "type": "value",
        "name": axes.y_name,
        "axisLine": axis_line,
    });
    if let Some(min) = axes.y_min {
        value_axis["min"] = json!(min);
    }
    if let Some(max) = axes.y_max {
        value_axis["max"] = json!(max);
    }

    let (x_axis, y_axis) = match config.chart_type {
        ChartType::Scatter => {
            let x_axis = json!({
                "type": "value",
                "name": axes.x_name,
                "axisLine": axis_line,
                "splitLine": split_line(grid.show_x_lines),
            });
            value_axis["splitLine"] = split_line(grid.show_y_lines);
            (x_axis, value_axis)
        }
        ChartType::HorizontalBar => {
            let category_axis = json!({
                "type": "category",
                "name": axes.x_name,
                "data": categories(config)?,
                "axisLine": axis_line,
                "splitLine": split_line(grid.show_y_lines),
            });
            value_axis["splitLine"] = split_line(grid.show_x_lines);
            (value_axis, category_axis)
        }
        _ => {
            let category_axis = json!({
                "type": "category",
                "name": axes.x_name,
                "data": categories(config)?,
                "boundaryGap": config.chart_type == ChartType::Bar,
                "axisLine": axis_line,
                "splitLine": split_line(grid.show_x_lines),
            });
            value_axis["splitLine"] = split_line(grid.show_y_lines);
            (category_axis, value_axis)
        }
    };

    options.insert("grid".into(), grid_options(config));
    options.insert("xAxis".into(), x_axis);
    options.insert("yAxis".into(), y_axis);

    let series = config
        .data
        .value_columns
        .iter()
        .map(|column| cartesian_series(config, column))
        .collect::<Result<Vec<Value>>>()?;
    options.insert("series".into(), Value::Array(series));
    Ok(())
}

fn cartesian_series(config: &ChartConfig, column: &str) -> Result<Value> {
    let style = &config.series;
    let series_type = match config.chart_type {
        ChartType::Bar | ChartType::HorizontalBar => "bar",
        ChartType::Scatter => "scatter",
        _ => "line",
    };

    let data: Vec<Value> = if config.chart_type == ChartType::Scatter {
        let x_column = config
            .data
            .category_column
            .as_deref()
            .ok_or_else(|| StudioError::invalid("Scatter charts need an x column"))?;
        config
            .data
            .dataset
            .numeric_pairs(x_column, column)?
            .into_iter()
            .map(|(x, y)| json!([x, y]))
            .collect()
    } else {
        column_values(config, column)?
    };

    let mut series = json!({
        "name": column,
        "type": series_type,
        "data": data,
        "label": { "show": style.show_labels },
    });

    match config.chart_type {
        ChartType::Line | ChartType::Area => {
            series["smooth"] = json!(style.smooth);
            series["symbolSize"] = json!(style.symbol_size);
            if config.chart_type == ChartType::Area {
                series["areaStyle"] = json!({});
            }
        }
        ChartType::Scatter => {
            series["symbolSize"] = json!(style.symbol_size);
        }
        _ => {}
    }
    if style.stacked && config.chart_type != ChartType::Scatter {
        series["stack"] = json!("total");
    }
    Ok(series)
}

fn pie_series(config: &ChartConfig) -> Result<Value> {
    let radius = if config.chart_type == ChartType::Doughnut {
        json!(["40%", "70%"])
    } else {
        json!("60%")
    };
    let data: Vec<Value> = named_items(config)?
        .into_iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();

    Ok(json!({
        "name": first_value_column(config)?,
        "type": "pie",
        "radius": radius,
        "center": ["50%", "50%"],
        "data": data,
        "label": { "show": config.series.show_labels },
    }))
}

fn radar_options(config: &ChartConfig, options: &mut Map<String, Value>) -> Result<()> {
    let dataset = &config.data.dataset;
    let columns = &config.data.value_columns;

    let indicator = columns
        .iter()
        .map(|column| {
            let largest = dataset
                .numeric_column(column)?
                .into_iter()
                .fold(f64::NEG_INFINITY, f64::max);
            let max = if largest > 0.0 {
                largest * AXIS_HEADROOM
            } else {
                1.0
            };
            Ok(json!({ "name": column, "max": max }))
        })
        .collect::<Result<Vec<Value>>>()?;

    let value_rows = columns
        .iter()
        .map(|column| column_values(config, column))
        .collect::<Result<Vec<Vec<Value>>>>()?;
    let data: Vec<Value> = categories(config)?
        .into_iter()
        .enumerate()
        .map(|(row, name)| {
            let value: Vec<Value> = value_rows.iter().map(|col| col[row].clone()).collect();
            json!({ "name": name, "value": value })
        })
        .collect();

    options.insert("radar".into(), json!({ "indicator": indicator }));
    options.insert(
        "series".into(),
        json!([{
            "type": "radar",
            "data": data,
            "label": { "show": config.series.show_labels },
        }]),
    );
    Ok(())
}

fn funnel_series(config: &ChartConfig) -> Result<Value> {
    let mut items = named_items(config)?;
    items.sort_by(|a, b| b.1.total_cmp(&a.1));
    let data: Vec<Value> = items
        .into_iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();

    Ok(json!({
        "name": first_value_column(config)?,
        "type": "funnel",
        "sort": "descending",
        "left": "10%",
        "width": "80%",
        "data": data,
        "label": { "show": config.series.show_labels },
    }))
}

fn gauge_series(config: &ChartConfig) -> Result<Value> {
    let column = first_value_column(config)?;
    let value = config
        .data
        .dataset
        .numeric_column(column)?
        .first()
        .copied()
        .ok_or_else(|| {
            StudioError::invalid(format!("Gauge column '{}' has no numeric value", column))
        })?;
    let max = if value > 0.0 {
        value * AXIS_HEADROOM
    } else {
        100.0
    };

    Ok(json!({
        "name": column,
        "type": "gauge",
        "min": 0,
        "max": max,
        "data": [{ "name": column, "value": value }],
        "detail": { "formatter": "{value}" },
    }))
}
