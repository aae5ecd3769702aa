use chartstudio::catalog::ChartType;
use chartstudio::config::{ChartConfig, LegendPosition};
use chartstudio::dataset::Dataset;
use chartstudio::error::StudioError;
use chartstudio::options::{build_options, categories};
use chartstudio::theme::Theme;
use serde_json::json;

fn data() -> Dataset {
    Dataset::from_csv_str(
        "month,sales,cost,margin\nJan,10,4,6\nFeb,12,5,7\nMar,x,3,6\nApr,20,8,12\n",
    )
    .unwrap()
}

fn config(chart_type: ChartType, columns: &[&str]) -> ChartConfig {
    ChartConfig::new(chart_type).with_data(data(), Some("month"), columns)
}

#[test]
fn line_chart_has_axes_and_null_gaps() {
    let mut cfg = config(ChartType::Line, &["sales", "cost"]);
    cfg.series.smooth = true;
    let options = build_options(&cfg).unwrap();

    assert_eq!(options["xAxis"]["type"], "category");
    assert_eq!(options["xAxis"]["data"], json!(["Jan", "Feb", "Mar", "Apr"]));
    assert_eq!(options["xAxis"]["boundaryGap"], false);
    assert_eq!(options["yAxis"]["type"], "value");
    assert_eq!(options["series"].as_array().unwrap().len(), 2);
    assert_eq!(options["series"][0]["data"], json!([10.0, 12.0, null, 20.0]));
    assert_eq!(options["series"][0]["smooth"], true);
    assert_eq!(options["legend"]["data"], json!(["sales", "cost"]));
    assert_eq!(options["grid"]["left"], "10%");
    assert_eq!(options["tooltip"]["trigger"], "axis");
}

#[test]
fn area_and_stacking() {
    let mut cfg = config(ChartType::Area, &["sales", "cost"]);
    cfg.series.stacked = true;
    let options = build_options(&cfg).unwrap();
    assert_eq!(options["series"][1]["type"], "line");
    assert_eq!(options["series"][1]["areaStyle"], json!({}));
    assert_eq!(options["series"][1]["stack"], "total");
}

#[test]
fn horizontal_bar_swaps_axes() {
    let options = build_options(&config(ChartType::HorizontalBar, &["sales"])).unwrap();
    assert_eq!(options["xAxis"]["type"], "value");
    assert_eq!(options["yAxis"]["type"], "category");
    assert_eq!(options["yAxis"]["data"][0], "Jan");
    assert_eq!(options["series"][0]["type"], "bar");
}

#[test]
fn scatter_uses_numeric_pairs() {
    let cfg = ChartConfig::new(ChartType::Scatter).with_data(data(), Some("cost"), &["sales"]);
    let options = build_options(&cfg).unwrap();
    assert_eq!(options["xAxis"]["type"], "value");
    assert_eq!(
        options["series"][0]["data"],
        json!([[4.0, 10.0], [5.0, 12.0], [8.0, 20.0]])
    );
    assert!(options["series"][0].get("stack").is_none());
}

#[test]
fn pie_and_doughnut_skip_non_numeric_rows() {
    let pie = build_options(&config(ChartType::Pie, &["sales"])).unwrap();
    assert!(pie.get("xAxis").is_none(), "Pie charts have no axes");
    assert_eq!(pie["series"][0]["radius"], "60%");
    assert_eq!(pie["series"][0]["data"].as_array().unwrap().len(), 3);
    assert_eq!(pie["series"][0]["data"][2], json!({"name": "Apr", "value": 20.0}));
    assert_eq!(pie["legend"]["data"], json!(["Jan", "Feb", "Apr"]));
    assert_eq!(pie["tooltip"]["trigger"], "item");

    let doughnut = build_options(&config(ChartType::Doughnut, &["sales"])).unwrap();
    assert_eq!(doughnut["series"][0]["radius"], json!(["40%", "70%"]));
}

#[test]
fn radar_indicators_get_headroom() {
    let options = build_options(&config(ChartType::Radar, &["sales", "cost", "margin"])).unwrap();
    let indicator = options["radar"]["indicator"].as_array().unwrap();
    assert_eq!(indicator.len(), 3);
    assert_eq!(indicator[0]["name"], "sales");
    let max = indicator[0]["max"].as_f64().unwrap();
    assert!((max - 24.0).abs() < 1e-9, "max was {}", max);

    let series = &options["series"][0];
    assert_eq!(series["type"], "radar");
    assert_eq!(series["data"].as_array().unwrap().len(), 4, "One entry per row");
    assert_eq!(series["data"][1], json!({"name": "Feb", "value": [12.0, 5.0, 7.0]}));
}

#[test]
fn funnel_is_sorted_descending() {
    let options = build_options(&config(ChartType::Funnel, &["cost"])).unwrap();
    let values: Vec<f64> = options["series"][0]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["value"].as_f64().unwrap())
        .collect();
    assert_eq!(values, vec![8.0, 5.0, 4.0, 3.0]);
}

#[test]
fn gauge_shows_the_first_value() {
    let options = build_options(&config(ChartType::Gauge, &["sales"])).unwrap();
    let series = &options["series"][0];
    assert_eq!(series["data"][0]["value"], 10.0);
    assert!((series["max"].as_f64().unwrap() - 12.0).abs() < 1e-9);

    let empty = Dataset::from_csv_str("name,score\na,\n").unwrap();
    let cfg = ChartConfig::new(ChartType::Gauge).with_data(empty, None, &["score"]);
    assert!(matches!(build_options(&cfg), Err(StudioError::InvalidInput(_))));
}

#[test]
fn presentation_settings_flow_through() {
    let mut cfg = config(ChartType::Bar, &["sales"]).with_title("Quarterly sales");
    cfg.theme = Theme::Dark;
    cfg.colors.palette = vec!["#ff0000".to_string()];
    cfg.legend.position = LegendPosition::Right;
    cfg.animation.enabled = false;
    cfg.axes.y_min = Some(0.0);
    cfg.axes.y_max = Some(30.0);
    cfg.tooltip.formatter = Some("{b}: {c}".to_string());

    let options = build_options(&cfg).unwrap();
    assert_eq!(options["title"]["text"], "Quarterly sales");
    assert_eq!(options["color"], json!(["#ff0000"]));
    assert_eq!(options["backgroundColor"], Theme::Dark.palette().background);
    assert_eq!(options["legend"]["right"], "right");
    assert_eq!(options["animation"], false);
    assert_eq!(options["animationEasing"], "cubicOut");
    assert_eq!(options["yAxis"]["min"], 0.0);
    assert_eq!(options["yAxis"]["max"], 30.0);
    assert_eq!(options["tooltip"]["formatter"], "{b}: {c}");
    assert_eq!(options["xAxis"]["boundaryGap"], true);
}

#[test]
fn invalid_config_is_not_built() {
    let cfg = config(ChartType::Pie, &["sales", "cost"]);
    assert!(matches!(build_options(&cfg), Err(StudioError::Validation(_))));
}

#[test]
fn row_numbers_stand_in_for_missing_categories() {
    let cfg = ChartConfig::new(ChartType::Line).with_data(data(), None, &["sales"]);
    assert_eq!(categories(&cfg).unwrap(), vec!["1", "2", "3", "4"]);
}
