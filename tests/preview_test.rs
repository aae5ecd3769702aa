#![cfg(feature = "preview")]

use chartstudio::catalog::ChartType;
use chartstudio::config::ChartConfig;
use chartstudio::dataset::Dataset;
use chartstudio::error::StudioError;
use chartstudio::preview::{PreviewOptions, render_preview};
use chartstudio::theme::Theme;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn data() -> Dataset {
    Dataset::from_csv_str("x,a,b\n1,3,1\n2,5,2\n3,,4\n4,6,-2\n").unwrap()
}

fn small() -> PreviewOptions {
    PreviewOptions {
        width: 160,
        height: 100,
    }
}

#[test]
fn renders_every_cartesian_type() {
    for chart_type in ChartType::all().iter().filter(|t| t.is_cartesian()) {
        let config = ChartConfig::new(*chart_type).with_data(data(), Some("x"), &["a", "b"]);
        let png = render_preview(&config, &small())
            .unwrap_or_else(|e| panic!("{} failed: {}", chart_type, e));
        assert_eq!(&png[..8], &PNG_MAGIC, "{} is not a PNG", chart_type);
    }
}

#[test]
fn stacked_dark_chart_renders() {
    let mut config = ChartConfig::new(ChartType::Area).with_data(data(), Some("x"), &["a", "b"]);
    config.series.stacked = true;
    config.theme = Theme::Dark;
    config.colors.background = Some("#222".to_string());
    config.grid.show_x_lines = true;
    let png = render_preview(&config, &PreviewOptions::default()).unwrap();
    assert_eq!(&png[..8], &PNG_MAGIC);
}

#[test]
fn non_cartesian_types_are_unsupported() {
    let config = ChartConfig::new(ChartType::Pie).with_data(data(), Some("x"), &["a"]);
    assert!(matches!(
        render_preview(&config, &small()),
        Err(StudioError::Unsupported(_))
    ));
}

#[test]
fn size_and_data_are_checked() {
    let config = ChartConfig::new(ChartType::Line).with_data(data(), Some("x"), &["a"]);
    let tiny = PreviewOptions {
        width: 8,
        height: 8,
    };
    assert!(matches!(
        render_preview(&config, &tiny),
        Err(StudioError::InvalidInput(_))
    ));

    let empty = Dataset::from_csv_str("x,a\n").unwrap();
    let config = ChartConfig::new(ChartType::Line).with_data(empty, Some("x"), &["a"]);
    assert!(render_preview(&config, &small()).is_err());
}

#[test]
fn axis_minimum_above_the_data_still_renders() {
    let mut config = ChartConfig::new(ChartType::Line).with_data(data(), Some("x"), &["a"]);
    config.axes.y_min = Some(100.0);
    let png = render_preview(&config, &small()).unwrap();
    assert_eq!(&png[..8], &PNG_MAGIC);
}
