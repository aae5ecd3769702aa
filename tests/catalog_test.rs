use chartstudio::catalog::{ChartType, Coordinate, catalog};

#[test]
fn catalog_lists_every_type_once() {
    let entries = catalog();
    assert_eq!(entries.len(), ChartType::all().len(), "Catalog size mismatch");

    let mut ids: Vec<&str> = entries.iter().map(|e| e.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), entries.len(), "Duplicate chart type ids");
}

#[test]
fn ids_round_trip_case_insensitively() {
    for chart_type in ChartType::all() {
        assert_eq!(ChartType::from_id(chart_type.id()), Some(*chart_type));
        assert_eq!(
            ChartType::from_id(&chart_type.id().to_uppercase()),
            Some(*chart_type)
        );
    }
    assert_eq!(ChartType::from_id("horizontal-bar"), Some(ChartType::HorizontalBar));
    assert_eq!(ChartType::from_id("sankey"), None);
}

#[test]
fn coordinates_and_column_bounds() {
    assert!(ChartType::Line.is_cartesian());
    assert!(ChartType::Scatter.is_cartesian());
    assert!(!ChartType::Pie.is_cartesian());
    assert_eq!(ChartType::Radar.coordinate(), Coordinate::Polar);
    assert_eq!(ChartType::Gauge.coordinate(), Coordinate::None);

    let pie = ChartType::Pie.info();
    assert_eq!((pie.min_value_columns, pie.max_value_columns), (1, Some(1)));

    let radar = ChartType::Radar.info();
    assert_eq!((radar.min_value_columns, radar.max_value_columns), (3, None));

    let bar = ChartType::Bar.info();
    assert_eq!((bar.min_value_columns, bar.max_value_columns), (1, None));
}

#[test]
fn serializes_as_kebab_case() {
    let json = serde_json::to_string(&ChartType::HorizontalBar).unwrap();
    assert_eq!(json, "\"horizontal-bar\"");
    let parsed: ChartType = serde_json::from_str("\"doughnut\"").unwrap();
    assert_eq!(parsed, ChartType::Doughnut);
    assert_eq!(ChartType::Funnel.to_string(), "funnel");
}
