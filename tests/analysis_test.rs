use chartstudio::analytics::forecast::ForecastMethod;
use chartstudio::analytics::{AnalysisOutput, AnalysisRequest, numeric_rows, run_analysis};
use chartstudio::dataset::Dataset;
use serde_json::json;

fn data() -> Dataset {
    Dataset::from_csv_str(
        "week,visits,signups,comment\n\
         1,100,10,Great charts\n\
         2,120,12,The export is slow\n\
         3,n/a,14,love it\n\
         4,160,16,not good\n\
         5,180,18,fine\n\
         6,200,20,\n",
    )
    .unwrap()
}

#[test]
fn requests_parse_with_defaults() {
    let request: AnalysisRequest =
        serde_json::from_value(json!({"tool": "iqr_outliers", "column": "visits"})).unwrap();
    assert_eq!(
        request,
        AnalysisRequest::IqrOutliers {
            column: "visits".to_string(),
            multiplier: 1.5
        }
    );
    assert_eq!(request.tool(), "iqr_outliers");

    let request: AnalysisRequest = serde_json::from_value(
        json!({"tool": "forecast", "column": "visits", "method": "moving_average"}),
    )
    .unwrap();
    match request {
        AnalysisRequest::Forecast {
            method,
            horizon,
            alpha,
            window,
            ..
        } => {
            assert_eq!(method, ForecastMethod::MovingAverage);
            assert_eq!((horizon, alpha, window), (5, 0.3, 3));
        }
        other => panic!("Parsed as {:?}", other),
    }

    assert!(serde_json::from_value::<AnalysisRequest>(json!({"tool": "astrology"})).is_err());
}

#[test]
fn summary_skips_non_numeric_cells() {
    let request = AnalysisRequest::Summary {
        column: "visits".to_string(),
    };
    match run_analysis(&data(), &request).unwrap() {
        AnalysisOutput::Summary(summary) => {
            assert_eq!(summary.count, 5);
            assert_eq!(summary.max, 200.0);
        }
        other => panic!("Unexpected output {:?}", other),
    }
}

#[test]
fn paired_tools_use_complete_rows() {
    let correlation = run_analysis(
        &data(),
        &AnalysisRequest::Correlation {
            x: "visits".to_string(),
            y: "signups".to_string(),
        },
    )
    .unwrap();
    match correlation {
        AnalysisOutput::Correlation(r) => assert!((r - 1.0).abs() < 1e-9),
        other => panic!("Unexpected output {:?}", other),
    }

    let fit = run_analysis(
        &data(),
        &AnalysisRequest::LinearRegression {
            x: "week".to_string(),
            y: "signups".to_string(),
        },
    )
    .unwrap();
    match fit {
        AnalysisOutput::LinearRegression(fit) => {
            assert!((fit.slope - 2.0).abs() < 1e-9);
            assert!((fit.intercept - 8.0).abs() < 1e-9);
        }
        other => panic!("Unexpected output {:?}", other),
    }
}

#[test]
fn numeric_rows_drop_incomplete_rows() {
    let columns = vec!["week".to_string(), "visits".to_string()];
    let rows = numeric_rows(&data(), &columns).unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[2], vec![4.0, 160.0]);

    assert!(numeric_rows(&data(), &[]).is_err());
    assert!(numeric_rows(&data(), &["nope".to_string()]).is_err());
}

#[test]
fn text_tools_run_per_row() {
    let output = run_analysis(
        &data(),
        &AnalysisRequest::Sentiment {
            column: "comment".to_string(),
        },
    )
    .unwrap();
    match output {
        AnalysisOutput::Sentiment(rows) => {
            assert_eq!(rows.len(), 6);
            assert!(rows[0].score > 0);
            assert!(rows[1].score < 0);
            assert!(rows[3].score < 0, "Negation ignored");
            assert_eq!(rows[5].score, 0);
        }
        other => panic!("Unexpected output {:?}", other),
    }
}

#[test]
fn output_is_tagged_json() {
    let output = run_analysis(
        &data(),
        &AnalysisRequest::Forecast {
            column: "signups".to_string(),
            method: ForecastMethod::LinearTrend,
            horizon: 2,
            alpha: 0.3,
            window: 3,
        },
    )
    .unwrap();
    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["tool"], "forecast");
    assert_eq!(value["result"]["method"], "linear_trend");
    let next = value["result"]["forecast"][0].as_f64().unwrap();
    assert!((next - 22.0).abs() < 1e-9);
}

#[test]
fn errors_surface_from_tools() {
    let kmeans = AnalysisRequest::Kmeans {
        columns: vec!["visits".to_string()],
        k: 10,
        options: Default::default(),
    };
    assert!(run_analysis(&data(), &kmeans).is_err(), "k above point count accepted");

    let missing = AnalysisRequest::Summary {
        column: "revenue".to_string(),
    };
    assert!(run_analysis(&data(), &missing).is_err());
}
