use chartstudio::analytics::seasonality::{
    autocorrelation, centered_moving_average, decompose, detect_period,
};

/// Linear trend plus a repeating four-step pattern that sums to zero
fn seasonal_series(cycles: usize) -> Vec<f64> {
    let pattern = [3.0, -1.0, -4.0, 2.0];
    (0..cycles * 4)
        .map(|t| 10.0 + 0.5 * t as f64 + pattern[t % 4])
        .collect()
}

#[test]
fn odd_and_even_moving_averages() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    let odd = centered_moving_average(&data, 3);
    assert_eq!(odd, vec![None, Some(2.0), Some(3.0), Some(4.0), None]);

    // 2x4 average: (0.5*1 + 2 + 3 + 4 + 0.5*5) / 4 = 3
    let even = centered_moving_average(&data, 4);
    assert_eq!(even, vec![None, None, Some(3.0), None, None]);

    assert!(centered_moving_average(&[1.0, 2.0], 3).iter().all(Option::is_none));
}

#[test]
fn recovers_the_seasonal_pattern() {
    let data = seasonal_series(6);
    let result = decompose(&data, 4).unwrap();

    assert_eq!(result.period, 4);
    let expected = [3.0, -1.0, -4.0, 2.0];
    for (got, want) in result.seasonal_indices.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "index {} != {}", got, want);
    }
    assert!(result.seasonal_indices.iter().sum::<f64>().abs() < 1e-9);

    assert_eq!(result.trend[0], None);
    assert_eq!(result.trend[1], None);
    assert!(result.trend[2].is_some());
    assert_eq!(result.trend[data.len() - 2], None);

    for (t, residual) in result.residual.iter().enumerate() {
        if let Some(r) = residual {
            assert!(r.abs() < 1e-9, "residual at {} is {}", t, r);
        }
    }
    assert_eq!(result.seasonal.len(), data.len());
    assert_eq!(result.seasonal[5], result.seasonal_indices[1]);
}

#[test]
fn decomposition_needs_two_periods() {
    assert!(decompose(&seasonal_series(1), 4).is_err());
    assert!(decompose(&seasonal_series(3), 1).is_err());
}

#[test]
fn autocorrelation_basics() {
    let data = seasonal_series(5);
    assert!((autocorrelation(&data, 0).unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(autocorrelation(&[2.0, 2.0, 2.0], 1).unwrap(), 0.0);
    assert!(autocorrelation(&data, data.len()).is_err());
}

#[test]
fn detects_the_period() {
    let pattern = [5.0, 1.0, -3.0, -3.0, 0.0];
    let data: Vec<f64> = (0..30).map(|t| pattern[t % 5]).collect();
    assert_eq!(detect_period(&data, 12).unwrap(), Some(5));
    assert!(detect_period(&[1.0, 2.0, 3.0], 10).is_err());
}
