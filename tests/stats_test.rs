use chartstudio::analytics::stats::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn central_tendency_and_spread() {
    let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert!(close(mean(&data).unwrap(), 5.0));
    assert!(close(median(&data).unwrap(), 4.5));
    assert!(close(population_std_dev(&data).unwrap(), 2.0));
    assert!(close(variance(&data).unwrap(), 32.0 / 7.0));
    assert!(close(std_dev(&data).unwrap(), (32.0f64 / 7.0).sqrt()));
}

#[test]
fn quantiles_interpolate_between_ranks() {
    let data = [1.0, 2.0, 3.0, 4.0];
    assert!(close(quantile(&data, 0.0).unwrap(), 1.0));
    assert!(close(quantile(&data, 0.25).unwrap(), 1.75));
    assert!(close(quantile(&data, 0.75).unwrap(), 3.25));
    assert!(close(quantile(&data, 1.0).unwrap(), 4.0));
    assert!(quantile(&data, 1.5).is_err());
    assert!(close(quantile(&[7.0], 0.3).unwrap(), 7.0));
}

#[test]
fn summary_of_unsorted_input() {
    let summary = summarize(&[9.0, 1.0, 5.0, 3.0, 7.0]).unwrap();
    assert_eq!(summary.count, 5);
    assert!(close(summary.min, 1.0));
    assert!(close(summary.max, 9.0));
    assert!(close(summary.mean, 5.0));
    assert!(close(summary.median, 5.0));
    assert!(close(summary.q1, 3.0));
    assert!(close(summary.q3, 7.0));
    assert!(close(summary.std_dev, 10.0f64.sqrt()));

    let single = summarize(&[4.0]).unwrap();
    assert_eq!(single.std_dev, 0.0);
}

#[test]
fn empty_and_non_finite_input_is_rejected() {
    assert!(mean(&[]).is_err());
    assert!(summarize(&[]).is_err());
    assert!(variance(&[1.0]).is_err());
    assert!(mean(&[1.0, f64::NAN]).is_err());
}

#[test]
fn correlation() {
    let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
    let up = [2.0, 4.0, 6.0, 8.0, 10.0];
    let down = [5.0, 4.0, 3.0, 2.0, 1.0];
    assert!(close(pearson_correlation(&xs, &up).unwrap(), 1.0));
    assert!(close(pearson_correlation(&xs, &down).unwrap(), -1.0));

    assert!(pearson_correlation(&xs, &up[..3]).is_err(), "Length mismatch accepted");
    assert!(pearson_correlation(&[1.0], &[1.0]).is_err());
    assert!(pearson_correlation(&xs, &[3.0; 5]).is_err(), "Constant series accepted");
}
