//! Engine-level bootstrap tests on known data.

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;
use resampling::{statistics, Bootstrap, Error};

fn mean_stat(s: &[f64]) -> f64 {
    s.iter().sum::<f64>() / s.len() as f64
}

/// Exam-score data used throughout the crate's documentation.
fn student_data() -> Vec<f64> {
    vec![
        19.0, 29.0, 29.0, 30.0, 34.0, 36.0, 39.0, 47.0, 51.0, 52.0, 53.0, 60.0, 60.0, 64.0, 66.0,
        68.0, 70.0,
    ]
}

#[test]
fn bootstrap_se_of_the_mean_approximates_the_analytic_se() {
    // The bootstrap SE of the mean converges to s / sqrt(n).
    let data = student_data();
    let analytic = statistics::stdev(&data).unwrap() / (data.len() as f64).sqrt();

    let result = Bootstrap::new()
        .reps1(50_000)
        .seed(42)
        .run(mean_stat, &data)
        .unwrap();

    let relative_error = (result.se_boot - analytic).abs() / analytic;
    assert!(
        relative_error < 0.05,
        "se_boot {} vs analytic {}",
        result.se_boot,
        analytic
    );
}

#[test]
fn all_five_intervals_are_ordered_and_roughly_centered() {
    let data = student_data();
    let result = Bootstrap::new()
        .reps1(20_000)
        .reps2(50)
        .seed(7)
        .run(mean_stat, &data)
        .unwrap();

    let bca = result.bca.expect("mean on varied data has a valid BCa");
    let double = result.double.expect("reps2 > 0 produces the double CI");
    for interval in [result.normal, result.percentile, result.bc, bca, double] {
        assert!(interval.lower <= interval.upper);
        // No containment guarantee in general, but for the mean of this
        // well-behaved sample every interval should straddle theta_hat.
        assert!(interval.contains(result.theta_hat));
    }

    // Normal and percentile intervals agree closely for a near-symmetric
    // statistic.
    assert!((result.normal.lower - result.percentile.lower).abs() < 2.0 * result.se_boot);
    assert!((result.normal.upper - result.percentile.upper).abs() < 2.0 * result.se_boot);
}

#[test]
fn interval_coverage_on_gaussian_samples_is_near_nominal() {
    // 100 draws of n=40 Gaussian samples; the 95% percentile interval
    // should cover the true mean most of the time. A loose bound keeps
    // the test robust at this replication count.
    let normal = Normal::new(10.0, 3.0).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1234);
    let mut covered = 0u64;
    let runs = 100u64;

    for i in 0..runs {
        let sample: Vec<f64> = (0..40).map(|_| normal.sample(&mut rng)).collect();
        let result = Bootstrap::new()
            .reps1(2_000)
            .seed(i)
            .run(mean_stat, &sample)
            .unwrap();
        if result.percentile.contains(10.0) {
            covered += 1;
        }
    }

    assert!(
        (85..=100).contains(&covered),
        "covered {} of {} runs",
        covered,
        runs
    );
}

#[test]
fn median_statistic_works_through_the_fallible_api() {
    let data = student_data();
    let result = Bootstrap::new()
        .reps1(10_000)
        .seed(5)
        .run(|s| statistics::median(s).unwrap_or(f64::NAN), &data)
        .unwrap();
    assert_eq!(result.failed, 0);
    assert!(result.percentile.lower <= result.percentile.upper);
}

#[test]
fn double_interval_is_omitted_without_second_level_replicates() {
    let result = Bootstrap::new()
        .reps1(2_000)
        .seed(9)
        .run(mean_stat, &student_data())
        .unwrap();
    assert_eq!(result.reps2, 0);
    assert!(result.double.is_none());
}

#[test]
fn structural_errors_abort_before_any_work() {
    let data = student_data();

    let err = Bootstrap::new().reps1(0).run(mean_stat, &data).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = Bootstrap::new()
        .alpha(1.5)
        .run(mean_stat, &data)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = Bootstrap::new().run(mean_stat, &[]).unwrap_err();
    assert!(matches!(err, Error::InsufficientData { .. }));

    let err = Bootstrap::new()
        .threads(0)
        .run(mean_stat, &data)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn result_serializes_to_json() {
    let result = Bootstrap::new()
        .reps1(1_000)
        .seed(3)
        .run(mean_stat, &student_data())
        .unwrap();
    let json = resampling::output::to_json(&result).unwrap();
    assert!(json.contains("theta_hat"));
    assert!(json.contains("se_boot"));
    assert!(json.contains("percentile"));

    let back: resampling::BootstrapResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.theta_hat, result.theta_hat);
    assert_eq!(back.replicates_used, result.replicates_used);
}

#[test]
fn small_trial_runs_have_the_same_result_shape() {
    // Benchmark callers probe with tiny repetition counts; the result
    // must be shaped identically to a full run.
    let result = Bootstrap::new()
        .reps1(10)
        .seed(2)
        .run(mean_stat, &student_data())
        .unwrap();
    assert!(result.replicates_used >= 10);
    assert!(result.se_boot > 0.0);
    assert!(result.bca.is_some());
}
