//! Tests for simple linear regression
//!
//! Golden values are the ones R's `lm()` reports for the same data.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::array;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Distribution;

use crate::{
    base::ModelError,
    lm::{fit, predict, IntervalKind, RegressionConfig, SimpleLinearRegression},
};
use rl_core::data::{BuiltinDataset, DataError, DataFrame, DataFrameBuilder, Series};
use rl_core::ErrorKind;

// ==================== Test Fixtures ====================

/// Four points: (1,2), (2,4), (3,5), (4,8)
fn toy_data() -> DataFrame {
    DataFrameBuilder::new()
        .with_column("x", Series::float(vec![1.0, 2.0, 3.0, 4.0]))
        .unwrap()
        .with_column("y", Series::float(vec![2.0, 4.0, 5.0, 8.0]))
        .unwrap()
        .build()
        .unwrap()
}

/// Exact line: y = 2x + 1
fn exact_line_data() -> DataFrame {
    DataFrameBuilder::new()
        .with_column("x", Series::float(vec![1.0, 2.0, 3.0, 4.0, 5.0]))
        .unwrap()
        .with_column("y", Series::float(vec![3.0, 5.0, 7.0, 9.0, 11.0]))
        .unwrap()
        .build()
        .unwrap()
}

/// y = 1 + 2x + N(0, 0.5²) with a fixed seed
fn noisy_data() -> DataFrame {
    let mut rng = StdRng::seed_from_u64(7);
    let noise = rand_distr::Normal::new(0.0, 0.5).unwrap();

    let x: Vec<f64> = (0..200).map(|i| i as f64 * 0.1).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&xi| 1.0 + 2.0 * xi + noise.sample(&mut rng))
        .collect();

    DataFrameBuilder::new()
        .with_column("x", Series::float(x))
        .unwrap()
        .with_column("y", Series::float(y))
        .unwrap()
        .build()
        .unwrap()
}

fn mtcars() -> DataFrame {
    BuiltinDataset::Mtcars.load().unwrap()
}

// ==================== Basic Tests ====================

#[test]
fn test_toy_fit_coefficients() {
    let model = fit(&toy_data(), "x", "y").unwrap();

    assert_eq!(model.coefficients.len(), 2);
    assert_eq!(model.intercept().name, "(Intercept)");
    assert!(model.intercept().is_intercept);
    assert_eq!(model.slope().name, "x");
    assert!(!model.slope().is_intercept);

    assert_abs_diff_eq!(model.intercept().estimate, 0.0, epsilon = 1e-10);
    assert_abs_diff_eq!(model.slope().estimate, 1.9, epsilon = 1e-10);

    assert_abs_diff_eq!(model.intercept().std_error, 0.724569, epsilon = 1e-6);
    assert_abs_diff_eq!(model.slope().std_error, 0.264575, epsilon = 1e-6);
    assert_abs_diff_eq!(model.slope().t_stat, 7.181325, epsilon = 1e-5);
    assert_abs_diff_eq!(model.slope().p_value, 0.0188442, epsilon = 1e-6);
    assert_abs_diff_eq!(model.intercept().p_value, 1.0, epsilon = 1e-8);

    assert_abs_diff_eq!(model.slope().ci_lower, 0.761625, epsilon = 1e-5);
    assert_abs_diff_eq!(model.slope().ci_upper, 3.038375, epsilon = 1e-5);
    assert_abs_diff_eq!(model.intercept().ci_lower, -3.117568, epsilon = 1e-5);
}

#[test]
fn test_toy_fit_statistics() {
    let model = fit(&toy_data(), "x", "y").unwrap();
    let stats = &model.model_statistics;

    assert_eq!(stats.n_obs, 4);
    assert_eq!(stats.df_residual, 2);
    assert_eq!(stats.df_model, 1);
    assert_abs_diff_eq!(stats.rss, 0.7, epsilon = 1e-10);
    assert_abs_diff_eq!(stats.tss, 18.75, epsilon = 1e-10);
    assert_abs_diff_eq!(stats.r_squared, 0.962667, epsilon = 1e-6);
    assert_abs_diff_eq!(stats.adj_r_squared, 0.944, epsilon = 1e-6);
    assert_abs_diff_eq!(stats.residual_std_error, 0.591608, epsilon = 1e-6);
    assert_abs_diff_eq!(stats.f_statistic, 51.571429, epsilon = 1e-5);
    assert_abs_diff_eq!(stats.f_p_value, 0.0188442, epsilon = 1e-6);

    let expected_residuals = array![0.1, 0.2, -0.7, 0.4];
    assert_abs_diff_eq!(model.residuals, expected_residuals, epsilon = 1e-10);
    let expected_fitted = array![1.9, 3.8, 5.7, 7.6];
    assert_abs_diff_eq!(model.fitted_values, expected_fitted, epsilon = 1e-10);
}

#[test]
fn test_mtcars_mpg_on_wt() {
    let model = fit(&mtcars(), "wt", "mpg").unwrap();
    let stats = &model.model_statistics;

    assert_eq!(stats.n_obs, 32);
    assert_abs_diff_eq!(model.intercept().estimate, 37.285126, epsilon = 1e-5);
    assert_abs_diff_eq!(model.slope().estimate, -5.344472, epsilon = 1e-5);
    assert_abs_diff_eq!(model.intercept().std_error, 1.877627, epsilon = 1e-5);
    assert_abs_diff_eq!(model.slope().std_error, 0.559101, epsilon = 1e-5);
    assert_abs_diff_eq!(model.intercept().t_stat, 19.857575, epsilon = 1e-4);
    assert_abs_diff_eq!(model.slope().t_stat, -9.559044, epsilon = 1e-4);
    assert_relative_eq!(model.slope().p_value, 1.293959e-10, max_relative = 1e-3);
    assert!(model.intercept().p_value < 1e-16);

    assert_abs_diff_eq!(stats.r_squared, 0.752833, epsilon = 1e-6);
    assert_abs_diff_eq!(stats.adj_r_squared, 0.744594, epsilon = 1e-6);
    assert_abs_diff_eq!(stats.residual_std_error, 3.045882, epsilon = 1e-6);
    assert_abs_diff_eq!(stats.f_statistic, 91.375325, epsilon = 1e-4);
    assert_relative_eq!(stats.f_p_value, 1.293959e-10, max_relative = 1e-3);
}

#[test]
fn test_faithful_eruptions_on_waiting() {
    let faithful = BuiltinDataset::Faithful.load().unwrap();
    let model = fit(&faithful, "waiting", "eruptions").unwrap();

    assert_eq!(model.n_obs(), 272);
    assert_abs_diff_eq!(model.intercept().estimate, -1.874016, epsilon = 1e-5);
    assert_abs_diff_eq!(model.slope().estimate, 0.075628, epsilon = 1e-6);
    assert_abs_diff_eq!(model.slope().std_error, 0.002219, epsilon = 1e-6);
    assert_abs_diff_eq!(model.r_squared(), 0.811461, epsilon = 1e-6);
    assert_abs_diff_eq!(model.residual_std_error(), 0.496513, epsilon = 1e-6);
    assert_abs_diff_eq!(
        model.model_statistics.f_statistic,
        1162.0626,
        epsilon = 1e-2
    );
    assert!(model.model_statistics.f_p_value < 1e-16);
}

#[test]
fn test_exact_fit() {
    let model = fit(&exact_line_data(), "x", "y").unwrap();
    let stats = &model.model_statistics;

    assert_abs_diff_eq!(model.intercept().estimate, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(model.slope().estimate, 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(stats.r_squared, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(stats.residual_std_error, 0.0, epsilon = 1e-12);
    assert!(stats.f_statistic.is_infinite());
    assert_eq!(stats.f_p_value, 0.0);

    // Standard errors are floored rather than zero
    assert!(model.slope().std_error > 0.0);
    assert!(model.slope().t_stat.is_finite());
    assert!(model.slope().p_value < 1e-12);
}

#[test]
fn test_constant_response() {
    let df = DataFrameBuilder::new()
        .with_column("x", Series::float(vec![1.0, 2.0, 3.0, 4.0]))
        .unwrap()
        .with_column("y", Series::float(vec![3.0, 3.0, 3.0, 3.0]))
        .unwrap()
        .build()
        .unwrap();

    let model = fit(&df, "x", "y").unwrap();
    let stats = &model.model_statistics;

    assert_abs_diff_eq!(model.slope().estimate, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(model.intercept().estimate, 3.0, epsilon = 1e-12);
    assert_eq!(stats.r_squared, 0.0);
    assert_eq!(stats.f_statistic, 0.0);
    assert_eq!(stats.f_p_value, 1.0);
}

#[test]
fn test_noisy_fit_recovers_line() {
    let model = fit(&noisy_data(), "x", "y").unwrap();

    assert_abs_diff_eq!(model.slope().estimate, 2.0, epsilon = 0.05);
    assert_abs_diff_eq!(model.intercept().estimate, 1.0, epsilon = 0.3);
    assert_abs_diff_eq!(model.residual_std_error(), 0.5, epsilon = 0.1);
    assert!(model.r_squared() > 0.99);
    assert!(model.slope().ci_lower < model.slope().estimate);
    assert!(model.slope().ci_upper > model.slope().estimate);
}

#[test]
fn test_builder_matches_convenience_function() {
    let df = mtcars();
    let model = SimpleLinearRegression::new("wt", "mpg")
        .data(&df)
        .fit()
        .unwrap();
    let direct = fit(&df, "wt", "mpg").unwrap();

    assert_eq!(model.coefficients().unwrap(), direct.coefficients.as_slice());
    assert_eq!(model.result().unwrap().model_statistics, direct.model_statistics);
}

// ==================== Missing Data ====================

#[test]
fn test_incomplete_rows_are_dropped() {
    let df = DataFrameBuilder::new()
        .with_column(
            "x",
            Series::float_opt(&[Some(1.0), None, Some(2.0), Some(3.0), Some(5.0), Some(4.0)]),
        )
        .unwrap()
        .with_column(
            "y",
            Series::float_opt(&[Some(2.0), Some(9.0), Some(4.0), Some(5.0), None, Some(8.0)]),
        )
        .unwrap()
        .build()
        .unwrap();

    let model = fit(&df, "x", "y").unwrap();

    assert_eq!(model.n_obs(), 4);
    assert_eq!(model.n_excluded, 2);
    assert_eq!(model.rows, vec![0, 2, 3, 5]);
    assert_abs_diff_eq!(model.slope().estimate, 1.9, epsilon = 1e-10);
    assert_abs_diff_eq!(model.r_squared(), 0.962667, epsilon = 1e-6);
}

// ==================== Error Handling Tests ====================

#[test]
fn test_insufficient_complete_rows() {
    let df = DataFrameBuilder::new()
        .with_column("x", Series::float_opt(&[Some(1.0), Some(2.0), None, Some(4.0)]))
        .unwrap()
        .with_column("y", Series::float_opt(&[Some(1.0), Some(3.0), Some(2.0), None]))
        .unwrap()
        .build()
        .unwrap();

    let err = fit(&df, "x", "y").unwrap_err();
    assert!(matches!(
        err,
        ModelError::InsufficientData {
            n_complete: 2,
            required: 3
        }
    ));
    assert_eq!(err.kind(), ErrorKind::InsufficientData);
}

#[test]
fn test_constant_predictor_is_singular() {
    let df = DataFrameBuilder::new()
        .with_column("x", Series::float(vec![0.1, 0.1, 0.1]))
        .unwrap()
        .with_column("y", Series::float(vec![1.0, 2.0, 3.0]))
        .unwrap()
        .build()
        .unwrap();

    let err = fit(&df, "x", "y").unwrap_err();
    assert!(matches!(err, ModelError::SingularFit { ref predictor } if predictor == "x"));
    assert_eq!(err.kind(), ErrorKind::SingularFit);
}

#[test]
fn test_large_offset_predictor_is_not_singular() {
    let df = DataFrameBuilder::new()
        .with_column("x", Series::float(vec![1e8, 1e8 + 1.0, 1e8 + 2.0, 1e8 + 3.0]))
        .unwrap()
        .with_column("y", Series::float(vec![2.0, 4.0, 5.0, 8.0]))
        .unwrap()
        .build()
        .unwrap();

    let model = fit(&df, "x", "y").unwrap();
    assert_abs_diff_eq!(model.slope().estimate, 1.9, epsilon = 1e-6);
}

#[test]
fn test_overflowing_sums_are_numerical_errors() {
    let frame = |x: Vec<f64>, y: Vec<f64>| {
        DataFrameBuilder::new()
            .with_column("x", Series::float(x))
            .unwrap()
            .with_column("y", Series::float(y))
            .unwrap()
            .build()
            .unwrap()
    };

    // Huge response: not constant, and no R² = 0 result either
    let df = frame(vec![1.0, 2.0, 3.0], vec![1e200, 2e200, 3.1e200]);
    let err = fit(&df, "x", "y").unwrap_err();
    assert!(
        matches!(err, ModelError::NumericalError { ref operation, .. } if operation == "fit"),
        "{:?}",
        err
    );

    // Huge predictor: not singular
    let df = frame(vec![1e200, 2e200, 3e200], vec![1.0, 2.0, 3.0]);
    let err = fit(&df, "x", "y").unwrap_err();
    assert!(matches!(err, ModelError::NumericalError { .. }), "{:?}", err);
    assert_eq!(err.kind(), ErrorKind::Other);
}

#[test]
fn test_unknown_and_non_numeric_columns() {
    let df = DataFrameBuilder::new()
        .with_column("x", Series::float(vec![1.0, 2.0, 3.0]))
        .unwrap()
        .with_column("g", Series::categorical(&["a", "b", "c"]))
        .unwrap()
        .build()
        .unwrap();

    let missing = fit(&df, "nope", "x").unwrap_err();
    assert!(matches!(
        missing,
        ModelError::Data(DataError::ColumnNotFound(ref name)) if name == "nope"
    ));
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    let categorical = fit(&df, "x", "g").unwrap_err();
    assert!(matches!(
        categorical,
        ModelError::Data(DataError::TypeMismatch { .. })
    ));
    assert_eq!(categorical.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_invalid_confidence_level() {
    for level in [0.0, 1.0, 1.5, f64::NAN] {
        let result = SimpleLinearRegression::new("x", "y")
            .data(&toy_data())
            .confidence_level(level)
            .fit();
        assert!(matches!(result, Err(ModelError::InvalidConfig { .. })));
    }

    let no_data = SimpleLinearRegression::new("x", "y").fit();
    assert!(matches!(no_data, Err(ModelError::NoData)));
}

#[test]
fn test_wider_confidence_level_widens_intervals() {
    let df = toy_data();
    let narrow = fit(&df, "x", "y").unwrap();
    let wide = SimpleLinearRegression::new("x", "y")
        .data(&df)
        .config(RegressionConfig {
            confidence_level: 0.99,
        })
        .fit()
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(wide.confidence_level, 0.99);
    assert!(wide.slope().ci_lower < narrow.slope().ci_lower);
    assert!(wide.slope().ci_upper > narrow.slope().ci_upper);
    assert_eq!(wide.slope().p_value, narrow.slope().p_value);
}

// ==================== Prediction ====================

#[test]
fn test_predict_reproduces_fitted_values() {
    let model = fit(&mtcars(), "wt", "mpg").unwrap();

    for (&x, &fitted) in model.x.iter().zip(model.fitted_values.iter()) {
        assert_abs_diff_eq!(predict(&model, x), fitted, epsilon = 1e-10);
    }

    let many = model.predict_many(&[3.0, 4.0]);
    assert_abs_diff_eq!(many[0], 37.285126 - 3.0 * 5.344472, epsilon = 1e-4);
    assert_abs_diff_eq!(many[1] - many[0], model.slope().estimate, epsilon = 1e-12);
}

#[test]
fn test_predict_outside_observed_range() {
    let model = fit(&toy_data(), "x", "y").unwrap();

    assert_eq!(model.x_range(), (1.0, 4.0));
    assert_abs_diff_eq!(model.predict(10.0), 19.0, epsilon = 1e-9);
    assert_abs_diff_eq!(model.predict(-1.0), -1.9, epsilon = 1e-9);
}

#[test]
fn test_prediction_intervals() {
    let model = fit(&toy_data(), "x", "y").unwrap();

    let conf = model
        .predict_interval(2.5, 0.95, IntervalKind::Confidence)
        .unwrap();
    assert_abs_diff_eq!(conf.fit, 4.75, epsilon = 1e-10);
    assert_abs_diff_eq!(conf.lower, 3.477258, epsilon = 1e-5);
    assert_abs_diff_eq!(conf.upper, 6.022742, epsilon = 1e-5);

    let pred = model
        .predict_interval(5.0, 0.95, IntervalKind::Prediction)
        .unwrap();
    assert_abs_diff_eq!(pred.fit, 9.5, epsilon = 1e-10);
    assert_abs_diff_eq!(pred.lower, 5.475237, epsilon = 1e-5);
    assert_abs_diff_eq!(pred.upper, 13.524763, epsilon = 1e-5);

    let bad = model.predict_interval(2.5, 1.0, IntervalKind::Confidence);
    assert!(matches!(bad, Err(ModelError::InvalidConfig { .. })));
}

// ==================== Diagnostics ====================

#[test]
fn test_leverage_and_cooks_distance() {
    let model = fit(&toy_data(), "x", "y").unwrap();

    let expected_hat = array![0.7, 0.3, 0.3, 0.7];
    assert_abs_diff_eq!(model.hat_diagonal, expected_hat, epsilon = 1e-10);
    assert_abs_diff_eq!(model.hat_diagonal.sum(), 2.0, epsilon = 1e-10);

    let expected_cooks = array![0.111111, 0.034985, 0.428571, 1.777778];
    assert_abs_diff_eq!(model.cooks_distance, expected_cooks, epsilon = 1e-5);

    let influential = model.influential_points();
    assert_eq!(influential.len(), 1);
    assert_eq!(influential[0].row, 3);
    assert_eq!(influential[0].threshold, 1.0);

    assert!(model.high_leverage_points().is_empty());
}

#[test]
fn test_residual_statistics() {
    let model = fit(&toy_data(), "x", "y").unwrap();
    let stats = model.residual_statistics();

    assert_abs_diff_eq!(stats.min, -0.7, epsilon = 1e-10);
    assert_abs_diff_eq!(stats.q1, -0.1, epsilon = 1e-10);
    assert_abs_diff_eq!(stats.median, 0.15, epsilon = 1e-10);
    assert_abs_diff_eq!(stats.q3, 0.25, epsilon = 1e-10);
    assert_abs_diff_eq!(stats.max, 0.4, epsilon = 1e-10);
    assert_abs_diff_eq!(stats.mean, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(stats.std_dev, 0.483046, epsilon = 1e-6);

    let mtcars_model = fit(&mtcars(), "wt", "mpg").unwrap();
    assert_abs_diff_eq!(
        mtcars_model.residual_statistics().std_dev,
        2.996352,
        epsilon = 1e-6
    );
}

#[test]
fn test_qq_points() {
    let model = fit(&toy_data(), "x", "y").unwrap();
    let qq = model.qq_points().unwrap();

    assert_eq!(qq.len(), 4);
    let theoretical: Vec<f64> = qq.iter().map(|p| p.theoretical).collect();
    let expected = [-1.049131, -0.299307, 0.299307, 1.049131];
    for (t, e) in theoretical.iter().zip(expected) {
        assert_abs_diff_eq!(*t, e, epsilon = 1e-5);
    }
    let samples: Vec<f64> = qq.iter().map(|p| p.sample).collect();
    assert_abs_diff_eq!(samples[0], -0.7, epsilon = 1e-10);
    assert_abs_diff_eq!(samples[3], 0.4, epsilon = 1e-10);
}

#[test]
fn test_ppoints_switches_offset_above_ten() {
    use crate::lm::Diagnostics;

    let small = Diagnostics::ppoints(10);
    assert_abs_diff_eq!(small[0], 0.625 / 10.25, epsilon = 1e-12);

    let large = Diagnostics::ppoints(11);
    assert_abs_diff_eq!(large[0], 0.5 / 11.0, epsilon = 1e-12);
    assert_abs_diff_eq!(large[10], 10.5 / 11.0, epsilon = 1e-12);
}

#[test]
fn test_plot_series_and_standardized_residuals() {
    let model = fit(&toy_data(), "x", "y").unwrap();
    let series = model.plot_series();

    assert_eq!(series.x_label, "x");
    assert_eq!(series.y_label, "y");
    assert_eq!(series.x, vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(series.y, vec![2.0, 4.0, 5.0, 8.0]);
    assert_eq!(series.fitted.len(), 4);
    for ((y, f), r) in series.y.iter().zip(&series.fitted).zip(&series.residuals) {
        assert_abs_diff_eq!(y - f, *r, epsilon = 1e-12);
    }

    let standardized = model.standardized_residuals();
    // r / (s·sqrt(1 - h)) for the last row: 0.4 / (0.591608 · sqrt(0.3))
    assert_abs_diff_eq!(standardized[3], 1.234427, epsilon = 1e-5);
}

#[test]
fn test_display_lists_coefficients_and_fit() {
    let model = fit(&toy_data(), "x", "y").unwrap();
    let text = model.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "y ~ x");
    assert!(lines[1].trim_start().starts_with("(Intercept)"));
    assert!(lines[2].trim_start().starts_with("x "));
    assert!(lines[2].contains("1.9000"));
    assert_eq!(lines[3], "  R² = 0.9627, adj. R² = 0.9440, σ̂ = 0.5916 on 2 df");
}

// ==================== Property Tests ====================

mod proptest_tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn frame(points: &[(f64, f64)]) -> DataFrame {
        DataFrameBuilder::new()
            .with_column("x", Series::float(points.iter().map(|p| p.0).collect::<Vec<_>>()))
            .unwrap()
            .with_column("y", Series::float(points.iter().map(|p| p.1).collect::<Vec<_>>()))
            .unwrap()
            .build()
            .unwrap()
    }

    proptest! {
        #[test]
        fn test_fit_invariants(
            points in vec((-100.0f64..100.0, -100.0f64..100.0), 3..40)
        ) {
            let df = frame(&points);
            let result = fit(&df, "x", "y");
            prop_assume!(result.is_ok());
            let model = result.unwrap();
            let stats = &model.model_statistics;

            prop_assert!((0.0..=1.0).contains(&stats.r_squared));
            prop_assert!(stats.adj_r_squared <= stats.r_squared + 1e-12);
            prop_assert_eq!(stats.df_residual, points.len() - 2);

            // Normal equations: residuals sum to zero and are orthogonal to x
            let scale = 1e-8 * points.len() as f64 * 100.0;
            prop_assert!(model.residuals.sum().abs() < scale);
            prop_assert!(model.x.dot(&model.residuals).abs() < scale * 100.0);

            for c in &model.coefficients {
                prop_assert!(c.std_error >= 1e-10);
                prop_assert!((0.0..=1.0).contains(&c.p_value));
                prop_assert!(c.ci_lower <= c.estimate && c.estimate <= c.ci_upper);
            }
        }

        #[test]
        fn test_fitted_plus_residual_is_response(
            points in vec((-50.0f64..50.0, -50.0f64..50.0), 3..30)
        ) {
            let df = frame(&points);
            if let Ok(model) = fit(&df, "x", "y") {
                for i in 0..model.n_obs() {
                    let rebuilt = model.fitted_values[i] + model.residuals[i];
                    prop_assert!((rebuilt - model.y[i]).abs() < 1e-9);
                    prop_assert!((predict(&model, model.x[i]) - model.fitted_values[i]).abs() < 1e-9);
                }
            }
        }
    }
}
