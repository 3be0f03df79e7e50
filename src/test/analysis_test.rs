use super::{dataset_from_rows, small_dataset};
use crate::analysis::*;
use crate::config::OutlierBounds;
use crate::dataset::Column;
use crate::error::{ModelError, PlotError};
use approx::assert_abs_diff_eq;

#[test]
fn test_value_counts_orders_by_frequency_then_first_appearance() {
    let counts = value_counts(["x", "y", "z", "y", "z", "w"]);
    assert_eq!(
        counts,
        vec![
            ("y".to_string(), 2),
            ("z".to_string(), 2),
            ("x".to_string(), 1),
            ("w".to_string(), 1),
        ]
    );
    assert!(value_counts(Vec::<String>::new()).is_empty());
}

#[test]
fn test_numerical_summary_from_values() {
    let summary = NumericalSummary::from_values(Column::Age, &[4.0, 1.0, 3.0, 2.0]).unwrap();

    assert_eq!(summary.count, 4);
    assert_abs_diff_eq!(summary.mean, 2.5);
    // sample variance: 5 / 3
    assert_abs_diff_eq!(summary.variance, 5.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.std, (5.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    assert_abs_diff_eq!(summary.min, 1.0);
    assert_abs_diff_eq!(summary.q1, 1.75);
    assert_abs_diff_eq!(summary.median, 2.5);
    assert_abs_diff_eq!(summary.q3, 3.25);
    assert_abs_diff_eq!(summary.max, 4.0);
    assert_abs_diff_eq!(summary.range, 3.0);
    assert_abs_diff_eq!(summary.iqr, 1.5);
    // every value occurs once, so every value is a mode
    assert_eq!(summary.mode, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_numerical_summary_single_value() {
    let summary = NumericalSummary::from_values(Column::Bmi, &[27.32]).unwrap();
    assert_eq!(summary.count, 1);
    assert_abs_diff_eq!(summary.mean, 27.32);
    assert_abs_diff_eq!(summary.range, 0.0);
    assert!(summary.variance.is_nan());
}

#[test]
fn test_numerical_summary_without_finite_values() {
    let result = NumericalSummary::from_values(Column::Bmi, &[f64::NAN]);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}

#[test]
fn test_numerical_summary_rejects_text_column() {
    let dataset = small_dataset();
    let result = NumericalSummary::from_dataset(&dataset, Column::Gender);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}

#[test]
fn test_descriptive_report() {
    let dataset = small_dataset();
    let report = DescriptiveReport::from_dataset(&dataset).unwrap();

    assert_eq!(report.categorical.len(), 5);
    assert_eq!(report.numerical.len(), 4);

    let gender = &report.categorical[0];
    assert_eq!(gender.column, Column::Gender);
    assert_eq!(gender.n_unique(), 3);
    assert_eq!(
        gender.counts,
        vec![
            ("Female".to_string(), 2),
            ("Male".to_string(), 2),
            ("Other".to_string(), 1),
        ]
    );

    let glucose = report.numerical(Column::BloodGlucoseLevel).unwrap();
    assert_abs_diff_eq!(glucose.mean, 161.6, epsilon = 1e-9);
    assert_eq!(glucose.mode, vec![155.0]);
    assert!(report.numerical(Column::Gender).is_none());

    let text = report.to_string();
    assert!(text.contains("gender  contains  3  labels"));
    assert!(text.contains("Name: bmi"));
}

#[test]
fn test_count_outliers_reports_distinct_values_and_rows() {
    let bounds = OutlierBounds::new(10.0, 20.0);
    let values = [5.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 30.0, 30.0];
    let count = count_outliers(Column::Bmi, &values, bounds);

    // bounds themselves are not outliers
    assert_eq!(count.distinct_values, 3);
    assert_eq!(count.rows, 6);
    assert_eq!(count.to_string(), "Total outliers for BMI  3\n");
}

#[test]
fn test_count_bmi_outliers_uses_literal_thresholds() {
    let dataset = dataset_from_rows(&[
        "Female,50.0,0,0,never,14.71,5.0,100,0",
        "Female,50.0,0,0,never,14.70,5.0,100,0",
        "Male,50.0,0,0,never,38.5,5.0,100,0",
        "Male,50.0,0,0,never,38.51,5.0,100,0",
        "Male,50.0,0,0,never,38.51,5.0,100,0",
    ]);
    let count = count_bmi_outliers(&dataset, OutlierBounds::default());
    assert_eq!(count.distinct_values, 2);
    assert_eq!(count.rows, 3);
}

#[test]
fn test_histogram_bins() {
    let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    let bins = histogram_bins("age", &values, 5).unwrap();

    assert_eq!(bins.len(), 5);
    assert_abs_diff_eq!(bins[0].start, 0.0);
    assert_abs_diff_eq!(bins[4].end, 10.0);
    // the last bin is closed on the right
    assert_eq!(
        bins.iter().map(|b| b.count).collect::<Vec<_>>(),
        vec![2, 2, 2, 2, 3]
    );
    for pair in bins.windows(2) {
        assert_abs_diff_eq!(pair[0].end, pair[1].start, epsilon = 1e-12);
    }
}

#[test]
fn test_histogram_bins_constant_and_invalid_input() {
    let bins = histogram_bins("bmi", &[3.0, 3.0, f64::NAN], 4).unwrap();
    assert_abs_diff_eq!(bins[0].start, 2.5);
    assert_abs_diff_eq!(bins[3].end, 3.5);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);

    assert!(matches!(
        histogram_bins("bmi", &[1.0], 0),
        Err(PlotError::InvalidData { .. })
    ));
    assert!(matches!(
        histogram_bins("bmi", &[f64::NAN], 3),
        Err(PlotError::InvalidData { .. })
    ));
}

#[test]
fn test_box_plot_stats() {
    let values = [1.0, 2.0, 3.0, 4.0, 100.0, 100.0];
    let summary = NumericalSummary::from_values(Column::Bmi, &values).unwrap();
    let stats = BoxPlotStats::new(&summary, &values);

    // q1 = 2.25, q3 = 76, so the upper fence is far above 100
    assert_abs_diff_eq!(stats.q1, 2.25);
    assert_abs_diff_eq!(stats.q3, 76.0);
    assert_abs_diff_eq!(stats.upper_whisker, 100.0);
    assert!(stats.fliers.is_empty());

    // q1 = 3, q3 = 7, upper fence 13
    let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 50.0, 50.0];
    let summary = NumericalSummary::from_values(Column::Bmi, &values).unwrap();
    let stats = BoxPlotStats::new(&summary, &values);

    assert_abs_diff_eq!(stats.median, 5.0);
    assert_abs_diff_eq!(stats.lower_whisker, 1.0);
    assert_abs_diff_eq!(stats.upper_whisker, 7.0);
    assert_eq!(stats.fliers, vec![50.0]);
    assert_eq!(stats.extent(), (1.0, 50.0));
}

#[test]
fn test_ylgnbu_endpoints() {
    assert_eq!(ylgnbu(0.0), (255, 255, 217));
    assert_eq!(ylgnbu(0.5), (65, 182, 196));
    assert_eq!(ylgnbu(1.0), (8, 29, 88));
    assert_eq!(ylgnbu(2.0), ylgnbu(1.0));
    assert_eq!(ylgnbu(f64::NAN), ylgnbu(0.0));
}

#[test]
fn test_confusion_heatmap_cells_tile_two_by_two_grid() {
    // [[tn, fp], [fn, tp]]
    let cells = confusion_heatmap_cells([[3, 3], [1, 5]]);

    let mut corners: Vec<(f64, f64)> = cells.iter().map(|c| (c.x, c.y)).collect();
    corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(corners, vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]);
    for cell in &cells {
        assert!(cell.x + 1.0 <= 2.0 && cell.y + 1.0 <= 2.0);
    }

    let find = |actual: usize, predicted: usize| {
        cells
            .iter()
            .find(|c| c.actual == actual && c.predicted == predicted)
            .copied()
            .unwrap()
    };
    // actual negative on the upper row, predicted negative on the left column
    assert_eq!(find(0, 0).count, 3);
    assert_eq!(find(0, 0).center(), (0.5, 1.5));
    assert_eq!(find(0, 1).count, 3);
    assert_eq!(find(0, 1).center(), (1.5, 1.5));
    assert_eq!(find(1, 0).count, 1);
    assert_eq!(find(1, 0).center(), (0.5, 0.5));
    assert_eq!(find(1, 1).count, 5);
    assert_eq!(find(1, 1).center(), (1.5, 0.5));
}
