use super::*;

#[test]
fn test_k_fold_consecutive_blocks() {
    let y = Array1::<f64>::zeros(10);
    let splits = CVStrategy::KFold { n_splits: 3 }.split(y.view()).unwrap();

    assert_eq!(splits.len(), 3);
    // the first 10 % 3 folds hold one extra row
    assert_eq!(splits[0].test_indices, vec![0, 1, 2, 3]);
    assert_eq!(splits[1].test_indices, vec![4, 5, 6]);
    assert_eq!(splits[2].test_indices, vec![7, 8, 9]);
    assert_eq!(splits[1].train_indices, vec![0, 1, 2, 3, 7, 8, 9]);
    for (i, split) in splits.iter().enumerate() {
        assert_eq!(split.fold_idx, i);
        assert_eq!(split.train_indices.len() + split.test_indices.len(), 10);
    }
}

#[test]
fn test_stratified_k_fold_keeps_class_proportions() {
    let y = array![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
    let splits = CVStrategy::StratifiedKFold { n_splits: 2 }
        .split(y.view())
        .unwrap();

    assert_eq!(splits[0].test_indices, vec![0, 1, 2, 6, 7]);
    assert_eq!(splits[1].test_indices, vec![3, 4, 5, 8, 9]);
    for split in &splits {
        let positives = split.test_indices.iter().filter(|&&i| y[i] == 1.0).count();
        assert_eq!(positives, 2);
    }
}

#[test]
fn test_stratified_k_fold_interleaved_labels() {
    let y = array![1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0];
    let splits = CVStrategy::StratifiedKFold { n_splits: 3 }
        .split(y.view())
        .unwrap();

    let mut covered: Vec<usize> = splits
        .iter()
        .flat_map(|s| s.test_indices.iter().copied())
        .collect();
    covered.sort_unstable();
    assert_eq!(covered, (0..9).collect::<Vec<_>>());
    for split in &splits {
        let positives = split.test_indices.iter().filter(|&&i| y[i] == 1.0).count();
        assert_eq!(positives, 1);
        assert_eq!(split.test_indices.len(), 3);
    }
}

#[test]
fn test_cv_strategy_errors() {
    let y = array![0.0, 1.0, 0.0];
    assert_eq!(CVStrategy::KFold { n_splits: 1 }.n_splits(), 1);
    assert!(matches!(
        CVStrategy::KFold { n_splits: 1 }.split(y.view()),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        CVStrategy::KFold { n_splits: 5 }.split(y.view()),
        Err(ModelError::InputValidationError(_))
    ));

    // six rows but no class with three members
    let y = array![0.0, 1.0, 0.0, 1.0, 2.0, 2.0];
    assert!(matches!(
        CVStrategy::StratifiedKFold { n_splits: 3 }.split(y.view()),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn test_cross_val_score_regression() {
    let x = Array2::from_shape_fn((12, 2), |(i, j)| (i * (j + 1)) as f64 + (i % 3) as f64);
    let y = x.map_axis(Axis(1), |row| 0.5 + 2.0 * row[0] - row[1]);

    let scores = cross_val_score(
        &LinearRegression::default(),
        x.view(),
        y.view(),
        CVStrategy::KFold { n_splits: 4 },
        Scoring::D2AbsoluteError,
    )
    .unwrap();

    assert_eq!(scores.len(), 4);
    for score in scores {
        assert_abs_diff_eq!(score, 1.0, epsilon = 1e-6);
    }
}

#[test]
fn test_cross_val_score_classification() {
    let x = array![
        [0.0],
        [10.0],
        [1.0],
        [11.0],
        [2.0],
        [12.0],
        [3.0],
        [13.0],
        [4.0],
        [14.0]
    ];
    let y = array![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
    let template = LogisticRegression::default();

    let scores = cross_val_score(
        &template,
        x.view(),
        y.view(),
        CVStrategy::StratifiedKFold { n_splits: 5 },
        Scoring::Accuracy,
    )
    .unwrap();

    assert_eq!(scores.len(), 5);
    assert!(scores.iter().all(|&s| (0.0..=1.0).contains(&s)));
    // the template itself is never fitted
    assert_eq!(template.get_actual_iterations(), None);
}

#[test]
fn test_cross_val_score_length_mismatch() {
    let x = Array2::<f64>::zeros((4, 1));
    let y = Array1::<f64>::zeros(3);
    assert!(matches!(
        cross_val_score(
            &LinearRegression::default(),
            x.view(),
            y.view(),
            CVStrategy::KFold { n_splits: 2 },
            Scoring::D2AbsoluteError,
        ),
        Err(ModelError::InputValidationError(_))
    ));
}
