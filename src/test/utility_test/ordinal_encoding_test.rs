use super::*;
use crate::dataset::DiabetesRecord;

fn training_rows() -> Vec<DiabetesRecord> {
    let raw = small_dataset();
    normalize_dataset(&raw, "Other").unwrap().into_records()
}

#[test]
fn test_encoder_default() {
    let encoder = OrdinalEncoder::default();
    assert!(!encoder.is_fitted());
    assert_eq!(
        encoder.get_policy(),
        UnknownCategoryPolicy::Value(UNKNOWN_CATEGORY_CODE)
    );
    assert!(encoder.mapping(Column::Gender).is_none());
}

#[test]
fn test_fit_assigns_codes_by_first_appearance() {
    let rows = training_rows();
    let mut encoder = OrdinalEncoder::default();
    encoder.fit(&rows).unwrap();

    let gender = encoder.mapping(Column::Gender).unwrap();
    assert_eq!(gender.categories(), &["Female", "Male"]);
    assert_eq!(gender.code("Female"), Some(1.0));
    assert_eq!(gender.code("Male"), Some(2.0));
    assert_eq!(gender.code("Other"), None);

    let smoking = encoder.mapping(Column::SmokingHistory).unwrap();
    assert_eq!(smoking.categories(), &["never", "current", "former"]);
    assert_eq!(smoking.category(3.0), Some("former"));
    assert_eq!(smoking.category(0.0), None);
    assert_eq!(smoking.category(1.5), None);
    assert_eq!(smoking.category(4.0), None);
}

#[test]
fn test_transform_layout() {
    let rows = training_rows();
    let mut encoder = OrdinalEncoder::default();
    let x = encoder.fit_transform(&rows).unwrap();

    assert_eq!(x.dim(), (4, 8));
    // gender, age, hypertension, heart_disease, smoking, bmi, HbA1c, glucose
    assert_eq!(
        x.row(2).to_vec(),
        vec![1.0, 76.0, 1.0, 1.0, 2.0, 20.14, 4.8, 155.0]
    );
    assert_eq!(labels(&rows).to_vec(), vec![0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn test_round_trip_recovers_training_categories() {
    let rows = training_rows();
    let mut encoder = OrdinalEncoder::default();
    let x = encoder.fit_transform(&rows).unwrap();

    let decoded = encoder.inverse_transform(&x).unwrap();
    for (record, categories) in rows.iter().zip(decoded.iter()) {
        assert_eq!(categories[0], record.gender);
        assert_eq!(categories[1], record.smoking_history);
    }
}

#[test]
fn test_unknown_category_policies() {
    let rows = training_rows();
    let other = dataset_from_rows(&["Other,36.0,0,0,never,23.45,5.0,155,0"]).into_records();

    let mut encoder = OrdinalEncoder::default();
    encoder.fit(&rows).unwrap();
    let x = encoder.transform(&other).unwrap();
    assert_eq!(x[[0, 0]], UNKNOWN_CATEGORY_CODE);
    assert_eq!(x[[0, 4]], 1.0);

    // the unknown code has no category behind it
    assert!(matches!(
        encoder.inverse_transform(&x),
        Err(TransformError::UnknownCode { column: "gender", row: 1, .. })
    ));

    let mut strict = OrdinalEncoder::new(UnknownCategoryPolicy::Error);
    strict.fit(&rows).unwrap();
    assert_eq!(
        strict.transform(&other),
        Err(TransformError::UnknownCategory {
            column: "gender",
            value: "Other".to_string(),
            row: 1,
        })
    );

    let mut custom = OrdinalEncoder::new(UnknownCategoryPolicy::Value(0.0));
    custom.fit(&rows).unwrap();
    assert_eq!(custom.transform(&other).unwrap()[[0, 0]], 0.0);
}

#[test]
fn test_encoder_not_fitted() {
    let rows = training_rows();
    let encoder = OrdinalEncoder::default();
    assert_eq!(
        encoder.transform(&rows),
        Err(TransformError::Model(ModelError::NotFitted))
    );
    assert_eq!(
        encoder.inverse_transform(&ndarray::Array2::zeros((1, 8))),
        Err(TransformError::Model(ModelError::NotFitted))
    );
}

#[test]
fn test_encoder_rejects_bad_input() {
    let mut encoder = OrdinalEncoder::default();
    assert!(matches!(
        encoder.fit(&[]),
        Err(ModelError::InputValidationError(_))
    ));

    encoder.fit(&training_rows()).unwrap();
    assert!(matches!(
        encoder.inverse_transform(&ndarray::Array2::zeros((2, 3))),
        Err(TransformError::Model(ModelError::InputValidationError(_)))
    ));
}
