use super::*;

#[test]
fn test_bucket_tables() {
    for raw in ["never", "No Info"] {
        assert_eq!(bucket_smoking_history(raw, 1).unwrap(), SmokingBucket::Never);
    }
    for raw in ["ever", "former", "not current"] {
        assert_eq!(bucket_smoking_history(raw, 1).unwrap(), SmokingBucket::Former);
    }
    assert_eq!(
        bucket_smoking_history("current", 1).unwrap(),
        SmokingBucket::Current
    );
}

#[test]
fn test_unmapped_smoking_value_is_an_error() {
    // matching is exact, so case variants are not bucketed
    for raw in ["Never", "", "sometimes"] {
        assert_eq!(
            bucket_smoking_history(raw, 7),
            Err(TransformError::UnmappedCategory {
                column: "smoking_history",
                value: raw.to_string(),
                row: 7,
            })
        );
    }
}

#[test]
fn test_normalize_dataset_buckets_and_filters() {
    let raw = small_dataset();
    let cleaned = normalize_dataset(&raw, "Other").unwrap();

    assert_eq!(cleaned.len(), 4);
    assert!(cleaned.records().iter().all(|r| r.gender != "Other"));
    assert_eq!(
        cleaned.text_column(Column::SmokingHistory),
        vec!["never", "never", "current", "former"]
    );
    // numeric values are carried over untouched
    assert_eq!(cleaned.records()[3].bmi, 19.31);

    // the input table is not modified
    assert_eq!(raw.len(), 5);
    assert_eq!(raw.records()[1].smoking_history, "No Info");
}

#[test]
fn test_normalize_dataset_reports_row_of_unmapped_value() {
    let raw = dataset_from_rows(&[
        "Female,80.0,0,1,never,25.19,6.6,140,0",
        "Male,28.0,0,0,occasionally,27.32,5.7,158,0",
    ]);
    let err = normalize_dataset(&raw, "Other").unwrap_err();
    assert_eq!(
        err,
        TransformError::UnmappedCategory {
            column: "smoking_history",
            value: "occasionally".to_string(),
            row: 2,
        }
    );
}

#[test]
fn test_normalize_dataset_buckets_before_filtering() {
    // an excluded row with an unmapped value still fails the run
    let raw = dataset_from_rows(&[
        "Female,80.0,0,1,never,25.19,6.6,140,0",
        "Other,28.0,0,0,occasionally,27.32,5.7,158,0",
    ]);
    assert!(normalize_dataset(&raw, "Other").is_err());
}
