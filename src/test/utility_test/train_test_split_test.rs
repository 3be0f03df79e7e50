use super::*;

#[test]
fn test_split_covers_every_row_once() {
    let rows: Vec<usize> = (0..103).collect();
    let split = train_test_split(&rows, 0.2, 0).unwrap();

    // ceil(103 * 0.2) = 21
    assert_eq!(split.test.len(), 21);
    assert_eq!(split.train.len(), 82);
    assert_eq!(split.train.len() + split.test.len(), rows.len());

    let mut seen: Vec<usize> = split
        .train_indices
        .iter()
        .chain(split.test_indices.iter())
        .copied()
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, rows);

    // items follow their indices
    for (item, &index) in split.test.iter().zip(split.test_indices.iter()) {
        assert_eq!(*item, rows[index]);
    }
}

#[test]
fn test_split_is_deterministic_for_a_seed() {
    let rows: Vec<usize> = (0..50).collect();
    let first = train_test_split(&rows, 0.3, 42).unwrap();
    let second = train_test_split(&rows, 0.3, 42).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_split_sizes_are_clamped() {
    // ceil(5 * 0.2) = 1
    let (train, test) = split_indices(5, 0.2, 0).unwrap();
    assert_eq!((train.len(), test.len()), (4, 1));

    // ceil(10 * 0.25) = 3
    let (train, test) = split_indices(10, 0.25, 0).unwrap();
    assert_eq!((train.len(), test.len()), (7, 3));

    // both sides keep a row
    let (train, test) = split_indices(2, 0.9, 0).unwrap();
    assert_eq!((train.len(), test.len()), (1, 1));
    let (train, test) = split_indices(3, 0.01, 0).unwrap();
    assert_eq!((train.len(), test.len()), (2, 1));
}

#[test]
fn test_split_rejects_invalid_input() {
    let rows = [1, 2, 3];
    for test_size in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
        assert!(matches!(
            train_test_split(&rows, test_size, 0),
            Err(ModelError::InputValidationError(_))
        ));
    }
    assert!(matches!(
        split_indices(0, 0.2, 0),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        split_indices(1, 0.2, 0),
        Err(ModelError::InputValidationError(_))
    ));
}
