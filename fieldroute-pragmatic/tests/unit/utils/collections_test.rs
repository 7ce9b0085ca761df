use super::*;
use proptest::prelude::*;

#[test]
fn can_combine_error_results() {
    let results: Vec<Result<(), i32>> = vec![Ok(()), Err(1), Ok(()), Err(2)];

    assert_eq!(combine_error_results(results.as_slice()), Err(vec![1, 2]));
    assert_eq!(combine_error_results::<i32>(&[Ok(()), Ok(())]), Ok(()));
}

parameterized_test! {can_get_duplicates, (ids, expected), {
    can_get_duplicates_impl(ids, expected);
}}

can_get_duplicates! {
    case01_unique: (vec![1, 2, 3], None),
    case02_single: (vec![1, 2, 1], Some(vec![1])),
    case03_sorted: (vec![5, 3, 5, 3, 3, 1], Some(vec![3, 5])),
    case04_empty: (vec![], None),
}

fn can_get_duplicates_impl(ids: Vec<i64>, expected: Option<Vec<i64>>) {
    assert_eq!(get_duplicates(ids.iter()), expected);
}

#[test]
fn can_join_ids() {
    assert_eq!(join_ids(&[3, 1]), "3, 1");
    assert_eq!(join_ids::<i64>(&[]), "");
}

proptest! {
    #[test]
    fn can_report_each_repeated_id_once(ids in prop::collection::vec(0_i64..20, 0..50)) {
        let duplicates = get_duplicates(ids.iter()).unwrap_or_default();

        prop_assert!(duplicates.windows(2).all(|pair| pair[0] < pair[1]));
        for id in 0..20 {
            let count = ids.iter().filter(|&&other| other == id).count();
            prop_assert_eq!(duplicates.contains(&id), count > 1);
        }
    }
}
