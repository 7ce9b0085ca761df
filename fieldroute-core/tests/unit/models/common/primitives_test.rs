use super::*;

#[test]
fn can_add_distances_in_any_order() {
    let a = Distance::new(1212, 12);
    let b = Distance::new(2323, 23);

    assert_eq!(a + b, b + a);
    assert_eq!(a + b, Distance::new(3535, 35));
}

#[test]
fn can_sum_distances() {
    let total: Distance = vec![Distance::new(1, 2), Distance::new(3, 4), Distance::ZERO].into_iter().sum();

    assert_eq!(total, Distance::new(4, 6));
}

#[test]
fn can_add_assign_distance() {
    let mut total = Distance::ZERO;
    total += Distance::new(10, 100);
    total += Distance::new(5, 50);

    assert_eq!(total, Distance::new(15, 150));
}
