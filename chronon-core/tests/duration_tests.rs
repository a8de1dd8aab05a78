// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chronon_core::Duration;

#[test]
fn test_addition_then_subtraction_is_exact() {
    // Arrange
    let base = Duration::nanoseconds(1) + Duration::attoseconds(7);
    let offset = Duration::microseconds(250);

    // Act & Assert: no drift, however often the pair is applied
    let mut value = base;
    for _ in 0..10_000 {
        value = (value + offset) - offset;
    }
    assert_eq!(value, base);
}

#[test]
fn test_negation_is_antisymmetric() {
    let value = Duration::milliseconds(1500);
    assert_eq!(-(-value), value);
    assert_eq!(value + -value, Duration::ZERO);
}

#[test]
fn test_unit_constructors_agree() {
    assert_eq!(Duration::seconds(1), Duration::milliseconds(1000));
    assert_eq!(Duration::milliseconds(1), Duration::microseconds(1000));
    assert_eq!(Duration::microseconds(1), Duration::nanoseconds(1000));
    assert_eq!(
        Duration::nanoseconds(1),
        Duration::attoseconds(1_000_000_000)
    );
}

#[test]
fn test_ordering_is_total_across_signs() {
    let negative = Duration::milliseconds(-1);
    let zero = Duration::ZERO;
    let positive = Duration::nanoseconds(1);

    assert!(negative < zero);
    assert!(zero < positive);
    assert!(negative < positive);
    assert!(negative.is_negative() && !negative.is_positive());
    assert!(zero.is_zero());
    assert!(positive.is_positive());
}

#[test]
fn test_operator_arithmetic_saturates_at_the_limits() {
    assert_eq!(Duration::MAX + Duration::seconds(1), Duration::MAX);
    assert_eq!(Duration::MIN - Duration::seconds(1), Duration::MIN);
    assert_eq!(-Duration::MIN, Duration::MAX);
    assert_eq!(Duration::MAX * 2, Duration::MAX);
}

#[test]
fn test_checked_arithmetic_reports_the_limits() {
    assert_eq!(Duration::MAX.checked_add(Duration::attoseconds(1)), None);
    assert_eq!(Duration::MIN.checked_sub(Duration::attoseconds(1)), None);
    assert_eq!(Duration::MIN.checked_neg(), None);
    assert_eq!(Duration::MAX.checked_mul(2), None);

    assert_eq!(
        Duration::seconds(2).checked_add(Duration::seconds(3)),
        Some(Duration::seconds(5))
    );
}

#[test]
fn test_scalar_multiplication_and_division() {
    let base = Duration::milliseconds(30);
    assert_eq!(base * 3, Duration::milliseconds(90));
    assert_eq!(base / 2, Duration::milliseconds(15));
    assert_eq!(base * -1, Duration::milliseconds(-30));

    // Division truncates toward zero at the fixed-point resolution.
    assert_eq!(Duration::attoseconds(3) / 2, Duration::attoseconds(1));
    assert_eq!(Duration::attoseconds(-3) / 2, Duration::attoseconds(-1));
}

#[test]
fn test_component_accessors_reconstruct_the_value() {
    let value = Duration::milliseconds(2750);
    assert_eq!(value.whole_seconds(), 2);
    assert_eq!(value.subsec_attoseconds(), 750_000_000_000_000_000);
    assert_eq!(
        Duration::seconds(value.whole_seconds())
            + Duration::attoseconds(value.subsec_attoseconds() as i128),
        value
    );

    assert_eq!(value.whole_milliseconds(), 2750);
    assert_eq!(value.whole_microseconds(), 2_750_000);
    assert_eq!(value.whole_nanoseconds(), 2_750_000_000);
}

#[test]
fn test_clamp_bounds_a_value() {
    let floor = Duration::milliseconds(10);
    let ceiling = Duration::seconds(1);

    assert_eq!(Duration::milliseconds(1).clamp(floor, ceiling), floor);
    assert_eq!(Duration::seconds(5).clamp(floor, ceiling), ceiling);
    assert_eq!(
        Duration::milliseconds(500).clamp(floor, ceiling),
        Duration::milliseconds(500)
    );
}
