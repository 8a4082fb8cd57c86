//! Property tests for the calibrator.

use proptest::prelude::*;

use herbicalib::domain::services::{calibrate, CalibrationInput, FillState};
use herbicalib::domain::value_objects::CalibrationMode;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * 1f64.max(a.abs()).max(b.abs())
}

fn mode() -> impl Strategy<Value = CalibrationMode> {
    prop_oneof![
        Just(CalibrationMode::FillToCapacity),
        Just(CalibrationMode::RefillRemaining),
        Just(CalibrationMode::PrepareFullBatch),
        Just(CalibrationMode::TargetTotalMix),
    ]
}

/// (capacity, dose, known) with `0 <= known <= capacity`
fn valid_volumes() -> impl Strategy<Value = (f64, f64, f64)> {
    (0.1f64..1000.0, 0.0f64..=1.0, 0.0f64..=1.0)
        .prop_map(|(capacity, dose, fraction)| (capacity, dose, capacity * fraction))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: concentrate + diluent == total mix, all non-negative
    #[test]
    fn property_volumes_sum_to_total_mix(
        (capacity, dose, known) in valid_volumes(),
        mode in mode(),
    ) {
        let input = CalibrationInput::new(capacity, dose, known, mode);
        let result = calibrate(&input).unwrap();

        prop_assert!(result.concentrate_volume >= 0.0);
        prop_assert!(result.diluent_volume >= -1e-9);
        prop_assert!(approx_eq(
            result.concentrate_volume + result.diluent_volume,
            result.total_mix
        ));
        prop_assert!(result.total_mix <= capacity);
    }

    /// PROPERTY: fill-to-capacity with `known` equals refill-remaining of `capacity - known`
    #[test]
    fn property_fill_and_refill_are_complements((capacity, dose, known) in valid_volumes()) {
        let fill = calibrate(&CalibrationInput::new(
            capacity, dose, known, CalibrationMode::FillToCapacity,
        )).unwrap();
        let refill = calibrate(&CalibrationInput::new(
            capacity, dose, capacity - known, CalibrationMode::RefillRemaining,
        )).unwrap();

        prop_assert!(approx_eq(fill.total_mix, refill.total_mix));
        prop_assert!(approx_eq(fill.concentrate_volume, refill.concentrate_volume));
    }

    /// PROPERTY: prepare-full-batch ignores the known volume
    #[test]
    fn property_full_batch_ignores_known((capacity, dose, known) in valid_volumes()) {
        let with_known = calibrate(&CalibrationInput::new(
            capacity, dose, known, CalibrationMode::PrepareFullBatch,
        )).unwrap();
        let without = calibrate(&CalibrationInput::new(
            capacity, dose, 0.0, CalibrationMode::PrepareFullBatch,
        )).unwrap();

        prop_assert_eq!(with_known, without);
        prop_assert_eq!(with_known.total_mix, capacity);
    }

    /// PROPERTY: the fill chart never reports more than the capacity
    #[test]
    fn property_fill_state_partitions_capacity(
        (capacity, dose, known) in valid_volumes(),
        mode in mode(),
    ) {
        let state = FillState::before(&CalibrationInput::new(capacity, dose, known, mode));
        prop_assert!(approx_eq(state.filled + state.empty, capacity));
        prop_assert!((0.0..=1.0).contains(&state.fraction_filled()));
    }

    /// PROPERTY: a known volume above capacity is always rejected
    #[test]
    fn property_overfull_known_is_rejected(
        capacity in 0.1f64..1000.0,
        excess in 0.001f64..100.0,
        mode in mode(),
    ) {
        let input = CalibrationInput::new(capacity, 0.1, capacity + excess, mode);
        prop_assert!(calibrate(&input).is_err());
    }
}
