//! Property-based tests for the row packer's invariants.

use dealflow_layout::{move_field, pack, FieldWidth, LayoutField};
use proptest::prelude::*;

const EPSILON: f64 = 1e-6;

/// Strategy for a single field width
fn width_strategy() -> impl Strategy<Value = FieldWidth> {
    prop::sample::select(vec![FieldWidth::Full, FieldWidth::Half, FieldWidth::Third])
}

/// Strategy for a layout of 0..32 fields with unique ids
fn layout_strategy() -> impl Strategy<Value = Vec<LayoutField>> {
    prop::collection::vec(width_strategy(), 0..32).prop_map(|widths| {
        widths
            .into_iter()
            .enumerate()
            .map(|(i, width)| LayoutField::new(format!("f{i}"), width))
            .collect()
    })
}

/// Sum of widths per row, indexed by `order_index`
fn row_sums(fields: &[LayoutField]) -> Vec<f64> {
    let mut sums: Vec<f64> = Vec::new();
    for field in fields {
        let row = field.order_index as usize;
        if row == sums.len() {
            sums.push(0.0);
        }
        sums[row] += field.width.space();
    }
    sums
}

proptest! {
    #[test]
    fn row_sums_never_exceed_budget(fields in layout_strategy()) {
        for sum in row_sums(&pack(&fields)) {
            prop_assert!(sum <= 1.0 + EPSILON, "row overflows: {sum}");
        }
    }

    #[test]
    fn row_indices_are_dense_from_zero(fields in layout_strategy()) {
        let packed = pack(&fields);
        let mut expected: u32 = 0;
        for field in &packed {
            prop_assert!(
                field.order_index == expected || field.order_index == expected + 1,
                "row numbering jumped from {expected} to {}",
                field.order_index
            );
            expected = field.order_index;
        }
        if let Some(first) = packed.first() {
            prop_assert_eq!(first.order_index, 0);
        }
    }

    #[test]
    fn packing_preserves_id_order(fields in layout_strategy()) {
        let packed = pack(&fields);
        let before: Vec<_> = fields.iter().map(|f| &f.id).collect();
        let after: Vec<_> = packed.iter().map(|f| &f.id).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn packing_is_idempotent(fields in layout_strategy()) {
        let once = pack(&fields);
        prop_assert_eq!(pack(&once), once.clone());
    }

    #[test]
    fn full_width_fields_sit_alone(fields in layout_strategy()) {
        let packed = pack(&fields);
        for field in packed.iter().filter(|f| f.width == FieldWidth::Full) {
            let sharers = packed
                .iter()
                .filter(|f| f.order_index == field.order_index)
                .count();
            prop_assert_eq!(sharers, 1, "full-width {} shares its row", field.id);
        }
    }

    // Greedy maximality: a field only opens a new row when the previous row
    // genuinely could not hold it (or the previous field was full-width).
    #[test]
    fn new_rows_are_never_avoidable(fields in layout_strategy()) {
        let packed = pack(&fields);
        let sums = row_sums(&packed);
        for (i, field) in packed.iter().enumerate().skip(1) {
            let prev = &packed[i - 1];
            if field.order_index != prev.order_index {
                let prev_row_sum = sums[prev.order_index as usize];
                let would_fit = prev_row_sum + field.width.space() <= 1.0 + EPSILON;
                prop_assert!(
                    prev.width == FieldWidth::Full || !would_fit,
                    "{} left avoidable slack on row {}",
                    field.id,
                    prev.order_index
                );
            }
        }
    }

    #[test]
    fn move_round_trip_restores_id_order(
        fields in layout_strategy(),
        from in 0usize..32,
        to in 0usize..32,
    ) {
        prop_assume!(from < fields.len() && to < fields.len());
        let there = move_field(&fields, from, to).unwrap();
        let back = move_field(&there, to, from).unwrap();
        let original: Vec<_> = fields.iter().map(|f| &f.id).collect();
        let restored: Vec<_> = back.iter().map(|f| &f.id).collect();
        prop_assert_eq!(original, restored);
    }

    #[test]
    fn move_never_mutates_input(
        fields in layout_strategy(),
        from in 0usize..32,
        to in 0usize..32,
    ) {
        prop_assume!(!fields.is_empty());
        let snapshot = fields.clone();
        let _ = move_field(&fields, from, to);
        prop_assert_eq!(fields, snapshot);
    }
}
