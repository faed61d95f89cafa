//! Greedy row-packing.
//!
//! [`pack`] walks the field sequence once, keeping a running budget of the
//! space left in the current row. A field opens a new row when it no longer
//! fits or when the previous field was full-width; full-width fields never
//! share a row in either direction. Row membership is decided from the
//! cumulative remaining budget, not just the previous field's width — three
//! consecutive `third` fields share one row.

use crate::error::{LayoutError, Result};
use crate::types::{FieldWidth, LayoutField};

/// Space available in an empty row.
const ROW_BUDGET: f64 = 1.0;

/// Tolerance absorbing floating rounding when widths sum to a full row
/// (e.g. three thirds).
const WIDTH_EPSILON: f64 = 1e-6;

/// Recompute every field's `order_index` by greedy left-to-right packing.
///
/// Input `order_index` values are ignored. The returned sequence has the same
/// fields in the same order; only `order_index` differs. Row numbering
/// restarts at 0 on every call.
pub fn pack(fields: &[LayoutField]) -> Vec<LayoutField> {
    let mut packed = Vec::with_capacity(fields.len());
    let mut row: u32 = 0;
    let mut remaining = ROW_BUDGET;
    let mut prev_full = false;

    for (i, field) in fields.iter().enumerate() {
        let need = field.width.space();
        if i > 0 && (prev_full || remaining < need - WIDTH_EPSILON) {
            row += 1;
            remaining = ROW_BUDGET;
        }

        packed.push(LayoutField {
            order_index: row,
            ..field.clone()
        });

        remaining -= need;
        prev_full = field.width == FieldWidth::Full;
    }

    packed
}

/// Remove the field at `from`, reinsert it at `to`, then repack.
///
/// Splice semantics: when `to > from` the removal shifts later fields down by
/// one before insertion. `from == to` is a no-op move and returns
/// `pack(fields)` unchanged. The input is never mutated; on error the caller's
/// sequence is untouched.
pub fn move_field(fields: &[LayoutField], from: usize, to: usize) -> Result<Vec<LayoutField>> {
    let len = fields.len();
    if from >= len {
        return Err(LayoutError::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(LayoutError::IndexOutOfRange { index: to, len });
    }

    let mut reordered = fields.to_vec();
    let field = reordered.remove(from);
    reordered.insert(to, field);
    Ok(pack(&reordered))
}

/// Replace the width of the field with id `field_id`, then repack.
///
/// The field keeps its position in the sequence. Fails with
/// [`LayoutError::FieldNotFound`] when no field carries the id; the input is
/// never mutated.
pub fn set_width(fields: &[LayoutField], field_id: &str, width: FieldWidth) -> Result<Vec<LayoutField>> {
    let mut updated = fields.to_vec();
    let field = updated
        .iter_mut()
        .find(|f| f.id == field_id)
        .ok_or_else(|| LayoutError::FieldNotFound {
            id: field_id.to_string(),
        })?;
    field.width = width;
    Ok(pack(&updated))
}
