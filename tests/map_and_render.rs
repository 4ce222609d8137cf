//! Integration tests for mapping, rendering, and sharing matrices across
//! threads.

use matrix_value::{Entry, Matrix, ShapeError, Value};
use rayon::prelude::*;

fn m<V: Into<Value>>(value: V) -> Matrix {
    Matrix::new(value).expect("valid matrix")
}

fn increment(entry: Entry, _: usize) -> Entry {
    match entry {
        Entry::Number(x) => Entry::Number(x + 1.0),
        Entry::Row(row) => Entry::Row(row.into_iter().map(|x| x + 1.0).collect()),
    }
}

// ---------------------------------------------------------------------------
// map
// ---------------------------------------------------------------------------

#[test]
fn map_identity() {
    let matrix = m([1.0, 2.0, 3.0]);
    assert_eq!(matrix.map(|entry, _| entry).unwrap(), matrix);
}

#[test]
fn map_increment() {
    let matrix = m([1.0, 2.0, 3.0]);
    assert_eq!(matrix.map(increment).unwrap(), m([2.0, 3.0, 4.0]));
}

#[test]
fn map_non_mutable() {
    let matrix = m([1.0, 2.0, 3.0]);
    let _ = matrix.map(increment).unwrap();
    assert_eq!(matrix, m([1.0, 2.0, 3.0]));
}

#[test]
fn map_hands_over_whole_rows_with_index() {
    let matrix = m([[1.0, 2.0], [3.0, 4.0]]);
    let mut seen = Vec::new();
    let scaled = matrix
        .map(|entry, i| {
            seen.push(i);
            match entry {
                Entry::Row(row) => Entry::Row(row.iter().map(|x| x * (i + 1) as f64).collect()),
                number => number,
            }
        })
        .unwrap();
    assert_eq!(seen, vec![0, 1]);
    assert_eq!(scaled, m([[1.0, 2.0], [6.0, 8.0]]));
}

#[test]
fn map_can_change_rank() {
    let column = m([1.0, 2.0])
        .map(|entry, _| match entry {
            Entry::Number(x) => Entry::Row(vec![x]),
            row => row,
        })
        .unwrap();
    assert_eq!(column, m([[1.0], [2.0]]));
}

#[test]
fn map_result_is_validated() {
    let ragged = m([[1.0, 2.0], [3.0, 4.0]]).map(|entry, i| match entry {
        Entry::Row(row) if i == 1 => Entry::Row(row[..1].to_vec()),
        other => other,
    });
    assert!(matches!(ragged, Err(ShapeError::UnevenRows { .. })));

    let mixed = m([1.0, 2.0]).map(|entry, i| match entry {
        Entry::Number(x) if i == 0 => Entry::Row(vec![x]),
        other => other,
    });
    assert_eq!(mixed, Err(ShapeError::MixedNesting));
}

#[test]
fn map_scalar_is_single_entry() {
    assert_eq!(m(2.0).map(increment).unwrap(), m(3.0));
}

#[test]
fn mapv_keeps_shape() {
    let matrix = m([[1.0, -2.0], [3.0, -4.0]]);
    assert_eq!(matrix.mapv(f64::abs), m([[1.0, 2.0], [3.0, 4.0]]));
    assert_eq!(m(2.0).mapv(|x| x * x), m(4.0));
    assert_eq!(m([1.0, 2.0]).mapv(|x| -x), m([-1.0, -2.0]));
}

// ---------------------------------------------------------------------------
// render / Display
// ---------------------------------------------------------------------------

#[test]
fn render_number() {
    assert_eq!(m(3.0).render(), "3");
    assert_eq!(format!("{}", m(-1.5)), "-1.5");
}

#[test]
fn render_number_array() {
    assert_eq!(m([1.0, 2.0, 3.0]).render(), "[ 1 2 3 ]");
}

#[test]
fn render_2d_number_array() {
    assert_eq!(
        m([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).render(),
        "[ 1 2 3 ]\n[ 4 5 6 ]\n[ 7 8 9 ]"
    );
}

#[test]
fn render_padded_2d_number_array() {
    assert_eq!(
        m([[1.0, 2.0, 3.0], [-10.0, 11.0, -12.0], [100.0, 0.0, 0.0]]).render(),
        "[   1  2   3 ]\n[ -10 11 -12 ]\n[ 100  0   0 ]"
    );
}

#[test]
fn render_pads_each_column_independently() {
    assert_eq!(
        m([[0.5, 1.0], [2.0, 300.0]]).to_string(),
        "[ 0.5   1 ]\n[   2 300 ]"
    );
}

#[test]
fn render_inverse() {
    let inv = m([[1.0, 2.0], [3.0, 4.0]]).invert().unwrap();
    assert_eq!(inv.render(), "[  -2    1 ]\n[ 1.5 -0.5 ]");
}

#[test]
fn render_extreme_magnitudes_in_exponent_notation() {
    assert_eq!(m([1e21, 1e-7]).render(), "[ 1e+21 1e-7 ]");
    assert_eq!(
        m([[1e21, 1.0], [2.0, 0.000001]]).render(),
        "[ 1e+21        1 ]\n[     2 0.000001 ]"
    );
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn shared_matrices_across_threads() {
    let a = m([[1.0, 2.0], [3.0, 4.0]]);
    let b = m([[5.0, 6.0], [7.0, 8.0]]);
    let products: Vec<Matrix> = (0..64)
        .into_par_iter()
        .map(|_| a.multiply(&b).unwrap())
        .collect();
    let expected = m([[19.0, 22.0], [43.0, 50.0]]);
    assert!(products.iter().all(|p| *p == expected));
    assert_eq!(a, m([[1.0, 2.0], [3.0, 4.0]]));
}

#[test]
fn parallel_renders_are_deterministic() {
    let a = m([[1.0, 2.0, 3.0], [-10.0, 11.0, -12.0], [100.0, 0.0, 0.0]]);
    let rendered: Vec<String> = (0..32).into_par_iter().map(|_| a.render()).collect();
    assert!(rendered.windows(2).all(|w| w[0] == w[1]));
}
