use approx::assert_relative_eq;
use sketchnet::{Matrix, NnError};

fn m1() -> Matrix {
    Matrix::from_rows(vec![
        vec![11.0, 5.0, 19.0, 3.6],
        vec![7.0, 6.0, 2.0, 2.0],
        vec![55.0, 3.0, 9.0, 1.0],
    ])
    .unwrap()
}

fn m2() -> Matrix {
    Matrix::from_rows(vec![
        vec![8.0, 7.0, 14.5, 3.3],
        vec![7.0, 5.7, 9.3, 4.0],
        vec![36.8, 6.2, 4.0, 4.0],
    ])
    .unwrap()
}

fn m3() -> Matrix {
    Matrix::from_rows(vec![
        vec![6.2, 7.8, 3.0],
        vec![12.0, 11.0, 10.0],
        vec![8.0, 8.0, 4.5],
    ])
    .unwrap()
}

#[test]
fn from_rows_rejects_ragged_grids() {
    let result = Matrix::from_rows(vec![vec![2.0, 3.0, 5.0], vec![7.0], vec![4.0, 5.0, 6.0]]);
    assert!(matches!(
        result,
        Err(NnError::RaggedGrid {
            row: 1,
            expected: 3,
            found: 1
        })
    ));
}

#[test]
fn scalar_add_broadcasts() {
    let expected = Matrix::from_rows(vec![
        vec![13.2, 7.2, 21.2, 5.8],
        vec![9.2, 8.2, 4.2, 4.2],
        vec![57.2, 5.2, 11.2, 3.2],
    ])
    .unwrap();
    assert!(expected.approx_eq(&m1().add_scalar(2.2)));
    assert!(m1().approx_eq(&m1().add_scalar(0.0)));
}

#[test]
fn elementwise_add() {
    let expected = Matrix::from_rows(vec![
        vec![19.0, 12.0, 33.5, 6.9],
        vec![14.0, 11.7, 11.3, 6.0],
        vec![91.8, 9.2, 13.0, 5.0],
    ])
    .unwrap();
    assert!(expected.approx_eq(&m1().add(&m2()).unwrap()));

    let zeros = Matrix::zeros(3, 4);
    assert!(m1().approx_eq(&m1().add(&zeros).unwrap()));
}

#[test]
fn add_requires_identical_shapes() {
    assert!(matches!(
        m1().add(&m3()),
        Err(NnError::DimensionMismatch { op: "add", .. })
    ));
}

#[test]
fn elementwise_sub() {
    let expected = Matrix::from_rows(vec![
        vec![3.0, -2.0, 4.5, 0.3],
        vec![0.0, 0.3, -7.3, -2.0],
        vec![18.2, -3.2, 5.0, -3.0],
    ])
    .unwrap();
    assert!(expected.approx_eq(&m1().sub(&m2()).unwrap()));
    assert!(matches!(
        m1().sub(&m3()),
        Err(NnError::DimensionMismatch { op: "sub", .. })
    ));
}

#[test]
fn scalar_sub_broadcasts() {
    let expected = Matrix::from_rows(vec![
        vec![7.9, 1.9, 15.9, 0.5],
        vec![3.9, 2.9, -1.1, -1.1],
        vec![51.9, -0.1, 5.9, -2.1],
    ])
    .unwrap();
    assert!(expected.approx_eq(&m1().sub_scalar(3.1)));
}

#[test]
fn dot_of_row_and_column_vectors() {
    let row = Matrix::row_vector(vec![1.3, 2.0, 3.4]);
    let col = Matrix::column_vector(vec![0.4, 5.0, 6.7]);

    // [1 x 3] . [3 x 1] = [1 x 1]
    let product = row.dot(&col).unwrap();
    assert_eq!((product.rows(), product.cols()), (1, 1));
    assert_relative_eq!(product.get(0, 0), 33.3, epsilon = 1e-9);

    // [3 x 1] . [1 x 3] = [3 x 3]
    let expected = Matrix::from_rows(vec![
        vec![0.52, 0.8, 1.36],
        vec![6.5, 10.0, 17.0],
        vec![8.71, 13.4, 22.78],
    ])
    .unwrap();
    assert!(expected.approx_eq(&col.dot(&row).unwrap()));
}

#[test]
fn dot_of_zero_matrices_is_zero() {
    let a = Matrix::zeros(3, 4);
    let b = Matrix::zeros(4, 3);
    let product = a.dot(&b).unwrap();
    assert!(product.approx_eq(&Matrix::zeros(3, 3)));
}

#[test]
fn dot_requires_inner_dimensions_to_match() {
    assert!(matches!(
        m1().dot(&m3()),
        Err(NnError::DimensionMismatch { op: "dot", .. })
    ));
}

#[test]
fn hadamard_product() {
    let expected = Matrix::from_rows(vec![
        vec![88.0, 35.0, 275.5, 11.88],
        vec![49.0, 34.2, 18.6, 8.0],
        vec![2024.0, 18.6, 36.0, 4.0],
    ])
    .unwrap();
    assert!(expected.approx_eq(&m1().hadamard(&m2()).unwrap()));

    let zeros = Matrix::zeros(3, 4);
    assert!(zeros.approx_eq(&m1().hadamard(&zeros).unwrap()));
    assert!(matches!(
        m1().hadamard(&m3()),
        Err(NnError::DimensionMismatch { op: "hadamard", .. })
    ));
}

#[test]
fn hadamard_of_a_matrix_with_itself_squares_it() {
    let col = Matrix::column_vector(vec![0.4, 5.0, 6.7]);
    let expected = Matrix::column_vector(vec![0.16, 25.0, 44.89]);
    assert!(expected.approx_eq(&col.hadamard(&col).unwrap()));
}

#[test]
fn scalar_multiplication() {
    let expected = Matrix::from_rows(vec![
        vec![81.95, 37.25, 141.55, 26.82],
        vec![52.15, 44.7, 14.9, 14.9],
        vec![409.75, 22.35, 67.05, 7.45],
    ])
    .unwrap();
    assert!(expected.approx_eq(&m1().scale(7.45)));
    assert!(Matrix::zeros(3, 4).approx_eq(&m1().scale(0.0)));
}

#[test]
fn reshape_repacks_row_major() {
    let expected = Matrix::from_rows(vec![
        vec![11.0, 5.0],
        vec![19.0, 3.6],
        vec![7.0, 6.0],
        vec![2.0, 2.0],
        vec![55.0, 3.0],
        vec![9.0, 1.0],
    ])
    .unwrap();
    assert!(expected.approx_eq(&m1().reshape(6, 2).unwrap()));
}

#[test]
fn reshape_must_conserve_element_count() {
    assert!(matches!(
        m1().reshape(3, 6),
        Err(NnError::InvalidReshape { .. })
    ));
    assert!(matches!(
        m1().reshape(5, 6),
        Err(NnError::InvalidReshape { .. })
    ));
}

#[test]
fn transpose_swaps_rows_and_columns() {
    let expected = Matrix::from_rows(vec![
        vec![11.0, 7.0, 55.0],
        vec![5.0, 6.0, 3.0],
        vec![19.0, 2.0, 9.0],
        vec![3.6, 2.0, 1.0],
    ])
    .unwrap();
    assert!(expected.approx_eq(&m1().transpose()));
}

#[test]
fn transpose_is_an_involution() {
    assert!(m1().approx_eq(&m1().transpose().transpose()));

    let singleton = Matrix::row_vector(vec![36.0]);
    assert!(singleton.approx_eq(&singleton.transpose()));
}

#[test]
fn arg_max_row_finds_the_row_of_the_largest_element() {
    // Largest element (55.0) sits in row 2.
    assert_eq!(m1().arg_max_row(), 2);
}

#[test]
fn arg_max_row_keeps_the_first_index_on_ties() {
    let tied = Matrix::from_rows(vec![
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0],
    ])
    .unwrap();
    assert_eq!(tied.arg_max_row(), 0);
}

#[test]
fn arg_max_row_with_increasing_rows() {
    let rising = Matrix::from_rows(vec![
        vec![0.0, 1.0, 0.0],
        vec![0.0, 2.0, 0.0],
        vec![0.0, 0.0, 3.0],
        vec![1.0, 0.0, 0.0],
    ])
    .unwrap();
    assert_eq!(rising.arg_max_row(), 2);
}

#[test]
fn sum_totals_every_element() {
    assert_relative_eq!(m1().sum(), 123.6, epsilon = 1e-9);
    assert_relative_eq!(Matrix::row_vector(vec![36.0]).sum(), 36.0);
}

#[test]
fn map_applies_elementwise() {
    let expected = Matrix::from_rows(vec![
        vec![22.4, 25.6, 16.0],
        vec![34.0, 32.0, 30.0],
        vec![26.0, 26.0, 19.0],
    ])
    .unwrap();
    assert!(expected.approx_eq(&m3().map(|x| (x + 5.0) * 2.0)));
}

#[test]
fn approx_eq_is_false_across_shapes_and_beyond_tolerance() {
    assert!(!m1().approx_eq(&m3()));
    assert!(!m1().approx_eq(&m1().add_scalar(1e-9)));
    assert!(m1().approx_eq(&m1().add_scalar(1e-12)));
}
