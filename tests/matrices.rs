extern crate tracegrad;

#[cfg(test)]
mod tests {
    use tracegrad::matrices::Matrix;

    #[test]
    fn check_dimensionality() {
        let row_vector = Matrix::row(vec![1, 2, 3]);
        let column_vector = Matrix::column(vec![1, 2, 3]);
        println!("{:?} {:?}", row_vector, column_vector);
        assert_eq!((1, 3), row_vector.size());
        assert_eq!((3, 1), column_vector.size());
    }

    #[test]
    fn check_dimensionality_matrix() {
        let matrix = Matrix::from(vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        println!("{:?}", matrix);
        assert_eq!((3, 2), matrix.size());
        assert_eq!((2, 3), matrix.transpose().size());
    }

    #[test]
    #[should_panic]
    fn check_uneven_rows_rejected() {
        let _ = Matrix::from(vec![vec![1, 2], vec![3]]);
    }

    #[test]
    fn check_empty_and_unit() {
        let filled = Matrix::empty(0.0, (2, 3));
        assert_eq!((2, 3), filled.size());
        assert!(filled.row_major_reference_iter().all(|x| *x == 0.0));
        let unit = Matrix::unit(5);
        assert_eq!(5, unit.scalar());
    }

    #[test]
    fn check_matrix_multiplication() {
        let matrix1 = Matrix::from(vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        let matrix2 = Matrix::from(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let result = Matrix::from(vec![vec![9, 12, 15], vec![19, 26, 33], vec![29, 40, 51]]);
        assert_eq!(matrix1 * matrix2, result);
    }

    #[test]
    #[should_panic]
    fn check_matrix_multiplication_wrong_sizes() {
        let matrix1 = Matrix::from(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let matrix2 = Matrix::from(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let _ = matrix1 * matrix2;
    }

    #[test]
    fn check_matrix_addition_and_subtraction() {
        let matrix1 = Matrix::from(vec![vec![1, 2], vec![3, 4]]);
        let matrix2 = Matrix::from(vec![vec![10, 20], vec![30, 40]]);
        assert_eq!(
            &matrix1 + &matrix2,
            Matrix::from(vec![vec![11, 22], vec![33, 44]])
        );
        assert_eq!(
            matrix2 - matrix1,
            Matrix::from(vec![vec![9, 18], vec![27, 36]])
        );
    }

    #[test]
    fn check_reference_operators() {
        let matrix = Matrix::from(vec![vec![1, 2], vec![3, 4]]);
        let doubled = &matrix + &matrix;
        assert_eq!(doubled, matrix.map(|x| x * 2));
        assert_eq!(-&doubled, doubled.map(|x| -x));
    }

    #[test]
    fn check_transpose() {
        let matrix = Matrix::from(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let transposed = Matrix::from(vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
        assert_eq!(matrix.transpose(), transposed);
        assert_eq!(matrix.transpose().transpose(), matrix);
    }

    #[test]
    fn check_get_and_set() {
        let mut matrix = Matrix::from(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(3, matrix.get(1, 0));
        assert_eq!(&2, matrix.get_reference(0, 1));
        matrix.set(1, 1, 9);
        assert_eq!(9, matrix.get(1, 1));
    }

    #[test]
    #[should_panic]
    fn check_out_of_bounds_access() {
        let matrix = Matrix::from(vec![vec![1, 2], vec![3, 4]]);
        let _ = matrix.get(2, 0);
    }

    #[test]
    fn check_map() {
        let matrix = Matrix::from(vec![vec![1, 2], vec![3, 4]]);
        let floats = matrix.map(|x| x as f32 * 0.5);
        assert_eq!(floats, Matrix::from(vec![vec![0.5, 1.0], vec![1.5, 2.0]]));
    }

    #[test]
    fn check_map_mut() {
        let mut matrix = Matrix::from(vec![vec![1, 2], vec![3, 4]]);
        matrix.map_mut(|x| x + 1);
        assert_eq!(matrix, Matrix::from(vec![vec![2, 3], vec![4, 5]]));
    }

    #[test]
    fn check_row_major_iteration() {
        let matrix = Matrix::from(vec![vec![1, 2], vec![3, 4]]);
        let elements: Vec<i32> = matrix.row_major_reference_iter().copied().collect();
        assert_eq!(elements, vec![1, 2, 3, 4]);
    }

    #[test]
    fn check_scalar_conversion() {
        assert_eq!(2.5, Matrix::unit(2.5).scalar());
        assert!(Matrix::unit(2.5).try_scalar().is_ok());
        let not_scalar = Matrix::row(vec![1, 2]);
        let error = not_scalar.try_scalar().unwrap_err();
        println!("{}", error);
    }

    #[test]
    fn check_display() {
        let matrix = Matrix::from(vec![vec![1, 2], vec![3, 4]]);
        println!("{}", matrix);
    }
}
