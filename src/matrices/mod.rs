/*!
 * Generic matrix type.
 *
 * [Matrix] stores its elements in a flat row major `Vec` and implements the
 * standard arithmetic operators for any [Numeric](crate::numeric::Numeric)
 * element type, which includes the automatic differentiation types
 * [Trace](crate::differentiation::Trace) and
 * [Record](crate::differentiation::Record).
 *
 * When doing numeric operations with matrices you should be careful to not
 * consume a matrix by accidentally using it by value. All the operations are
 * also defined on references to matrices so you should favor `&x * &y` style
 * notation for matrices you intend to continue using.
 */

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

pub mod errors;

use crate::matrices::errors::ScalarConversionError;
use crate::numeric::{Numeric, NumericRef};

/// Rows and columns are indexed as usize, starting at 0.
pub type Row = usize;
pub type Column = usize;

/**
 * A general purpose matrix of some type. If the type implements
 * [Clone] most storage and accessor methods are defined, and if the type
 * implements [Numeric](crate::numeric::Numeric) then the matrix can be used
 * in a mathematical way.
 */
#[derive(Debug)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: Row,
    columns: Column,
}

/**
 * Methods for matrices of any type, including non numerical types such as bool.
 */
impl<T> Matrix<T> {
    /**
     * Creates a unit (1x1) matrix from some element.
     */
    pub fn unit(value: T) -> Matrix<T> {
        Matrix {
            data: vec![value],
            rows: 1,
            columns: 1,
        }
    }

    /**
     * Creates a row vector (1xN) from a list.
     */
    pub fn row(values: Vec<T>) -> Matrix<T> {
        assert!(!values.is_empty(), "No values defined");
        let columns = values.len();
        Matrix {
            data: values,
            rows: 1,
            columns,
        }
    }

    /**
     * Creates a column vector (Nx1) from a list.
     */
    pub fn column(values: Vec<T>) -> Matrix<T> {
        assert!(!values.is_empty(), "No values defined");
        let rows = values.len();
        Matrix {
            data: values,
            rows,
            columns: 1,
        }
    }

    /**
     * Creates a matrix from a nested list of values, each inner vector
     * being a row, and hence the outer vector containing all rows in sequence,
     * the same way as when writing matrices in mathematics.
     *
     * Example of a 2 x 3 matrix in both notations:
     * ```ignore
     *   [
     *      1, 2, 4
     *      8, 9, 3
     *   ]
     * ```
     * ```
     * use tracegrad::matrices::Matrix;
     * Matrix::from(vec![
     *     vec![ 1, 2, 4 ],
     *     vec![ 8, 9, 3 ]]);
     * ```
     *
     * This will panic if no rows are defined, a row is empty, or the rows
     * are not all the same length.
     */
    pub fn from(values: Vec<Vec<T>>) -> Matrix<T> {
        assert!(!values.is_empty(), "No rows defined");
        assert!(!values[0].is_empty(), "No columns defined");
        let columns = values[0].len();
        assert!(
            values.iter().all(|row| row.len() == columns),
            "Inconsistent size"
        );
        let rows = values.len();
        Matrix {
            data: values.into_iter().flatten().collect(),
            rows,
            columns,
        }
    }

    /**
     * Returns the dimensionality of this matrix in Row, Column format.
     */
    pub fn size(&self) -> (Row, Column) {
        (self.rows, self.columns)
    }

    /**
     * Gets the number of rows in this matrix.
     */
    pub fn rows(&self) -> Row {
        self.rows
    }

    /**
     * Gets the number of columns in this matrix.
     */
    pub fn columns(&self) -> Column {
        self.columns
    }

    #[inline]
    fn index(&self, row: Row, column: Column) -> usize {
        (row * self.columns) + column
    }

    /**
     * Gets a reference to the value at this row and column. Rows and Columns
     * are 0 indexed. This will panic if the index is out of range.
     */
    pub fn get_reference(&self, row: Row, column: Column) -> &T {
        assert!(row < self.rows, "Row out of index");
        assert!(column < self.columns, "Column out of index");
        &self.data[(row * self.columns) + column]
    }

    /**
     * Sets a new value to this row and column. Rows and Columns are 0 indexed.
     * This will panic if the index is out of range.
     */
    pub fn set(&mut self, row: Row, column: Column, value: T) {
        assert!(row < self.rows, "Row out of index");
        assert!(column < self.columns, "Column out of index");
        let index = self.index(row, column);
        self.data[index] = value;
    }

    /**
     * Returns an iterator over references to all values in this matrix in
     * row major order.
     */
    pub fn row_major_reference_iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

/**
 * Methods for matrices with types that can be copied, but still not
 * neccessarily numerical.
 */
impl<T: Clone> Matrix<T> {
    /**
     * Creates a matrix of the provided size with all elements initialised to
     * the provided value.
     */
    pub fn empty(value: T, size: (Row, Column)) -> Matrix<T> {
        assert!(size.0 > 0 && size.1 > 0, "Size must be at least 1x1");
        Matrix {
            data: vec![value; size.0 * size.1],
            rows: size.0,
            columns: size.1,
        }
    }

    /**
     * Gets a copy of the value at this row and column. Rows and Columns are
     * 0 indexed. This will panic if the index is out of range.
     */
    pub fn get(&self, row: Row, column: Column) -> T {
        assert!(row < self.rows, "Row out of index");
        assert!(column < self.columns, "Column out of index");
        self.data[(row * self.columns) + column].clone()
    }

    /**
     * Computes and returns the transpose of this matrix.
     *
     * ```
     * use tracegrad::matrices::Matrix;
     * let x = Matrix::from(vec![
     *    vec![ 1, 2 ],
     *    vec![ 3, 4 ]]);
     * let y = Matrix::from(vec![
     *    vec![ 1, 3 ],
     *    vec![ 2, 4 ]]);
     * assert_eq!(x.transpose(), y);
     * ```
     */
    pub fn transpose(&self) -> Matrix<T> {
        let mut result = Matrix::empty(self.get(0, 0), (self.columns, self.rows));
        for i in 0..self.columns {
            for j in 0..self.rows {
                result.set(i, j, self.get(j, i));
            }
        }
        result
    }

    /**
     * Applies a function to all values in the matrix, modifying the matrix.
     */
    pub fn map_mut(&mut self, mapping_function: impl Fn(T) -> T) {
        for value in self.data.iter_mut() {
            *value = mapping_function(value.clone());
        }
    }

    /**
     * Creates and returns a new matrix with all values from the original with
     * the function applied to each. This can be used to change the type of the
     * matrix, such as creating a mask:
     * ```
     * use tracegrad::matrices::Matrix;
     * let x = Matrix::from(vec![
     *    vec![ 0.0, 1.2 ],
     *    vec![ 5.8, 6.9 ]]);
     * let y = x.map(|element| element > 2.0);
     * let result = Matrix::from(vec![
     *    vec![ false, false ],
     *    vec![ true, true ]]);
     * assert_eq!(&y, &result);
     * ```
     */
    pub fn map<U>(&self, mapping_function: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            data: self.data.iter().cloned().map(mapping_function).collect(),
            rows: self.rows,
            columns: self.columns,
        }
    }

    /**
     * Converts this 1x1 matrix into a scalar, consuming the matrix.
     * This will panic if the matrix is not 1x1, use
     * [try_scalar](Matrix::try_scalar) for a fallible conversion.
     */
    #[track_caller]
    pub fn scalar(self) -> T {
        match self.try_scalar() {
            Ok(value) => value,
            Err(error) => panic!("{}", error),
        }
    }

    /**
     * Converts this 1x1 matrix into a scalar, consuming the matrix, or
     * returns an error if the matrix is not 1x1.
     */
    pub fn try_scalar(self) -> Result<T, ScalarConversionError> {
        if self.size() != (1, 1) {
            return Err(ScalarConversionError);
        }
        Ok(self.data.into_iter().next().unwrap())
    }
}

/**
 * Any matrix of a Cloneable type implements Clone.
 */
impl<T: Clone> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Matrix {
            data: self.data.clone(),
            rows: self.rows,
            columns: self.columns,
        }
    }
}

/**
 * A matrix is displayed as its rows, one per line, with elements separated
 * by commas.
 */
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "[")?;
        for i in 0..self.rows {
            write!(f, "  ")?;
            for j in 0..self.columns {
                write!(f, "{}", self.get_reference(i, j))?;
                if j != self.columns - 1 {
                    write!(f, ", ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}

/**
 * PartialEq is implemented as two matrices are equal if and only if all their
 * elements are equal and they have the same size.
 */
impl<T: PartialEq> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a == b)
    }
}

/**
 * Matrix multiplication for two referenced matrices.
 *
 * This is matrix multiplication such that a matrix of dimensionality (LxM)
 * multiplied with a matrix of dimensionality (MxN) yields a new matrix of
 * dimensionality (LxN) with each element corresponding to the sum of products
 * of the ith row in the first matrix and the jth column in the second matrix.
 *
 * Matrices of the wrong sizes will result in a panic. No broadcasting is
 * performed, ie you cannot multiply a (NxM) matrix by a (Nx1) column vector,
 * you must transpose one of the arguments so that the operation is valid.
 */
impl<T: Numeric> Mul for &Matrix<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Matrix<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        // LxM * MxN -> LxN
        assert!(self.columns() == rhs.rows(), "Mismatched Matrices");

        let mut result = Matrix::empty(self.get(0, 0), (self.rows(), rhs.columns()));
        for i in 0..self.rows() {
            for j in 0..rhs.columns() {
                // compute the dot product of the ith row and the jth column
                result.set(
                    i,
                    j,
                    (0..self.columns())
                        .map(|k| self.get_reference(i, k) * rhs.get_reference(k, j))
                        .sum(),
                );
            }
        }
        result
    }
}

/**
 * Elementwise addition for two referenced matrices.
 */
impl<T: Numeric> Add for &Matrix<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Matrix<T>;

    fn add(self, rhs: Self) -> Self::Output {
        assert!(self.size() == rhs.size(), "Mismatched Matrices");

        Matrix {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
            rows: self.rows,
            columns: self.columns,
        }
    }
}

/**
 * Elementwise subtraction for two referenced matrices.
 */
impl<T: Numeric> Sub for &Matrix<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Matrix<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(self.size() == rhs.size(), "Mismatched Matrices");

        Matrix {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(a, b)| a - b)
                .collect(),
            rows: self.rows,
            columns: self.columns,
        }
    }
}

macro_rules! matrix_operator_impl_value_value {
    (impl $op:tt for Matrix { fn $method:ident }) => {
        /**
         * Operation for two matrices of the same type.
         */
        impl<T: Numeric> $op for Matrix<T>
        where
            for<'a> &'a T: NumericRef<T>,
        {
            type Output = Matrix<T>;
            #[inline]
            fn $method(self, rhs: Matrix<T>) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

macro_rules! matrix_operator_impl_value_reference {
    (impl $op:tt for Matrix { fn $method:ident }) => {
        /**
         * Operation for two matrices of the same type with the right referenced.
         */
        impl<T: Numeric> $op<&Matrix<T>> for Matrix<T>
        where
            for<'a> &'a T: NumericRef<T>,
        {
            type Output = Matrix<T>;
            #[inline]
            fn $method(self, rhs: &Matrix<T>) -> Self::Output {
                (&self).$method(rhs)
            }
        }
    };
}

macro_rules! matrix_operator_impl_reference_value {
    (impl $op:tt for Matrix { fn $method:ident }) => {
        /**
         * Operation for two matrices of the same type with the left referenced.
         */
        impl<T: Numeric> $op<Matrix<T>> for &Matrix<T>
        where
            for<'a> &'a T: NumericRef<T>,
        {
            type Output = Matrix<T>;
            #[inline]
            fn $method(self, rhs: Matrix<T>) -> Self::Output {
                self.$method(&rhs)
            }
        }
    };
}

matrix_operator_impl_value_value!(impl Mul for Matrix { fn mul });
matrix_operator_impl_value_reference!(impl Mul for Matrix { fn mul });
matrix_operator_impl_reference_value!(impl Mul for Matrix { fn mul });
matrix_operator_impl_value_value!(impl Add for Matrix { fn add });
matrix_operator_impl_value_reference!(impl Add for Matrix { fn add });
matrix_operator_impl_reference_value!(impl Add for Matrix { fn add });
matrix_operator_impl_value_value!(impl Sub for Matrix { fn sub });
matrix_operator_impl_value_reference!(impl Sub for Matrix { fn sub });
matrix_operator_impl_reference_value!(impl Sub for Matrix { fn sub });

/**
 * Elementwise negation for a referenced matrix.
 */
impl<T: Numeric> Neg for &Matrix<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Matrix<T>;

    fn neg(self) -> Self::Output {
        self.map(|v| -v)
    }
}

/**
 * Elementwise negation for a matrix.
 */
impl<T: Numeric> Neg for Matrix<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Matrix<T>;

    fn neg(self) -> Self::Output {
        -&self
    }
}
