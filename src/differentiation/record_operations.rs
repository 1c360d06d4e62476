/*!
 * Operator implementations for Records.
 *
 * These implementations are written here but Rust docs will display them on
 * the [Record] struct page.
 *
 * Records of any [Numeric] type implement all the standard library traits
 * for addition, subtraction, multiplication and division, so you can use the
 * normal `+ - * /` operators as you can with normal number types. As a
 * convenience, these operations can also be used with a Record on the left
 * hand side and the same type the Record is generic over on the right hand
 * side:
 *
 * ```
 * use tracegrad::differentiation::{Record, WengertList};
 * let list = WengertList::new();
 * let x: Record<f32> = Record::variable(2.0, &list);
 * let y: f32 = 2.0;
 * let z: Record<f32> = x * y;
 * assert_eq!(z.number, 4.0);
 * ```
 *
 * Each operation on a variable record appends the local derivatives of that
 * operation onto the record's [WengertList]. Operations where neither input
 * is tracked on a list record nothing, since the result cannot depend on
 * any variable of the function being differentiated.
 */

use crate::differentiation::{Primitive, Record};
use crate::numeric::extra::{Cos, Exp, Ln, Pi, Real, RealRef, Sin, Sqrt};
use crate::numeric::{FromUsize, Numeric, NumericRef, ZeroOne};
use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/**
 * A record is displayed by showing its number component.
 */
impl<'a, T: std::fmt::Display + Primitive> std::fmt::Display for Record<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.number)
    }
}

impl<'a, T: Numeric + Primitive> ZeroOne for Record<'a, T> {
    #[inline]
    fn zero() -> Record<'a, T> {
        Record::constant(T::zero())
    }
    #[inline]
    fn one() -> Record<'a, T> {
        Record::constant(T::one())
    }
}

impl<'a, T: Numeric + Primitive> FromUsize for Record<'a, T> {
    #[inline]
    fn from_usize(n: usize) -> Option<Record<'a, T>> {
        Some(Record::constant(T::from_usize(n)?))
    }
}

impl<'a, T: Numeric + Real + Primitive> Pi for Record<'a, T> {
    #[inline]
    fn pi() -> Record<'a, T> {
        Record::constant(T::pi())
    }
}

/**
 * Any record of a Cloneable type implements clone
 */
impl<'a, T: Clone + Primitive> Clone for Record<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        Record {
            number: self.number.clone(),
            history: self.history,
            index: self.index,
        }
    }
}

/**
 * Any record of a Copy type implements Copy
 */
impl<'a, T: Copy + Primitive> Copy for Record<'a, T> {}

/**
 * Any record of a PartialEq type implements PartialEq
 *
 * Note that as a Record is intended to be substitutable with its type T only
 * the number parts of the record are compared.
 */
impl<'a, T: PartialEq + Primitive> PartialEq for Record<'a, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

/**
 * Any record of a PartialOrd type implements PartialOrd
 *
 * Note that as a Record is intended to be substitutable with its type T only
 * the number parts of the record are compared.
 */
impl<'a, T: PartialOrd + Primitive> PartialOrd for Record<'a, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.number.partial_cmp(&other.number)
    }
}

/**
 * Any record of a Numeric type implements Sum, which is the same as adding a
 * bunch of Record types together.
 */
impl<'a, T: Numeric + Primitive> Sum for Record<'a, T>
where
    for<'t> &'t T: NumericRef<T>,
{
    fn sum<I>(iter: I) -> Record<'a, T>
    where
        I: Iterator<Item = Record<'a, T>>,
    {
        iter.fold(Record::<T>::zero(), |total, next| total + next)
    }
}

/**
 * Compares two records' referenced WengertLists.
 *
 * If either record is missing a reference to a WengertList then this is
 * trivially true, in so far as we will use the WengertList of the other one.
 *
 * If both records have a WengertList, then checks that the lists are the
 * same.
 */
fn same_list<'a, 'b, T: Primitive>(a: &Record<'a, T>, b: &Record<'b, T>) -> bool {
    match (a.history, b.history) {
        (None, None) => true,
        (Some(_), None) => true,
        (None, Some(_)) => true,
        (Some(list_a), Some(list_b)) => std::ptr::eq(list_a, list_b),
    }
}

/**
 * Addition for two records of the same type with both referenced and both
 * using the same WengertList.
 */
impl<'a, 'l, 'r, T: Numeric + Primitive> Add<&'r Record<'a, T>> for &'l Record<'a, T>
where
    for<'t> &'t T: NumericRef<T>,
{
    type Output = Record<'a, T>;
    #[track_caller]
    #[inline]
    fn add(self, rhs: &Record<'a, T>) -> Self::Output {
        assert!(
            same_list(self, rhs),
            "Records must be using the same WengertList"
        );
        match (self.history, rhs.history) {
            // If neither input has a WengertList then neither is an input to
            // the overall function, so nothing needs recording.
            (None, None) => Record {
                number: self.number.clone() + rhs.number.clone(),
                history: None,
                index: 0,
            },
            // If only one input has a WengertList treat the other as a
            // constant.
            (Some(_), None) => self + &rhs.number,
            (None, Some(_)) => rhs + &self.number,
            (Some(history), Some(_)) => Record {
                number: self.number.clone() + rhs.number.clone(),
                history: Some(history),
                index: history.append_binary(
                    self.index,
                    // δ(x + y) / δx = 1
                    T::one(),
                    rhs.index,
                    // δ(x + y) / δy = 1
                    T::one(),
                ),
            },
        }
    }
}

/**
 * Subtraction for two records of the same type with both referenced and both
 * using the same WengertList.
 */
impl<'a, 'l, 'r, T: Numeric + Primitive> Sub<&'r Record<'a, T>> for &'l Record<'a, T>
where
    for<'t> &'t T: NumericRef<T>,
{
    type Output = Record<'a, T>;
    #[track_caller]
    #[inline]
    fn sub(self, rhs: &Record<'a, T>) -> Self::Output {
        assert!(
            same_list(self, rhs),
            "Records must be using the same WengertList"
        );
        match (self.history, rhs.history) {
            (None, None) => Record {
                number: self.number.clone() - rhs.number.clone(),
                history: None,
                index: 0,
            },
            (Some(_), None) => self - &rhs.number,
            (None, Some(history)) => Record {
                number: self.number.clone() - rhs.number.clone(),
                history: Some(history),
                index: history.append_unary(
                    rhs.index,
                    // δ(C - y) / δy = -1
                    -T::one(),
                ),
            },
            (Some(history), Some(_)) => Record {
                number: self.number.clone() - rhs.number.clone(),
                history: Some(history),
                index: history.append_binary(
                    self.index,
                    // δ(x - y) / δx = 1
                    T::one(),
                    rhs.index,
                    // δ(x - y) / δy = -1
                    -T::one(),
                ),
            },
        }
    }
}

/**
 * Multiplication for two records of the same type with both referenced and
 * both using the same WengertList.
 */
impl<'a, 'l, 'r, T: Numeric + Primitive> Mul<&'r Record<'a, T>> for &'l Record<'a, T>
where
    for<'t> &'t T: NumericRef<T>,
{
    type Output = Record<'a, T>;
    #[track_caller]
    #[inline]
    fn mul(self, rhs: &Record<'a, T>) -> Self::Output {
        assert!(
            same_list(self, rhs),
            "Records must be using the same WengertList"
        );
        match (self.history, rhs.history) {
            (None, None) => Record {
                number: self.number.clone() * rhs.number.clone(),
                history: None,
                index: 0,
            },
            (Some(_), None) => self * &rhs.number,
            (None, Some(_)) => rhs * &self.number,
            (Some(history), Some(_)) => Record {
                number: self.number.clone() * rhs.number.clone(),
                history: Some(history),
                index: history.append_binary(
                    self.index,
                    // δ(xy) / δx = y
                    rhs.number.clone(),
                    rhs.index,
                    // δ(xy) / δy = x
                    self.number.clone(),
                ),
            },
        }
    }
}

/**
 * Division for two records of the same type with both referenced and both
 * using the same WengertList.
 */
impl<'a, 'l, 'r, T: Numeric + Primitive> Div<&'r Record<'a, T>> for &'l Record<'a, T>
where
    for<'t> &'t T: NumericRef<T>,
{
    type Output = Record<'a, T>;
    #[track_caller]
    #[inline]
    fn div(self, rhs: &Record<'a, T>) -> Self::Output {
        assert!(
            same_list(self, rhs),
            "Records must be using the same WengertList"
        );
        match (self.history, rhs.history) {
            (None, None) => Record {
                number: self.number.clone() / rhs.number.clone(),
                history: None,
                index: 0,
            },
            (Some(_), None) => self / &rhs.number,
            (None, Some(history)) => Record {
                number: self.number.clone() / rhs.number.clone(),
                history: Some(history),
                index: history.append_unary(
                    rhs.index,
                    // δ(C / y) / δy = -C / y^2
                    -self.number.clone() / (rhs.number.clone() * rhs.number.clone()),
                ),
            },
            (Some(history), Some(_)) => Record {
                number: self.number.clone() / rhs.number.clone(),
                history: Some(history),
                index: history.append_binary(
                    self.index,
                    // δ(x / y) / δx = 1 / y
                    T::one() / rhs.number.clone(),
                    rhs.index,
                    // δ(x / y) / δy = -x / y^2
                    -self.number.clone() / (rhs.number.clone() * rhs.number.clone()),
                ),
            },
        }
    }
}

macro_rules! record_operator_impl_value_value {
    (impl $op:tt for Record { fn $method:ident }) => {
        /**
         * Operation for two records of the same type.
         */
        impl<'a, T: Numeric + Primitive> $op for Record<'a, T>
        where
            for<'t> &'t T: NumericRef<T>,
        {
            type Output = Record<'a, T>;
            #[track_caller]
            #[inline]
            fn $method(self, rhs: Record<'a, T>) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

macro_rules! record_operator_impl_value_reference {
    (impl $op:tt for Record { fn $method:ident }) => {
        /**
         * Operation for two records of the same type with the right
         * referenced.
         */
        impl<'a, T: Numeric + Primitive> $op<&Record<'a, T>> for Record<'a, T>
        where
            for<'t> &'t T: NumericRef<T>,
        {
            type Output = Record<'a, T>;
            #[track_caller]
            #[inline]
            fn $method(self, rhs: &Record<'a, T>) -> Self::Output {
                (&self).$method(rhs)
            }
        }
    };
}

macro_rules! record_operator_impl_reference_value {
    (impl $op:tt for Record { fn $method:ident }) => {
        /**
         * Operation for two records of the same type with the left
         * referenced.
         */
        impl<'a, T: Numeric + Primitive> $op<Record<'a, T>> for &Record<'a, T>
        where
            for<'t> &'t T: NumericRef<T>,
        {
            type Output = Record<'a, T>;
            #[track_caller]
            #[inline]
            fn $method(self, rhs: Record<'a, T>) -> Self::Output {
                self.$method(&rhs)
            }
        }
    };
}

record_operator_impl_value_value!(impl Add for Record { fn add });
record_operator_impl_reference_value!(impl Add for Record { fn add });
record_operator_impl_value_reference!(impl Add for Record { fn add });
record_operator_impl_value_value!(impl Sub for Record { fn sub });
record_operator_impl_reference_value!(impl Sub for Record { fn sub });
record_operator_impl_value_reference!(impl Sub for Record { fn sub });
record_operator_impl_value_value!(impl Mul for Record { fn mul });
record_operator_impl_reference_value!(impl Mul for Record { fn mul });
record_operator_impl_value_reference!(impl Mul for Record { fn mul });
record_operator_impl_value_value!(impl Div for Record { fn div });
record_operator_impl_reference_value!(impl Div for Record { fn div });
record_operator_impl_value_reference!(impl Div for Record { fn div });

/**
 * Addition for a record and a constant of the same type with both referenced.
 */
impl<'a, T: Numeric + Primitive> Add<&T> for &Record<'a, T>
where
    for<'t> &'t T: NumericRef<T>,
{
    type Output = Record<'a, T>;
    #[inline]
    fn add(self, rhs: &T) -> Self::Output {
        match self.history {
            None => Record {
                number: self.number.clone() + rhs.clone(),
                history: None,
                index: 0,
            },
            Some(history) => Record {
                number: self.number.clone() + rhs.clone(),
                history: Some(history),
                index: history.append_unary(
                    self.index,
                    // δ(x + C) / δx = 1
                    T::one(),
                ),
            },
        }
    }
}

/**
 * Subtraction for a record and a constant of the same type with both
 * referenced.
 */
impl<'a, T: Numeric + Primitive> Sub<&T> for &Record<'a, T>
where
    for<'t> &'t T: NumericRef<T>,
{
    type Output = Record<'a, T>;
    #[inline]
    fn sub(self, rhs: &T) -> Self::Output {
        match self.history {
            None => Record {
                number: self.number.clone() - rhs.clone(),
                history: None,
                index: 0,
            },
            Some(history) => Record {
                number: self.number.clone() - rhs.clone(),
                history: Some(history),
                index: history.append_unary(
                    self.index,
                    // δ(x - C) / δx = 1
                    T::one(),
                ),
            },
        }
    }
}

/**
 * Multiplication for a record and a constant of the same type with both
 * referenced.
 */
impl<'a, T: Numeric + Primitive> Mul<&T> for &Record<'a, T>
where
    for<'t> &'t T: NumericRef<T>,
{
    type Output = Record<'a, T>;
    #[inline]
    fn mul(self, rhs: &T) -> Self::Output {
        match self.history {
            None => Record {
                number: self.number.clone() * rhs.clone(),
                history: None,
                index: 0,
            },
            Some(history) => Record {
                number: self.number.clone() * rhs.clone(),
                history: Some(history),
                index: history.append_unary(
                    self.index,
                    // δ(Cx) / δx = C
                    rhs.clone(),
                ),
            },
        }
    }
}

/**
 * Division for a record and a constant of the same type with both referenced.
 */
impl<'a, T: Numeric + Primitive> Div<&T> for &Record<'a, T>
where
    for<'t> &'t T: NumericRef<T>,
{
    type Output = Record<'a, T>;
    #[inline]
    fn div(self, rhs: &T) -> Self::Output {
        match self.history {
            None => Record {
                number: self.number.clone() / rhs.clone(),
                history: None,
                index: 0,
            },
            Some(history) => Record {
                number: self.number.clone() / rhs.clone(),
                history: Some(history),
                index: history.append_unary(
                    self.index,
                    // δ(x / C) / δx = 1 / C
                    T::one() / rhs.clone(),
                ),
            },
        }
    }
}

macro_rules! record_number_operator_impl_value_value {
    (impl $op:tt for Record { fn $method:ident }) => {
        /**
         * Operation for a record and a constant of the same type.
         */
        impl<'a, T: Numeric + Primitive> $op<T> for Record<'a, T>
        where
            for<'t> &'t T: NumericRef<T>,
        {
            type Output = Record<'a, T>;
            #[inline]
            fn $method(self, rhs: T) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

macro_rules! record_number_operator_impl_value_reference {
    (impl $op:tt for Record { fn $method:ident }) => {
        /**
         * Operation for a record and a constant of the same type with the
         * right referenced.
         */
        impl<'a, T: Numeric + Primitive> $op<&T> for Record<'a, T>
        where
            for<'t> &'t T: NumericRef<T>,
        {
            type Output = Record<'a, T>;
            #[inline]
            fn $method(self, rhs: &T) -> Self::Output {
                (&self).$method(rhs)
            }
        }
    };
}

macro_rules! record_number_operator_impl_reference_value {
    (impl $op:tt for Record { fn $method:ident }) => {
        /**
         * Operation for a record and a constant of the same type with the
         * left referenced.
         */
        impl<'a, T: Numeric + Primitive> $op<T> for &Record<'a, T>
        where
            for<'t> &'t T: NumericRef<T>,
        {
            type Output = Record<'a, T>;
            #[inline]
            fn $method(self, rhs: T) -> Self::Output {
                self.$method(&rhs)
            }
        }
    };
}

record_number_operator_impl_value_value!(impl Add for Record { fn add });
record_number_operator_impl_reference_value!(impl Add for Record { fn add });
record_number_operator_impl_value_reference!(impl Add for Record { fn add });
record_number_operator_impl_value_value!(impl Sub for Record { fn sub });
record_number_operator_impl_reference_value!(impl Sub for Record { fn sub });
record_number_operator_impl_value_reference!(impl Sub for Record { fn sub });
record_number_operator_impl_value_value!(impl Mul for Record { fn mul });
record_number_operator_impl_reference_value!(impl Mul for Record { fn mul });
record_number_operator_impl_value_reference!(impl Mul for Record { fn mul });
record_number_operator_impl_value_value!(impl Div for Record { fn div });
record_number_operator_impl_reference_value!(impl Div for Record { fn div });
record_number_operator_impl_value_reference!(impl Div for Record { fn div });

/**
 * Negation for a referenced record.
 */
impl<'a, T: Numeric + Primitive> Neg for &Record<'a, T>
where
    for<'t> &'t T: NumericRef<T>,
{
    type Output = Record<'a, T>;
    #[inline]
    fn neg(self) -> Self::Output {
        match self.history {
            None => Record {
                number: -self.number.clone(),
                history: None,
                index: 0,
            },
            Some(history) => Record {
                number: -self.number.clone(),
                history: Some(history),
                index: history.append_unary(
                    self.index,
                    // δ(-x) / δx = -1
                    -T::one(),
                ),
            },
        }
    }
}

/**
 * Negation for a record.
 */
impl<'a, T: Numeric + Primitive> Neg for Record<'a, T>
where
    for<'t> &'t T: NumericRef<T>,
{
    type Output = Record<'a, T>;
    #[inline]
    fn neg(self) -> Self::Output {
        -&self
    }
}

/**
 * Square root of a referenced record, recording the derivative
 * δ(√x)/δx = 1/(2√x).
 */
impl<'a, T: Numeric + Real + Primitive> Sqrt for &Record<'a, T>
where
    for<'t> &'t T: NumericRef<T> + RealRef<T>,
{
    type Output = Record<'a, T>;
    #[inline]
    fn sqrt(self) -> Self::Output {
        let root = self.number.clone().sqrt();
        match self.history {
            None => Record {
                number: root,
                history: None,
                index: 0,
            },
            Some(history) => Record {
                history: Some(history),
                index: history
                    .append_unary(self.index, T::one() / ((T::one() + T::one()) * root.clone())),
                number: root,
            },
        }
    }
}

/**
 * Exponential of a referenced record, recording the derivative
 * δ(eˣ)/δx = eˣ.
 */
impl<'a, T: Numeric + Real + Primitive> Exp for &Record<'a, T>
where
    for<'t> &'t T: NumericRef<T> + RealRef<T>,
{
    type Output = Record<'a, T>;
    #[inline]
    fn exp(self) -> Self::Output {
        let exponential = self.number.clone().exp();
        match self.history {
            None => Record {
                number: exponential,
                history: None,
                index: 0,
            },
            Some(history) => Record {
                history: Some(history),
                index: history.append_unary(self.index, exponential.clone()),
                number: exponential,
            },
        }
    }
}

/**
 * Natural logarithm of a referenced record, recording the derivative
 * δ(ln x)/δx = 1/x.
 */
impl<'a, T: Numeric + Real + Primitive> Ln for &Record<'a, T>
where
    for<'t> &'t T: NumericRef<T> + RealRef<T>,
{
    type Output = Record<'a, T>;
    #[inline]
    fn ln(self) -> Self::Output {
        match self.history {
            None => Record {
                number: self.number.clone().ln(),
                history: None,
                index: 0,
            },
            Some(history) => Record {
                number: self.number.clone().ln(),
                history: Some(history),
                index: history.append_unary(self.index, T::one() / self.number.clone()),
            },
        }
    }
}

/**
 * Sine of a referenced record, recording the derivative
 * δ(sin x)/δx = cos x.
 */
impl<'a, T: Numeric + Real + Primitive> Sin for &Record<'a, T>
where
    for<'t> &'t T: NumericRef<T> + RealRef<T>,
{
    type Output = Record<'a, T>;
    #[inline]
    fn sin(self) -> Self::Output {
        match self.history {
            None => Record {
                number: self.number.clone().sin(),
                history: None,
                index: 0,
            },
            Some(history) => Record {
                number: self.number.clone().sin(),
                history: Some(history),
                index: history.append_unary(self.index, self.number.clone().cos()),
            },
        }
    }
}

/**
 * Cosine of a referenced record, recording the derivative
 * δ(cos x)/δx = -sin x.
 */
impl<'a, T: Numeric + Real + Primitive> Cos for &Record<'a, T>
where
    for<'t> &'t T: NumericRef<T> + RealRef<T>,
{
    type Output = Record<'a, T>;
    #[inline]
    fn cos(self) -> Self::Output {
        match self.history {
            None => Record {
                number: self.number.clone().cos(),
                history: None,
                index: 0,
            },
            Some(history) => Record {
                number: self.number.clone().cos(),
                history: Some(history),
                index: history.append_unary(self.index, -self.number.clone().sin()),
            },
        }
    }
}

macro_rules! record_real_operator_impl_value {
    (impl $op:tt for Record { fn $method:ident }) => {
        /**
         * Operation for a record by value.
         */
        impl<'a, T: Numeric + Real + Primitive> $op for Record<'a, T>
        where
            for<'t> &'t T: NumericRef<T> + RealRef<T>,
        {
            type Output = Record<'a, T>;
            #[inline]
            fn $method(self) -> Self::Output {
                (&self).$method()
            }
        }
    };
}

record_real_operator_impl_value!(impl Sqrt for Record { fn sqrt });
record_real_operator_impl_value!(impl Exp for Record { fn exp });
record_real_operator_impl_value!(impl Ln for Record { fn ln });
record_real_operator_impl_value!(impl Sin for Record { fn sin });
record_real_operator_impl_value!(impl Cos for Record { fn cos });
