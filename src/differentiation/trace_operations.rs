/*!
 * Operator implementations for Traces.
 *
 * These implementations are written here but Rust docs will display them on
 * the [Trace] struct page.
 *
 * Traces of any [Numeric] type implement all the standard library traits for
 * addition, subtraction, multiplication and division, so you can use the
 * normal `+ - * /` operators as you can with normal number types. As a
 * convenience, these operations can also be used with a Trace on the left
 * hand side and the same type the Trace is generic over on the right hand
 * side:
 *
 * ```
 * use tracegrad::differentiation::Trace;
 * assert_eq!((Trace::variable(2.0) * 2.0).number, 4.0);
 * ```
 *
 * Traces of a [Real](crate::numeric::extra::Real) type also implement the
 * transcendental operations, with each operation propagating the dual
 * number's derivative component for the chain rule.
 */

use crate::differentiation::{Primitive, Trace};
use crate::numeric::extra::{Cos, Exp, Ln, Pi, Real, RealRef, Sin, Sqrt};
use crate::numeric::{FromUsize, Numeric, NumericRef, ZeroOne};
use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/**
 * A trace is displayed by showing its number component.
 */
impl<T: std::fmt::Display + Primitive> std::fmt::Display for Trace<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.number)
    }
}

impl<T: Numeric + Primitive> ZeroOne for Trace<T> {
    #[inline]
    fn zero() -> Trace<T> {
        Trace::constant(T::zero())
    }
    #[inline]
    fn one() -> Trace<T> {
        Trace::constant(T::one())
    }
}

impl<T: Numeric + Primitive> FromUsize for Trace<T> {
    #[inline]
    fn from_usize(n: usize) -> Option<Trace<T>> {
        Some(Trace::constant(T::from_usize(n)?))
    }
}

impl<T: Numeric + Real + Primitive> Pi for Trace<T> {
    #[inline]
    fn pi() -> Trace<T> {
        Trace::constant(T::pi())
    }
}

/**
 * Any trace of a Cloneable type implements clone
 */
impl<T: Clone + Primitive> Clone for Trace<T> {
    #[inline]
    fn clone(&self) -> Self {
        Trace {
            number: self.number.clone(),
            derivative: self.derivative.clone(),
        }
    }
}

/**
 * Any trace of a Copy type implements Copy
 */
impl<T: Copy + Primitive> Copy for Trace<T> {}

/**
 * Any trace of a PartialEq type implements PartialEq
 *
 * Note that as a Trace is intended to be substitutable with its type T only
 * the number parts of the trace are compared.
 */
impl<T: PartialEq + Primitive> PartialEq for Trace<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

/**
 * Any trace of a PartialOrd type implements PartialOrd
 *
 * Note that as a Trace is intended to be substitutable with its type T only
 * the number parts of the trace are compared.
 */
impl<T: PartialOrd + Primitive> PartialOrd for Trace<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.number.partial_cmp(&other.number)
    }
}

/**
 * Any trace of a Numeric type implements Sum, which is the same as adding a
 * bunch of Trace types together.
 */
impl<T: Numeric + Primitive> Sum for Trace<T> {
    fn sum<I>(iter: I) -> Trace<T>
    where
        I: Iterator<Item = Trace<T>>,
    {
        iter.fold(Trace::<T>::zero(), |total, next| Trace {
            number: total.number + next.number,
            derivative: total.derivative + next.derivative,
        })
    }
}

/**
 * Addition for two traces of the same type with both referenced.
 */
impl<'l, 'r, T: Numeric + Primitive> Add<&'r Trace<T>> for &'l Trace<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn add(self, rhs: &Trace<T>) -> Self::Output {
        Trace {
            number: self.number.clone() + rhs.number.clone(),
            derivative: self.derivative.clone() + rhs.derivative.clone(),
        }
    }
}

/**
 * Subtraction for two traces of the same type with both referenced.
 */
impl<'l, 'r, T: Numeric + Primitive> Sub<&'r Trace<T>> for &'l Trace<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn sub(self, rhs: &Trace<T>) -> Self::Output {
        Trace {
            number: self.number.clone() - rhs.number.clone(),
            derivative: self.derivative.clone() - rhs.derivative.clone(),
        }
    }
}

/**
 * Multiplication for two traces of the same type with both referenced,
 * applying the product rule to the derivatives.
 */
impl<'l, 'r, T: Numeric + Primitive> Mul<&'r Trace<T>> for &'l Trace<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn mul(self, rhs: &Trace<T>) -> Self::Output {
        Trace {
            number: self.number.clone() * rhs.number.clone(),
            // d(xy) = y dx + x dy
            derivative: (self.derivative.clone() * rhs.number.clone())
                + (self.number.clone() * rhs.derivative.clone()),
        }
    }
}

/**
 * Division for two traces of the same type with both referenced,
 * applying the quotient rule to the derivatives.
 */
impl<'l, 'r, T: Numeric + Primitive> Div<&'r Trace<T>> for &'l Trace<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn div(self, rhs: &Trace<T>) -> Self::Output {
        Trace {
            number: self.number.clone() / rhs.number.clone(),
            // d(x/y) = dx/y - (x dy)/y^2
            derivative: (self.derivative.clone() / rhs.number.clone())
                - ((self.number.clone() * rhs.derivative.clone())
                    / (rhs.number.clone() * rhs.number.clone())),
        }
    }
}

macro_rules! trace_operator_impl_value_value {
    (impl $op:tt for Trace { fn $method:ident }) => {
        /**
         * Operation for two traces of the same type.
         */
        impl<T: Numeric + Primitive> $op for Trace<T>
        where
            for<'a> &'a T: NumericRef<T>,
        {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: Trace<T>) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

macro_rules! trace_operator_impl_value_reference {
    (impl $op:tt for Trace { fn $method:ident }) => {
        /**
         * Operation for two traces of the same type with the right referenced.
         */
        impl<T: Numeric + Primitive> $op<&Trace<T>> for Trace<T>
        where
            for<'a> &'a T: NumericRef<T>,
        {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: &Trace<T>) -> Self::Output {
                (&self).$method(rhs)
            }
        }
    };
}

macro_rules! trace_operator_impl_reference_value {
    (impl $op:tt for Trace { fn $method:ident }) => {
        /**
         * Operation for two traces of the same type with the left referenced.
         */
        impl<T: Numeric + Primitive> $op<Trace<T>> for &Trace<T>
        where
            for<'a> &'a T: NumericRef<T>,
        {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: Trace<T>) -> Self::Output {
                self.$method(&rhs)
            }
        }
    };
}

trace_operator_impl_value_value!(impl Add for Trace { fn add });
trace_operator_impl_reference_value!(impl Add for Trace { fn add });
trace_operator_impl_value_reference!(impl Add for Trace { fn add });
trace_operator_impl_value_value!(impl Sub for Trace { fn sub });
trace_operator_impl_reference_value!(impl Sub for Trace { fn sub });
trace_operator_impl_value_reference!(impl Sub for Trace { fn sub });
trace_operator_impl_value_value!(impl Mul for Trace { fn mul });
trace_operator_impl_reference_value!(impl Mul for Trace { fn mul });
trace_operator_impl_value_reference!(impl Mul for Trace { fn mul });
trace_operator_impl_value_value!(impl Div for Trace { fn div });
trace_operator_impl_reference_value!(impl Div for Trace { fn div });
trace_operator_impl_value_reference!(impl Div for Trace { fn div });

/**
 * Addition for a trace and a constant of the same type with both referenced.
 */
impl<T: Numeric + Primitive> Add<&T> for &Trace<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn add(self, rhs: &T) -> Self::Output {
        Trace {
            number: self.number.clone() + rhs.clone(),
            derivative: self.derivative.clone(),
        }
    }
}

/**
 * Subtraction for a trace and a constant of the same type with both
 * referenced.
 */
impl<T: Numeric + Primitive> Sub<&T> for &Trace<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn sub(self, rhs: &T) -> Self::Output {
        Trace {
            number: self.number.clone() - rhs.clone(),
            derivative: self.derivative.clone(),
        }
    }
}

/**
 * Multiplication for a trace and a constant of the same type with both
 * referenced.
 */
impl<T: Numeric + Primitive> Mul<&T> for &Trace<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn mul(self, rhs: &T) -> Self::Output {
        Trace {
            number: self.number.clone() * rhs.clone(),
            derivative: self.derivative.clone() * rhs.clone(),
        }
    }
}

/**
 * Division for a trace and a constant of the same type with both referenced.
 */
impl<T: Numeric + Primitive> Div<&T> for &Trace<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn div(self, rhs: &T) -> Self::Output {
        Trace {
            number: self.number.clone() / rhs.clone(),
            derivative: self.derivative.clone() / rhs.clone(),
        }
    }
}

macro_rules! trace_number_operator_impl_value_value {
    (impl $op:tt for Trace { fn $method:ident }) => {
        /**
         * Operation for a trace and a constant of the same type.
         */
        impl<T: Numeric + Primitive> $op<T> for Trace<T>
        where
            for<'a> &'a T: NumericRef<T>,
        {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: T) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

macro_rules! trace_number_operator_impl_value_reference {
    (impl $op:tt for Trace { fn $method:ident }) => {
        /**
         * Operation for a trace and a constant of the same type with the
         * right referenced.
         */
        impl<T: Numeric + Primitive> $op<&T> for Trace<T>
        where
            for<'a> &'a T: NumericRef<T>,
        {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: &T) -> Self::Output {
                (&self).$method(rhs)
            }
        }
    };
}

macro_rules! trace_number_operator_impl_reference_value {
    (impl $op:tt for Trace { fn $method:ident }) => {
        /**
         * Operation for a trace and a constant of the same type with the
         * left referenced.
         */
        impl<T: Numeric + Primitive> $op<T> for &Trace<T>
        where
            for<'a> &'a T: NumericRef<T>,
        {
            type Output = Trace<T>;
            #[inline]
            fn $method(self, rhs: T) -> Self::Output {
                self.$method(&rhs)
            }
        }
    };
}

trace_number_operator_impl_value_value!(impl Add for Trace { fn add });
trace_number_operator_impl_reference_value!(impl Add for Trace { fn add });
trace_number_operator_impl_value_reference!(impl Add for Trace { fn add });
trace_number_operator_impl_value_value!(impl Sub for Trace { fn sub });
trace_number_operator_impl_reference_value!(impl Sub for Trace { fn sub });
trace_number_operator_impl_value_reference!(impl Sub for Trace { fn sub });
trace_number_operator_impl_value_value!(impl Mul for Trace { fn mul });
trace_number_operator_impl_reference_value!(impl Mul for Trace { fn mul });
trace_number_operator_impl_value_reference!(impl Mul for Trace { fn mul });
trace_number_operator_impl_value_value!(impl Div for Trace { fn div });
trace_number_operator_impl_reference_value!(impl Div for Trace { fn div });
trace_number_operator_impl_value_reference!(impl Div for Trace { fn div });

/**
 * Negation for a referenced trace.
 */
impl<T: Numeric + Primitive> Neg for &Trace<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn neg(self) -> Self::Output {
        Trace {
            number: -self.number.clone(),
            derivative: -self.derivative.clone(),
        }
    }
}

/**
 * Negation for a trace.
 */
impl<T: Numeric + Primitive> Neg for Trace<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn neg(self) -> Self::Output {
        -&self
    }
}

/**
 * Square root of a referenced trace, with the derivative
 * d(√x) = dx / (2√x).
 */
impl<T: Numeric + Real + Primitive> Sqrt for &Trace<T>
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn sqrt(self) -> Self::Output {
        let root = self.number.clone().sqrt();
        Trace {
            derivative: self.derivative.clone() / ((T::one() + T::one()) * root.clone()),
            number: root,
        }
    }
}

/**
 * Exponential of a referenced trace, with the derivative d(eˣ) = eˣ dx.
 */
impl<T: Numeric + Real + Primitive> Exp for &Trace<T>
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn exp(self) -> Self::Output {
        let exponential = self.number.clone().exp();
        Trace {
            derivative: exponential.clone() * self.derivative.clone(),
            number: exponential,
        }
    }
}

/**
 * Natural logarithm of a referenced trace, with the derivative
 * d(ln x) = dx / x.
 */
impl<T: Numeric + Real + Primitive> Ln for &Trace<T>
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn ln(self) -> Self::Output {
        Trace {
            number: self.number.clone().ln(),
            derivative: self.derivative.clone() / self.number.clone(),
        }
    }
}

/**
 * Sine of a referenced trace, with the derivative d(sin x) = cos(x) dx.
 */
impl<T: Numeric + Real + Primitive> Sin for &Trace<T>
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn sin(self) -> Self::Output {
        Trace {
            number: self.number.clone().sin(),
            derivative: self.number.clone().cos() * self.derivative.clone(),
        }
    }
}

/**
 * Cosine of a referenced trace, with the derivative d(cos x) = -sin(x) dx.
 */
impl<T: Numeric + Real + Primitive> Cos for &Trace<T>
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    type Output = Trace<T>;
    #[inline]
    fn cos(self) -> Self::Output {
        Trace {
            number: self.number.clone().cos(),
            derivative: -(self.number.clone().sin() * self.derivative.clone()),
        }
    }
}

macro_rules! trace_real_operator_impl_value {
    (impl $op:tt for Trace { fn $method:ident }) => {
        /**
         * Operation for a trace by value.
         */
        impl<T: Numeric + Real + Primitive> $op for Trace<T>
        where
            for<'a> &'a T: NumericRef<T> + RealRef<T>,
        {
            type Output = Trace<T>;
            #[inline]
            fn $method(self) -> Self::Output {
                (&self).$method()
            }
        }
    };
}

trace_real_operator_impl_value!(impl Sqrt for Trace { fn sqrt });
trace_real_operator_impl_value!(impl Exp for Trace { fn exp });
trace_real_operator_impl_value!(impl Ln for Trace { fn ln });
trace_real_operator_impl_value!(impl Sin for Trace { fn sin });
trace_real_operator_impl_value!(impl Cos for Trace { fn cos });
