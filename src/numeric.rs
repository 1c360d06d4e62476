/*!
 * Numerical type definitions.
 *
 * The same model and loss code in this crate can be run on plain floats, on
 * [Trace](crate::differentiation::Trace)s for forward automatic differentiation,
 * and on [Record](crate::differentiation::Record)s for reverse automatic
 * differentiation. These traits define what all three have in common.
 *
 * [Numeric] requires the four arithmetic operators plus negation to be
 * closed over the type for every combination of owned values and references, so
 * generic code can avoid needless clones. [NumericRef] is the
 * corresponding bound for the reference side, used as
 * `where for<'a> &'a T: NumericRef<T>`.
 */

use std::cmp::PartialOrd;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/**
 * A marker trait for the scalar types the rest of the crate treats as
 * numbers: the primitive machine types, plus
 * [Trace](crate::differentiation::Trace) and
 * [Record](crate::differentiation::Record) of another Primitive type so
 * derivatives of derivatives can be taken.
 *
 * Compound types such as [Matrix](crate::matrices::Matrix) never implement
 * Primitive. The [NumericRef] blanket implementation requires it of the
 * element type, so trait resolution for a matrix element can never nest
 * matrices inside matrices without end while searching for an
 * implementation.
 */
pub trait Primitive {}

macro_rules! primitive {
    ($T:ty) => {
        impl Primitive for $T {}
    };
}

primitive!(f32);
primitive!(f64);
primitive!(i8);
primitive!(i16);
primitive!(i32);
primitive!(i64);
primitive!(i128);
primitive!(isize);

/**
 * The operations `+ - * /` and negation on some right hand side type,
 * producing some output type. The default is the familiar case where
 * everything is the same type.
 */
pub trait NumericByValue<Rhs = Self, Output = Self>:
    Add<Rhs, Output = Output>
    + Sub<Rhs, Output = Output>
    + Mul<Rhs, Output = Output>
    + Div<Rhs, Output = Output>
    + Neg<Output = Output>
    + Sized
{
}

/**
 * Anything which implements all the arithmetic operators will automatically
 * implement this trait too.
 */
impl<T, Rhs, Output> NumericByValue<Rhs, Output> for T where
    T: Add<Rhs, Output = Output>
        + Sub<Rhs, Output = Output>
        + Mul<Rhs, Output = Output>
        + Div<Rhs, Output = Output>
        + Neg<Output = Output>
        + Sized
{
}

/**
 * A general purpose numeric trait that defines all the behaviour numerical
 * matrices and the automatic differentiation types need their elements
 * to support for math operations.
 */
pub trait Numeric:
    NumericByValue<Self, Self>
    + for<'a> NumericByValue<&'a Self, Self>
    + Clone
    + ZeroOne
    + FromUsize
    + Sum<Self>
    + PartialOrd
{
}

/**
 * Anything which implements all the super traits will automatically implement
 * this trait too. This covers primitives such as `f32`, `f64` and signed
 * integers.
 */
impl<T> Numeric for T where
    T: NumericByValue<T, T>
        + for<'a> NumericByValue<&'a T, T>
        + Clone
        + ZeroOne
        + FromUsize
        + Sum<T>
        + PartialOrd
{
}

/**
 * The trait to require on `&T` when `T` is [Numeric] to know that arithmetic
 * on references to the type also produces owned values, as in
 * `where for<'a> &'a T: NumericRef<T>`.
 */
pub trait NumericRef<T>: NumericByValue<T, T> + for<'a> NumericByValue<&'a T, T> {}

/**
 * Any reference to a [Primitive] type whose arithmetic produces owned values
 * automatically implements this trait too. The Primitive bound keeps
 * compound types out of the candidate space, so looking for a NumericRef
 * implementation always terminates.
 */
impl<RefT, T: Primitive> NumericRef<T> for RefT where
    RefT: NumericByValue<T, T> + for<'a> NumericByValue<&'a T, T>
{
}

/**
 * A trait defining how to obtain 0 and 1 for every implementing type.
 */
pub trait ZeroOne: Sized {
    fn zero() -> Self;
    fn one() -> Self;
}

macro_rules! zero_one_integral {
    ($T:ty) => {
        impl ZeroOne for $T {
            #[inline]
            fn zero() -> $T {
                0
            }
            #[inline]
            fn one() -> $T {
                1
            }
        }
    };
}

macro_rules! zero_one_float {
    ($T:ty) => {
        impl ZeroOne for $T {
            #[inline]
            fn zero() -> $T {
                0.0
            }
            #[inline]
            fn one() -> $T {
                1.0
            }
        }
    };
}

zero_one_integral!(i8);
zero_one_integral!(i16);
zero_one_integral!(i32);
zero_one_integral!(i64);
zero_one_integral!(i128);
zero_one_integral!(isize);
zero_one_float!(f32);
zero_one_float!(f64);

/**
 * A trait for converting from a usize, needed when computing means over
 * collections whose length is only known at runtime. The conversion may
 * fail if the number cannot be represented in the implementing type.
 */
pub trait FromUsize: Sized {
    fn from_usize(n: usize) -> Option<Self>;
}

macro_rules! from_usize_integral {
    ($T:ty) => {
        impl FromUsize for $T {
            #[inline]
            fn from_usize(n: usize) -> Option<$T> {
                <$T>::try_from(n).ok()
            }
        }
    };
}

macro_rules! from_usize_float {
    ($T:ty) => {
        impl FromUsize for $T {
            #[inline]
            fn from_usize(n: usize) -> Option<$T> {
                Some(n as $T)
            }
        }
    };
}

from_usize_integral!(i8);
from_usize_integral!(i16);
from_usize_integral!(i32);
from_usize_integral!(i64);
from_usize_integral!(i128);
from_usize_integral!(isize);
from_usize_float!(f32);
from_usize_float!(f64);

/**
 * Additional traits for the transcendental operations needed by sigmoid,
 * cross-entropy, Adam and the cosine learning rate schedule.
 */
pub mod extra {

/**
 * A type which can be square rooted.
 *
 * This is implemented by `f32` and `f64` by value and by reference.
 */
pub trait Sqrt {
    type Output;
    fn sqrt(self) -> Self::Output;
}

/**
 * A type which can compute e^self.
 *
 * This is implemented by `f32` and `f64` by value and by reference.
 */
pub trait Exp {
    type Output;
    fn exp(self) -> Self::Output;
}

/**
 * A type which can compute the natural logarithm of itself.
 *
 * This is implemented by `f32` and `f64` by value and by reference.
 */
pub trait Ln {
    type Output;
    fn ln(self) -> Self::Output;
}

/**
 * A type which can compute the sine of itself.
 *
 * This is implemented by `f32` and `f64` by value and by reference.
 */
pub trait Sin {
    type Output;
    fn sin(self) -> Self::Output;
}

/**
 * A type which can compute the cosine of itself.
 *
 * This is implemented by `f32` and `f64` by value and by reference.
 */
pub trait Cos {
    type Output;
    fn cos(self) -> Self::Output;
}

macro_rules! unary_float_operation {
    ($Trait:tt, $method:ident, $T:ty) => {
        impl $Trait for $T {
            type Output = $T;
            #[inline]
            fn $method(self) -> Self::Output {
                self.$method()
            }
        }
        impl $Trait for &$T {
            type Output = $T;
            #[inline]
            fn $method(self) -> Self::Output {
                (*self).$method()
            }
        }
    };
}

unary_float_operation!(Sqrt, sqrt, f32);
unary_float_operation!(Sqrt, sqrt, f64);
unary_float_operation!(Exp, exp, f32);
unary_float_operation!(Exp, exp, f64);
unary_float_operation!(Ln, ln, f32);
unary_float_operation!(Ln, ln, f64);
unary_float_operation!(Sin, sin, f32);
unary_float_operation!(Sin, sin, f64);
unary_float_operation!(Cos, cos, f32);
unary_float_operation!(Cos, cos, f64);

/**
 * A type which can represent Pi.
 */
pub trait Pi {
    fn pi() -> Self;
}

impl Pi for f32 {
    fn pi() -> f32 {
        std::f32::consts::PI
    }
}

impl Pi for f64 {
    fn pi() -> f64 {
        std::f64::consts::PI
    }
}

/**
 * The transcendental operations on some type, producing some output type.
 * As with [NumericByValue](super::NumericByValue) the default is the familiar
 * case where the output is the same type.
 */
pub trait RealByValue<Output = Self>:
    Sqrt<Output = Output>
    + Exp<Output = Output>
    + Ln<Output = Output>
    + Sin<Output = Output>
    + Cos<Output = Output>
    + Sized
{
}

/**
 * Anything which implements all the transcendental operations will
 * automatically implement this trait too.
 */
impl<T, Output> RealByValue<Output> for T where
    T: Sqrt<Output = Output>
        + Exp<Output = Output>
        + Ln<Output = Output>
        + Sin<Output = Output>
        + Cos<Output = Output>
        + Sized
{
}

/**
 * A trait for types providing the transcendental operations by value,
 * usually as the companion bound to [Numeric](super::Numeric) such as
 * `T: Numeric + Real`.
 */
pub trait Real: RealByValue<Self> + Pi {}

impl<T> Real for T where T: RealByValue<T> + Pi {}

/**
 * The trait to require on `&T` when `T` is [Real], as in
 * `where for<'a> &'a T: RealRef<T>`.
 */
pub trait RealRef<T>: RealByValue<T> {}

impl<RefT, T> RealRef<T> for RefT where RefT: RealByValue<T> {}
}
