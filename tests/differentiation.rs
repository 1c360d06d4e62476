extern crate tracegrad;

#[cfg(test)]
mod forward_tests {
    use tracegrad::differentiation::Trace;

    #[test]
    fn test_adding() {
        let a = Trace {
            number: 2.0,
            derivative: 1.0,
        };
        let b = Trace {
            number: -1.0,
            derivative: 1.0,
        };
        let _c = &a + &b;
        let _d = &a + b;
        let _e = a + &b;
        let _f = a + b;
        assert_eq!(_c, _d);
        assert_eq!(_e, _f);
        assert_eq!(
            _c,
            Trace {
                number: 1.0,
                derivative: 2.0
            }
        );
    }

    fn three_x_squared(x: Trace<f32>) -> Trace<f32> {
        x * x * Trace::constant(3.0)
    }

    fn three_x_squared_derivative(x: f32) -> f32 {
        // d 3(x^2) / dx == 6x
        6.0 * x
    }

    #[test]
    fn test_three_x_squared() {
        let x = 1.5;
        let dx = three_x_squared(Trace::variable(x)).derivative;
        let also_dx = three_x_squared_derivative(x);
        assert_eq!(dx, also_dx);
    }

    #[test]
    fn test_four_x_cubed() {
        let x = 0.75;
        let dx = Trace::derivative(|x| Trace::constant(4.0) * x * x * x, x);
        let also_dx = 12.0 * x * x;
        assert_eq!(dx, also_dx);
    }

    #[test]
    fn test_quotient_rule() {
        // f(x) = x^2 / (x + 1), df/dx = (x^2 + 2x) / (x + 1)^2
        let x = 1.25_f64;
        let dx = Trace::derivative(|x| (x * x) / (x + Trace::constant(1.0)), x);
        let also_dx = ((x * x) + (2.0 * x)) / ((x + 1.0) * (x + 1.0));
        assert!((dx - also_dx).abs() < 1e-10);
    }

    use tracegrad::numeric::Numeric;
    // f(x) = (x^5 + x^3 - 1/x) - x
    // df(x)/dx = 5x^4 + 3x^2 + (1/x^2) - 1
    fn f<T: Numeric + Copy>(x: T) -> T {
        ((x * x * x * x * x) + (x * x * x) - (T::one() / x)) - x
    }

    #[test]
    fn test_numeric_substitution() {
        // the same function written generically with Numeric runs on floats
        // and on Trace<float> and computes the same value
        let x = -0.75;
        let result = f(Trace::variable(x));
        assert_eq!(result.number, f(-0.75));
        let also_dx = (5.0 * x * x * x * x) + (3.0 * x * x) + (1.0 / (x * x)) - 1.0;
        assert_eq!(result.derivative, also_dx);
    }

    use tracegrad::numeric::extra::{Cos, Exp, Ln, Sin, Sqrt};

    #[test]
    fn test_real_functions() {
        let x = 0.8_f64;
        assert!((Trace::variable(x).exp().derivative - x.exp()).abs() < 1e-10);
        assert!((Trace::variable(x).ln().derivative - (1.0 / x)).abs() < 1e-10);
        assert!((Trace::variable(x).sqrt().derivative - (1.0 / (2.0 * x.sqrt()))).abs() < 1e-10);
        assert!((Trace::variable(x).sin().derivative - x.cos()).abs() < 1e-10);
        assert!((Trace::variable(x).cos().derivative - (-x.sin())).abs() < 1e-10);
    }

    #[test]
    fn test_constants_have_no_derivative() {
        let c = Trace::constant(3.0) * Trace::constant(7.0);
        assert_eq!(c.number, 21.0);
        assert_eq!(c.derivative, 0.0);
    }
}

#[cfg(test)]
mod reverse_tests {
    use tracegrad::differentiation::{Record, Trace, WengertList};
    use tracegrad::numeric::extra::{Cos, Exp, Ln, Real, RealRef, Sin, Sqrt};
    use tracegrad::numeric::{Numeric, NumericRef};

    #[test]
    fn test_multiple_derivatives() {
        let list = WengertList::new();
        let x = Record::variable(2.5_f32, &list);
        let y = Record::variable(1.0_f32, &list);
        let z = (&x * &x) + (&y * 3.0);
        let derivatives = z.derivatives();
        assert_eq!(derivatives[&x], 5.0);
        assert_eq!(derivatives[&y], 3.0);
        assert_eq!(z.number, 9.25);
    }

    // a function with enough structure that getting the chain rule wrong
    // anywhere would show up in the derivatives
    fn awkward<T: Numeric + Real + Copy>(x: T, y: T) -> T
    where
        for<'a> &'a T: NumericRef<T> + RealRef<T>,
    {
        ((x * y).sin() + (x - y).exp()) / ((x * x) + T::one())
    }

    #[test]
    fn test_forward_reverse_agreement() {
        let x = 0.6_f64;
        let y = -0.9_f64;
        // forward mode needs one pass per input
        let dx_forward = awkward::<Trace<f64>>(Trace::variable(x), Trace::constant(y)).derivative;
        let dy_forward = awkward::<Trace<f64>>(Trace::constant(x), Trace::variable(y)).derivative;
        // reverse mode gets both from one backwards pass
        let list = WengertList::new();
        let rx = Record::variable(x, &list);
        let ry = Record::variable(y, &list);
        let result = awkward::<Record<f64>>(rx, ry);
        let derivatives = result.derivatives();
        assert!((derivatives[&rx] - dx_forward).abs() < 1e-10);
        assert!((derivatives[&ry] - dy_forward).abs() < 1e-10);
        assert_eq!(result.number, awkward::<f64>(x, y));
    }

    #[test]
    fn test_real_functions() {
        let x = 0.8_f64;
        let list = WengertList::new();
        let a = Record::variable(x, &list);
        assert!((a.exp().derivatives()[&a] - x.exp()).abs() < 1e-10);
        list.clear();
        let a = Record::variable(x, &list);
        assert!((a.ln().derivatives()[&a] - (1.0 / x)).abs() < 1e-10);
        list.clear();
        let a = Record::variable(x, &list);
        assert!((a.sqrt().derivatives()[&a] - (1.0 / (2.0 * x.sqrt()))).abs() < 1e-10);
        list.clear();
        let a = Record::variable(x, &list);
        assert!((a.sin().derivatives()[&a] - x.cos()).abs() < 1e-10);
        list.clear();
        let a = Record::variable(x, &list);
        assert!((a.cos().derivatives()[&a] - (-x.sin())).abs() < 1e-10);
    }

    #[test]
    fn test_division_derivatives() {
        // f(x, y) = x / y, df/dx = 1/y, df/dy = -x/y^2
        let list = WengertList::new();
        let x = Record::variable(3.0_f64, &list);
        let y = Record::variable(4.0_f64, &list);
        let z = &x / &y;
        let derivatives = z.derivatives();
        assert!((derivatives[&x] - 0.25).abs() < 1e-10);
        assert!((derivatives[&y] - (-3.0 / 16.0)).abs() < 1e-10);
    }

    #[test]
    fn test_tape_reuse() {
        let list = WengertList::new();
        let x = Record::variable(2.0_f32, &list);
        let y = &x * &x;
        assert_eq!(y.derivatives()[&x], 4.0);
        let taped = list.len();
        // clearing and resetting reuses the same list without it growing
        list.clear();
        let x = Record::do_reset(x);
        let y = &x * &x;
        assert_eq!(y.derivatives()[&x], 4.0);
        assert_eq!(list.len(), taped);
    }

    #[test]
    fn test_constants_are_not_taped() {
        let list = WengertList::new();
        let x = Record::variable(2.0_f32, &list);
        let sixty_four = (&x * &x) * Record::constant(4.0) * 4.0;
        assert_eq!(sixty_four.number, 64.0);
        // d(16x^2)/dx = 32x
        assert_eq!(sixty_four.derivatives()[&x], 64.0);
    }

    #[test]
    #[should_panic]
    fn test_constant_derivatives_panics() {
        let c: Record<f32> = Record::constant(1.0);
        let _ = c.derivatives();
    }

    #[test]
    #[should_panic]
    fn test_mixed_lists_panic() {
        let list1 = WengertList::new();
        let list2 = WengertList::new();
        let x = Record::variable(1.0_f32, &list1);
        let y = Record::variable(2.0_f32, &list2);
        let _ = &x + &y;
    }

    #[test]
    #[should_panic]
    fn test_indexing_by_constant_panics() {
        let list = WengertList::new();
        let x = Record::variable(2.0_f32, &list);
        let y = &x * &x;
        let derivatives = y.derivatives();
        let constant = Record::constant(1.0_f32);
        let _ = derivatives[&constant];
    }
}
