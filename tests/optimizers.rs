extern crate tracegrad;

#[cfg(test)]
mod tests {
    use tracegrad::matrices::Matrix;
    use tracegrad::optimizers::{
        Adam, Chain, ClipByGlobalNorm, Descent, GradientTransformation, ScaleBySchedule, Schedule,
        WarmupCosineSchedule,
    };

    #[test]
    fn check_descent_scales_gradients() {
        let mut descent = Descent::new(0.1_f32);
        let gradients = vec![Matrix::from(vec![vec![1.0, -2.0], vec![4.0, 0.0]])];
        let updates = descent.transform(gradients);
        assert_eq!(
            updates[0],
            Matrix::from(vec![vec![0.1, -0.2], vec![0.4, 0.0]])
        );
    }

    #[test]
    fn check_adam_first_step_is_unit_scale() {
        // on the first step the bias corrected moment estimates are exactly
        // the gradient and its square, so every update is g / (|g| + ε),
        // roughly ±1 regardless of the gradient's magnitude
        let mut adam: Adam<f64> = Adam::default();
        let gradients = vec![Matrix::row(vec![100.0, -0.001])];
        let updates = adam.transform(gradients);
        assert!((updates[0].get(0, 0) - 1.0).abs() < 1e-3);
        assert!((updates[0].get(0, 1) + 1.0).abs() < 1e-3);
    }

    #[test]
    fn check_adam_minimises_quadratic() {
        // minimise f(x) = (x - 3)^2 from x = 0, gradient 2(x - 3)
        let mut optimizer = Adam::<f64>::default().with_learning_rate(0.1);
        let mut x = 0.0;
        for _ in 0..200 {
            let gradient = 2.0 * (x - 3.0);
            let updates = optimizer.transform(vec![Matrix::unit(gradient)]);
            x -= updates[0].get(0, 0);
        }
        assert!((x - 3.0).abs() < 0.25);
    }

    fn global_norm(gradients: &[Matrix<f64>]) -> f64 {
        gradients
            .iter()
            .map(|gradient| {
                gradient
                    .row_major_reference_iter()
                    .map(|g| g * g)
                    .sum::<f64>()
            })
            .sum::<f64>()
            .sqrt()
    }

    #[test]
    fn check_clipping_large_gradients() {
        let mut clip = ClipByGlobalNorm::new(1.0_f64);
        let gradients = vec![
            Matrix::row(vec![3.0, 4.0]),
            Matrix::row(vec![0.0, 12.0]),
        ];
        // norm is sqrt(9 + 16 + 144) = 13
        assert_eq!(global_norm(&gradients), 13.0);
        let clipped = clip.transform(gradients);
        assert!((global_norm(&clipped) - 1.0).abs() < 1e-10);
        // direction is unchanged, only the magnitude shrinks
        assert!((clipped[0].get(0, 0) - (3.0 / 13.0)).abs() < 1e-10);
        assert!((clipped[1].get(0, 1) - (12.0 / 13.0)).abs() < 1e-10);
    }

    #[test]
    fn check_clipping_small_gradients_unchanged() {
        let mut clip = ClipByGlobalNorm::new(1.0_f64);
        let gradients = vec![Matrix::row(vec![0.3, 0.4])];
        let clipped = clip.transform(gradients.clone());
        assert_eq!(clipped, gradients);
    }

    #[test]
    fn check_warmup_cosine_schedule_endpoints() {
        let schedule = WarmupCosineSchedule::new(0.1_f64, 10, 100);
        // starts at zero, warms up linearly to the peak
        assert_eq!(schedule.learning_rate(0), 0.0);
        assert!((schedule.learning_rate(5) - 0.05).abs() < 1e-10);
        assert!((schedule.learning_rate(10) - 0.1).abs() < 1e-10);
        // decays back to zero at the end and stays there
        assert!(schedule.learning_rate(100).abs() < 1e-10);
        assert!(schedule.learning_rate(250).abs() < 1e-10);
    }

    #[test]
    fn check_warmup_cosine_schedule_shape() {
        let schedule = WarmupCosineSchedule::new(0.1_f64, 10, 100);
        // never negative, never exceeds the peak, monotonic decay after warmup
        let mut previous = schedule.learning_rate(10);
        for step in 11..=100 {
            let rate = schedule.learning_rate(step);
            assert!(rate >= 0.0);
            assert!(rate <= 0.1);
            assert!(rate <= previous);
            previous = rate;
        }
    }

    #[test]
    #[should_panic]
    fn check_warmup_longer_than_schedule_rejected() {
        let _ = WarmupCosineSchedule::new(0.1_f64, 100, 100);
    }

    #[test]
    fn check_scale_by_schedule_advances() {
        let mut scaled = ScaleBySchedule::new(WarmupCosineSchedule::new(1.0_f64, 2, 10));
        assert_eq!(scaled.step(), 0);
        // first call is step 0 of the warmup, so everything scales to zero
        let updates = scaled.transform(vec![Matrix::unit(5.0)]);
        assert_eq!(updates[0].get(0, 0), 0.0);
        assert_eq!(scaled.step(), 1);
        // second call is halfway through the warmup
        let updates = scaled.transform(vec![Matrix::unit(5.0)]);
        assert!((updates[0].get(0, 0) - 2.5).abs() < 1e-10);
        assert_eq!(scaled.step(), 2);
    }

    #[test]
    fn check_chain_composes_in_order() {
        // clipping to norm 2 then descending at 0.5 should produce an update
        // of norm 1 in the gradient's direction
        let mut chain: Chain<f64> = Chain::new(vec![
            Box::new(ClipByGlobalNorm::new(2.0)),
            Box::new(Descent::new(0.5)),
        ]);
        let updates = chain.transform(vec![Matrix::row(vec![6.0, 8.0])]);
        assert!((updates[0].get(0, 0) - 0.6).abs() < 1e-10);
        assert!((updates[0].get(0, 1) - 0.8).abs() < 1e-10);
    }

    #[test]
    fn check_adam_with_learning_rate_minimises_rosenbrock_slowly() {
        // a few steps on the banana function should at least reduce it
        fn rosenbrock(x: f64, y: f64) -> f64 {
            (1.0 - x) * (1.0 - x) + 100.0 * (y - x * x) * (y - x * x)
        }
        let mut optimizer = Adam::<f64>::default().with_learning_rate(0.02);
        let (mut x, mut y) = (-1.0, 1.0);
        let start = rosenbrock(x, y);
        for _ in 0..100 {
            let dx = -2.0 * (1.0 - x) - 400.0 * x * (y - x * x);
            let dy = 200.0 * (y - x * x);
            let updates = optimizer.transform(vec![Matrix::row(vec![dx, dy])]);
            x -= updates[0].get(0, 0);
            y -= updates[0].get(0, 1);
        }
        assert!(rosenbrock(x, y) < start);
    }
}
