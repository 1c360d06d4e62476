/*!
 * Composable gradient transformations.
 *
 * A gradient transformation is a function mapping raw gradients and any
 * optimizer state to parameter updates. Training code computes the gradient
 * of the loss with respect to each weight matrix, passes the gradients
 * through a transformation, and subtracts whatever comes out from the
 * weights. Keeping the pieces separate means clipping, adaptive moment
 * estimation and learning rate schedules are all the same kind of thing and
 * can be [chained](Chain) together in any order.
 *
 * The simplest optimizer is plain gradient descent:
 *
 * ```
 * use tracegrad::matrices::Matrix;
 * use tracegrad::optimizers::{Descent, GradientTransformation};
 * let mut optimizer = Descent::new(0.1);
 * let gradients = vec![ Matrix::row(vec![ 1.0, -2.0 ]) ];
 * let updates = optimizer.transform(gradients);
 * assert_eq!(updates[0], Matrix::row(vec![ 0.1, -0.2 ]));
 * ```
 *
 * An adaptive optimizer with clipping and a learning rate schedule is a
 * chain:
 *
 * ```
 * use tracegrad::optimizers::{
 *     Adam, Chain, ClipByGlobalNorm, ScaleBySchedule, WarmupCosineSchedule,
 * };
 * let optimizer: Chain<f32> = Chain::new(vec![
 *     Box::new(ClipByGlobalNorm::new(1.0)),
 *     Box::new(Adam::<f32>::default()),
 *     Box::new(ScaleBySchedule::new(WarmupCosineSchedule::new(0.01, 100, 1000))),
 * ]);
 * ```
 */

use crate::matrices::Matrix;
use crate::numeric::extra::{Real, RealRef};
use crate::numeric::{Numeric, NumericRef};

/**
 * A function mapping gradients and optimizer state to parameter updates.
 *
 * [transform](GradientTransformation::transform) takes the gradients of the
 * loss with respect to each parameter matrix and returns the update to
 * *subtract* from each corresponding parameter matrix. Stateful
 * transformations such as [Adam] advance their state on each call, so one
 * call corresponds to one training step.
 */
pub trait GradientTransformation<T> {
    /**
     * Maps gradients to parameter updates, advancing any internal state.
     *
     * The length and shapes of the input must be the same on every call.
     */
    fn transform(&mut self, gradients: Vec<Matrix<T>>) -> Vec<Matrix<T>>;
}

/**
 * Combines two matrices of the same size elementwise.
 */
fn elementwise<T: Numeric>(
    left: &Matrix<T>,
    right: &Matrix<T>,
    operation: impl Fn(T, T) -> T,
) -> Matrix<T> {
    assert!(left.size() == right.size(), "Mismatched Matrices");
    let mut result = left.clone();
    for i in 0..left.rows() {
        for j in 0..left.columns() {
            result.set(i, j, operation(left.get(i, j), right.get(i, j)));
        }
    }
    result
}

/**
 * Raises a number to an integer power by repeated multiplication.
 */
fn power<T: Numeric>(base: T, exponent: usize) -> T {
    let mut result = T::one();
    for _ in 0..exponent {
        result = result * base.clone();
    }
    result
}

/**
 * Plain gradient descent: scales every gradient by a fixed learning rate.
 */
pub struct Descent<T> {
    pub learning_rate: T,
}

impl<T> Descent<T> {
    pub fn new(learning_rate: T) -> Descent<T> {
        Descent { learning_rate }
    }
}

impl<T: Numeric> GradientTransformation<T> for Descent<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    fn transform(&mut self, gradients: Vec<Matrix<T>>) -> Vec<Matrix<T>> {
        gradients
            .into_iter()
            .map(|gradient| gradient.map(|g| g * self.learning_rate.clone()))
            .collect()
    }
}

/**
 * Adaptive moment estimation.
 *
 * Maintains exponential moving averages of the gradients and the squared
 * gradients, and emits the bias corrected ratio m̂ / (√v̂ + ε) for each
 * parameter. The emitted updates have roughly unit scale, so the learning
 * rate is applied separately by a [Descent] or [ScaleBySchedule] later in
 * the [Chain] (or by constructing Adam via [with_learning_rate](Adam::with_learning_rate)).
 *
 * The moment buffers are sized lazily from the first gradients seen.
 */
pub struct Adam<T> {
    beta1: T,
    beta2: T,
    epsilon: T,
    moments: Option<Vec<(Matrix<T>, Matrix<T>)>>,
    step: usize,
}

impl<T: Numeric> Adam<T> {
    /**
     * Creates an Adam transformation from the two moment decay rates and the
     * numerical stability constant.
     */
    pub fn new(beta1: T, beta2: T, epsilon: T) -> Adam<T> {
        Adam {
            beta1,
            beta2,
            epsilon,
            moments: None,
            step: 0,
        }
    }
}

macro_rules! adam_default {
    ($T:ty) => {
        /**
         * The standard defaults of β1 = 0.9, β2 = 0.999 and ε = 1e-8.
         */
        impl Default for Adam<$T> {
            fn default() -> Adam<$T> {
                Adam::new(0.9, 0.999, 1e-8)
            }
        }
    };
}

adam_default!(f32);
adam_default!(f64);

impl<T: Numeric + Real + Copy> Adam<T>
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    /**
     * A convenience for using Adam standalone: a [Chain] of this Adam
     * transformation and a [Descent] applying the fixed learning rate.
     */
    pub fn with_learning_rate(self, learning_rate: T) -> Chain<T>
    where
        T: 'static,
    {
        Chain::new(vec![Box::new(self), Box::new(Descent::new(learning_rate))])
    }
}

impl<T: Numeric + Real + Copy> GradientTransformation<T> for Adam<T>
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    fn transform(&mut self, gradients: Vec<Matrix<T>>) -> Vec<Matrix<T>> {
        let moments = self.moments.get_or_insert_with(|| {
            gradients
                .iter()
                .map(|gradient| {
                    (
                        Matrix::empty(T::zero(), gradient.size()),
                        Matrix::empty(T::zero(), gradient.size()),
                    )
                })
                .collect()
        });
        assert!(
            moments.len() == gradients.len(),
            "Number of gradient matrices changed between transform calls"
        );
        self.step += 1;
        let beta1 = self.beta1;
        let beta2 = self.beta2;
        let epsilon = self.epsilon;
        // bias corrections use the number of steps taken so far, undoing the
        // zero initialisation of the moment buffers
        let correction1 = T::one() - power(beta1, self.step);
        let correction2 = T::one() - power(beta2, self.step);
        gradients
            .iter()
            .zip(moments.iter_mut())
            .map(|(gradient, (first, second))| {
                *first = elementwise(first, gradient, |m, g| {
                    (beta1 * m) + ((T::one() - beta1) * g)
                });
                *second = elementwise(second, gradient, |v, g| {
                    (beta2 * v) + ((T::one() - beta2) * g * g)
                });
                elementwise(first, second, |m, v| {
                    let corrected_first = m / correction1;
                    let corrected_second = v / correction2;
                    corrected_first / (corrected_second.sqrt() + epsilon)
                })
            })
            .collect()
    }
}

/**
 * Rescales the entire gradient set when its global L2 norm exceeds a
 * maximum, leaving the direction unchanged. Gradients already within the
 * maximum norm pass through untouched.
 */
pub struct ClipByGlobalNorm<T> {
    pub maximum: T,
}

impl<T> ClipByGlobalNorm<T> {
    pub fn new(maximum: T) -> ClipByGlobalNorm<T> {
        ClipByGlobalNorm { maximum }
    }
}

impl<T: Numeric + Real + Copy> GradientTransformation<T> for ClipByGlobalNorm<T>
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    fn transform(&mut self, gradients: Vec<Matrix<T>>) -> Vec<Matrix<T>> {
        let norm = gradients
            .iter()
            .map(|gradient| {
                gradient
                    .row_major_reference_iter()
                    .map(|g| *g * *g)
                    .sum::<T>()
            })
            .sum::<T>()
            .sqrt();
        if norm <= self.maximum {
            return gradients;
        }
        let scale = self.maximum / norm;
        gradients
            .into_iter()
            .map(|gradient| gradient.map(|g| g * scale))
            .collect()
    }
}

/**
 * A learning rate schedule: a function from the training step number to a
 * learning rate.
 */
pub trait Schedule<T> {
    fn learning_rate(&self, step: usize) -> T;
}

/**
 * Linear warmup from zero to a peak learning rate over the warmup steps,
 * followed by cosine decay from the peak to zero at the total step count.
 * Steps beyond the total hold at zero.
 */
pub struct WarmupCosineSchedule<T> {
    pub peak: T,
    pub warmup_steps: usize,
    pub total_steps: usize,
}

impl<T> WarmupCosineSchedule<T> {
    /**
     * Creates a warmup-cosine schedule. The warmup must be shorter than the
     * total number of steps.
     */
    pub fn new(peak: T, warmup_steps: usize, total_steps: usize) -> WarmupCosineSchedule<T> {
        assert!(
            warmup_steps < total_steps,
            "Warmup must be shorter than the total schedule"
        );
        WarmupCosineSchedule {
            peak,
            warmup_steps,
            total_steps,
        }
    }
}

impl<T: Numeric + Real + Copy> Schedule<T> for WarmupCosineSchedule<T>
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    fn learning_rate(&self, step: usize) -> T {
        let two = T::one() + T::one();
        if step < self.warmup_steps {
            let progress = T::from_usize(step).unwrap() / T::from_usize(self.warmup_steps).unwrap();
            return self.peak * progress;
        }
        let step = step.min(self.total_steps);
        let progress = T::from_usize(step - self.warmup_steps).unwrap()
            / T::from_usize(self.total_steps - self.warmup_steps).unwrap();
        // cosine decay: 1 at the end of warmup, 0 at the final step
        self.peak * ((T::one() + (T::pi() * progress).cos()) / two)
    }
}

/**
 * Scales gradients by a [Schedule]d learning rate, advancing the step count
 * on every transform call.
 */
pub struct ScaleBySchedule<T, S> {
    schedule: S,
    step: usize,
    _type: std::marker::PhantomData<T>,
}

impl<T, S: Schedule<T>> ScaleBySchedule<T, S> {
    pub fn new(schedule: S) -> ScaleBySchedule<T, S> {
        ScaleBySchedule {
            schedule,
            step: 0,
            _type: std::marker::PhantomData,
        }
    }

    /**
     * The number of transform calls made so far.
     */
    pub fn step(&self) -> usize {
        self.step
    }
}

impl<T: Numeric + Copy, S: Schedule<T>> GradientTransformation<T> for ScaleBySchedule<T, S>
where
    for<'a> &'a T: NumericRef<T>,
{
    fn transform(&mut self, gradients: Vec<Matrix<T>>) -> Vec<Matrix<T>> {
        let learning_rate = self.schedule.learning_rate(self.step);
        self.step += 1;
        gradients
            .into_iter()
            .map(|gradient| gradient.map(|g| g * learning_rate))
            .collect()
    }
}

/**
 * Applies a sequence of gradient transformations left to right, feeding the
 * output of each into the next. The composition is itself a gradient
 * transformation, so chains can be nested.
 */
pub struct Chain<T> {
    transformations: Vec<Box<dyn GradientTransformation<T>>>,
}

impl<T> Chain<T> {
    pub fn new(transformations: Vec<Box<dyn GradientTransformation<T>>>) -> Chain<T> {
        Chain { transformations }
    }
}

impl<T> GradientTransformation<T> for Chain<T> {
    fn transform(&mut self, gradients: Vec<Matrix<T>>) -> Vec<Matrix<T>> {
        self.transformations
            .iter_mut()
            .fold(gradients, |gradients, transformation| {
                transformation.transform(gradients)
            })
    }
}
