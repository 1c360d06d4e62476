/*!
 * The toy two layer classifier and its training step.
 *
 * The model is logits = relu(input × hidden) × output, with a hidden weight
 * matrix of 8x32 and an output weight matrix of 32x2, trained against the
 * sigmoid cross entropy of the logits with one hot parity labels.
 *
 * The model and loss functions are written generically so the same code runs
 * on plain `f32`s for inference, and on
 * [Record](crate::differentiation::Record)s for training, where
 * [step_gradient] performs reverse mode automatic differentiation to get the
 * gradients and routes them through any
 * [GradientTransformation](crate::optimizers::GradientTransformation).
 *
 * See [parity_classification](crate::parity_classification) for a
 * walkthrough of the full training loop.
 */

use crate::differentiation::{Record, WengertList};
use crate::matrices::Matrix;
use crate::numeric::extra::{Real, RealRef};
use crate::numeric::{Numeric, NumericRef};
use crate::optimizers::GradientTransformation;
use crate::parity::FEATURE_BITS;

use rand::Rng;

/**
 * The number of hidden units in the first layer.
 */
pub const HIDDEN_UNITS: usize = 32;

/**
 * The number of output classes: even parity and odd parity.
 */
pub const CLASSES: usize = 2;

/**
 * The rectified linear unit activation function, max(x, 0).
 *
 * This is written for a generic type, so it can be used with records and
 * also with normal floats.
 */
pub fn relu<T: Numeric + Copy>(x: T) -> T {
    if x > T::zero() { x } else { T::zero() }
}

/**
 * The sigmoid function, 1 / (1 + e^-x).
 *
 * This is written for a generic type, so it can be used with records and
 * also with normal floats.
 */
pub fn sigmoid<T: Numeric + Real + Copy>(x: T) -> T
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    T::one() / (T::one() + (-x).exp())
}

/**
 * The parameters of the classifier: a record of the two weight matrices.
 */
#[derive(Clone, Debug)]
pub struct Parameters<T> {
    /**
     * The hidden layer weights, [FEATURE_BITS] x [HIDDEN_UNITS].
     */
    pub hidden: Matrix<T>,
    /**
     * The output layer weights, [HIDDEN_UNITS] x [CLASSES].
     */
    pub output: Matrix<T>,
}

impl Parameters<f32> {
    /**
     * Randomly initialises both weight matrices from the provided generator,
     * uniformly within ±1/√(fan in). Use a seeded generator such as
     * `rand_chacha::ChaCha8Rng` for reproducible runs.
     */
    pub fn random<R: Rng>(random_generator: &mut R) -> Parameters<f32> {
        Parameters {
            hidden: random_weights(random_generator, FEATURE_BITS, HIDDEN_UNITS),
            output: random_weights(random_generator, HIDDEN_UNITS, CLASSES),
        }
    }

    /**
     * Lifts the weights into [Record] variables backed by the provided
     * WengertList, ready for training.
     */
    pub fn recorded<'a>(&self, history: &'a WengertList<f32>) -> Parameters<Record<'a, f32>> {
        self.map(|x| Record::variable(x, history))
    }
}

impl<T: Clone> Parameters<T> {
    /**
     * Applies a function to every weight in both matrices, creating new
     * parameters. This can be used to change the type of the parameters,
     * such as lifting weights into records or extracting the numbers back
     * out of them.
     */
    pub fn map<U>(&self, mapping_function: impl Fn(T) -> U) -> Parameters<U> {
        Parameters {
            hidden: self.hidden.map(&mapping_function),
            output: self.output.map(&mapping_function),
        }
    }

    /**
     * Applies a function to every weight in both matrices, modifying the
     * parameters.
     */
    pub fn map_mut(&mut self, mapping_function: impl Fn(T) -> T) {
        self.hidden.map_mut(&mapping_function);
        self.output.map_mut(&mapping_function);
    }
}

impl<'a> Parameters<Record<'a, f32>> {
    /**
     * Extracts the weights back out of their records, dropping the training
     * overhead for inference.
     */
    pub fn unrecorded(&self) -> Parameters<f32> {
        self.map(|x| x.number)
    }
}

/**
 * Creates a rows x columns matrix of weights uniformly distributed within
 * ±1/√rows, so the variance of each layer's outputs is roughly independent
 * of its fan in.
 */
fn random_weights<R: Rng>(random_generator: &mut R, rows: usize, columns: usize) -> Matrix<f32> {
    let scale = 1.0 / (rows as f32).sqrt();
    Matrix::from(
        (0..rows)
            .map(|_| {
                (0..columns)
                    .map(|_| (random_generator.random::<f32>() - 0.5) * 2.0 * scale)
                    .collect()
            })
            .collect(),
    )
}

/**
 * The two layer model: logits = relu(input × hidden) × output.
 *
 * Takes a 1x[FEATURE_BITS] input row and returns a 1x[CLASSES] row of
 * logits. This is written for a generic type, so it can be used with
 * records and also with normal floats.
 */
pub fn model<T: Numeric + Copy>(input: &Matrix<T>, parameters: &Parameters<T>) -> Matrix<T>
where
    for<'a> &'a T: NumericRef<T>,
{
    (input * &parameters.hidden).map(relu) * &parameters.output
}

/**
 * The class predicted by a row of logits: true for odd parity.
 */
pub fn classify(logits: &Matrix<f32>) -> bool {
    logits.get(0, 1) > logits.get(0, 0)
}

/**
 * Numerically stable sigmoid cross entropy between a row of logits and a
 * row of one hot targets, averaged over the classes.
 *
 * For each logit x and target z this computes
 * `max(x, 0) - x*z + ln(1 + e^-|x|)`, which is algebraically equal to
 * `-(z ln σ(x) + (1 - z) ln(1 - σ(x)))` but does not overflow the
 * exponential for large magnitude logits.
 */
pub fn sigmoid_cross_entropy<T: Numeric + Real + Copy>(
    logits: &Matrix<T>,
    targets: &Matrix<T>,
) -> T
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    assert!(logits.size() == targets.size(), "Mismatched Matrices");
    let mut sum = T::zero();
    for i in 0..logits.rows() {
        for j in 0..logits.columns() {
            let x = logits.get(i, j);
            let z = targets.get(i, j);
            // both branches pick out x's value and derivative or neither,
            // giving the correct subgradient either side of zero
            let positive = if x > T::zero() { x } else { T::zero() };
            let magnitude = if x > T::zero() { x } else { -x };
            sum = sum + (positive - (x * z) + (T::one() + (-magnitude).exp()).ln());
        }
    }
    sum / T::from_usize(logits.rows() * logits.columns()).unwrap()
}

/**
 * Computes the mean sigmoid cross entropy of the model against all the
 * samples in a batch.
 *
 * This is written for a generic type, so it can be used with records and
 * also with normal floats.
 */
pub fn batch_loss<T: Numeric + Real + Copy>(
    inputs: &[Matrix<T>],
    labels: &[Matrix<T>],
    parameters: &Parameters<T>,
) -> T
where
    for<'a> &'a T: NumericRef<T> + RealRef<T>,
{
    assert!(
        inputs.len() == labels.len(),
        "Every input must have a label"
    );
    assert!(!inputs.is_empty(), "Batch must not be empty");
    inputs
        .iter()
        .zip(labels.iter())
        .fold(T::zero(), |sum: T, (input, label)| {
            sum + sigmoid_cross_entropy::<T>(&model::<T>(input, parameters), label)
        })
        / T::from_usize(inputs.len()).unwrap()
}

/**
 * Updates the weight matrices by one training step.
 *
 * Computes the batch loss with reverse mode automatic differentiation,
 * extracts the gradient of the loss with respect to each weight matrix,
 * maps the gradients through the provided
 * [GradientTransformation](crate::optimizers::GradientTransformation) and
 * subtracts the resulting updates from the weights. The WengertList is
 * cleared and the weights reset onto it afterwards, so the tape does not
 * grow across steps.
 *
 * Returns the loss before the update, for logging.
 */
pub fn step_gradient<'a, O>(
    parameters: &mut Parameters<Record<'a, f32>>,
    inputs: &[Matrix<Record<'a, f32>>],
    labels: &[Matrix<Record<'a, f32>>],
    optimizer: &mut O,
    history: &'a WengertList<f32>,
) -> f32
where
    O: GradientTransformation<f32> + ?Sized,
{
    let loss = batch_loss::<Record<'a, f32>>(inputs, labels, parameters);
    let derivatives = loss.derivatives();
    let gradients = vec![
        parameters.hidden.map(|x| derivatives.at(&x)),
        parameters.output.map(|x| derivatives.at(&x)),
    ];
    let updates = optimizer.transform(gradients);
    subtract_update(&mut parameters.hidden, &updates[0]);
    subtract_update(&mut parameters.output, &updates[1]);
    // reset gradients so the next step starts from an empty tape
    history.clear();
    parameters.map_mut(Record::do_reset);
    loss.number
}

/**
 * Subtracts an update matrix elementwise from a weight matrix of records.
 */
fn subtract_update(weights: &mut Matrix<Record<f32>>, update: &Matrix<f32>) {
    assert!(weights.size() == update.size(), "Mismatched Matrices");
    for i in 0..weights.rows() {
        for j in 0..weights.columns() {
            let weight = weights.get(i, j);
            weights.set(i, j, weight - update.get(i, j));
        }
    }
}
