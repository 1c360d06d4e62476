/*!
 * Automatic differentiation over generic matrices, and a worked example of
 * training a small neural network with it.
 *
 * The building blocks are the [Matrix](./matrices/struct.Matrix.html) type,
 * the forward mode [Trace](./differentiation/struct.Trace.html) and reverse
 * mode [Record](./differentiation/struct.Record.html) numbers for computing
 * derivatives of ordinary Rust functions, and composable
 * [optimizers](./optimizers/index.html) that turn gradients into parameter
 * updates. If this is your first time using the crate you should check out
 * the [usage](./differentiation/usage/index.html) explanations for
 * differentiation, then the parity classification example for how the
 * pieces fit together in a training loop.
 *
 * # Examples
 * - [Parity Classification](./parity_classification/index.html)
 */

pub mod numeric;
pub mod matrices;
pub mod differentiation;
pub mod optimizers;
pub mod parity;
pub mod neural_networks;

// examples
pub mod parity_classification;
