/*!
Parity classification example

The parity of a string of bits is whether the number of 1s in it is even or odd. It is a
classic hard case for shallow learning because no single input bit, and no weighted sum of
input bits, tells you anything about the answer: flipping any one bit always flips the class.
A linear model such as [logistic regression](https://en.wikipedia.org/wiki/Logistic_regression)
over the raw bits can do no better than chance, so parity needs at least one hidden layer of
nonlinearity. This makes an 8 bit parity problem a nice self contained test bed for a small
neural network: 256 possible inputs, a perfectly balanced and noise free labelling, and
plenty of capacity in a 32 unit hidden layer to learn it.

# The model

The [model](crate::neural_networks::model) is as small as a model that can learn parity gets:

<pre>logits = relu(input × hidden) × output</pre>

where input is a 1x8 row of bits as 0.0 or 1.0, hidden is an 8x32 weight matrix, relu is
max(x, 0) applied elementwise, and output is a 32x2 weight matrix, yielding a 1x2 row of
logits, one per class, even then odd.

Rather than mapping the logits through a softmax and taking the log to get a likelihood to
maximise, the loss used here is the
[sigmoid cross entropy](crate::neural_networks::sigmoid_cross_entropy) of the logits against
a one hot labelling of the true class, in the numerically stable formulation

<pre>max(x, 0) - x*z + ln(1 + e^-|x|)</pre>

which never exponentiates a large positive number no matter how confident the logits get.

# Training

Both weight matrices are lifted into [Record](crate::differentiation::Record)s backed by a
[WengertList](crate::differentiation::WengertList), so running the model and loss forwards
also tapes every operation, and one reverse pass through the tape yields the derivative of
the loss with respect to every weight at once. Gradient descent on those raw derivatives
works, but converges slowly and needs the learning rate tuned to the scale of the gradients,
so this example trains with [Adam](crate::optimizers::Adam), which keeps exponential moving
estimates of the mean and uncentered variance of each gradient and scales each weight's
update to roughly unit size.

The second training run composes a longer pipeline out of
[GradientTransformation](crate::optimizers::GradientTransformation)s:
clipping the global norm of the gradients, then Adam, then a learning rate that warms up
linearly from zero and decays back to zero along a cosine. Neither matters much on a problem
this small, but chaining them changes nothing about the training loop itself, which is the
point: the optimizer is just a function from gradients to updates.

# Parity classification example

```
use tracegrad::differentiation::{Record, WengertList};
use tracegrad::matrices::Matrix;
use tracegrad::neural_networks::{classify, model, step_gradient, Parameters};
use tracegrad::optimizers::{
    Adam, Chain, ClipByGlobalNorm, ScaleBySchedule, WarmupCosineSchedule,
};
use tracegrad::parity::generate_batch;

use rand::SeedableRng;

use textplots::{Chart, Plot, Shape};

// use a fixed seed non cryptographically secure random generator from the rand crate
let mut random_generator = rand_chacha::ChaCha8Rng::seed_from_u64(11);

// Generate a fixed batch of bit strings and one hot parity labels to memorise. With only
// 256 distinct inputs there is no point in a train/test split here, the interesting thing
// to watch is the loss falling.
let batch = generate_batch(&mut random_generator, 32);

// The inputs and labels take no derivatives, so they become constants with no history
// rather than variables on the tape.
let inputs = batch
    .inputs
    .iter()
    .map(|input| input.map(|x| Record::constant(x)))
    .collect::<Vec<Matrix<Record<f32>>>>();
let labels = batch
    .labels
    .iter()
    .map(|label| label.map(|x| Record::constant(x)))
    .collect::<Vec<Matrix<Record<f32>>>>();

let initial = Parameters::random(&mut random_generator);

/**
 * Runs the training loop: some number of steps of computing the batch loss, running the
 * tape backwards, and applying the optimizer's updates to the weights, logging the loss
 * every 25 steps. Returns the trained weights and the loss at every step.
 */
fn train(
    initial: &Parameters<f32>,
    inputs: &[Matrix<Record<f32>>],
    labels: &[Matrix<Record<f32>>],
    optimizer: &mut Chain<f32>,
    steps: usize,
) -> (Parameters<f32>, Vec<f32>) {
    let history = WengertList::new();
    let mut parameters = initial.recorded(&history);
    let mut losses = Vec::with_capacity(steps);
    for step in 0..steps {
        let loss = step_gradient(&mut parameters, inputs, labels, optimizer, &history);
        if step % 25 == 0 {
            println!("Step {} loss: {}", step, loss);
        }
        losses.push(loss);
    }
    (parameters.unrecorded(), losses)
}

/**
 * Plots the loss at each training step as a line chart in the terminal.
 */
fn loss_curve(losses: &[f32]) {
    let points = losses
        .iter()
        .enumerate()
        .map(|(step, loss)| (step as f32, *loss))
        .collect::<Vec<(f32, f32)>>();
    Chart::new(180, 60, 0.0, losses.len() as f32)
        .lineplot(&Shape::Lines(&points))
        .display();
}

// First run: Adam with a fixed learning rate. An untrained model is no better than a coin
// flip on a balanced two class problem, so the loss starts out around ln(2) ≈ 0.693.
println!("Training with Adam");
let mut optimizer = Adam::<f32>::default().with_learning_rate(0.05);
let (trained, losses) = train(&initial, &inputs, &labels, &mut optimizer, 150);
loss_curve(&losses);
assert!(losses[losses.len() - 1] < losses[0]);
assert!(losses[losses.len() - 1] < 0.6);

// The trained model should get the parity of most of the batch right.
let correct = batch
    .inputs
    .iter()
    .zip(batch.labels.iter())
    .filter(|(input, label)| {
        let odd = classify(&model::<f32>(input, &trained));
        let labelled_odd = label.get(0, 1) == 1.0;
        odd == labelled_odd
    })
    .count();
println!("Correct: {}/{}", correct, batch.len());
assert!(correct * 2 > batch.len());

// Second run: the same Adam core, but with the gradients clipped to a maximum global norm
// of 1.0 before the moment estimates see them, and the learning rate following a warmup
// then cosine decay schedule peaking at 0.05 in place of the fixed rate.
println!("Training with clipping and a warmup cosine schedule");
let mut optimizer = Chain::new(vec![
    Box::new(ClipByGlobalNorm::new(1.0)),
    Box::new(Adam::default()),
    Box::new(ScaleBySchedule::new(WarmupCosineSchedule::new(0.05, 20, 150))),
]);
let (_, losses) = train(&initial, &inputs, &labels, &mut optimizer, 150);
loss_curve(&losses);
assert!(losses[losses.len() - 1] < losses[0]);
```
*/
