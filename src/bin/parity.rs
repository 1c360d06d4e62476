/*!
 * Trains the toy parity classifier from the terminal, first with Adam on a
 * fixed learning rate, then with gradient clipping and a warmup cosine
 * learning rate schedule, logging the loss to stdout as it goes.
 */

use tracegrad::differentiation::{Record, WengertList};
use tracegrad::matrices::Matrix;
use tracegrad::neural_networks::{classify, model, step_gradient, Parameters};
use tracegrad::optimizers::{
    Adam, Chain, ClipByGlobalNorm, ScaleBySchedule, WarmupCosineSchedule,
};
use tracegrad::parity::{generate_batch, Batch};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const BATCH_SIZE: usize = 64;
const STEPS: usize = 300;
const LOG_EVERY: usize = 50;
const PEAK_LEARNING_RATE: f32 = 0.05;
const WARMUP_STEPS: usize = 50;

fn main() {
    let mut random_generator = ChaCha8Rng::seed_from_u64(11);
    let batch = generate_batch(&mut random_generator, BATCH_SIZE);
    let initial = Parameters::random(&mut random_generator);

    println!("Training with Adam, learning rate {}", PEAK_LEARNING_RATE);
    let mut optimizer = Adam::<f32>::default().with_learning_rate(PEAK_LEARNING_RATE);
    let trained = train(&initial, &batch, &mut optimizer);
    report_accuracy(&trained, &batch);

    println!(
        "Training with clipping and a warmup cosine schedule peaking at {}",
        PEAK_LEARNING_RATE
    );
    let mut optimizer = Chain::new(vec![
        Box::new(ClipByGlobalNorm::new(1.0)),
        Box::new(Adam::default()),
        Box::new(ScaleBySchedule::new(WarmupCosineSchedule::new(
            PEAK_LEARNING_RATE,
            WARMUP_STEPS,
            STEPS,
        ))),
    ]);
    let trained = train(&initial, &batch, &mut optimizer);
    report_accuracy(&trained, &batch);
}

/**
 * Runs the training loop from the given starting weights, logging the loss
 * every [LOG_EVERY] steps, and returns the trained weights.
 */
fn train(initial: &Parameters<f32>, batch: &Batch, optimizer: &mut Chain<f32>) -> Parameters<f32> {
    let inputs = constants(&batch.inputs);
    let labels = constants(&batch.labels);
    let history = WengertList::new();
    let mut parameters = initial.recorded(&history);
    for step in 0..STEPS {
        let loss = step_gradient(&mut parameters, &inputs, &labels, optimizer, &history);
        if step % LOG_EVERY == 0 {
            println!("Step {} loss: {}", step, loss);
        }
    }
    parameters.unrecorded()
}

/**
 * Lifts a batch's matrices into records with no history, as the inputs and
 * labels take no derivatives.
 */
fn constants(matrices: &[Matrix<f32>]) -> Vec<Matrix<Record<'static, f32>>> {
    matrices
        .iter()
        .map(|matrix| matrix.map(|x| Record::constant(x)))
        .collect()
}

/**
 * Prints how much of the batch the trained model classifies correctly.
 */
fn report_accuracy(parameters: &Parameters<f32>, batch: &Batch) {
    let correct = batch
        .inputs
        .iter()
        .zip(batch.labels.iter())
        .filter(|(input, label)| {
            let odd = classify(&model::<f32>(input, parameters));
            odd == (label.get(0, 1) == 1.0)
        })
        .count();
    println!("Correct: {}/{}", correct, batch.len());
}
