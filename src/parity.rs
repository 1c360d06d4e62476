/*!
 * The toy parity dataset.
 *
 * Each sample is a vector of 8 random bits, unpacked to one 0.0 or 1.0
 * feature per bit, and the label is the parity of the bits: class 1 if an
 * odd number of bits are set, class 0 otherwise, one hot encoded. Parity is
 * a classic hard case for linear models, every single bit flip changes the
 * label, so nothing short of a non linear remapping of the inputs can
 * separate the classes. This makes it a good smoke test for a small neural
 * network.
 *
 * Batches are ephemeral and regenerated from a random number generator on
 * every run; there is nothing to persist.
 *
 * ```
 * use tracegrad::parity;
 * use rand::SeedableRng;
 * let mut random_generator = rand_chacha::ChaCha8Rng::seed_from_u64(16);
 * let batch = parity::generate_batch(&mut random_generator, 4);
 * assert_eq!(batch.len(), 4);
 * assert_eq!(batch.inputs[0].size(), (1, parity::FEATURE_BITS));
 * assert_eq!(batch.labels[0].size(), (1, 2));
 * ```
 */

use crate::matrices::Matrix;

use rand::Rng;

/**
 * The number of bits in each sample, and hence input features to the
 * classifier.
 */
pub const FEATURE_BITS: usize = 8;

/**
 * Computes the parity of a list of bits: true if an odd number are set.
 */
pub fn parity(bits: &[bool]) -> bool {
    bits.iter().filter(|&&bit| bit).count() % 2 == 1
}

/**
 * A batch of training data: row matrix inputs of 1x[FEATURE_BITS] unpacked
 * bits, and one hot 1x2 label rows, where column 1 is odd parity.
 */
pub struct Batch {
    pub inputs: Vec<Matrix<f32>>,
    pub labels: Vec<Matrix<f32>>,
}

impl Batch {
    /**
     * The number of samples in this batch.
     */
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /**
     * True if the batch has no samples.
     */
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/**
 * Generates a batch of the requested size from the provided random number
 * generator. Use a seeded generator such as `rand_chacha::ChaCha8Rng` for
 * reproducible batches.
 */
pub fn generate_batch<R: Rng>(random_generator: &mut R, size: usize) -> Batch {
    let mut inputs = Vec::with_capacity(size);
    let mut labels = Vec::with_capacity(size);
    for _ in 0..size {
        let bits: Vec<bool> = (0..FEATURE_BITS)
            .map(|_| random_generator.random::<bool>())
            .collect();
        let odd = parity(&bits);
        inputs.push(Matrix::row(
            bits.iter().map(|&bit| if bit { 1.0 } else { 0.0 }).collect(),
        ));
        labels.push(one_hot(odd));
    }
    Batch { inputs, labels }
}

/**
 * One hot encodes a parity label as a 1x2 row matrix.
 */
pub fn one_hot(odd: bool) -> Matrix<f32> {
    if odd {
        Matrix::row(vec![0.0, 1.0])
    } else {
        Matrix::row(vec![1.0, 0.0])
    }
}
