/*!
 * Automatic differentiation.
 *
 * Two modes are provided. [Trace] is a dual number for forward mode: it is a
 * placeholder value which carries the derivative of every operation applied
 * to it alongside the value itself, so after running a function on a `Trace`
 * the derivative of the output with respect to the traced input is already
 * computed. [Record] performs reverse mode: operations on records append the
 * local derivatives of each operation onto a shared [WengertList], and a
 * single backwards pass over that list yields the derivative of one output
 * with respect to every input at once.
 *
 * Reverse mode is much cheaper when a function has many inputs and few
 * outputs, which is the shape of a loss function over a neural network's
 * weights, so the training code in
 * [neural_networks](crate::neural_networks) uses [Record]. Forward mode is
 * cheaper in the opposite direction and is also the easiest way to sanity
 * check a single derivative.
 *
 * See [usage] for a walkthrough of both.
 */

use crate::numeric::Numeric;
use std::cell::RefCell;
use std::fmt;
use std::ops::Index;

pub use crate::numeric::Primitive;

pub mod record_operations;
pub mod trace_operations;
pub mod usage;

/**
 * A dual number which traces a real number and keeps track of its derivative.
 * This is used to perform forward mode automatic differentiation.
 *
 * Trace implements only first order differentiation. For example, given a
 * function 3x<sup>2</sup>, you can use calculus to work out that its
 * derivative with respect to x is 6x. By instead writing the function
 * 3x<sup>2</sup> in code using Trace types as your numbers you can compute
 * the first order derivative for a given value of x by passing your function
 * `Trace::variable(x)`.
 *
 * ```
 * use tracegrad::differentiation::Trace;
 * let x = Trace::variable(0.75);
 * let dx = Trace::constant(3.0) * x * x;
 * assert_eq!(dx.derivative, 0.75 * 6.0);
 * ```
 */
#[derive(Debug)]
pub struct Trace<T: Primitive> {
    /**
     * The real number component.
     */
    pub number: T,
    /**
     * The first order derivative of this number.
     */
    pub derivative: T,
}

// Traces count as scalars themselves, so derivatives of derivatives can be
// taken by nesting.
impl<T: Primitive> Primitive for Trace<T> {}

impl<T: Numeric + Primitive> Trace<T> {
    /**
     * Constants are lifted to Traces with a derivative of 0.
     */
    pub fn constant(c: T) -> Trace<T> {
        Trace {
            number: c,
            derivative: T::zero(),
        }
    }

    /**
     * To lift a variable that you want to find the derivative of a function
     * with respect to, the Trace starts with a derivative of 1.
     */
    pub fn variable(x: T) -> Trace<T> {
        Trace {
            number: x,
            derivative: T::one(),
        }
    }

    /**
     * Computes the derivative of a function with respect to x.
     *
     * This is a shorthand for `(function(Trace::variable(x))).derivative`
     */
    pub fn derivative(function: impl Fn(Trace<T>) -> Trace<T>, x: T) -> T {
        (function(Trace::variable(x))).derivative
    }
}

/**
 * A single operation on the tape. The parents are the indexes of the inputs
 * the operation was performed on, and the derivatives are the derivative of
 * the operation's output with respect to each input.
 *
 * Nullary operations (the introduction of a variable) use their own index as
 * both parents with derivatives of zero, so the backwards pass can treat
 * every entry uniformly.
 */
#[derive(Debug, Clone)]
struct Operation<T> {
    left_parent: usize,
    right_parent: usize,
    left_derivative: T,
    right_derivative: T,
}

/**
 * A list of operations performed on [Record] types, from which the
 * derivatives of each recorded output with respect to each recorded input
 * can be computed by a backwards pass.
 *
 * The list uses interior mutability so records only need a shared reference
 * to append to it. It is not `Sync`; a tape is expected to live on one
 * thread for the duration of one computation.
 */
#[derive(Debug)]
pub struct WengertList<T> {
    operations: RefCell<Vec<Operation<T>>>,
}

impl<T: Numeric> WengertList<T> {
    /**
     * Creates a new empty WengertList from which [Record]s can be constructed.
     */
    pub fn new() -> WengertList<T> {
        WengertList {
            operations: RefCell::new(Vec::new()),
        }
    }

    /**
     * Clears the list of operations, invalidating the indexes of any records
     * still referring to it. Those records must be [reset](Record::reset)
     * before further use; see the training loop in
     * [neural_networks](crate::neural_networks) for the pattern.
     */
    pub fn clear(&self) {
        self.operations.borrow_mut().clear();
    }

    /**
     * The number of operations currently recorded.
     */
    pub fn len(&self) -> usize {
        self.operations.borrow().len()
    }

    /**
     * True if no operations are recorded.
     */
    pub fn is_empty(&self) -> bool {
        self.operations.borrow().is_empty()
    }

    /**
     * Adds a value to the list which does not derive from anything else,
     * returning its index.
     */
    fn append_nullary(&self) -> usize {
        let mut operations = self.operations.borrow_mut();
        let index = operations.len();
        operations.push(Operation {
            left_parent: index,
            right_parent: index,
            left_derivative: T::zero(),
            right_derivative: T::zero(),
        });
        index
    }

    /**
     * Adds a value to the list which derives from one parent, with the
     * derivative of the new value with respect to that parent, returning
     * the new value's index.
     */
    pub(crate) fn append_unary(&self, parent: usize, derivative: T) -> usize {
        let mut operations = self.operations.borrow_mut();
        let index = operations.len();
        operations.push(Operation {
            left_parent: parent,
            right_parent: index,
            left_derivative: derivative,
            right_derivative: T::zero(),
        });
        index
    }

    /**
     * Adds a value to the list which derives from two parents, with the
     * derivative of the new value with respect to each of them, returning
     * the new value's index.
     */
    pub(crate) fn append_binary(
        &self,
        left_parent: usize,
        left_derivative: T,
        right_parent: usize,
        right_derivative: T,
    ) -> usize {
        let mut operations = self.operations.borrow_mut();
        let index = operations.len();
        operations.push(Operation {
            left_parent,
            right_parent,
            left_derivative,
            right_derivative,
        });
        index
    }
}

impl<T: Numeric> Default for WengertList<T> {
    fn default() -> Self {
        WengertList::new()
    }
}

/**
 * A value which records the operations performed on it onto a [WengertList]
 * so the derivatives of an output with respect to every variable input can
 * be computed by reverse mode automatic differentiation.
 *
 * Records are constructed as [variables](Record::variable) from a
 * WengertList, or as [constants](Record::constant) which do not require one
 * and whose derivatives are not tracked.
 *
 * The lifetime `'a` ties every record to the WengertList it was created
 * from; operations on two records from different lists will panic.
 */
#[derive(Debug)]
pub struct Record<'a, T: Primitive> {
    /**
     * The real number component.
     */
    pub number: T,
    /**
     * The WengertList this record's history is stored on, or None for a
     * constant.
     */
    pub(crate) history: Option<&'a WengertList<T>>,
    /**
     * The index of this record's entry on the WengertList.
     */
    pub(crate) index: usize,
}

impl<'a, T: Primitive> Primitive for Record<'a, T> {}

impl<'a, T: Numeric + Primitive> Record<'a, T> {
    /**
     * Creates an untracked record which is not a variable of the function
     * being differentiated. No operations on constants are recorded unless
     * they also involve a variable.
     */
    pub fn constant(c: T) -> Record<'a, T> {
        Record {
            number: c,
            history: None,
            index: 0,
        }
    }

    /**
     * Creates a record backed by the provided WengertList, as a variable of
     * the function being differentiated.
     */
    pub fn variable(x: T, history: &'a WengertList<T>) -> Record<'a, T> {
        Record {
            number: x,
            history: Some(history),
            index: history.append_nullary(),
        }
    }

    /**
     * Resets this record to place it back on its WengertList with no
     * recorded history, keeping its number. Used together with
     * [WengertList::clear] to avoid growing the tape unboundedly over many
     * training steps.
     */
    pub fn reset(&mut self) {
        match self.history {
            None => (),
            Some(history) => self.index = history.append_nullary(),
        };
    }

    /**
     * A convenience for modifying records in place via
     * [Matrix::map_mut](crate::matrices::Matrix::map_mut), a function form
     * of [reset](Record::reset).
     */
    pub fn do_reset(mut x: Record<T>) -> Record<T> {
        x.reset();
        x
    }

    /**
     * Performs the backwards pass up the WengertList from this record,
     * computing the derivative of this record with respect to every
     * recorded variable.
     *
     * This will panic if the record is a constant, as constants are not
     * tracked on any WengertList.
     */
    #[track_caller]
    pub fn derivatives(&self) -> Derivatives<T> {
        let history = match self.history {
            None => panic!("Records that are constants do not have derivatives to request"),
            Some(history) => history,
        };
        let operations = history.operations.borrow();
        let mut derivatives = vec![T::zero(); operations.len()];
        // the derivative of this record with respect to itself is 1
        derivatives[self.index] = T::one();
        // iterate backwards over the operations that created this record,
        // accumulating chain rule products onto each operation's parents
        for i in (0..=self.index).rev() {
            let operation = &operations[i];
            let derivative = derivatives[i].clone();
            // a nullary operation is its own parent with a derivative of
            // zero, so these additions are no-ops for introduced variables
            derivatives[operation.left_parent] = derivatives[operation.left_parent].clone()
                + (derivative.clone() * operation.left_derivative.clone());
            derivatives[operation.right_parent] = derivatives[operation.right_parent].clone()
                + (derivative * operation.right_derivative.clone());
        }
        Derivatives { derivatives }
    }
}

/**
 * The derivatives of one [Record] output with respect to every variable
 * input recorded on the same [WengertList], produced by
 * [Record::derivatives].
 */
#[derive(Debug, Clone)]
pub struct Derivatives<T> {
    derivatives: Vec<T>,
}

impl<T: Clone + Primitive> Derivatives<T> {
    /**
     * Returns the derivative of the output these derivatives were computed
     * from with respect to the provided record.
     *
     * This will panic if the record is a constant, as no derivatives are
     * tracked for constants.
     */
    #[track_caller]
    pub fn at(&self, input: &Record<T>) -> T {
        self[input].clone()
    }
}

/**
 * Indexing by `&record` yields a reference to the derivative with respect to
 * that record, so `derivatives[&x]` reads naturally in update rules.
 */
impl<'b, T: Primitive> Index<&Record<'b, T>> for Derivatives<T> {
    type Output = T;
    #[track_caller]
    fn index(&self, input: &Record<'b, T>) -> &Self::Output {
        match input.history {
            None => panic!("Records that are constants do not have derivatives to look up"),
            Some(_) => &self.derivatives[input.index],
        }
    }
}

impl<T: fmt::Display + Primitive> fmt::Display for Derivatives<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Derivatives of {} inputs", self.derivatives.len())
    }
}
