/*!
 * # Usage of Trace and Record
 *
 * Both [Trace](super::Trace) and [Record](super::Record), for forward and
 * reverse automatic differentiation respectively, implement
 * [Numeric](crate::numeric::Numeric) and can generally be treated as normal
 * numbers just like `f32` and `f64`.
 *
 * `Trace` is literally implemented as a dual number and is a one to one
 * substitution: it is a placeholder value which carries the derivative of
 * every operation applied to it forwards alongside the value. `Record`
 * instead dynamically builds up a list of the operations performed on it, so
 * performing operations on records has a side effect, appending entries onto
 * a [WengertList](super::WengertList). The side effects are abstracted away;
 * just create a WengertList before you start creating records from it.
 *
 * Given some function from N inputs to M outputs you can pass it Traces or
 * Records and retrieve the first derivative from the outputs for all
 * combinations of N and M. If N >> M, as when differentiating a loss
 * function with respect to every weight in a network, you should use
 * `Record` as reverse mode is much cheaper: one backwards pass computes the
 * derivative with respect to every input at once. If N << M you should use
 * `Trace`. Most machine learning problems are N > M.
 *
 * ## Using Trace
 *
 * A single sigmoid neuron with one weight and one bias makes a small enough
 * example to check against calculus by hand. In forward mode the neuron is
 * run once per parameter we want the derivative for, with that parameter as
 * the sole variable.
 *
 * ```
 * use tracegrad::differentiation::Trace;
 * use tracegrad::numeric::extra::Exp;
 * fn activation(w: Trace<f32>, b: Trace<f32>, input: f32) -> Trace<f32> {
 *     let z = (w * input) + b;
 *     Trace::constant(1.0) / (Trace::constant(1.0) + (-z).exp())
 * }
 * // the derivative with respect to the weight
 * let da_dw = activation(Trace::variable(0.9), Trace::constant(-0.3), 0.5).derivative;
 * // rerun with the bias as the variable for the derivative with respect to it
 * let da_db = activation(Trace::constant(0.9), Trace::variable(-0.3), 0.5).derivative;
 * // the sigmoid is increasing in its input, and the input of 0.5 is
 * // positive, so nudging either parameter up nudges the activation up
 * assert!(da_dw > 0.0);
 * assert!(da_db > 0.0);
 * ```
 *
 * ## Using Record
 *
 * In reverse mode the neuron is run once, and a single backwards pass over
 * the tape recovers the derivatives for every parameter at the same time.
 *
 * ```
 * use tracegrad::differentiation::{Record, WengertList};
 * use tracegrad::numeric::extra::Exp;
 * // the lifetime ties each record to the WengertList its operations
 * // are recorded on
 * fn activation<'a>(
 *     w: Record<'a, f32>,
 *     b: Record<'a, f32>,
 *     input: f32,
 * ) -> Record<'a, f32> {
 *     let z = (w * input) + b;
 *     Record::constant(1.0) / (Record::constant(1.0) + (-z).exp())
 * }
 * // records are created from a WengertList, which must outlive them
 * let list = WengertList::new();
 * let w = Record::variable(0.9, &list);
 * let b = Record::variable(-0.3, &list);
 * let a = activation(w, b, 0.5);
 * // one backwards pass computes both derivatives
 * let derivatives = a.derivatives();
 * let da_dw = derivatives[&w];
 * let da_db = derivatives[&b];
 * assert!(da_dw > 0.0);
 * assert!(da_db > 0.0);
 * ```
 *
 * Both examples find the same two derivatives, but forward mode pays one
 * run of the function per input whereas reverse mode pays one backwards
 * pass per output. A neuron has one output and the networks in
 * [neural_networks](crate::neural_networks) have a single scalar loss, so
 * reverse mode wins as soon as there is more than a handful of parameters.
 * With reverse mode we would only pass constants into `activation` if we
 * didn't want their derivatives, to avoid recording operations we will
 * never look up.
 *
 * ## Substitution
 *
 * There is no need to write a function twice, as the
 * [Numeric](crate::numeric::Numeric) and
 * [Real](crate::numeric::extra::Real) traits let you write one function that
 * will take floating point numbers, Traces and Records.
 *
 * ```
 * use tracegrad::differentiation::{Trace, Record, WengertList};
 * use tracegrad::numeric::Numeric;
 * use tracegrad::numeric::extra::Real;
 * fn awkward<T>(x: T, y: T) -> T
 * where T: Numeric + Real + Copy {
 *     (x * x * y).sin() + y.exp()
 * }
 * let list = WengertList::new();
 * let x_record = Record::variable(0.3_f32, &list);
 * let y_record = Record::variable(0.6_f32, &list);
 * let z_record = awkward(x_record, y_record);
 * // find dz/dx using reverse mode automatic differentiation
 * let z_derivatives = z_record.derivatives();
 * let dz_dx_reverse = z_derivatives[&x_record];
 * // now find dz/dx with forward automatic differentiation
 * let z_trace = awkward(Trace::variable(0.3_f32), Trace::constant(0.6_f32));
 * let dz_dx_forward = z_trace.derivative;
 * assert!((dz_dx_reverse - dz_dx_forward).abs() < 1e-6);
 * let z = awkward(0.3f32, 0.6f32);
 * assert_eq!(z, z_record.number);
 * assert_eq!(z, z_trace.number);
 * ```
 *
 * Although in this example the derivatives found are nearly identical, in
 * practice, because forward and reverse mode compute things differently and
 * floating point numbers have limited precision, you should not expect the
 * derivatives to be exactly equal.
 *
 * ## Reusing the tape
 *
 * Every operation on a variable record grows the WengertList, so a training
 * loop that runs thousands of gradient steps must not keep appending to the
 * same history forever. After the weights have been updated at the end of a
 * step, [WengertList::clear](super::WengertList::clear) throws away the
 * recorded operations and [Record::do_reset](super::Record::do_reset) places
 * each weight back on the now empty list. Clearing invalidates the indexes
 * of all other records which were created from the list, so reset must be
 * applied to everything still in use. The
 * [neural_networks](crate::neural_networks) module does this at the end of
 * every [step_gradient](crate::neural_networks::step_gradient) call.
 */
