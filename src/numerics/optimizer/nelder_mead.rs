extern crate nalgebra as na;

use std::cell::Cell;
use na::SVector;
use serde::{Serialize, Deserialize};
use crate::Float;

const REFLECTION: Float = 1.0;
const EXPANSION: Float = 2.0;
const CONTRACTION: Float = 0.5;
const SHRINK: Float = 0.5;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct NelderMeadParameters {
    /** Raised to N+1 if smaller, the initial simplex is always evaluated */
    pub max_evaluations: usize,
    pub max_iterations: usize,
    /** Minimum decrease of the best value that counts as progress */
    pub absolute_tolerance: Float,
    /** Number of consecutive iterations without progress before the search stops */
    pub converge_iterations: usize
}

impl Default for NelderMeadParameters {
    fn default() -> Self {
        NelderMeadParameters{max_evaluations: 1000, max_iterations: 1000, absolute_tolerance: 5e-4, converge_iterations: 10}
    }
}

#[derive(Debug,Clone,Copy)]
pub struct NelderMeadResult<const N: usize> {
    pub location: SVector<Float,N>,
    pub value: Float,
    pub evaluations: usize,
    pub iterations: usize,
    pub converged: bool
}

/**
 * Derivative free simplex search (Nelder & Mead, 1965) minimizing `objective`.
 * The initial simplex is x0 and x0 + steps[i]*e_i. Deterministic for a deterministic objective.
 * The returned location is never worse than x0.
 * The initial simplex always costs N+1 evaluations, so the budget is max(max_evaluations, N+1).
 */
pub fn minimize<F, const N: usize>(objective: F, x0: &SVector<Float,N>, steps: &SVector<Float,N>, parameters: &NelderMeadParameters) -> NelderMeadResult<N> where F: Fn(&SVector<Float,N>) -> Float {
    assert!(N > 0, "Nelder-Mead needs at least one parameter");
    let max_evaluations = parameters.max_evaluations.max(N+1);
    let evaluations = Cell::new(0usize);
    let evaluate = |x: &SVector<Float,N>| -> Float {
        evaluations.set(evaluations.get() + 1);
        sanitize(objective(x))
    };

    let mut simplex = Vec::<(SVector<Float,N>,Float)>::with_capacity(N+1);
    simplex.push((*x0, evaluate(x0)));
    for i in 0..N {
        let mut x = *x0;
        x[i] += steps[i];
        simplex.push((x, evaluate(&x)));
    }

    // stable sort keeps the earlier vertex first on ties
    simplex.sort_by(|a,b| a.1.total_cmp(&b.1));
    let mut best_tracked = simplex[0].1;
    let mut stall_count = 0;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < parameters.max_iterations && evaluations.get() + N + 2 <= max_evaluations {
        iterations += 1;

        let worst = simplex[N];
        let second_worst_value = simplex[N-1].1;
        let best_value = simplex[0].1;
        let centroid = simplex[0..N].iter().fold(SVector::<Float,N>::zeros(), |acc, (x,_)| acc + x)/(N as Float);

        let reflected = centroid + (centroid - worst.0)*REFLECTION;
        let reflected_value = evaluate(&reflected);

        if reflected_value < best_value {
            let expanded = centroid + (reflected - centroid)*EXPANSION;
            let expanded_value = evaluate(&expanded);
            simplex[N] = match expanded_value < reflected_value {
                true => (expanded, expanded_value),
                false => (reflected, reflected_value)
            };
        } else if reflected_value < second_worst_value {
            simplex[N] = (reflected, reflected_value);
        } else {
            let (contracted, accept_bound) = match reflected_value < worst.1 {
                true => (centroid + (reflected - centroid)*CONTRACTION, reflected_value),
                false => (centroid + (worst.0 - centroid)*CONTRACTION, worst.1)
            };
            let contracted_value = evaluate(&contracted);
            if contracted_value < accept_bound {
                simplex[N] = (contracted, contracted_value);
            } else {
                let best = simplex[0].0;
                for vertex in simplex.iter_mut().skip(1) {
                    let x = best + (vertex.0 - best)*SHRINK;
                    *vertex = (x, evaluate(&x));
                }
            }
        }

        simplex.sort_by(|a,b| a.1.total_cmp(&b.1));

        match best_tracked - simplex[0].1 > parameters.absolute_tolerance {
            true => {
                best_tracked = simplex[0].1;
                stall_count = 0;
            },
            false => stall_count += 1
        };

        if stall_count >= parameters.converge_iterations {
            converged = true;
            break;
        }
    }

    NelderMeadResult{location: simplex[0].0, value: simplex[0].1, evaluations: evaluations.get(), iterations, converged}
}

fn sanitize(value: Float) -> Float {
    match value.is_nan() {
        true => Float::INFINITY,
        false => value
    }
}
