use rand::Rng;

use crate::call::OutcomeWeight;
use crate::error::BlastError;

/// Source of uniform draws in `[0, 1)`.
///
/// Injected into the selector so tests can script the exact sequence of
/// draws; production uses [`ThreadRandom`].
pub trait RandomSource: Send + Sync {
    fn next_fraction(&self) -> f64;
}

/// Thread-local RNG backed by the `rand` crate.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_fraction(&self) -> f64 {
        rand::thread_rng().r#gen::<f64>()
    }
}

/// Draw one outcome label with probability proportional to its weight.
///
/// The draw is `uniform[0, 1) × total`; the sequence is walked in order and
/// the first label whose weight covers the remaining draw wins. An empty
/// distribution, or one whose weights sum to zero, is a configuration error —
/// never a silent default.
pub fn select_outcome(
    weights: &[OutcomeWeight],
    rng: &impl RandomSource,
) -> Result<String, BlastError> {
    let total: f64 = weights.iter().map(|w| w.weight).sum();
    if weights.is_empty() || total <= 0.0 {
        return Err(BlastError::NoOutcomesConfigured);
    }

    let mut draw = rng.next_fraction() * total;
    for entry in weights {
        if draw < entry.weight {
            return Ok(entry.label.clone());
        }
        draw -= entry.weight;
    }

    // Rounding can push the draw past the final bucket; the last entry with
    // positive weight takes it.
    weights
        .iter()
        .rev()
        .find(|entry| entry.weight > 0.0)
        .map(|entry| entry.label.clone())
        .ok_or(BlastError::NoOutcomesConfigured)
}

/// Scripted random source for deterministic tests. Yields the configured
/// fractions in order and repeats the last one when exhausted.
#[cfg(test)]
pub(crate) struct SequenceRandom {
    values: std::sync::Mutex<Vec<f64>>,
    last: f64,
}

#[cfg(test)]
impl SequenceRandom {
    pub(crate) fn new(values: &[f64]) -> Self {
        let last = values.last().copied().unwrap_or(0.0);
        let mut queue = values.to_vec();
        queue.reverse();
        Self {
            values: std::sync::Mutex::new(queue),
            last,
        }
    }
}

#[cfg(test)]
impl RandomSource for SequenceRandom {
    fn next_fraction(&self) -> f64 {
        self.values.lock().unwrap().pop().unwrap_or(self.last)
    }
}
