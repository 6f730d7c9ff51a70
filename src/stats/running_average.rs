use std::collections::VecDeque;

use super::round2;

/// Trailing mean over the last `window` values.
///
/// A value is only emitted once more than `window` values have been pushed.
#[derive(Debug, Clone)]
pub struct RunningAverage {
    window: usize,
    seen: usize,
    values: VecDeque<f64>,
}

impl RunningAverage {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            seen: 0,
            values: VecDeque::with_capacity(window + 1),
        }
    }

    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.seen += 1;
        self.values.push_back(value);
        while self.values.len() > self.window {
            self.values.pop_front();
        }

        if self.seen <= self.window || self.values.is_empty() {
            return None;
        }
        let sum: f64 = self.values.iter().sum();
        Some(round2(sum / self.values.len() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_all(values: &[f64], window: usize) -> Vec<Option<f64>> {
        let mut average = RunningAverage::new(window);
        values.iter().map(|&v| average.push(v)).collect()
    }

    #[test]
    fn test_emits_after_window_is_exceeded() {
        let averages = push_all(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);

        assert_eq!(averages, vec![None, None, None, Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_zero_window_emits_nothing() {
        let averages = push_all(&[1.0, 2.0], 0);

        assert_eq!(averages, vec![None, None]);
    }
}
