/// Index of the largest value. Ties resolve to the lowest index, so the
/// result only depends on the values and never on iteration luck.
#[inline(always)]
pub fn argmax<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> usize {
    let mut iter = values.into_iter().enumerate();
    let (mut result, mut max) = match iter.next() {
        Some((i, v)) => (i, *v),
        None => return 0,
    };
    for (i, v) in iter {
        if *v > max {
            max = *v;
            result = i;
        }
    }
    result
}

#[inline(always)]
pub fn max<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> f64 {
    values.into_iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Picks the first index whose cumulative probability exceeds `random`.
/// `random` is expected in `[0, 1)`; rounding leftovers fall on the last index.
#[inline(always)]
pub fn categorical_sample<'a, I: IntoIterator<Item = &'a f64>>(probs: I, random: f64) -> usize {
    let mut cumulative: f64 = 0.0;
    let mut last: usize = 0;
    for (i, p) in probs.into_iter().enumerate() {
        cumulative += p;
        if cumulative > random {
            return i;
        }
        last = i;
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_prefers_lowest_index_on_ties() {
        assert_eq!(argmax(&[5.0, 5.0, 3.0, 0.0]), 0);
        assert_eq!(argmax(&[-1.0, 2.0, 2.0]), 1);
        assert_eq!(argmax(&[0.0, 0.0, 0.0, 0.0]), 0);
    }

    #[test]
    fn argmax_finds_last_position() {
        assert_eq!(argmax(&[-3.0, -2.0, -1.0]), 2);
    }

    #[test]
    fn categorical_sample_walks_cumulative_mass() {
        let probs = [0.25, 0.5, 0.25];
        assert_eq!(categorical_sample(&probs, 0.0), 0);
        assert_eq!(categorical_sample(&probs, 0.3), 1);
        assert_eq!(categorical_sample(&probs, 0.74), 1);
        assert_eq!(categorical_sample(&probs, 0.9), 2);
    }

    #[test]
    fn categorical_sample_skips_zero_mass() {
        assert_eq!(categorical_sample(&[0.0, 1.0, 0.0], 0.0), 1);
        assert_eq!(categorical_sample(&[0.0, 0.0, 1.0], 0.999), 2);
    }
}
