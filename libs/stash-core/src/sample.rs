use rand::Rng;
use rand::seq::IndexedRandom;

/// Draws `min(max, lines.len())` lines uniformly without replacement.
/// `choose_multiple` runs a partial Fisher-Yates over the indices, so every
/// line is equally likely and none repeats.
pub fn sample_lines<'a, R: Rng + ?Sized>(
    rng: &mut R,
    lines: &[&'a str],
    max: usize,
) -> Vec<&'a str> {
    lines.choose_multiple(rng, max).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn numbered_lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line-{i}")).collect()
    }

    #[test]
    fn asking_for_more_than_available_returns_everything() {
        let owned = numbered_lines(50);
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let selected = sample_lines(&mut rng, &lines, 100);
        assert_eq!(selected.len(), 50);
        let unique: HashSet<_> = selected.iter().collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn draws_exactly_the_requested_count_without_duplicates() {
        let owned = numbered_lines(1000);
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let selected = sample_lines(&mut rng, &lines, 100);
        assert_eq!(selected.len(), 100);

        let source: HashSet<_> = lines.iter().collect();
        let unique: HashSet<_> = selected.iter().collect();
        assert_eq!(unique.len(), 100);
        assert!(selected.iter().all(|line| source.contains(line)));
    }

    #[test]
    fn empty_input_yields_empty_sample() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(sample_lines(&mut rng, &[], 100).is_empty());
    }
}
