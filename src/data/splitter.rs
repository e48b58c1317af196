// ============================================================
// Layer 4 - Stratified Train/Test Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them into a
// training set and a held-out test set, keeping the share of
// every class the same on both sides (up to rounding).
//
// Allocation:
//   n_test  = ceil(test_size * n)
//   n_train = n - n_test
//   per-class train counts are n_train * class_count / n,
//   floored, with the leftover rows handed out by largest
//   remainder (ties drawn with the RNG). Each class keeps the
//   rest for the test side.
//
// Each class is shuffled before it is cut, and both sides are
// shuffled once more at the end so classes are interleaved.
// The same input and seed always give the same split.
//
// Reference: rand crate documentation (SeedableRng, SliceRandom)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::collections::BTreeMap;
use std::fmt::Display;

use crate::domain::error::PipelineError;
use crate::domain::review::{LabeledText, Split};

/// Split `samples` into (train, test), stratified by `class_of`.
///
/// # Errors
/// * `InvalidTestSize` unless 0 < test_size < 1
/// * `StratificationInfeasible` if some class has fewer than 2 members
/// * `SplitTooSmall` if either side has fewer rows than there are classes
pub fn stratified_split<T, K, F>(
    samples:   Vec<T>,
    class_of:  F,
    test_size: f64,
    seed:      u64,
) -> Result<(Vec<T>, Vec<T>), PipelineError>
where
    K: Ord + Display,
    F: Fn(&T) -> K,
{
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PipelineError::InvalidTestSize(test_size));
    }

    let total = samples.len();
    if total == 0 {
        tracing::warn!("Nothing to split: no rows survived cleaning");
        return Ok((Vec::new(), Vec::new()));
    }

    // ── Group row indices by class, classes in sorted order ───────────────────
    let mut by_class: BTreeMap<K, Vec<usize>> = BTreeMap::new();
    for (idx, sample) in samples.iter().enumerate() {
        by_class.entry(class_of(sample)).or_default().push(idx);
    }

    if let Some((class, members)) = by_class.iter().find(|(_, m)| m.len() < 2) {
        return Err(PipelineError::StratificationInfeasible {
            class: class.to_string(),
            count: members.len(),
        });
    }

    let n_test  = ((test_size * total as f64).ceil() as usize).min(total);
    let n_train = total - n_test;
    let classes = by_class.len();

    if n_train < classes || n_test < classes {
        return Err(PipelineError::SplitTooSmall {
            total,
            train: n_train,
            test:  n_test,
            classes,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);

    // ── Per-class allocation ──────────────────────────────────────────────────
    let counts: Vec<usize> = by_class.values().map(Vec::len).collect();
    let train_counts = approximate_mode(&counts, n_train, &mut rng);

    // ── Shuffle each class and cut it ─────────────────────────────────────────
    let mut train_idx = Vec::with_capacity(n_train);
    let mut test_idx  = Vec::with_capacity(n_test);

    for (mut members, n_i) in by_class.into_values().zip(train_counts) {
        members.shuffle(&mut rng);
        let rest = members.split_off(n_i);
        train_idx.extend(members);
        test_idx.extend(rest);
    }

    train_idx.shuffle(&mut rng);
    test_idx.shuffle(&mut rng);

    // ── Move samples into their side ──────────────────────────────────────────
    let mut slots: Vec<Option<T>> = samples.into_iter().map(Some).collect();
    let mut take = |indices: Vec<usize>| -> Vec<T> {
        indices.into_iter().filter_map(|i| slots[i].take()).collect()
    };
    let train = take(train_idx);
    let test  = take(test_idx);

    tracing::debug!(
        "Dataset split: {} training, {} test ({} classes)",
        train.len(),
        test.len(),
        classes,
    );

    Ok((train, test))
}

/// Stratified split of labelled rows by sentiment
pub fn split_labeled(
    rows:      Vec<LabeledText>,
    test_size: f64,
    seed:      u64,
) -> Result<Split, PipelineError> {
    let (train, test) = stratified_split(rows, |r: &LabeledText| r.sentiment, test_size, seed)?;
    Ok(Split { train, test })
}

/// Spread `n_draws` over classes in proportion to `counts`.
///
/// Floors the exact shares, then gives one extra draw to the
/// classes with the largest remainders until `n_draws` is met.
/// Classes with equal remainders are picked at random.
fn approximate_mode(counts: &[usize], n_draws: usize, rng: &mut StdRng) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0; counts.len()];
    }

    // integer arithmetic keeps remainder ties exact
    let mut floored: Vec<usize> = counts.iter().map(|c| c * n_draws / total).collect();
    let remainders: Vec<usize> = counts.iter().map(|c| c * n_draws % total).collect();

    let mut need = n_draws - floored.iter().sum::<usize>();

    let mut levels: Vec<usize> = remainders.clone();
    levels.sort_unstable_by(|a, b| b.cmp(a));
    levels.dedup();

    for level in levels {
        if need == 0 {
            break;
        }
        let mut tied: Vec<usize> = (0..counts.len())
            .filter(|&i| remainders[i] == level)
            .collect();
        tied.shuffle(rng);

        for &i in tied.iter().take(need) {
            floored[i] += 1;
        }
        need = need.saturating_sub(tied.len());
    }

    floored
}
