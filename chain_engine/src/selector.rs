//! Policy ranking - one matrix instead of four hand-written paths.
//!
//! Both policies run over either pool. Ranked pools carry frequencies,
//! unranked pools do not; the tie-break order below collapses the four
//! combinations: with frequencies it means most/least frequent, without
//! them both orders degrade to "alphabetically first".

use std::collections::BTreeSet;

use word_lexicon::Candidate;

use crate::registry::Policy;

/// Direction of the frequency tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RankOrder {
    MostFrequent,
    LeastFrequent,
}

/// Choose the best candidate from a pool under the given policy.
///
/// `targets` is the set of least-frequent starting letters; only
/// RARE_ENDING consults it. Returns `None` only for an empty pool.
pub fn choose<'a>(
    policy: Policy,
    pool: &'a [Candidate],
    targets: &BTreeSet<char>,
) -> Option<&'a Candidate> {
    match policy {
        Policy::RankPreferred => best(pool.iter(), RankOrder::MostFrequent),
        Policy::RareEnding => {
            let rare_ending = pool
                .iter()
                .filter(|c| c.last_letter().is_some_and(|l| targets.contains(&l)));
            best(rare_ending, RankOrder::LeastFrequent)
                .or_else(|| best(pool.iter(), RankOrder::LeastFrequent))
        }
    }
}

/// The word in its outward form: first letter capitalized, rest lowercase.
pub fn display_form(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

fn best<'a>(
    candidates: impl Iterator<Item = &'a Candidate>,
    order: RankOrder,
) -> Option<&'a Candidate> {
    candidates.reduce(|best, candidate| {
        if beats(candidate, best, order) {
            candidate
        } else {
            best
        }
    })
}

fn beats(candidate: &Candidate, best: &Candidate, order: RankOrder) -> bool {
    use std::cmp::Ordering;

    match (candidate.frequency, best.frequency) {
        (Some(a), Some(b)) => match a.total_cmp(&b) {
            Ordering::Greater => order == RankOrder::MostFrequent,
            Ordering::Less => order == RankOrder::LeastFrequent,
            Ordering::Equal => lowercase_lt(&candidate.text, &best.text),
        },
        // Unranked pool: both orders fall back to alphabetical.
        _ => lowercase_lt(&candidate.text, &best.text),
    }
}

fn lowercase_lt(a: &str, b: &str) -> bool {
    a.to_lowercase() < b.to_lowercase()
}
