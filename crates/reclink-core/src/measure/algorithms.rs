//! String comparison algorithms
//!
//! Edit distances come from `strsim`. Shingle measures, the LCS family,
//! Kondrak n-gram and Ratcliff-Obershelp are implemented here.
//!
//! All lengths are counted in chars, not bytes.

use ahash::AHashMap;
use strsim::{damerau_levenshtein, jaro_winkler, levenshtein, normalized_levenshtein, osa_distance};

/// Higher is closer
pub trait StringSimilarity: Send + Sync {
    fn similarity(&self, left: &str, right: &str) -> f64;
}

/// Lower is closer
pub trait StringDistance: Send + Sync {
    fn distance(&self, left: &str, right: &str) -> f64;
}

// ============================================================================
// Edit distances (strsim)
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl StringDistance for Levenshtein {
    fn distance(&self, left: &str, right: &str) -> f64 {
        levenshtein(left, right) as f64
    }
}

/// Levenshtein divided by the longer length
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl StringSimilarity for NormalizedLevenshtein {
    fn similarity(&self, left: &str, right: &str) -> f64 {
        normalized_levenshtein(left, right)
    }
}

impl StringDistance for NormalizedLevenshtein {
    fn distance(&self, left: &str, right: &str) -> f64 {
        1.0 - normalized_levenshtein(left, right)
    }
}

/// Unrestricted Damerau-Levenshtein (transpositions of non-adjacent edits allowed)
#[derive(Debug, Clone, Copy, Default)]
pub struct Damerau;

impl StringDistance for Damerau {
    fn distance(&self, left: &str, right: &str) -> f64 {
        damerau_levenshtein(left, right) as f64
    }
}

/// Restricted Damerau-Levenshtein; no substring is edited more than once
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalStringAlignment;

impl StringDistance for OptimalStringAlignment {
    fn distance(&self, left: &str, right: &str) -> f64 {
        osa_distance(left, right) as f64
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl StringSimilarity for JaroWinkler {
    fn similarity(&self, left: &str, right: &str) -> f64 {
        jaro_winkler(left, right)
    }
}

impl StringDistance for JaroWinkler {
    fn distance(&self, left: &str, right: &str) -> f64 {
        1.0 - jaro_winkler(left, right)
    }
}

// ============================================================================
// Shingle measures
// ============================================================================

/// Counts of every `k`-char window, after collapsing whitespace runs to one space
pub fn shingle_profile(text: &str, k: usize) -> AHashMap<String, u32> {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }

    let bounds: Vec<usize> = collapsed
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(collapsed.len()))
        .collect();
    let chars = bounds.len() - 1;

    let mut profile = AHashMap::new();
    if k == 0 || chars < k {
        return profile;
    }
    for start in 0..=(chars - k) {
        let shingle = &collapsed[bounds[start]..bounds[start + k]];
        *profile.entry(shingle.to_string()).or_insert(0) += 1;
    }
    profile
}

fn shared_keys(a: &AHashMap<String, u32>, b: &AHashMap<String, u32>) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.keys().filter(|k| large.contains_key(*k)).count()
}

/// Cosine of the angle between two shingle count vectors
#[derive(Debug, Clone, Copy)]
pub struct Cosine {
    k: usize,
}

impl Cosine {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl StringSimilarity for Cosine {
    fn similarity(&self, left: &str, right: &str) -> f64 {
        if left == right {
            return 1.0;
        }
        if left.chars().count() < self.k || right.chars().count() < self.k {
            return 0.0;
        }

        let a = shingle_profile(left, self.k);
        let b = shingle_profile(right, self.k);

        let dot: f64 = a
            .iter()
            .filter_map(|(key, &x)| b.get(key).map(|&y| x as f64 * y as f64))
            .sum();
        let norm = |p: &AHashMap<String, u32>| {
            p.values().map(|&v| (v as f64) * (v as f64)).sum::<f64>().sqrt()
        };

        let denom = norm(&a) * norm(&b);
        if denom == 0.0 {
            return 0.0;
        }
        dot / denom
    }
}

impl StringDistance for Cosine {
    fn distance(&self, left: &str, right: &str) -> f64 {
        1.0 - self.similarity(left, right)
    }
}

/// |A ∩ B| / |A ∪ B| over shingle sets
#[derive(Debug, Clone, Copy)]
pub struct Jaccard {
    k: usize,
}

impl Jaccard {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl StringSimilarity for Jaccard {
    fn similarity(&self, left: &str, right: &str) -> f64 {
        if left == right {
            return 1.0;
        }
        let a = shingle_profile(left, self.k);
        let b = shingle_profile(right, self.k);

        let inter = shared_keys(&a, &b);
        let union = a.len() + b.len() - inter;
        if union == 0 {
            return 0.0;
        }
        inter as f64 / union as f64
    }
}

impl StringDistance for Jaccard {
    fn distance(&self, left: &str, right: &str) -> f64 {
        1.0 - self.similarity(left, right)
    }
}

/// Sorensen-Dice: 2|A ∩ B| / (|A| + |B|) over shingle sets
#[derive(Debug, Clone, Copy)]
pub struct SorensenDice {
    k: usize,
}

impl SorensenDice {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl StringSimilarity for SorensenDice {
    fn similarity(&self, left: &str, right: &str) -> f64 {
        if left == right {
            return 1.0;
        }
        let a = shingle_profile(left, self.k);
        let b = shingle_profile(right, self.k);

        let total = a.len() + b.len();
        if total == 0 {
            return 0.0;
        }
        2.0 * shared_keys(&a, &b) as f64 / total as f64
    }
}

impl StringDistance for SorensenDice {
    fn distance(&self, left: &str, right: &str) -> f64 {
        1.0 - self.similarity(left, right)
    }
}

/// L1 distance between shingle count vectors
#[derive(Debug, Clone, Copy)]
pub struct QGram {
    k: usize,
}

impl QGram {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl StringDistance for QGram {
    fn distance(&self, left: &str, right: &str) -> f64 {
        if left == right {
            return 0.0;
        }
        let a = shingle_profile(left, self.k);
        let b = shingle_profile(right, self.k);

        let mut total: u64 = 0;
        for (key, &x) in &a {
            let y = b.get(key).copied().unwrap_or(0);
            total += u64::from(x.abs_diff(y));
        }
        for (key, &y) in &b {
            if !a.contains_key(key) {
                total += u64::from(y);
            }
        }
        total as f64
    }
}

// ============================================================================
// N-gram (Kondrak 2005)
// ============================================================================

/// Normalized n-gram edit distance, in [0, 1].
///
/// Both strings are left-padded with `\n` so leading chars form full grams.
#[derive(Debug, Clone, Copy)]
pub struct NGram {
    n: usize,
}

impl NGram {
    const PAD: char = '\n';

    pub fn new(n: usize) -> Self {
        Self { n: n.max(1) }
    }
}

impl StringDistance for NGram {
    fn distance(&self, left: &str, right: &str) -> f64 {
        if left == right {
            return 0.0;
        }
        let s: Vec<char> = left.chars().collect();
        let t: Vec<char> = right.chars().collect();
        let (sl, tl) = (s.len(), t.len());
        if sl == 0 || tl == 0 {
            return 1.0;
        }

        let n = self.n;
        let longest = sl.max(tl);
        if sl < n || tl < n {
            let mismatched = s.iter().zip(&t).filter(|(a, b)| a != b).count() + (longest - sl.min(tl));
            return mismatched as f64 / longest as f64;
        }

        let mut sa = vec![Self::PAD; n - 1];
        sa.extend_from_slice(&s);

        let mut prev: Vec<f64> = (0..=sl).map(|i| i as f64).collect();
        let mut cur = vec![0.0; sl + 1];
        let mut t_j = vec![Self::PAD; n];

        for j in 1..=tl {
            if j < n {
                for slot in t_j.iter_mut().take(n - j) {
                    *slot = Self::PAD;
                }
                for ti in (n - j)..n {
                    t_j[ti] = t[ti - (n - j)];
                }
            } else {
                t_j.copy_from_slice(&t[j - n..j]);
            }

            cur[0] = j as f64;
            for i in 1..=sl {
                let mut cost = 0usize;
                let mut tn = n;
                for ni in 0..n {
                    let c = sa[i - 1 + ni];
                    if c != t_j[ni] {
                        cost += 1;
                    } else if c == Self::PAD {
                        tn -= 1;
                    }
                }
                let edit = cost as f64 / tn as f64;
                cur[i] = (cur[i - 1] + 1.0).min(prev[i] + 1.0).min(prev[i - 1] + edit);
            }
            std::mem::swap(&mut prev, &mut cur);
        }

        prev[sl] / longest as f64
    }
}

// ============================================================================
// Longest common subsequence family
// ============================================================================

/// Length of the longest common subsequence, in chars
pub fn lcs_length(left: &str, right: &str) -> usize {
    let a: Vec<char> = left.chars().collect();
    let b: Vec<char> = right.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                cur[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// `|a| + |b| - 2·lcs`: the insert/delete-only edit distance
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestCommonSubsequence;

impl StringDistance for LongestCommonSubsequence {
    fn distance(&self, left: &str, right: &str) -> f64 {
        let total = left.chars().count() + right.chars().count();
        (total - 2 * lcs_length(left, right)) as f64
    }
}

/// `1 - lcs / max(|a|, |b|)`, a metric in [0, 1]
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricLcs;

impl StringDistance for MetricLcs {
    fn distance(&self, left: &str, right: &str) -> f64 {
        let longest = left.chars().count().max(right.chars().count());
        if longest == 0 {
            return 0.0;
        }
        1.0 - lcs_length(left, right) as f64 / longest as f64
    }
}

/// LCS distance divided by the longer length.
///
/// Similarity is derived as `1 - distance`, so the two always sum to 1.
/// Both can leave [0, 1] when the strings share little: "ab" against
/// "cd" has distance 2 and similarity -1.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLcs {
    lcs: LongestCommonSubsequence,
}

impl StringDistance for NormalizedLcs {
    fn distance(&self, left: &str, right: &str) -> f64 {
        let longest = left.chars().count().max(right.chars().count());
        if longest == 0 {
            return 0.0;
        }
        self.lcs.distance(left, right) / longest as f64
    }
}

impl StringSimilarity for NormalizedLcs {
    fn similarity(&self, left: &str, right: &str) -> f64 {
        1.0 - self.distance(left, right)
    }
}

// ============================================================================
// Ratcliff-Obershelp
// ============================================================================

/// Gestalt pattern matching: `2·M / (|a| + |b|)`, with M the chars covered
/// by recursively found longest common substrings
#[derive(Debug, Clone, Copy, Default)]
pub struct RatcliffObershelp;

impl RatcliffObershelp {
    /// (length, start in a, start in b) of the first longest common substring
    fn longest_common_substring(a: &[char], b: &[char]) -> (usize, usize, usize) {
        let mut best = (0, 0, 0);
        let mut prev = vec![0usize; b.len() + 1];
        let mut cur = vec![0usize; b.len() + 1];
        for i in 0..a.len() {
            for j in 0..b.len() {
                cur[j + 1] = if a[i] == b[j] { prev[j] + 1 } else { 0 };
                if cur[j + 1] > best.0 {
                    let len = cur[j + 1];
                    best = (len, i + 1 - len, j + 1 - len);
                }
            }
            std::mem::swap(&mut prev, &mut cur);
        }
        best
    }

    fn matching_chars(a: &[char], b: &[char]) -> usize {
        if a.is_empty() || b.is_empty() {
            return 0;
        }
        let (len, ai, bi) = Self::longest_common_substring(a, b);
        if len == 0 {
            return 0;
        }
        len + Self::matching_chars(&a[..ai], &b[..bi])
            + Self::matching_chars(&a[ai + len..], &b[bi + len..])
    }
}

impl StringSimilarity for RatcliffObershelp {
    fn similarity(&self, left: &str, right: &str) -> f64 {
        if left == right {
            return 1.0;
        }
        let a: Vec<char> = left.chars().collect();
        let b: Vec<char> = right.chars().collect();
        2.0 * Self::matching_chars(&a, &b) as f64 / (a.len() + b.len()) as f64
    }
}
