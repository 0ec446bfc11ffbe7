use crate::quiz_engine::{models::SuggestionOrder, normalizer::normalize};

/// Multiplier applied when one normalized string is a prefix of the other.
///
/// Keeps partial words such as `"hueso"` for `"hueso parietal"` below a full match.
pub const PREFIX_DISCOUNT: f64 = 0.8;

/// Levenshtein distance (insert, delete, substitute) between `a` and `b`.
///
/// Both inputs are lowercased first. Runs in `O(|a|·|b|)` time and keeps a
/// single row the size of the shorter string.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Closeness of `a` and `b` in `[0, 1]`, compared on their normalized forms.
///
/// Equal forms score 1.0 and an empty form scores 0.0. When the shorter form
/// is a prefix of the longer one the score is the length ratio times
/// [`PREFIX_DISCOUNT`]; otherwise it is `(longer - distance) / longer`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (longer, shorter, long_len, short_len) = if a_len > b_len {
        (&a, &b, a_len, b_len)
    } else {
        (&b, &a, b_len, a_len)
    };

    if longer.starts_with(shorter.as_str()) {
        return short_len as f64 / long_len as f64 * PREFIX_DISCOUNT;
    }

    let distance = edit_distance(&a, &b);
    ((long_len as f64 - distance as f64) / long_len as f64).clamp(0.0, 1.0)
}

/// A corpus name offered as a "did you mean" hint.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub name: String,
    pub score: f64,
}

/// Pick up to `limit` corpus names close to `correct`.
///
/// A name qualifies when it differs from `correct` ignoring case and scores
/// strictly above `threshold`. Repeated names (ignoring case) are kept once.
/// `order` decides whether the closest names or the first ones found survive
/// the truncation.
pub fn suggestions<'a, I>(
    correct: &str,
    names: I,
    order: SuggestionOrder,
    threshold: f64,
    limit: usize,
) -> Vec<Suggestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let correct_lower = correct.to_lowercase();
    let mut seen: Vec<String> = Vec::new();
    let mut found: Vec<Suggestion> = Vec::new();

    for name in names {
        let lower = name.to_lowercase();
        if lower == correct_lower || seen.contains(&lower) {
            continue;
        }
        let score = similarity(name, correct);
        if score > threshold {
            seen.push(lower);
            found.push(Suggestion { name: name.to_string(), score });
            if order == SuggestionOrder::Discovery && found.len() == limit {
                break;
            }
        }
    }

    if order == SuggestionOrder::Ranked {
        // Stable sort: equal scores keep corpus order.
        found.sort_by(|a, b| b.score.total_cmp(&a.score));
    }
    found.truncate(limit);
    found
}
