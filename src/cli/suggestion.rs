//! "Did you mean?" suggestions for mistyped action names.

/// Largest edit distance still considered a plausible typo
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Suggest the closest candidate to `input`, if any is within [`MAX_EDIT_DISTANCE`].
///
/// Distance is measured case-insensitively, so a case-only typo such as `Server`
/// still finds `server`. Only an exact match is skipped. Ties are broken by
/// candidate order, so callers passing a sorted list get a stable answer.
pub fn suggest<'a, I, S>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + 'a + ?Sized,
{
    let needle = input.to_lowercase();
    let mut best: Option<(usize, &str)> = None;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        if candidate == input {
            continue;
        }
        let distance = levenshtein_distance(&needle, &candidate.to_lowercase());
        if distance > MAX_EDIT_DISTANCE {
            continue;
        }
        if best.map_or(true, |(current, _)| distance < current) {
            best = Some((distance, candidate));
        }
    }

    best.map(|(_, candidate)| candidate.to_string())
}

/// Classic Levenshtein edit distance over chars
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != *b_char);
            current[j + 1] = (previous[j + 1] + 1) // deletion
                .min(current[j] + 1) // insertion
                .min(previous[j] + cost); // substitution
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
