// WHY: Consecutive-duplicate removal shows up ahead of fuzzy matching and
// phonetic keying, so it ships as a standalone helper

/// Drop consecutive duplicate characters: `squeeze("hello")` is `"helo"`.
/// Operates on Unicode scalar values, not grapheme clusters.
pub fn squeeze(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    for c in text.chars() {
        if previous != Some(c) {
            out.push(c);
            previous = Some(c);
        }
    }
    out
}

/// Drop consecutive duplicate items from a slice, keeping first occurrences.
pub fn squeeze_seq<T>(items: &[T]) -> Vec<T>
where
    T: PartialEq + Clone,
{
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if out.last() != Some(item) {
            out.push(item.clone());
        }
    }
    out
}
