//! Small text helpers shared across crates.

/// Title Case a string the way entity display names are normalized:
/// uppercase every letter that starts the string or follows a non-letter,
/// lowercase the rest. `"node.js"` becomes `"Node.Js"`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
