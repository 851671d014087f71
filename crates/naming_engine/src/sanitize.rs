use crate::policy::{
    is_reserved_alias, is_valid_char, stem_of, LengthMeasure, PLACEHOLDER_NAME, REPLACEMENT_CHAR,
};
use crate::trim::trim_name;

/// Whether `name` can be created as-is on a FAT-compatible volume.
///
/// Length is not checked here; see [`sanitize`] for the bounded form.
pub fn is_valid(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name.chars().all(is_valid_char)
        && !is_reserved_alias(name)
}

/// Repair `name` into one that passes [`is_valid`].
///
/// Invalid characters become `_`, a reserved device stem gets a trailing `_`
/// (`CON.txt` -> `CON_.txt`), and names with nothing usable in them fall
/// back to [`PLACEHOLDER_NAME`].
pub fn build_valid(name: &str) -> String {
    if name.is_empty() || name == "." || name == ".." {
        return PLACEHOLDER_NAME.to_string();
    }

    let cleaned = replace_invalid_chars(name);
    if is_reserved_alias(&cleaned) {
        let stem_len = stem_of(&cleaned).len();
        let mut patched = String::with_capacity(cleaned.len() + 1);
        patched.push_str(&cleaned[..stem_len]);
        patched.push(REPLACEMENT_CHAR);
        patched.push_str(&cleaned[stem_len..]);
        return patched;
    }
    cleaned
}

/// Valid name no longer than `max_length` units, keeping a trailing extension when it fits.
///
/// Never fails. A valid name that already fits is returned unchanged.
pub fn sanitize(name: &str, max_length: usize, measure: LengthMeasure) -> String {
    let trimmed = trim_name(&build_valid(name), max_length, measure);
    if is_valid(&trimmed) {
        trimmed
    } else {
        repair_in_place(trimmed)
    }
}

pub(crate) fn replace_invalid_chars(name: &str) -> String {
    name.chars()
        .map(|c| if is_valid_char(c) { c } else { REPLACEMENT_CHAR })
        .collect()
}

// Trimming to tiny budgets can leave "", ".", ".." or a bare device stem.
// Fixes below swap a codepoint for `_` so the length never grows.
fn repair_in_place(mut name: String) -> String {
    if name.is_empty() {
        return REPLACEMENT_CHAR.to_string();
    }
    let stem_len = if name == "." || name == ".." {
        name.len()
    } else {
        stem_of(&name).len()
    };
    if let Some((idx, _)) = name[..stem_len].char_indices().next_back() {
        name.replace_range(idx..stem_len, &REPLACEMENT_CHAR.to_string());
    }
    name
}
