use crate::policy::LengthMeasure;

/// Marker inserted where the middle of a name was cut out.
pub const ELLIPSIS: &str = "...";

/// Longest trailing `.suffix` (in codepoints, without the dot) kept intact while trimming.
pub const MAX_TRIM_EXTENSION_CHARS: usize = 8;

/// Shorten `name` to at most `max_length` units by cutting out its middle.
///
/// The kept prefix and suffix are whole codepoints. A short trailing
/// extension stays attached to the suffix until the budget cannot hold it
/// plus one unit of head on either side of the ellipsis; below that it is
/// trimmed like any other text. Budgets of three units or less just keep
/// the leading codepoints.
pub fn trim_name(name: &str, max_length: usize, measure: LengthMeasure) -> String {
    if measure.of_str(name) <= max_length {
        return name.to_string();
    }

    let ellipsis_len = measure.of_str(ELLIPSIS);
    if max_length <= ellipsis_len {
        return take_prefix(name, max_length, measure).to_string();
    }

    let keep = max_length - ellipsis_len;
    let prefix_budget = match trailing_extension(name) {
        Some(ext) => {
            let ext_len = measure.of_char('.') + measure.of_str(ext);
            if keep >= ext_len + 2 {
                (keep / 2).min(keep - ext_len - 1)
            } else {
                keep / 2
            }
        }
        None => keep / 2,
    };

    let prefix = take_prefix(name, prefix_budget, measure);
    let suffix = take_suffix(name, keep - measure.of_str(prefix), measure);
    format!("{prefix}{ELLIPSIS}{suffix}")
}

/// Extension after the last dot, if it is short enough to be worth keeping.
pub(crate) fn trailing_extension(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    let ext_chars = ext.chars().count();
    let plausible = !stem.is_empty()
        && (1..=MAX_TRIM_EXTENSION_CHARS).contains(&ext_chars)
        && !ext.contains(' ');
    plausible.then_some(ext)
}

/// Longest leading slice whose length fits `budget`.
pub(crate) fn take_prefix(name: &str, budget: usize, measure: LengthMeasure) -> &str {
    let mut used = 0;
    let mut end = 0;
    for (idx, c) in name.char_indices() {
        let width = measure.of_char(c);
        if used + width > budget {
            break;
        }
        used += width;
        end = idx + c.len_utf8();
    }
    &name[..end]
}

/// Longest trailing slice whose length fits `budget`.
fn take_suffix(name: &str, budget: usize, measure: LengthMeasure) -> &str {
    let mut used = 0;
    let mut start = name.len();
    for (idx, c) in name.char_indices().rev() {
        let width = measure.of_char(c);
        if used + width > budget {
            break;
        }
        used += width;
        start = idx;
    }
    &name[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PI4: &str = "a\u{3C0}\u{3C0}\u{3C0}\u{3C0}z";

    #[test]
    fn short_names_are_untouched() {
        assert_eq!(trim_name("short.txt", 16, LengthMeasure::Chars), "short.txt");
        assert_eq!(trim_name("", 0, LengthMeasure::Chars), "");
    }

    #[test]
    fn keeps_extension_with_tail_of_head() {
        assert_eq!(
            trim_name("extremelylongfilename.txt", 16, LengthMeasure::Chars),
            "extrem...eme.txt"
        );
    }

    #[test]
    fn extension_pins_prefix_when_budget_is_tight() {
        // keep = 7, ext ".jpeg" = 5: prefix capped at 1 so the suffix holds "x.jpeg".
        assert_eq!(
            trim_name("abcdefghijklmnopqrstuvwx.jpeg", 10, LengthMeasure::Chars),
            "a...x.jpeg"
        );
    }

    #[test]
    fn extension_is_sacrificed_once_head_is_minimal() {
        // keep = 5 cannot hold ".jpeg" plus a head unit on both sides.
        assert_eq!(
            trim_name("abcdefghijklmnopqrstuvwx.jpeg", 8, LengthMeasure::Chars),
            "ab...peg"
        );
    }

    #[test]
    fn extensionless_split_is_deterministic() {
        let name = "abcdefghijklmnopqrstuvwxyz";
        let trimmed = trim_name(name, 16, LengthMeasure::Chars);
        assert_eq!(trimmed, "abcdef...tuvwxyz");
        assert_eq!(trimmed.chars().count(), 16);
    }

    #[test]
    fn byte_budget_never_splits_a_codepoint() {
        let m = LengthMeasure::Utf8Bytes;
        assert_eq!(trim_name(PI4, 10, m), PI4);
        assert_eq!(trim_name(PI4, 9, m), "a\u{3C0}...\u{3C0}z");
        assert_eq!(trim_name(PI4, 8, m), "a...\u{3C0}z");
        assert_eq!(trim_name(PI4, 7, m), "a...\u{3C0}z");
        assert_eq!(trim_name(PI4, 6, m), "a...z");
    }

    #[test]
    fn char_budget_counts_codepoints_not_bytes() {
        assert_eq!(trim_name(PI4, 6, LengthMeasure::Chars), PI4);
        assert_eq!(trim_name(PI4, 5, LengthMeasure::Chars), "a...z");
    }

    #[test]
    fn tiny_budgets_keep_leading_codepoints() {
        assert_eq!(trim_name("abcdef", 3, LengthMeasure::Chars), "abc");
        assert_eq!(trim_name("\u{3C0}bcdef", 1, LengthMeasure::Utf8Bytes), "");
        assert_eq!(trim_name("abcdef", 0, LengthMeasure::Chars), "");
    }

    #[test]
    fn long_or_spaced_suffixes_are_not_extensions() {
        assert_eq!(trailing_extension("photo.jpeg"), Some("jpeg"));
        assert_eq!(trailing_extension(".bashrc"), None);
        assert_eq!(trailing_extension("notes.final draft"), None);
        assert_eq!(trailing_extension("archive.verylongext"), None);
        assert_eq!(trailing_extension("trailing."), None);
    }
}
