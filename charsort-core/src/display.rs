/// Presentation helpers: turning image file names into item IDs and
/// display names.
///
/// These never touch scores or tiers; they exist so every front end renders
/// the same names for the same files.
use crate::constants::SUPPORTED_EXTENSIONS;

/// Convert a file name such as `illumi-zoldyck.png` into `Illumi Zoldyck`.
///
/// - a trailing `.jpg` / `.png` is removed (case-sensitive, so `.JPG` stays),
/// - every `-` becomes a space,
/// - every word character (`[A-Za-z0-9_]`) that starts a word is upper-cased.
pub fn format_display_name(file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(".jpg")
        .or_else(|| file_name.strip_suffix(".png"))
        .unwrap_or(file_name);

    let mut name = String::with_capacity(stem.len());
    let mut prev_is_word = false;
    for c in stem.chars() {
        let c = if c == '-' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            name.push(c.to_ascii_uppercase());
        } else {
            name.push(c);
        }
        prev_is_word = is_word;
    }
    name
}

/// Whether `file_name` ends with one of `SUPPORTED_EXTENSIONS`, ignoring case.
pub fn is_supported_image(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Keep only supported image files, preserving input order.
pub fn collect_item_ids<I, S>(file_names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    file_names
        .into_iter()
        .filter(|f| is_supported_image(f.as_ref()))
        .map(|f| f.as_ref().to_string())
        .collect()
}
