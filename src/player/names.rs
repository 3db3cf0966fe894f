/// Characters kept in user-entered playlist names besides ASCII letters and digits
const ALLOWED_PUNCTUATION: &str = " !#$%&()*+-/:;<=>?@[]{|}~";

/// Replace every character outside the allowed set with `?`
pub fn escape_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(c) {
                c
            } else {
                '?'
            }
        })
        .collect()
}
