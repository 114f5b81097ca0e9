//! Display labels derived from token ids.

/// Strip the kind prefix and title-case the rest.
///
/// `weapon.rope` becomes `Rope`, `noise.carnival_flyer` becomes
/// `Carnival Flyer`. Ids without a dot are used whole.
pub fn pretty_label(id: &str) -> String {
    let last = id.rsplit('.').next().unwrap_or(id);
    last.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_label() {
        assert_eq!(pretty_label("weapon.rope"), "Rope");
        assert_eq!(pretty_label("noise.carnival_flyer"), "Carnival Flyer");
        assert_eq!(pretty_label("plain"), "Plain");
        assert_eq!(pretty_label("a.b.deep_name"), "Deep Name");
        assert_eq!(pretty_label(""), "");
    }
}
