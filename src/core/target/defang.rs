// src/core/target/defang.rs
use super::classify::is_ip_or_ip_list;

/// Bracketed dot forms commonly used to defang indicators
const DEFANGED_DOTS: [&str; 3] = ["[.]", "{.}", "(.)"];

/// Enclosing pairs stripped when they wrap the whole target
const ENCLOSING_PAIRS: [(char, char); 3] = [('[', ']'), ('{', '}'), ('(', ')')];

/// Undo defanging so the target can be classified.
///
/// Rewrites `[.]`, `{.}` and `(.)` to `.` and drops a single bracket pair that
/// encloses an IP expression (`[10.0.0.1]`). Both rules are applied until
/// nothing changes, so the result is stable under repeated calls. Unbalanced
/// brackets and bracketed non-IP text are left alone.
pub fn refang(raw: &str) -> String {
    let mut current = raw.trim().to_string();

    loop {
        let next = strip_enclosing(&replace_dots(&current)).trim().to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn replace_dots(s: &str) -> String {
    DEFANGED_DOTS
        .iter()
        .fold(s.to_string(), |acc, pattern| acc.replace(pattern, "."))
}

fn strip_enclosing(s: &str) -> &str {
    for (open, close) in ENCLOSING_PAIRS {
        if let Some(inner) = s.strip_prefix(open).and_then(|rest| rest.strip_suffix(close)) {
            // "[a]-[b]" starts and ends with brackets but is not one enclosing pair
            if !inner.contains(open) && !inner.contains(close) && is_ip_or_ip_list(inner.trim()) {
                return inner;
            }
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refang_mixed_patterns() {
        assert_eq!(refang("192[.]168{.}1(.)1"), "192.168.1.1");
        assert_eq!(refang("1[.]2{.}3(.)4"), "1.2.3.4");
        assert_eq!(refang("evil[.]example[.]com"), "evil.example.com");
    }

    #[test]
    fn test_refang_enclosing_brackets() {
        assert_eq!(refang("[192.168.1.1]"), "192.168.1.1");
        assert_eq!(refang("(10.0.0.0/30)"), "10.0.0.0/30");
        assert_eq!(refang("  [8.8.8.8]  "), "8.8.8.8");
        assert_eq!(refang("{10[.]0[.]0[.]1-20}"), "10.0.0.1-20");
    }

    #[test]
    fn test_refang_leaves_unbalanced_input() {
        assert_eq!(refang("[192.168.1.1"), "[192.168.1.1");
        assert_eq!(refang("192.168.1.1)"), "192.168.1.1)");
        assert_eq!(refang("[a]-[b]"), "[a]-[b]");
        assert_eq!(refang("(example.com)"), "(example.com)");
        assert_eq!(refang("[evil[.]example[.]com]"), "[evil.example.com]");
        assert_eq!(refang("d41d8cd98f00b204e9800998ecf8427e"), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_refang_is_idempotent() {
        let samples = [
            "192[.]168{.}1(.)1",
            "[[.]]",
            "[(.)]",
            "[[10.0.0.1]]",
            "hxxp://bad[.]example/path",
            "",
            "plain.example.com",
            "{[.]}",
        ];

        for sample in samples {
            let once = refang(sample);
            assert_eq!(refang(&once), once, "not stable for {:?}", sample);
        }

        assert_eq!(refang("[[.]]"), ".");
    }
}
