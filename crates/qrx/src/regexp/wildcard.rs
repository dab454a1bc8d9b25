// Glob to regex translation
//
//   *      -> .*
//   ?      -> .
//   . + \ $ ^  -> escaped
//   [      -> kept; a `^` right after it stays unescaped so [^...] still negates
//
// The result is anchored at both ends: a glob must match the whole subject.

pub fn wildcard_to_regex(glob: &[u8]) -> Vec<u8> {
    let mut rx = Vec::with_capacity(glob.len() * 2 + 2);
    rx.push(b'^');
    let mut i = 0;
    while i < glob.len() {
        let c = glob[i];
        match c {
            b'*' => rx.extend_from_slice(b".*"),
            b'?' => rx.push(b'.'),
            b'.' | b'+' | b'\\' | b'$' | b'^' => {
                rx.push(b'\\');
                rx.push(c);
            }
            b'[' => {
                rx.push(c);
                if glob.get(i + 1) == Some(&b'^') {
                    rx.push(b'^');
                    i += 1;
                }
            }
            _ => rx.push(c),
        }
        i += 1;
    }
    rx.push(b'$');
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(glob: &str) -> String {
        String::from_utf8(wildcard_to_regex(glob.as_bytes())).unwrap()
    }

    #[test]
    fn test_star_and_question() {
        assert_eq!(translate("*.cpp"), r"^.*\.cpp$");
        assert_eq!(translate("a?c"), "^a.c$");
    }

    #[test]
    fn test_metachars_escaped() {
        assert_eq!(translate("a+b"), r"^a\+b$");
        assert_eq!(translate(r"c:\x"), r"^c:\\x$");
        assert_eq!(translate("$^"), r"^\$\^$");
    }

    #[test]
    fn test_negated_bracket_passes_through() {
        assert_eq!(translate("[^abc]*"), "^[^abc].*$");
        assert_eq!(translate("[a^]"), r"^[a\^]$");
    }

    #[test]
    fn test_empty_glob() {
        assert_eq!(translate(""), "^$");
    }
}
