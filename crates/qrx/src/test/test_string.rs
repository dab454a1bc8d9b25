// Tests for SharedString
use super::init_logger;
use crate::*;

#[test]
fn test_contains_pattern_overlapping() {
    let s = SharedString::from("banana and panama");
    let pattern = Pattern::new("a[nm]a", true, false);
    assert_eq!(s.contains(&pattern), 4);
    assert_eq!(SharedString::from("banana").contains("ana"), 2);
    assert_eq!(SharedString::from("bAnAna").contains(IgnoreCase::from("a")), 3);
    assert_eq!(SharedString::from("banana").contains(b'n'), 2);
    assert_eq!(SharedString::new().contains("a"), 0);
}

#[test]
fn test_contains_counts_empty_match_at_end() {
    let eol = Pattern::new("$", true, false);
    assert_eq!(SharedString::from("").contains(&eol), 1);
    assert_eq!(SharedString::from("a").contains(&eol), 1);

    let s = SharedString::from("ab");
    let star = Pattern::new("x*", true, false);
    assert_eq!(s.find(&star, 2), Some(2));
    assert_eq!(s.find_rev(&star, None), Some(2));
    assert_eq!(s.contains(&star), 3);
}

#[test]
fn test_replace_greedy_pattern() {
    let mut s = SharedString::from("banana");
    s.replace_pattern(&Pattern::new("a.*a", true, false), "b");
    assert_eq!(s, "bb");

    let mut s = SharedString::from("banana");
    s.replace_pattern(&Pattern::new("a.*a", true, false), "");
    assert_eq!(s, "b");
}

#[test]
fn test_replace_anchored_pattern_retries_at_start() {
    let mut s = SharedString::from("banana");
    s.replace_pattern(&Pattern::new("^[bn]a", true, false), "");
    assert_eq!(s, "");
    assert!(s.is_empty());
}

#[test]
fn test_replace_substring() {
    let mut s = SharedString::from("hello world");
    s.replace("o", b"0");
    assert_eq!(s, "hell0 w0rld");

    // the replacement is never searched again
    let mut s = SharedString::from("aaa");
    s.replace(b'a', b"aa");
    assert_eq!(s, "aaaaaa");

    let mut s = SharedString::from("Case case CASE");
    s.replace(IgnoreCase(b"case"), b"x");
    assert_eq!(s, "x x x");
}

#[test]
fn test_replace_empty_match_advances() {
    let mut s = SharedString::from("ab");
    s.replace_pattern(&Pattern::new("x*", true, false), "-");
    assert_eq!(s, "-a-b");
}

#[test]
fn test_replace_with_invalid_pattern_is_noop() {
    init_logger();
    let mut s = SharedString::from("abc");
    s.replace_pattern(&Pattern::new("[", true, false), "x");
    assert_eq!(s, "abc");
}

#[test]
fn test_find() {
    let s = SharedString::from("hello world");
    assert_eq!(s.find(b'l', 0), Some(2));
    assert_eq!(s.find(b'l', 4), Some(9));
    assert_eq!(s.find("world", 0), Some(6));
    assert_eq!(s.find("world", 7), None);
    assert_eq!(s.find("", 0), None);
    assert_eq!(s.find(IgnoreCase::from("WORLD"), 0), Some(6));
    assert_eq!(s.find(&Pattern::new("o.", true, false), 5), Some(7));

    let needle = SharedString::from("lo");
    assert_eq!(s.find(&needle, 0), Some(3));
    assert_eq!(s.find(b"wor", 0), Some(6));
}

#[test]
fn test_find_rev() {
    init_logger();
    let s = SharedString::from("hello world");
    assert_eq!(s.find_rev(b'l', None), Some(9));
    assert_eq!(s.find_rev(b'l', Some(8)), Some(3));
    assert_eq!(s.find_rev("o", Some(4)), Some(4));
    assert_eq!(s.find_rev(IgnoreCase::from("HE"), None), Some(0));
    assert_eq!(s.find_rev(&Pattern::new("[a-z]+", true, false), None), Some(10));
    assert_eq!(s.find_rev(b'l', Some(12)), None);
    assert_eq!(s.find_rev("z", None), None);
}

#[test]
fn test_clone_is_copy_on_write() {
    let a = SharedString::from("shared");
    let mut b = a.clone();
    assert_eq!(a.as_array().nrefs(), 2);

    b.append(b"!");
    assert_eq!(a, "shared");
    assert_eq!(b, "shared!");
    assert_eq!(a.as_array().nrefs(), 1);
}

#[test]
fn test_insert_and_append() {
    let mut s = SharedString::from("world");
    s.prepend(b"hello ").append(b"!");
    assert_eq!(s, "hello world!");
    s.insert(5, b",");
    assert_eq!(s, "hello, world!");
    s.insert_char(0, b'>');
    assert_eq!(s, ">hello, world!");

    // past the end pads with spaces
    let mut s = SharedString::from("ab");
    s.insert(4, b"x");
    assert_eq!(s, "ab  x");

    let mut s = SharedString::new();
    s.append(b"from null");
    assert_eq!(s, "from null");
}

#[test]
fn test_remove_and_replace_range() {
    init_logger();
    let mut s = SharedString::from("hello");
    s.remove(1, 2);
    assert_eq!(s, "hlo");
    s.remove(1, 100);
    assert_eq!(s, "h");
    s.remove(5, 1);
    assert_eq!(s, "h");

    let mut s = SharedString::from("hello world");
    s.replace_range(0, 5, b"HELLO");
    assert_eq!(s, "HELLO world");
    s.replace_range(6, 100, b"there");
    assert_eq!(s, "HELLO there");
}

#[test]
fn test_truncate_and_fill() {
    let mut s = SharedString::from("truncate me");
    assert!(s.truncate(8));
    assert_eq!(s, "truncate");
    assert!(s.truncate(100));
    assert_eq!(s, "truncate");

    assert!(s.fill(b'-', None));
    assert_eq!(s, "--------");
    assert!(s.fill(b'=', Some(3)));
    assert_eq!(s, "===");
}

#[test]
fn test_left_right_mid() {
    init_logger();
    let s = SharedString::from("abcdefg");
    assert_eq!(s.left(3), "abc");
    assert_eq!(s.right(2), "fg");
    assert_eq!(s.left(100), "abcdefg");
    assert_eq!(s.right(100), "abcdefg");
    assert_eq!(s.mid(2, Some(3)), "cde");
    assert_eq!(s.mid(4, None), "efg");
    assert_eq!(s.mid(5, Some(100)), "fg");
    assert!(s.mid(10, None).is_null());

    // a whole-string slice shares the block
    let whole = s.mid(0, None);
    assert_eq!(s.as_array().nrefs(), 2);
    drop(whole);
}

#[test]
fn test_case_mapping() {
    let s = SharedString::from("MiXeD 123");
    assert_eq!(s.to_upper(), "MIXED 123");
    assert_eq!(s.to_lower(), "mixed 123");
}

#[test]
fn test_white_space() {
    let s = SharedString::from("  \ta  b \n");
    assert_eq!(s.strip_white_space(), "a  b");
    assert_eq!(s.simplify_white_space(), "a b");
    assert_eq!(
        SharedString::from("one\t\ttwo\r\nthree").simplify_white_space(),
        "one two three"
    );

    let blank = SharedString::from(" \t ").strip_white_space();
    assert!(blank.is_empty());
    assert!(!blank.is_null());
    assert!(SharedString::new().strip_white_space().is_null());
}

#[test]
fn test_justify() {
    let s = SharedString::from("ab");
    assert_eq!(s.left_justify(5, b'.', false), "ab...");
    assert_eq!(s.right_justify(5, b'.', false), "...ab");
    assert_eq!(s.left_justify(2, b'.', false), "ab");

    let long = SharedString::from("abcdef");
    assert_eq!(long.left_justify(3, b' ', false), "abcdef");
    assert_eq!(long.left_justify(3, b' ', true), "abc");
    assert_eq!(long.right_justify(3, b' ', true), "abc");
}

#[test]
fn test_numbers() {
    assert_eq!(SharedString::number(-17), "-17");
    assert_eq!(SharedString::number(0), "0");

    let mut s = SharedString::from("old");
    s.set_num(i64::MAX);
    assert_eq!(s, "9223372036854775807");

    assert_eq!(SharedString::from(" -42 ").to_long(), Some(-42));
    assert_eq!(SharedString::from("4x").to_long(), None);
    assert_eq!(SharedString::from("").to_long(), None);
    assert_eq!(SharedString::from("18446744073709551615").to_ulong(), Some(u64::MAX));
    assert_eq!(SharedString::from("-1").to_ulong(), None);
}

#[test]
fn test_ordering_and_display() {
    let a = SharedString::from("abc");
    let b = SharedString::from("abd");
    assert!(a < b);
    assert_eq!(a.to_string(), "abc");
    assert_eq!(format!("{:?}", SharedString::from("a\nb")), "\"a\\nb\"");
    assert_eq!(SharedString::new(), SharedString::from(""));
}

#[test]
fn test_non_utf8_bytes() {
    let s = SharedString::from_bytes(&[b'a', 0xff, b'b']);
    assert_eq!(s.len(), 3);
    assert_eq!(s.find(0xffu8, 0), Some(1));
    assert_eq!(s.to_str_lossy(), "a\u{fffd}b");
}
