//! Search, trim, case and tokenization behavior.

use core::cmp::Ordering;

use rstest::rstest;

use crate::BufStr0;

#[rstest]
#[case(b"hello world", b"hello", true)]
#[case(b"hello world", b"hello world", true)]
#[case(b"hello world", b"world", false)]
#[case(b"hello", b"hello world", false)]
#[case(b"hello", b"", false)]
#[case(b"", b"hello", false)]
#[case(b"", b"", false)]
fn prefix_matching(#[case] content: &[u8], #[case] prefix: &[u8], #[case] expected: bool) {
    let s = BufStr0::from_bytes(content);
    assert_eq!(s.starts_with(prefix), expected);
}

#[rstest]
#[case(b"hello world", b"world", true)]
#[case(b"world", b"world", true)]
#[case(b"hello world", b"hello", false)]
#[case(b"orld", b"world", false)]
#[case(b"hello", b"", false)]
#[case(b"", b"world", false)]
#[case(b"", b"", false)]
fn suffix_matching(#[case] content: &[u8], #[case] suffix: &[u8], #[case] expected: bool) {
    let s = BufStr0::from_bytes(content);
    assert_eq!(s.ends_with(suffix), expected);
}

#[test]
fn byte_search() {
    let s = BufStr0::from_bytes("hello world");
    assert_eq!(s.find_byte(b'o'), Some(4));
    assert_eq!(s.rfind_byte(b'o'), Some(7));
    assert_eq!(s.find_byte(b'h'), Some(0));
    assert_eq!(s.rfind_byte(b'd'), Some(10));
    assert_eq!(s.find_byte(b'z'), None);
    assert_eq!(s.rfind_byte(b'z'), None);
}

#[test]
fn searching_for_nul_finds_the_terminator() {
    let s = BufStr0::from_bytes("hello");
    assert_eq!(s.find_byte(0), Some(5));
    assert_eq!(s.rfind_byte(0), Some(5));

    let e = BufStr0::new();
    assert_eq!(e.find_byte(0), Some(0));
    assert_eq!(e.rfind_byte(0), Some(0));
}

#[test]
fn substring_search() {
    let s = BufStr0::from_bytes("abcabcabc");
    assert_eq!(s.find("bc"), Some(1));
    assert_eq!(s.rfind("bc"), Some(7));
    assert_eq!(s.find("abcabcabc"), Some(0));
    assert_eq!(s.find("cb"), None);
    assert_eq!(s.find(""), None);
    assert_eq!(s.rfind(""), None);

    let e = BufStr0::new();
    assert_eq!(e.find("a"), None);
    assert_eq!(e.rfind("a"), None);
}

#[test]
fn charset_search() {
    let s = BufStr0::from_bytes("key=value;rest");
    assert_eq!(s.find_any("=;"), Some(3));
    assert_eq!(s.find_any(";"), Some(9));
    assert_eq!(s.find_any("#!"), None);
    assert_eq!(s.find_any(""), None);

    let e = BufStr0::new();
    assert_eq!(e.find_any("=;"), None);
}

#[test]
fn ordering() {
    let a = BufStr0::from_bytes("apple");
    let b = BufStr0::from_bytes("banana");
    assert_eq!(a.compare("apple"), Ordering::Equal);
    assert_eq!(a.compare("banana"), Ordering::Less);
    assert_eq!(b.compare("apple"), Ordering::Greater);
    assert!(a < b);

    assert_eq!(a.compare_ignore_ascii_case("APPLE"), Ordering::Equal);
    assert_eq!(a.compare_ignore_ascii_case("APPLEs"), Ordering::Less);
    assert_eq!(a.compare_ignore_ascii_case("APPL"), Ordering::Greater);
}

#[test]
fn trim_both_ends() {
    let mut s = BufStr0::from_bytes(" \t \t \n \nHello\n \n \t \t ");
    s.trim();
    assert_eq!(s, "Hello");
    assert_eq!(s.len(), 5);
    assert_eq!(s.as_c_str(), c"Hello");
}

#[test]
fn trim_start_only() {
    let mut s = BufStr0::from_bytes("\t  left");
    s.trim_start();
    assert_eq!(s, "left");

    let mut untouched = BufStr0::from_bytes("right  \t");
    untouched.trim_start();
    assert_eq!(untouched, "right  \t");
}

#[test]
fn trim_end_only() {
    let mut s = BufStr0::from_bytes("right  \t");
    s.trim_end();
    assert_eq!(s, "right");

    let mut untouched = BufStr0::from_bytes("\t  left");
    untouched.trim_end();
    assert_eq!(untouched, "\t  left");
}

#[test]
fn trim_all_whitespace_empties() {
    let mut s = BufStr0::from_bytes(" \t\r\n ");
    s.trim();
    assert!(s.is_empty());
    assert_eq!(s.as_c_str(), c"");
}

#[test]
fn trim_keeps_interior_whitespace() {
    let mut s = BufStr0::from_bytes("  a b  c  ");
    s.trim();
    assert_eq!(s, "a b  c");
}

#[test]
fn ascii_case_conversion() {
    let mut s = BufStr0::from_bytes("Hello-42 wörld");
    s.make_ascii_uppercase();
    assert_eq!(s, "HELLO-42 WöRLD");
    s.make_ascii_lowercase();
    assert_eq!(s, "hello-42 wörld");

    let mut e = BufStr0::new();
    e.make_ascii_uppercase();
    assert!(e.is_empty());
}

#[test]
fn tokens_skip_delimiter_runs() {
    let s = BufStr0::from_bytes("  foo  bar baz ");
    let tokens: std::vec::Vec<&[u8]> = s.tokens(b" ").collect();
    assert_eq!(tokens, [b"foo".as_slice(), b"bar", b"baz"]);
}

#[test]
fn tokens_with_multiple_delimiters() {
    let s = BufStr0::from_bytes("a,b;;c,");
    let tokens: std::vec::Vec<&[u8]> = s.tokens(b",;").collect();
    assert_eq!(tokens, [b"a".as_slice(), b"b", b"c"]);
}

#[test]
fn tokens_of_empty_content() {
    let s = BufStr0::new();
    assert_eq!(s.tokens(b" ").count(), 0);

    let only_delimiters = BufStr0::from_bytes(";;;");
    assert_eq!(only_delimiters.tokens(b";").count(), 0);
}
