use super::{Documents, apply_changes};
use lsp_types::{Position, Range, TextDocumentContentChangeEvent, Url};
use pretty_assertions::assert_eq;

fn change(range: Option<((u32, u32), (u32, u32))>, text: &str) -> TextDocumentContentChangeEvent {
  TextDocumentContentChangeEvent {
    range: range.map(|((sl, sc), (el, ec))| Range {
      start: Position { line: sl, character: sc },
      end: Position { line: el, character: ec },
    }),
    range_length: None,
    text: text.to_owned(),
  }
}

#[track_caller]
fn check(init: &str, changes: Vec<TextDocumentContentChangeEvent>, want: &str) {
  let mut got = init.to_owned();
  apply_changes(&mut got, changes);
  assert_eq!(want, got);
}

#[test]
fn full() {
  check("abc", vec![change(None, "def")], "def");
}

#[test]
fn insert() {
  check("def foo\n", vec![change(Some(((0, 4), (0, 4))), "x")], "def xfoo\n");
}

#[test]
fn replace_across_lines() {
  check("one\ntwo\nthree\n", vec![change(Some(((0, 1), (2, 2))), "X")], "oXree\n");
}

#[test]
fn sequential() {
  let changes = vec![change(Some(((0, 0), (0, 0))), "a\n"), change(Some(((1, 0), (1, 3))), "b")];
  check("xyz", changes, "a\nb");
}

#[test]
fn last_full_wins() {
  let changes = vec![
    change(Some(((0, 0), (0, 1))), "zzz"),
    change(None, "hello"),
    change(Some(((0, 5), (0, 5))), "!"),
  ];
  check("abc", changes, "hello!");
}

#[test]
fn utf16() {
  // the emoji is two UTF-16 code units.
  check("a\u{1F600}b", vec![change(Some(((0, 3), (0, 4))), "c")], "a\u{1F600}c");
}

#[test]
fn out_of_bounds_is_ignored() {
  let changes = vec![change(Some(((5, 0), (6, 0))), "!"), change(Some(((0, 0), (0, 0))), "x")];
  check("ab\ncd", changes, "xab\ncd");
}

#[test]
fn crlf_stays_whole() {
  check("ab\r\ncd", vec![change(Some(((0, 2), (0, 2))), "!")], "ab!\r\ncd");
  check("ab\r\ncd", vec![change(Some(((1, 0), (1, 1))), "X")], "ab\r\nXd");
}

#[test]
fn reverse_order_across_lines() {
  let changes = vec![change(Some(((2, 0), (2, 1))), "Z"), change(Some(((0, 0), (1, 0))), "")];
  check("a\nb\nc", changes, "b\nZ");
}

#[test]
fn open_change_close() {
  let url = Url::parse("file:///a.sk").unwrap();
  let mut docs = Documents::default();
  docs.open(url.clone(), "x".to_owned());
  docs.change(&url, vec![change(None, "y")]).unwrap();
  let got: Vec<_> = docs.iter().map(|(u, t)| (u.as_str().to_owned(), t.to_owned())).collect();
  assert_eq!(got, vec![("file:///a.sk".to_owned(), "y".to_owned())]);
  docs.close(&url).unwrap();
  assert!(docs.iter().next().is_none());
  assert!(docs.change(&url, vec![change(None, "z")]).is_err());
  assert!(docs.close(&url).is_err());
}
