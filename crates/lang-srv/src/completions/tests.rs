use super::{ItemData, Sessions, format_comments};
use compiler::{Completion, SymbolKind};
use pretty_assertions::assert_eq;

fn completion(name: &str) -> Completion {
  Completion {
    kind: SymbolKind::FunctionGlobal,
    name: name.to_owned(),
    ty: format!("def {name}"),
    comments: None,
  }
}

#[track_caller]
fn check_comments(lines: &[&str], want: &str) {
  assert_eq!(want, format_comments(lines));
}

#[test]
fn comments_one_paragraph() {
  check_comments(&["  Adds two  ", "numbers. "], "Adds two numbers.");
}

#[test]
fn comments_paragraphs() {
  check_comments(&["first", "line", "", "   ", "second"], "first line\n\nsecond");
}

#[test]
fn comments_leading_and_trailing_blank() {
  check_comments(&["", "hi", ""], "hi");
  check_comments(&[], "");
}

#[test]
fn bounds() {
  let mut sessions = Sessions::default();
  assert!(sessions.get(&ItemData::Index(0)).is_none());
  let id = sessions.replace(Some(vec![completion("a"), completion("b")]));
  assert_eq!(sessions.get(&ItemData::new(id, 1)).map(|x| x.name.as_str()), Some("b"));
  assert_eq!(sessions.get(&ItemData::Index(0)).map(|x| x.name.as_str()), Some("a"));
  assert!(sessions.get(&ItemData::Index(-1)).is_none());
  assert!(sessions.get(&ItemData::Index(2)).is_none());
  assert!(sessions.get(&ItemData::Versioned { session: id, index: -1 }).is_none());
  assert!(sessions.get(&ItemData::new(id, 2)).is_none());
}

#[test]
fn absent_session() {
  let mut sessions = Sessions::default();
  let id = sessions.replace(None);
  assert!(sessions.get(&ItemData::new(id, 0)).is_none());
}

#[test]
fn stale_session() {
  let mut sessions = Sessions::default();
  let old = sessions.replace(Some(vec![completion("a"), completion("b")]));
  let new = sessions.replace(Some(vec![completion("c"), completion("d")]));
  assert_ne!(old, new);
  assert!(sessions.get(&ItemData::new(old, 0)).is_none());
  assert_eq!(sessions.get(&ItemData::new(new, 0)).map(|x| x.name.as_str()), Some("c"));
}

#[test]
fn data_json() {
  let versioned: ItemData = serde_json::from_str(r#"{"session": 3, "index": 1}"#).unwrap();
  assert_eq!(versioned, ItemData::Versioned { session: 3, index: 1 });
  let bare: ItemData = serde_json::from_str("-1").unwrap();
  assert_eq!(bare, ItemData::Index(-1));
  assert!(serde_json::from_str::<ItemData>(r#""nope""#).is_err());
}
