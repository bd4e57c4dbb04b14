use super::Fixes;
use compiler::{Fix, Position, Range};
use lsp_types::{Diagnostic, DiagnosticSeverity, Url};
use pretty_assertions::assert_eq;

fn url() -> Url {
  Url::parse("file:///ws/a.sk").unwrap()
}

fn fix(replacement: &str) -> Fix {
  Fix {
    kind: "UNNECESSARY_PARENTHESES".to_owned(),
    range: Range {
      source: url().to_string(),
      start: Position { line: 1, column: 4 },
      end: Position { line: 1, column: 9 },
    },
    description: format!("Replace with {replacement}"),
    expected: "(a)".to_owned(),
    replacement: replacement.to_owned(),
  }
}

fn diagnostic(message: &str) -> Diagnostic {
  Diagnostic {
    range: lsp_types::Range {
      start: lsp_types::Position { line: 1, character: 4 },
      end: lsp_types::Position { line: 1, character: 9 },
    },
    severity: Some(DiagnosticSeverity::WARNING),
    message: message.to_owned(),
    ..Default::default()
  }
}

#[test]
fn round_trip() {
  let mut fixes = Fixes::default();
  let want = vec![fix("a"), fix("(a) ")];
  fixes.record(&url(), &diagnostic("Unnecessary parentheses"), want.clone()).unwrap();
  assert_eq!(fixes.lookup(&url(), &diagnostic("Unnecessary parentheses")), Some(want.as_slice()));
  assert_eq!(fixes.lookup(&url(), &diagnostic("Unused variable")), None);
}

#[test]
fn keyed_by_severity_range_and_url() {
  let mut fixes = Fixes::default();
  fixes.record(&url(), &diagnostic("m"), vec![fix("a")]).unwrap();
  let mut other_severity = diagnostic("m");
  other_severity.severity = Some(DiagnosticSeverity::ERROR);
  assert_eq!(fixes.lookup(&url(), &other_severity), None);
  let mut other_range = diagnostic("m");
  other_range.range.end.character = 10;
  assert_eq!(fixes.lookup(&url(), &other_range), None);
  let other_url = Url::parse("file:///ws/b.sk").unwrap();
  assert_eq!(fixes.lookup(&other_url, &diagnostic("m")), None);
}

#[test]
fn ignores_fields_outside_the_key() {
  let mut fixes = Fixes::default();
  fixes.record(&url(), &diagnostic("m"), vec![fix("a")]).unwrap();
  let mut from_editor = diagnostic("m");
  from_editor.source = Some("skew".to_owned());
  assert_eq!(fixes.lookup(&url(), &from_editor).map(<[Fix]>::len), Some(1));
}

#[test]
fn later_overwrites() {
  let mut fixes = Fixes::default();
  fixes.record(&url(), &diagnostic("m"), vec![fix("a")]).unwrap();
  fixes.record(&url(), &diagnostic("m"), vec![fix("b")]).unwrap();
  assert_eq!(fixes.lookup(&url(), &diagnostic("m")), Some([fix("b")].as_slice()));
}
