//! Gathering the sources for a build.


use crate::documents::Documents;
use anyhow::{Context as _, Result};
use compiler::Source;
use fast_hash::FxHashSet;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Returns one source per open document, plus one per file under `root` whose name ends with
/// `suffix` and which is not also open.
pub(crate) fn get<F>(
  fs: &F,
  root: Option<&Path>,
  suffix: &str,
  documents: &Documents,
) -> Result<Vec<Source>>
where
  F: paths::FileSystem,
{
  let mut ret = Vec::<Source>::new();
  for (url, text) in documents.iter() {
    ret.push(Source { name: url.as_str().to_owned(), contents: text.to_owned() });
  }
  let Some(root) = root else { return Ok(ret) };
  let found = find_files(root, suffix)?;
  let open: FxHashSet<&str> = documents.iter().map(|(url, _)| url.as_str()).collect();
  ret.extend(read_files(fs, found, &open)?);
  Ok(ret)
}

/// Symlinks are followed, so an entry whose target went away is a race like any other.
fn find_files(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
  let mut ret = Vec::<PathBuf>::new();
  for entry in WalkDir::new(root).follow_links(true) {
    let entry = match entry {
      Ok(x) => x,
      Err(e) if e.io_error().is_some_and(is_race) => {
        log::debug!("an entry went away before inspecting it: {e}");
        continue;
      }
      Err(e) if e.loop_ancestor().is_some() => {
        log::warn!("skipping a symlink loop: {e}");
        continue;
      }
      Err(e) => return Err(e).with_context(|| format!("couldn't walk {}", root.display())),
    };
    if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(suffix) {
      ret.push(entry.into_path());
    }
  }
  Ok(ret)
}

/// Reads the files that are not open.
fn read_files<F>(fs: &F, found: Vec<PathBuf>, open: &FxHashSet<&str>) -> Result<Vec<Source>>
where
  F: paths::FileSystem,
{
  let mut ret = Vec::<Source>::with_capacity(found.len());
  for path in found {
    let name = path_to_uri(&path);
    if open.contains(name.as_str()) {
      continue;
    }
    match fs.read_to_string(&path) {
      Ok(contents) => ret.push(Source { name, contents }),
      Err(e) if is_race(&e) => log::debug!("{} went away before reading it", path.display()),
      Err(e) => return Err(e).with_context(|| format!("couldn't read {}", path.display())),
    }
  }
  Ok(ret)
}

fn is_race(e: &io::Error) -> bool {
  e.kind() == io::ErrorKind::NotFound
}

/// Everything but ASCII alphanumerics and `-_.!~*'()` is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'!')
  .remove(b'~')
  .remove(b'*')
  .remove(b'\'')
  .remove(b'(')
  .remove(b')');

/// Returns the `file://` URI for an absolute path.
///
/// Backslashes become slashes, a leading slash is added if missing, and each segment is
/// percent-encoded on its own, so `C:\a b\c.sk` is `file:///C%3A/a%20b/c.sk`.
pub(crate) fn path_to_uri(path: &Path) -> String {
  let mut path = path.to_string_lossy().replace('\\', "/");
  if !path.starts_with('/') {
    path.insert(0, '/');
  }
  let mut ret = String::from("file://");
  for (idx, segment) in path.split('/').enumerate() {
    if idx != 0 {
      ret.push('/');
    }
    ret.extend(percent_encoding::utf8_percent_encode(segment, COMPONENT));
  }
  ret
}
