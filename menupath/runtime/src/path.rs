//! Addressable paths and their wire encoding.
//!
//! A [`Path`] is an immutable, append-only list of [`PathSegment`]s. Appending
//! shares the parent's segments through an `Arc` link, so navigating from a
//! shared root costs one allocation per step and never touches the parent.
//!
//! [`flatten`] is the only place that renders a path for a transport, and
//! [`parse_address`] is its inverse:
//!
//! ```text
//! [file] [import] [cad]               ->  file/import/cad
//! [mesh] [controls<inlet-1>] [delete] ->  mesh/controls[inlet-1]/delete
//! [project[beta]]                     ->  project\[beta\]
//! ```
//!
//! Backslash escapes `\`, `/`, `[` and `]` inside names and keys, which keeps
//! the encoding injective even for remote names that carry brackets.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::PathIntegrityError;

const SEPARATOR: char = '/';
const KEY_OPEN: char = '[';
const KEY_CLOSE: char = ']';
const ESCAPE: char = '\\';

/// One hop in the remote command tree.
///
/// `remote_name` is the literal name the remote engine understands and is
/// never sanitized. `instance_key` is present only for members of a
/// named-object collection.
///
/// ## Examples
///
/// ```
/// use menupath_runtime::PathSegment;
///
/// let plain = PathSegment::new("import");
/// assert_eq!(plain.remote_name(), "import");
/// assert_eq!(plain.instance_key(), None);
///
/// let keyed = PathSegment::keyed("controls", "inlet-1");
/// assert_eq!(keyed.instance_key(), Some("inlet-1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSegment {
    remote_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instance_key: Option<String>,
}

impl PathSegment {
    /// Creates a plain segment.
    pub fn new(remote_name: impl Into<String>) -> Self {
        Self {
            remote_name: remote_name.into(),
            instance_key: None,
        }
    }

    /// Creates a segment bound to a named-object instance.
    pub fn keyed(remote_name: impl Into<String>, instance_key: impl Into<String>) -> Self {
        Self {
            remote_name: remote_name.into(),
            instance_key: Some(instance_key.into()),
        }
    }

    /// Literal remote name.
    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    /// Instance key, for named-object members.
    pub fn instance_key(&self) -> Option<&str> {
        self.instance_key.as_deref()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = String::new();
        render_segment(self, &mut rendered);
        f.write_str(&rendered)
    }
}

#[derive(Debug)]
struct Link {
    segment: PathSegment,
    parent: Option<Arc<Link>>,
    len: usize,
}

/// Ordered, root-to-leaf sequence of segments.
///
/// Two paths are equal iff their segments are equal element-wise. The empty
/// path is the session root; every remote-addressable entity has a
/// non-empty path.
///
/// ## Examples
///
/// ```
/// use menupath_runtime::{Path, PathSegment};
///
/// let file = Path::root().join(PathSegment::new("file"));
/// let cad = file.join(PathSegment::new("import")).join(PathSegment::new("cad"));
///
/// assert_eq!(file.len(), 1);
/// assert_eq!(cad.len(), 3);
/// let expected: Path = ["file", "import", "cad"].into_iter().map(PathSegment::new).collect();
/// assert_eq!(cad, expected);
/// ```
#[derive(Clone, Default)]
pub struct Path {
    tail: Option<Arc<Link>>,
}

impl Path {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `segment` appended. `self` is unchanged.
    pub fn join(&self, segment: PathSegment) -> Self {
        let len = self.len() + 1;
        Self {
            tail: Some(Arc::new(Link {
                segment,
                parent: self.tail.clone(),
                len,
            })),
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.tail.as_ref().map_or(0, |link| link.len)
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.tail.is_none()
    }

    /// The final segment.
    pub fn last(&self) -> Option<&PathSegment> {
        self.tail.as_ref().map(|link| &link.segment)
    }

    /// The path without its final segment.
    pub fn parent(&self) -> Option<Path> {
        self.tail.as_ref().map(|link| Path {
            tail: link.parent.clone(),
        })
    }

    /// Segments in root-to-leaf order.
    pub fn segments(&self) -> Vec<&PathSegment> {
        let mut segments: Vec<&PathSegment> = self.rev_segments().collect();
        segments.reverse();
        segments
    }

    /// Remote names in root-to-leaf order.
    pub fn remote_names(&self) -> Vec<&str> {
        self.segments().into_iter().map(PathSegment::remote_name).collect()
    }

    fn rev_segments(&self) -> impl Iterator<Item = &PathSegment> {
        std::iter::successors(self.tail.as_deref(), |link| link.parent.as_deref())
            .map(|link| &link.segment)
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        match (&self.tail, &other.tail) {
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => true,
            _ => self.len() == other.len() && self.rev_segments().eq(other.rev_segments()),
        }
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for segment in self.rev_segments() {
            segment.hash(state);
        }
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.segments()).finish()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Path::root(), |path, segment| path.join(segment))
    }
}

/// Transport-level address of a remote entity.
///
/// Only [`flatten`] produces these, so every address a transport sees has
/// passed the integrity checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransportAddress(String);

impl TransportAddress {
    /// The encoded address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the address, returning the encoded string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TransportAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TransportAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encodes a path as a transport address.
///
/// Segments are joined with `/`; a keyed segment renders as `name[key]`.
///
/// ## Errors
///
/// Returns a [`PathIntegrityError`] for the empty path, a segment with an
/// empty remote name, or a keyed segment whose key is empty.
///
/// ## Examples
///
/// ```
/// use menupath_runtime::{flatten, Path, PathSegment};
///
/// let path: Path = vec![
///     PathSegment::new("mesh"),
///     PathSegment::keyed("controls", "inlet-1"),
///     PathSegment::new("delete"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(flatten(&path).unwrap().as_str(), "mesh/controls[inlet-1]/delete");
/// assert!(flatten(&Path::root()).is_err());
/// ```
pub fn flatten(path: &Path) -> Result<TransportAddress, PathIntegrityError> {
    if path.is_empty() {
        return Err(PathIntegrityError::EmptyPath);
    }
    for (position, segment) in path.segments().into_iter().enumerate() {
        if segment.remote_name.is_empty() {
            return Err(PathIntegrityError::EmptySegmentName { position });
        }
        if segment.instance_key.as_deref() == Some("") {
            return Err(PathIntegrityError::MissingInstanceKey {
                remote_name: segment.remote_name.clone(),
                position,
            });
        }
    }
    Ok(TransportAddress(render(path)))
}

/// Decodes a transport address back into a path.
///
/// Inverse of [`flatten`]: `parse_address(flatten(p)?.as_str()) == Ok(p)` for
/// every well-formed `p`.
///
/// ## Errors
///
/// Returns [`PathIntegrityError::MalformedAddress`] for dangling escapes,
/// unbalanced brackets, or text after an instance key, and the same errors
/// as [`flatten`] for empty names and keys.
pub fn parse_address(address: &str) -> Result<Path, PathIntegrityError> {
    if address.is_empty() {
        return Err(PathIntegrityError::EmptyPath);
    }

    let malformed = |reason| PathIntegrityError::MalformedAddress {
        address: address.to_string(),
        reason,
    };

    let mut path = Path::root();
    let mut name = String::new();
    let mut key: Option<String> = None;
    let mut in_key = false;
    let mut chars = address.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => {
                let escaped = chars.next().ok_or_else(|| malformed("dangling escape"))?;
                if key.is_some() && !in_key {
                    return Err(malformed("text after instance key"));
                }
                match (&mut key, in_key) {
                    (Some(k), true) => k.push(escaped),
                    _ => name.push(escaped),
                }
            }
            SEPARATOR if in_key => return Err(malformed("unescaped '/' inside instance key")),
            SEPARATOR => {
                path = path.join(finish_segment(&mut name, &mut key, path.len())?);
            }
            KEY_OPEN if in_key || key.is_some() => return Err(malformed("unexpected '['")),
            KEY_OPEN => {
                key = Some(String::new());
                in_key = true;
            }
            KEY_CLOSE if in_key => in_key = false,
            KEY_CLOSE => return Err(malformed("unexpected ']'")),
            _ if key.is_some() && !in_key => return Err(malformed("text after instance key")),
            _ => match (&mut key, in_key) {
                (Some(k), true) => k.push(c),
                _ => name.push(c),
            },
        }
    }

    if in_key {
        return Err(malformed("unterminated instance key"));
    }
    let position = path.len();
    Ok(path.join(finish_segment(&mut name, &mut key, position)?))
}

fn finish_segment(
    name: &mut String,
    key: &mut Option<String>,
    position: usize,
) -> Result<PathSegment, PathIntegrityError> {
    let remote_name = std::mem::take(name);
    if remote_name.is_empty() {
        return Err(PathIntegrityError::EmptySegmentName { position });
    }
    match key.take() {
        Some(k) if k.is_empty() => Err(PathIntegrityError::MissingInstanceKey {
            remote_name,
            position,
        }),
        Some(k) => Ok(PathSegment::keyed(remote_name, k)),
        None => Ok(PathSegment::new(remote_name)),
    }
}

fn render(path: &Path) -> String {
    let mut out = String::new();
    for (i, segment) in path.segments().into_iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        render_segment(segment, &mut out);
    }
    out
}

fn render_segment(segment: &PathSegment, out: &mut String) {
    push_escaped(&segment.remote_name, out);
    if let Some(key) = &segment.instance_key {
        out.push(KEY_OPEN);
        push_escaped(key, out);
        out.push(KEY_CLOSE);
    }
}

fn push_escaped(text: &str, out: &mut String) {
    for c in text.chars() {
        if matches!(c, ESCAPE | SEPARATOR | KEY_OPEN | KEY_CLOSE) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}
