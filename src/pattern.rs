//! Compiled path patterns.
//!
//! A pattern like `/programari/:id/edit` is compiled once into a list of segments. Matching a
//! concrete path walks the segments pairwise: literals must be equal (case-sensitive) and
//! parameters accept any non-empty component, which is percent-decoded before being stored.

use std::collections::BTreeMap;
use std::fmt;
use crate::error::{ConfigError, RouteError};

/// Parameter values keyed by name.
pub type Params = BTreeMap<String, String>;

/// The marker that starts a dynamic segment.
pub const PARAM_MARKER: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// The pattern must start with `/`. A trailing slash is ignored. Empty segments, empty
    /// parameter names and repeated parameter names are rejected.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let invalid = |reason| ConfigError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: reason,
        };

        if !pattern.starts_with('/') {
            return Err(invalid("must start with `/`"));
        }

        let mut segments = vec![];
        for segment in components(pattern) {
            let segment = match segment {
                "" => return Err(invalid("empty segment")),
                s if s.starts_with(PARAM_MARKER) => {
                    let name = &s[PARAM_MARKER.len_utf8()..];
                    if name.is_empty() {
                        return Err(invalid("empty parameter name"));
                    }
                    if segments.contains(&Segment::Param(name.to_owned())) {
                        return Err(invalid("repeated parameter name"));
                    }
                    Segment::Param(name.to_owned())
                }
                s => Segment::Literal(s.to_owned()),
            };
            segments.push(segment);
        }

        Ok(Pattern { segments: segments })
    }

    /// True if the pattern has no dynamic segments.
    pub fn is_static(&self) -> bool {
        self.segments.iter().all(|s| match s {
            Segment::Literal(_) => true,
            Segment::Param(_) => false,
        })
    }

    /// Names of the dynamic segments, in order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match the components of a normalized path, returning the extracted parameters.
    pub fn matches(&self, path: &[&str]) -> Option<Params> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, component) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != component {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if component.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), percent_decode(component)?);
                }
            }
        }

        Some(params)
    }

    /// Build a concrete path by substituting parameters into the dynamic segments.
    ///
    /// Values are percent-encoded. Unused parameters are ignored. `route` is only used for error
    /// reporting.
    pub fn expand(&self, route: &str, params: &Params) -> Result<String, RouteError> {
        if self.segments.is_empty() {
            return Ok("/".to_owned());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(name) => {
                    match params.get(name) {
                        Some(value) if !value.is_empty() => path.push_str(&percent_encode(value)),
                        _ => return Err(RouteError::MissingParam {
                            route: route.to_owned(),
                            param: name.clone(),
                        }),
                    }
                }
            }
        }

        Ok(path)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => write!(f, "/{}", literal)?,
                Segment::Param(name) => write!(f, "/{}{}", PARAM_MARKER, name)?,
            }
        }
        Ok(())
    }
}

/// A location split into its path and query, with any fragment dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
}

impl<'a> Location<'a> {
    /// Split a path or a full url.
    ///
    /// For a full url (`http://host:8080/programari?x=1#top`) the scheme and authority are
    /// stripped.
    pub fn parse(url: &'a str) -> Self {
        let url = match url.find("://") {
            Some(i) if !url[..i].contains(|c: char| c == '/' || c == '?' || c == '#') => {
                let rest = &url[i + 3..];
                match rest.find(|c: char| c == '/' || c == '?' || c == '#') {
                    Some(j) => &rest[j..],
                    None => "",
                }
            }
            _ => url,
        };

        let url = match url.find('#') {
            Some(i) => &url[..i],
            None => url,
        };

        match url.find('?') {
            Some(i) => Location { path: &url[..i], query: Some(&url[i + 1..]) },
            None => Location { path: url, query: None },
        }
    }

    /// The path as normalized components.
    pub fn components(&self) -> Vec<&'a str> {
        components(self.path).collect()
    }

    /// The normalized path, `/` for the root.
    ///
    /// Each component is percent-decoded and encoded again, so equivalent spellings of a path
    /// normalize to the same string.
    pub fn normalized(&self) -> String {
        let components = self.components();
        if components.is_empty() {
            "/".to_owned()
        }
        else {
            components.iter().fold(String::new(), |mut path, c| {
                path.push('/');
                match percent_decode(c) {
                    Some(decoded) => path.push_str(&percent_encode(&decoded)),
                    None => path.push_str(c),
                }
                path
            })
        }
    }

    /// Normalized path plus the re-encoded query, the form the address bar is kept in.
    pub fn canonical(&self) -> String {
        href(&self.normalized(), &self.query_params())
    }

    /// Decoded query parameters. For repeated keys the last value wins.
    pub fn query_params(&self) -> Params {
        let query = match self.query {
            Some(query) => query,
            None => return Params::new(),
        };

        query.split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (key, value) = match pair.find('=') {
                    Some(i) => (&pair[..i], &pair[i + 1..]),
                    None => (pair, ""),
                };
                let key = percent_decode(&key.replace('+', " "))?;
                let value = percent_decode(&value.replace('+', " "))?;
                Some((key, value))
            })
            .collect()
    }
}

/// Join a path and query parameters. Keys are in sorted order.
pub fn href(path: &str, query: &Params) -> String {
    if query.is_empty() {
        return path.to_owned();
    }

    let query = query.iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

/// Split a path into components, ignoring one leading and one trailing slash.
fn components(path: &str) -> impl Iterator<Item = &str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    let empty = path.is_empty();
    path.split('/').filter(move |_| !empty)
}

/// Decode `%XX` sequences.
///
/// Malformed sequences are kept as is. Returns `None` if the result is not valid UTF-8.
pub fn percent_decode(s: &str) -> Option<String> {
    if !s.contains('%') {
        return Some(s.to_owned());
    }

    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8(out).ok()
}

/// Encode everything but unreserved characters.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => out.push(b as char),
            b => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
