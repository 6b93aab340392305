//! Dot-delimited document paths
//!
//! `sections.overview.keyFeatures.2` parses into three keys followed by a list
//! index. Numeric segments always address list positions.

use crate::utils::error::{CaseStudyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocPath(Vec<Segment>);

impl DocPath {
    pub fn parse(raw: &str) -> Result<Self> {
        raw.parse()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// Path without its last segment; `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    /// Prefix made of the first `len` segments, used to locate errors.
    pub(crate) fn prefix(&self, len: usize) -> String {
        Self(self.0[..len.min(self.0.len())].to_vec()).to_string()
    }
}

impl FromStr for DocPath {
    type Err = CaseStudyError;

    fn from_str(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(CaseStudyError::malformed_path(raw, "path is empty"));
        }

        raw.split('.')
            .enumerate()
            .map(|(position, segment)| {
                if segment.is_empty() {
                    return Err(CaseStudyError::malformed_path(
                        raw,
                        format!("segment {} is empty", position),
                    ));
                }
                if segment.bytes().all(|b| b.is_ascii_digit()) {
                    // 索引需可原樣印回，"01" 之類不接受
                    if segment.len() > 1 && segment.starts_with('0') {
                        return Err(CaseStudyError::malformed_path(
                            raw,
                            format!("index '{}' has a leading zero", segment),
                        ));
                    }
                    segment.parse::<usize>().map(Segment::Index).map_err(|e| {
                        let reason = format!("bad index '{}': {}", segment, e);
                        CaseStudyError::malformed_path(raw, reason)
                    })
                } else {
                    Ok(Segment::Key(segment.to_string()))
                }
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl TryFrom<String> for DocPath {
    type Error = CaseStudyError;

    fn try_from(raw: String) -> Result<Self> {
        raw.parse()
    }
}

impl From<DocPath> for String {
    fn from(path: DocPath) -> Self {
        path.to_string()
    }
}

impl Display for DocPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
