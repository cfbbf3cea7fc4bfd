//! Typed view of a search result envelope.
//!
//! The envelope's objects are typed, but the scalar fields are kept as raw
//! JSON values and converted only when a check reads them. A hit nobody
//! inspects can carry anything, and an incomplete or mistyped field is
//! reported as a failed check naming its path.

use crate::error::{Result, StagingError};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    pub root: Option<ResultRoot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultRoot {
    pub fields: Option<RootFields>,
    #[serde(default)]
    pub children: Vec<Hit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RootFields {
    #[serde(rename = "totalCount")]
    pub total_count: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hit {
    pub fields: Option<HitFields>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitFields {
    pub artist: Option<Value>,
    pub album: Option<Value>,
    pub year: Option<Value>,
}

/// The fields a verified hit must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub artist: String,
    pub album: String,
    pub year: i64,
}

impl Album {
    pub fn new(artist: &str, album: &str, year: i64) -> Self {
        Self {
            artist: artist.to_string(),
            album: album.to_string(),
            year,
        }
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.artist, self.album, self.year)
    }
}

fn missing(path: String, expected: &str) -> StagingError {
    StagingError::verification(path, expected, "missing")
}

/// Integer value of a scalar: numbers (fractions truncated) and numeric strings.
fn as_long(path: String, value: Option<&Value>) -> Result<i64> {
    let value = match value {
        None | Some(Value::Null) => return Err(missing(path, "a number")),
        Some(v) => v,
    };
    let long = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    long.ok_or_else(|| StagingError::verification(path, "a number", value))
}

/// Text of a scalar: strings as-is, numbers and booleans rendered.
fn as_text(path: String, value: Option<&Value>) -> Result<String> {
    match value {
        None | Some(Value::Null) => Err(missing(path, "a string")),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(v) => Err(StagingError::verification(path, "a string", v)),
    }
}

impl SearchResponse {
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| StagingError::verification("response body", "search result JSON", e))
    }

    fn root(&self) -> Result<&ResultRoot> {
        self.root
            .as_ref()
            .ok_or_else(|| missing("root".to_string(), "an object"))
    }

    /// `root.fields.totalCount`
    pub fn total_count(&self) -> Result<u64> {
        let path = "root.fields.totalCount";
        let value = self
            .root()?
            .fields
            .as_ref()
            .and_then(|f| f.total_count.as_ref());
        let count = as_long(path.to_string(), value)?;
        u64::try_from(count)
            .map_err(|_| StagingError::verification(path, "a non-negative number", count))
    }

    /// Number of hits actually returned in `root.children`.
    pub fn hit_count(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.children.len())
    }

    /// The album fields of the hit at `position`.
    pub fn album_at(&self, position: usize) -> Result<Album> {
        let root = self.root()?;
        let hit = root.children.get(position).ok_or_else(|| {
            StagingError::verification(
                format!("root.children[{}]", position),
                "a hit",
                format!("{} hits", root.children.len()),
            )
        })?;
        let fields = hit
            .fields
            .as_ref()
            .ok_or_else(|| missing(format!("root.children[{}].fields", position), "an object"))?;

        let field_path = |name: &str| format!("root.children[{}].fields.{}", position, name);
        Ok(Album {
            artist: as_text(field_path("artist"), fields.artist.as_ref())?,
            album: as_text(field_path("album"), fields.album.as_ref())?,
            year: as_long(field_path("year"), fields.year.as_ref())?,
        })
    }
}
