use core::fmt;
use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Error;
use crate::share::{to_points, Point, Share};

/// Errors raised while reading a test case.
#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed test case: {0}")]
    Json(#[from] serde_json::Error),

    #[error("test case does not declare a threshold `k`")]
    MissingThreshold,

    #[error("share identifier {0:?} is not a non-negative integer")]
    InvalidIdentifier(String),

    #[error("share {x} has an unreadable base {base:?}")]
    InvalidBaseField { x: u64, base: String },

    #[error(transparent)]
    Share(#[from] Error),
}

/// One reconstruction input: a threshold and the shares to reconstruct from.
///
/// The on-disk form is a JSON object with the share count and threshold under
/// `keys` (or at the top level) and one entry per share keyed by its
/// identifier:
///
/// ```json
/// {
///     "keys": { "n": 3, "k": 2 },
///     "1": { "base": "10", "value": "4" },
///     "2": { "base": "2", "value": "111" },
///     "3": { "base": "16", "value": "a" }
/// }
/// ```
///
/// Shares are kept in ascending identifier order, which is the order the
/// solver enumerates them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub threshold: usize,
    pub shares: Vec<Share>,
}

#[derive(Deserialize)]
struct RawKeys {
    n: Option<usize>,
    k: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBase {
    Number(u32),
    Text(String),
}

#[derive(Deserialize)]
struct RawShare {
    base: RawBase,
    value: String,
}

/// Every top-level entry of a test case, with share entries kept in document
/// order. A repeated share key stays as two entries.
struct RawTestCase {
    keys: Option<RawKeys>,
    n: Option<usize>,
    k: Option<usize>,
    shares: Vec<(String, RawShare)>,
}

impl<'de> Deserialize<'de> for RawTestCase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawTestCaseVisitor;

        impl<'de> Visitor<'de> for RawTestCaseVisitor {
            type Value = RawTestCase;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a test case object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut raw = RawTestCase {
                    keys: None,
                    n: None,
                    k: None,
                    shares: Vec::new(),
                };

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "keys" => {
                            if raw.keys.is_some() {
                                return Err(de::Error::duplicate_field("keys"));
                            }
                            raw.keys = Some(map.next_value()?);
                        }
                        "n" => {
                            if raw.n.is_some() {
                                return Err(de::Error::duplicate_field("n"));
                            }
                            raw.n = Some(map.next_value()?);
                        }
                        "k" => {
                            if raw.k.is_some() {
                                return Err(de::Error::duplicate_field("k"));
                            }
                            raw.k = Some(map.next_value()?);
                        }
                        _ => {
                            let share: RawShare = map.next_value()?;
                            raw.shares.push((key, share));
                        }
                    }
                }

                Ok(raw)
            }
        }

        deserializer.deserialize_map(RawTestCaseVisitor)
    }
}

impl TestCase {
    pub fn new(threshold: usize, shares: Vec<Share>) -> Self {
        TestCase { threshold, shares }
    }

    /// Reads and parses a test case file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("📝 Reading test case at path: {:?}", path);
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InputError> {
        let raw: RawTestCase = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    pub fn from_json(json: &str) -> Result<Self, InputError> {
        let raw: RawTestCase = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawTestCase) -> Result<Self, InputError> {
        let (declared_n, k) = match raw.keys {
            Some(keys) => (keys.n.or(raw.n), keys.k.or(raw.k)),
            None => (raw.n, raw.k),
        };
        let threshold = k.ok_or(InputError::MissingThreshold)?;

        let mut shares = Vec::with_capacity(raw.shares.len());
        for (key, share) in raw.shares {
            let x: u64 = key
                .parse()
                .map_err(|_| InputError::InvalidIdentifier(key.clone()))?;
            let base = match share.base {
                RawBase::Number(base) => base,
                RawBase::Text(text) => text
                    .trim()
                    .parse()
                    .map_err(|_| InputError::InvalidBaseField { x, base: text })?,
            };
            shares.push(Share::new(x, base, share.value)?);
        }
        // stable, so repeated identifiers keep their document order
        shares.sort_by_key(Share::x);

        if let Some(n) = declared_n {
            if n != shares.len() {
                warn!(
                    "⚠️ test case declares n = {} but contains {} shares",
                    n,
                    shares.len()
                );
            }
        }
        debug!("Parsed {} shares with threshold {}", shares.len(), threshold);

        Ok(TestCase { threshold, shares })
    }

    /// Decodes every share into a point, in identifier order.
    pub fn points(&self) -> Result<Vec<Point>, Error> {
        to_points(&self.shares)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Serialize)]
struct KeysOut {
    n: usize,
    k: usize,
}

#[derive(Serialize)]
struct ShareOut<'a> {
    base: String,
    value: &'a str,
}

/// Writes the same layout [`TestCase::from_json`] reads, with bases as strings.
impl Serialize for TestCase {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.shares.len() + 1))?;
        map.serialize_entry(
            "keys",
            &KeysOut {
                n: self.shares.len(),
                k: self.threshold,
            },
        )?;
        for share in &self.shares {
            map.serialize_entry(
                &share.x().to_string(),
                &ShareOut {
                    base: share.base().to_string(),
                    value: share.digits(),
                },
            )?;
        }
        map.end()
    }
}
