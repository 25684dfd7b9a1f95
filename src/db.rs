use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;

/// A YAML mapping read as its raw `(key, value)` pairs, in document order and
/// with repeated keys kept, so the catalog builder can reject duplicates
/// instead of a map silently keeping the last value.
#[derive(Debug)]
pub(crate) struct Entries<K, V>(pub Vec<(K, V)>);

impl<K, V> Entries<K, V> {
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K, V> IntoIterator for Entries<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de, K, V> Deserialize<'de> for Entries<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for EntriesVisitor<K, V>
        where
            K: Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = Entries<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry()? {
                    pairs.push(pair);
                }
                Ok(Entries(pairs))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

// ---------------------------------------------------------------------------
// Geometry  (data/geometry.yml)
//
// Format: top-level mapping  model_name → GeometryEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct GeometryEntry {
    pub heights: Heights,
    pub ratio: u32,
    pub identifier: String,
}

/// `heights` is either a single value or a list of values (some models report
/// different CSS heights depending on OS version / display zoom).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Heights {
    One(u32),
    Many(Vec<u32>),
}

impl Heights {
    pub fn into_vec(self) -> Vec<u32> {
        match self {
            Heights::One(h) => vec![h],
            Heights::Many(hs) => hs,
        }
    }
}

/// Raw deserialization target for geometry.yml.
/// Document order is kept (first-match-wins).
pub(crate) type GeometryMap = Entries<String, GeometryEntry>;

// ---------------------------------------------------------------------------
// Benchmarks  (data/benchmarks.yml)
//
// Format: top-level mapping  model_name → { canvas_hash → BenchmarkEntry }
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct BenchmarkEntry {
    pub os: String,
    #[serde(default)]
    pub ops: Option<Vec<[f64; 2]>>,
}

/// Raw deserialization target for benchmarks.yml.
pub(crate) type BenchmarkMap = Entries<String, Entries<i32, BenchmarkEntry>>;
