use super::db;
use super::error::{Error, Result};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;

const GEOMETRY_YAML: &str = include_str!("../data/geometry.yml");
const BENCHMARKS_YAML: &str = include_str!("../data/benchmarks.yml");

/// Screen geometry of one known model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometrySignature {
    pub model: String,
    /// Never empty.
    pub valid_heights: Vec<u32>,
    pub pixel_ratio: u32,
    pub hardware_id: String,
}

impl GeometrySignature {
    pub fn matches(&self, screen_height: u32, pixel_ratio: u32) -> bool {
        self.pixel_ratio == pixel_ratio && self.valid_heights.contains(&screen_height)
    }
}

/// Closed interval of benchmark throughput, `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpsRange {
    pub min: f64,
    pub max: f64,
}

impl OpsRange {
    pub fn contains(&self, ops: f64) -> bool {
        self.min <= ops && ops <= self.max
    }
}

/// Canvas benchmark signature of one model for one canvas hash.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSignature {
    pub canvas_hash: i32,
    /// Informational only (OS version bucket the hash was observed on).
    pub os_label: String,
    /// `None` means the hash alone identifies the model.
    pub ops_ranges: Option<Vec<OpsRange>>,
}

impl BenchmarkSignature {
    /// Whether `ops` is compatible with this signature.
    pub fn accepts(&self, ops: f64) -> bool {
        match &self.ops_ranges {
            None => true,
            Some(ranges) => ranges.iter().any(|r| r.contains(ops)),
        }
    }
}

/// Immutable reference tables: screen geometry per model and canvas benchmark
/// signatures per (model, canvas hash).
///
/// Geometry order is the YAML insertion order and decides ties.
#[derive(Debug, Clone)]
pub struct Catalog {
    geometry: Vec<GeometrySignature>,
    /// model → canvas hash → signature.
    benchmarks: HashMap<String, HashMap<i32, BenchmarkSignature>>,
}

impl Catalog {
    /// Build the catalog from the tables embedded in the crate (`data/`).
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(GEOMETRY_YAML, BENCHMARKS_YAML)
    }

    /// Load `geometry.yml` and `benchmarks.yml` from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let (geometry, benchmarks) = rayon::join(
            || load_yaml::<db::GeometryMap>(&dir.join("geometry.yml")),
            || load_yaml::<db::BenchmarkMap>(&dir.join("benchmarks.yml")),
        );
        Self::build(geometry?, benchmarks?)
    }

    /// Build the catalog from the YAML text of both tables.
    pub fn from_yaml_str(geometry: &str, benchmarks: &str) -> Result<Self> {
        Self::build(serde_yaml::from_str(geometry)?, serde_yaml::from_str(benchmarks)?)
    }

    fn build(geometry: db::GeometryMap, benchmarks: db::BenchmarkMap) -> Result<Self> {
        // Model names are unique; document order is the tie-break order.
        let mut by_name: IndexMap<String, db::GeometryEntry> =
            IndexMap::with_capacity(geometry.len());
        for (model, entry) in geometry {
            if by_name.contains_key(&model) {
                return Err(Error::DuplicateModel { model });
            }
            by_name.insert(model, entry);
        }

        let geometry = by_name
            .into_iter()
            .map(|(model, entry)| {
                let valid_heights = entry.heights.into_vec();
                if valid_heights.is_empty() {
                    return Err(Error::EmptyHeights { model });
                }
                if entry.ratio == 0 {
                    return Err(Error::ZeroPixelRatio { model });
                }
                Ok(GeometrySignature {
                    model,
                    valid_heights,
                    pixel_ratio: entry.ratio,
                    hardware_id: entry.identifier,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut by_model = HashMap::with_capacity(benchmarks.len());
        for (model, hashes) in benchmarks {
            if !geometry.iter().any(|g| g.model == model) {
                return Err(Error::UnknownModel { model });
            }
            if by_model.contains_key(&model) {
                return Err(Error::DuplicateModel { model });
            }

            let mut signatures = HashMap::with_capacity(hashes.len());
            for (canvas_hash, entry) in hashes {
                if signatures.contains_key(&canvas_hash) {
                    return Err(Error::DuplicateCanvasHash { model, canvas_hash });
                }
                let ops_ranges = match entry.ops {
                    None => None,
                    Some(pairs) => Some(
                        pairs
                            .into_iter()
                            .map(|[min, max]| {
                                if !min.is_finite() || !max.is_finite() || min > max {
                                    return Err(Error::InvalidOpsRange {
                                        model: model.clone(),
                                        canvas_hash,
                                        min,
                                        max,
                                    });
                                }
                                Ok(OpsRange { min, max })
                            })
                            .collect::<Result<Vec<_>>>()?,
                    ),
                };
                signatures.insert(
                    canvas_hash,
                    BenchmarkSignature {
                        canvas_hash,
                        os_label: entry.os,
                        ops_ranges,
                    },
                );
            }
            by_model.insert(model, signatures);
        }

        tracing::debug!(
            models = geometry.len(),
            benchmarked = by_model.len(),
            "catalog loaded"
        );

        Ok(Self {
            geometry,
            benchmarks: by_model,
        })
    }

    /// All geometry signatures, in catalog order.
    pub fn geometry(&self) -> &[GeometrySignature] {
        &self.geometry
    }

    /// Geometry signatures matching both values exactly, in catalog order.
    pub fn geometry_candidates(
        &self,
        screen_height: u32,
        pixel_ratio: u32,
    ) -> impl Iterator<Item = &GeometrySignature> + '_ {
        self.geometry
            .iter()
            .filter(move |g| g.matches(screen_height, pixel_ratio))
    }

    pub fn benchmark_signature(&self, model: &str, canvas_hash: i32) -> Option<&BenchmarkSignature> {
        self.benchmarks.get(model)?.get(&canvas_hash)
    }
}

fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}
