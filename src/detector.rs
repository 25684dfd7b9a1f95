use super::catalog::{Catalog, GeometrySignature};
use super::error::Result;
use super::types::*;
use rayon::prelude::*;
use std::path::Path;

/// Identifies iPhone models from screen geometry, falling back to the canvas
/// benchmark signature when several models share the same geometry.
///
/// Holds no mutable state; share one instance across threads freely.
#[derive(Debug, Clone)]
pub struct IphoneDetector {
    catalog: Catalog,
}

impl IphoneDetector {
    /// Detector over the catalog embedded in the crate.
    pub fn new() -> Result<Self> {
        Ok(Self::with_catalog(Catalog::builtin()?))
    }

    /// Detector over the `geometry.yml` / `benchmarks.yml` tables in `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_catalog(Catalog::from_dir(dir)?))
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Identify the device matching the observed signals, or `None` if the
    /// geometry is unknown or no tied candidate agrees with the benchmark.
    ///
    /// Height and ratio are `u32` and the canvas hash is `i32`, which covers
    /// every catalog value. Callers holding a negative height or a hash outside
    /// the `i32` range already know there is no match and need not call this.
    pub fn identify(
        &self,
        screen_height: u32,
        pixel_ratio: u32,
        canvas_hash: i32,
        ops: f64,
    ) -> Option<Device> {
        self.identify_signals(&Signals::new(screen_height, pixel_ratio, canvas_hash, ops))
    }

    pub fn identify_signals(&self, signals: &Signals) -> Option<Device> {
        self.identify_with_details(signals)
            .map(Identification::into_device)
    }

    /// Like [`identify_signals`](Self::identify_signals), also reporting how
    /// the device was resolved.
    pub fn identify_with_details<'a>(&'a self, signals: &Signals) -> Option<Identification<'a>> {
        // 1. Geometry
        let candidates: Vec<&GeometrySignature> = self
            .catalog
            .geometry_candidates(signals.screen_height, signals.pixel_ratio)
            .collect();

        match candidates.as_slice() {
            [] => {
                tracing::trace!(
                    screen_height = signals.screen_height,
                    pixel_ratio = signals.pixel_ratio,
                    "unknown geometry"
                );
                return None;
            }
            // Unambiguous geometry is enough; the benchmark is not consulted.
            [only] => {
                tracing::trace!(model = %only.model, "resolved by geometry");
                return Some(Identification {
                    device: Device::apple(&only.model, &only.hardware_id),
                    resolution: Resolution::Geometry,
                });
            }
            _ => {}
        }

        // 2. Benchmark: first candidate, in catalog order, whose signature for
        // this hash accepts the observed ops.
        let found = candidates.iter().find_map(|g| {
            let sig = self
                .catalog
                .benchmark_signature(&g.model, signals.canvas_hash)?;
            sig.accepts(signals.ops).then_some((*g, sig))
        });

        match found {
            Some((g, sig)) => {
                tracing::trace!(
                    model = %g.model,
                    os = %sig.os_label,
                    candidates = candidates.len(),
                    "resolved by benchmark"
                );
                Some(Identification {
                    device: Device::apple(&g.model, &g.hardware_id),
                    resolution: Resolution::Benchmark {
                        os_label: &sig.os_label,
                        candidates: candidates.len(),
                    },
                })
            }
            None => {
                tracing::trace!(
                    canvas_hash = signals.canvas_hash,
                    ops = signals.ops,
                    candidates = candidates.len(),
                    "no candidate matched benchmark"
                );
                None
            }
        }
    }

    /// Identify many reports in parallel. Results are in input order.
    pub fn identify_batch(&self, signals: &[Signals]) -> Vec<Option<Device>> {
        signals
            .par_iter()
            .map(|s| self.identify_signals(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> IphoneDetector {
        IphoneDetector::new().unwrap()
    }

    fn model(d: &IphoneDetector, h: u32, r: u32, hash: i32, ops: f64) -> Option<String> {
        d.identify(h, r, hash, ops).map(|d| d.model)
    }

    #[test]
    fn unique_geometry_ignores_benchmark() {
        let d = detector();
        for (hash, ops) in [(0, 0.0), (-1, f64::NAN), (814470808, 1e9), (i32::MIN, -5.0)] {
            let dev = d.identify(844, 3, hash, ops).unwrap();
            assert_eq!(dev.model, "iPhone 12");
            assert_eq!(dev.identifier, "A2403");
        }
        assert_eq!(model(&d, 693, 3, 0, 0.0).as_deref(), Some("iPhone X"));
        assert_eq!(model(&d, 926, 3, 0, 0.0).as_deref(), Some("iPhone 12 Pro Max"));
    }

    #[test]
    fn unknown_geometry() {
        let d = detector();
        assert_eq!(d.identify(900, 2, -131154645, 1.55), None);
        assert_eq!(d.identify(844, 2, 814470808, 1.0), None);
        assert_eq!(d.identify(0, 0, 0, 0.0), None);
    }

    #[test]
    fn extreme_inputs_are_no_match() {
        let d = detector();
        assert_eq!(d.identify(u32::MAX, 2, i32::MIN, 0.0), None);
        assert_eq!(d.identify(896, u32::MAX, i32::MAX, f64::INFINITY), None);
        assert_eq!(d.identify(896, 2, i32::MIN, f64::NEG_INFINITY), None);
    }

    #[test]
    fn device_fields() {
        let dev = detector().identify(736, 3, 2048727691, 5.8).unwrap();
        assert_eq!(
            dev,
            Device {
                kind: DeviceType::Mobile,
                identified: IdentificationMethod::Pattern,
                manufacturer: "Apple",
                model: "iPhone 6S Plus".into(),
                identifier: "A1634".into(),
                generic: false,
            }
        );
    }

    #[test]
    fn ops_range_selects_model() {
        let d = detector();
        assert_eq!(model(&d, 896, 2, -131154645, 1.55).as_deref(), Some("iPhone 11"));
        assert_eq!(model(&d, 896, 2, -131154645, 2.5).as_deref(), Some("iPhone XR"));
        assert_eq!(model(&d, 896, 2, -131154645, 1.7), None);
    }

    #[test]
    fn range_endpoints_are_inclusive() {
        let d = detector();
        assert_eq!(model(&d, 736, 3, 2048727691, 5.4).as_deref(), Some("iPhone 6S Plus"));
        assert_eq!(model(&d, 736, 3, 2048727691, 6.3).as_deref(), Some("iPhone 6S Plus"));
        assert_eq!(model(&d, 736, 3, 2048727691, 5.4 - 1e-9), None);
        assert_eq!(model(&d, 736, 3, 2048727691, 6.3 + 1e-9), None);
        // 7 Plus covers [3.4, 4.2] for the same hash.
        assert_eq!(model(&d, 736, 3, 2048727691, 4.2).as_deref(), Some("iPhone 7 Plus"));
        assert_eq!(model(&d, 736, 3, 2048727691, 4.2 + 1e-9), None);
    }

    #[test]
    fn hash_only_signature() {
        let d = detector();
        for ops in [-1.0, 0.0, 2.05, 1e9, f64::NAN] {
            assert_eq!(model(&d, 812, 3, -1555617484, ops).as_deref(), Some("iPhone XS"));
        }
    }

    #[test]
    fn first_retained_candidate_wins() {
        let d = detector();
        // XS Max [2.0, 3.0] and 11 Pro Max [2.45, 2.95] both accept 2.5.
        assert_eq!(model(&d, 896, 3, -131154645, 2.5).as_deref(), Some("iPhone XS Max"));
        // 6S (no ranges) and 7 [3.4, 4.2] both accept 4.0 on 667/2.
        assert_eq!(model(&d, 667, 2, 2048727691, 4.0).as_deref(), Some("iPhone 6S"));
    }

    #[test]
    fn unknown_hash_eliminates_all() {
        let d = detector();
        assert_eq!(d.identify(812, 3, 12345, 2.0), None);
    }

    #[test]
    fn details_report_resolution() {
        let d = detector();
        let id = d
            .identify_with_details(&Signals::new(844, 3, 0, 0.0))
            .unwrap();
        assert_eq!(id.resolution, Resolution::Geometry);

        let id = d
            .identify_with_details(&Signals::new(812, 3, -2095308119, 2.2))
            .unwrap();
        assert_eq!(id.device().model, "iPhone XS");
        assert_eq!(
            id.resolution,
            Resolution::Benchmark {
                os_label: "14.x 1",
                candidates: 4
            }
        );
    }

    #[test]
    fn batch_matches_single() {
        let d = detector();
        let inputs = vec![
            Signals::new(667, 2, 0, 0.0),
            Signals::new(896, 2, -131154645, 1.55),
            Signals::new(736, 3, 2048727691, 5.8),
            Signals::new(900, 2, 0, 0.0),
            Signals::new(844, 3, 0, 0.0),
        ];
        let batch = d.identify_batch(&inputs);
        assert_eq!(batch.len(), inputs.len());
        for (s, r) in inputs.iter().zip(&batch) {
            assert_eq!(&d.identify_signals(s), r);
        }
    }

    #[test]
    fn from_dir_agrees_with_builtin() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let loaded = IphoneDetector::from_dir(dir).unwrap();
        let d = detector();
        for s in [
            Signals::new(896, 3, -131154645, 2.5),
            Signals::new(736, 3, -1061871977, 3.5),
            Signals::new(812, 3, 12345, 2.0),
        ] {
            assert_eq!(loaded.identify_signals(&s), d.identify_signals(&s));
        }
    }

    #[test]
    fn detector_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IphoneDetector>();
    }
}
