use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Band – one threshold entry of a parameter's quality scale
// ---------------------------------------------------------------------------

/// A quality band: every value up to `upper` (inclusive) falls into it,
/// unless a lower band claimed the value first. The last band of a scale has
/// `upper = f64::INFINITY` and catches everything above the final threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    /// Inclusive upper bound of the band.
    pub upper: f64,
    /// Category label, e.g. "Desirable" or "Poor (C)".
    pub label: String,
    /// Hex color the chart layer draws the band with.
    pub color: String,
}

impl Band {
    /// Build a band entry.
    pub fn new(upper: f64, label: &str, color: &str) -> Self {
        Band {
            upper,
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// ScaleRule – display transform for wide-range parameters
// ---------------------------------------------------------------------------

/// Display scaling for parameters whose values span several orders of
/// magnitude (coliform counts). The transform only affects display values;
/// exports always carry the raw measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ScaleRule {
    /// `log10(value + 1)`. Inverted with `10^display - 1`.
    Log10,
    /// `value / factor`, e.g. a ×10,000 axis.
    Factor(f64),
}

impl ScaleRule {
    /// Map a raw value to its display value.
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            ScaleRule::Log10 => (value + 1.0).log10(),
            ScaleRule::Factor(factor) => value / factor,
        }
    }

    /// Map a display value back to the raw value.
    pub fn invert(&self, display: f64) -> f64 {
        match self {
            ScaleRule::Log10 => 10f64.powf(display) - 1.0,
            ScaleRule::Factor(factor) => display * factor,
        }
    }

    /// Axis label making the transform visible, e.g. `log10(MPN/100mL + 1)`.
    pub fn label(&self, unit: &str) -> String {
        match self {
            ScaleRule::Log10 => format!("log10({unit} + 1)"),
            ScaleRule::Factor(factor) => format!("{unit} (x{factor})"),
        }
    }
}

// ---------------------------------------------------------------------------
// ParameterDef – reference definition of one measured parameter
// ---------------------------------------------------------------------------

/// Static reference data for one parameter: canonical unit, ordered quality
/// bands, optional display scaling, and the source-column spellings that
/// should resolve to it. Loaded once, never mutated during a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDef {
    /// Canonical parameter name, e.g. "Total Coliform".
    pub name: String,
    /// Canonical unit, e.g. "MPN/100mL".
    pub unit: String,
    /// Quality bands sorted by ascending upper bound; the last is the
    /// overflow band with an infinite upper.
    pub bands: Vec<Band>,
    /// Display transform for wide-range parameters, `None` otherwise.
    pub scale: Option<ScaleRule>,
    /// Alternative spellings seen in source files.
    pub aliases: Vec<String>,
    /// Whether negative readings are physically meaningless (concentrations,
    /// counts). Negative values are then rejected at load time.
    pub non_negative: bool,
    /// Whether a reading of exactly zero means "not recorded" rather than a
    /// true zero (source sheets fill unscored WQI cells with 0).
    pub zero_is_missing: bool,
}

impl ParameterDef {
    /// Build a definition. Bands are sorted by upper bound; the caller must
    /// supply a final overflow band with `upper = f64::INFINITY`.
    pub fn new(name: &str, unit: &str, mut bands: Vec<Band>) -> Self {
        bands.sort_by(|a, b| a.upper.total_cmp(&b.upper));
        debug_assert!(!bands.is_empty(), "parameter must define at least one band");
        debug_assert!(
            bands.last().is_some_and(|b| b.upper.is_infinite()),
            "last band must be the overflow band"
        );
        ParameterDef {
            name: name.to_string(),
            unit: unit.to_string(),
            bands,
            scale: None,
            aliases: Vec::new(),
            non_negative: true,
            zero_is_missing: false,
        }
    }

    /// Mark negative readings as physically meaningful (e.g. temperature).
    pub fn allow_negative(mut self) -> Self {
        self.non_negative = false;
        self
    }

    /// Treat zero readings as missing data.
    pub fn zero_as_missing(mut self) -> Self {
        self.zero_is_missing = true;
        self
    }

    /// Attach a display scale rule.
    pub fn with_scale(mut self, scale: ScaleRule) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Register alternative source spellings for this parameter.
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Classify a value: the first band whose upper bound is >= the value.
    /// Values past the final threshold land in the overflow band.
    pub fn classify(&self, value: f64) -> &Band {
        self.bands
            .iter()
            .find(|b| value <= b.upper)
            .unwrap_or_else(|| self.bands.last().expect("bands are non-empty"))
    }

    /// Display value under this parameter's scale rule (identity when none).
    pub fn display_value(&self, value: f64) -> f64 {
        match self.scale {
            Some(rule) => rule.apply(value),
            None => value,
        }
    }

    /// One-line quality-criteria text, e.g.
    /// `<=500 Desirable, <=2500 Permissible, >2500 Unsafe`.
    pub fn describe_bands(&self) -> String {
        let mut parts = Vec::with_capacity(self.bands.len());
        let mut prev: Option<f64> = None;
        for band in &self.bands {
            if band.upper.is_infinite() {
                match prev {
                    Some(p) => parts.push(format!(">{p} {}", band.label)),
                    None => parts.push(band.label.clone()),
                }
            } else {
                parts.push(format!("<={} {}", band.upper, band.label));
            }
            prev = Some(band.upper);
        }
        parts.join(", ")
    }
}

// ---------------------------------------------------------------------------
// ParameterSet – the reference registry
// ---------------------------------------------------------------------------

/// Lookup table of parameter definitions with case-insensitive resolution
/// over canonical names and aliases.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    defs: BTreeMap<String, ParameterDef>,
    /// lowercased name/alias -> canonical name
    lookup: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Build a registry from definitions.
    pub fn new(defs: Vec<ParameterDef>) -> Self {
        let mut set = ParameterSet {
            defs: BTreeMap::new(),
            lookup: BTreeMap::new(),
        };
        for def in defs {
            set.insert(def);
        }
        set
    }

    /// Add or replace a definition (registry construction only; sessions
    /// treat the set as read-only afterwards).
    pub fn insert(&mut self, def: ParameterDef) {
        self.lookup
            .insert(def.name.trim().to_lowercase(), def.name.clone());
        for alias in &def.aliases {
            self.lookup
                .insert(alias.trim().to_lowercase(), def.name.clone());
        }
        self.defs.insert(def.name.clone(), def);
    }

    /// Resolve a raw parameter spelling to its definition.
    pub fn resolve(&self, raw: &str) -> Option<&ParameterDef> {
        let canonical = self.lookup.get(&raw.trim().to_lowercase())?;
        self.defs.get(canonical)
    }

    /// Look up a definition by its canonical name (exact match).
    pub fn get(&self, name: &str) -> Option<&ParameterDef> {
        self.defs.get(name)
    }

    /// Canonical parameter names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defs.keys().map(String::as_str)
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// The built-in river water-quality registry.
    ///
    /// Thresholds follow CPCB surface-water criteria for class C use:
    /// coliforms at 500/2500 MPN/100mL, BOD at 3/6 mg/L, DO at 3/5 mg/L,
    /// pH acceptable in 6.0–9.0 and good in 6.5–8.5, WQI classes A–E at
    /// 50/100/200/300. Coliform counts span orders of magnitude and carry
    /// a log display scale.
    pub fn defaults() -> Self {
        const GOOD: &str = "#059669";
        const FAIR: &str = "#f59e0b";
        const BAD: &str = "#ef4444";
        const CLASS_B: &str = "#0891b2";
        const CLASS_E: &str = "#7c2d12";

        let coliform_bands = || {
            vec![
                Band::new(500.0, "Desirable", GOOD),
                Band::new(2500.0, "Permissible", FAIR),
                Band::new(f64::INFINITY, "Unsafe", BAD),
            ]
        };

        ParameterSet::new(vec![
            ParameterDef::new(
                "pH",
                "pH",
                vec![
                    Band::new(6.0, "Out of range", BAD),
                    Band::new(6.5, "Acceptable", FAIR),
                    Band::new(8.5, "Good", GOOD),
                    Band::new(9.0, "Acceptable", FAIR),
                    Band::new(f64::INFINITY, "Out of range", BAD),
                ],
            ),
            ParameterDef::new(
                "DO",
                "mg/L",
                vec![
                    Band::new(2.9, "Poor", BAD),
                    Band::new(4.9, "Fair", FAIR),
                    Band::new(f64::INFINITY, "Good", GOOD),
                ],
            )
            .with_aliases(&["DO_mg_L", "DO (mg/l)", "Dissolved Oxygen"]),
            ParameterDef::new(
                "BOD",
                "mg/L",
                vec![
                    Band::new(3.0, "Good", GOOD),
                    Band::new(6.0, "Caution", FAIR),
                    Band::new(f64::INFINITY, "Poor", BAD),
                ],
            )
            .with_aliases(&["BOD_mg_L", "BOD (mg/l)"]),
            ParameterDef::new(
                "COD",
                "mg/L",
                vec![
                    Band::new(3.0, "Good", GOOD),
                    Band::new(999.0, "Acceptable", FAIR),
                    Band::new(f64::INFINITY, "Poor", BAD),
                ],
            )
            .with_aliases(&["COD_mg_L", "COD (mg/l)"]),
            ParameterDef::new("Total Coliform", "MPN/100mL", coliform_bands())
                .with_scale(ScaleRule::Log10)
                .with_aliases(&["Total_Coliform", "Total_Coliform_MPN_100ml"]),
            ParameterDef::new("Faecal Coliform", "MPN/100mL", coliform_bands())
                .with_scale(ScaleRule::Log10)
                .with_aliases(&["Faecal_Coliform", "Faecal_Coliform_MPN_100ml"]),
            ParameterDef::new(
                "WQI",
                "index",
                vec![
                    Band::new(50.0, "Excellent (A)", GOOD),
                    Band::new(100.0, "Good (B)", CLASS_B),
                    Band::new(200.0, "Poor (C)", FAIR),
                    Band::new(300.0, "Very Poor (D)", BAD),
                    Band::new(f64::INFINITY, "Unsuitable (E)", CLASS_E),
                ],
            )
            .zero_as_missing(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coliform_band_edges() {
        let set = ParameterSet::defaults();
        let def = set.get("Total Coliform").unwrap();
        assert_eq!(def.classify(0.0).label, "Desirable");
        assert_eq!(def.classify(500.0).label, "Desirable");
        assert_eq!(def.classify(500.5).label, "Permissible");
        assert_eq!(def.classify(2500.0).label, "Permissible");
        assert_eq!(def.classify(5000.0).label, "Unsafe");
    }

    #[test]
    fn wqi_class_boundaries() {
        let set = ParameterSet::defaults();
        let def = set.get("WQI").unwrap();
        assert_eq!(def.classify(42.0).label, "Excellent (A)");
        assert_eq!(def.classify(50.0).label, "Excellent (A)");
        assert_eq!(def.classify(150.0).label, "Poor (C)");
        assert_eq!(def.classify(1200.0).label, "Unsuitable (E)");
    }

    #[test]
    fn ph_is_banded_on_both_sides() {
        let set = ParameterSet::defaults();
        let def = set.get("pH").unwrap();
        assert_eq!(def.classify(5.5).label, "Out of range");
        assert_eq!(def.classify(6.2).label, "Acceptable");
        assert_eq!(def.classify(7.4).label, "Good");
        assert_eq!(def.classify(8.8).label, "Acceptable");
        assert_eq!(def.classify(9.6).label, "Out of range");
    }

    #[test]
    fn log_scale_round_trips() {
        let rule = ScaleRule::Log10;
        for v in [0.0, 50.0, 5000.0, 2.4e6] {
            let d = rule.apply(v);
            assert!((rule.invert(d) - v).abs() < 1e-6 * v.max(1.0));
        }
        assert_eq!(rule.label("MPN/100mL"), "log10(MPN/100mL + 1)");
    }

    #[test]
    fn factor_scale_matches_axis_label() {
        let rule = ScaleRule::Factor(10_000.0);
        assert_eq!(rule.apply(25_000.0), 2.5);
        assert_eq!(rule.invert(2.5), 25_000.0);
        assert_eq!(rule.label("MPN/100mL"), "MPN/100mL (x10000)");
    }

    #[test]
    fn resolve_accepts_aliases_case_insensitively() {
        let set = ParameterSet::defaults();
        assert_eq!(set.resolve("Total_Coliform_MPN_100ml").unwrap().name, "Total Coliform");
        assert_eq!(set.resolve("  bod_mg_l ").unwrap().name, "BOD");
        assert_eq!(set.resolve("do").unwrap().name, "DO");
        assert!(set.resolve("Turbidity").is_none());
    }

    #[test]
    fn describe_bands_lists_thresholds() {
        let set = ParameterSet::defaults();
        let def = set.get("Total Coliform").unwrap();
        assert_eq!(
            def.describe_bands(),
            "<=500 Desirable, <=2500 Permissible, >2500 Unsafe"
        );
    }
}
