//! Config validation beyond what serde enforces.
//!
//! Two kinds of findings come out of here. Unknown keys are spotted on the
//! raw TOML table before deserialization, since serde silently drops them;
//! each gets the nearest known key as a hint. Range checks run on the parsed
//! config and split into hard errors and warnings. Warnings never stop a load.

use std::fmt;

use super::EngineConfig;

/// Largest edit distance still offered as a spelling hint.
const MAX_HINT_DISTANCE: usize = 3;

/// A non-fatal finding about a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Key not read by any config section.
    UnknownKey {
        key: String,
        suggestion: Option<&'static str>,
    },
    /// Value accepted, but unlikely to be what the user meant.
    Suspicious { key: &'static str, detail: String },
}

impl ConfigWarning {
    /// Dotted path of the key the warning is about.
    pub fn key(&self) -> &str {
        match self {
            Self::UnknownKey { key, .. } => key.as_str(),
            Self::Suspicious { key, .. } => *key,
        }
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnknownKey { suggestion, .. } => *suggestion,
            Self::Suspicious { .. } => None,
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey {
                key,
                suggestion: Some(hint),
            } => write!(f, "{key}: not a config key, did you mean {hint}?"),
            Self::UnknownKey { key, suggestion: None } => {
                write!(f, "{key}: not a config key, ignored")
            }
            Self::Suspicious { key, detail } => write!(f, "{key}: {detail}"),
        }
    }
}

/// Every dotted key `EngineConfig` reads, sections included.
///
/// Kept in step with the section structs by `known_keys_cover_every_serialized_field`.
pub const KNOWN_KEYS: &[&str] = &[
    "profile",
    "profile.name",
    "profile.city",
    "profile.country",
    "taxonomy",
    "taxonomy.top",
    "taxonomy.bottom",
    "taxonomy.dress",
    "taxonomy.outerwear",
    "taxonomy.footwear",
    "taxonomy.accessory",
    "taxonomy.accessory_keywords",
    "context",
    "context.winter_below_c",
    "context.summer_above_c",
    "context.min_pool_size",
    "context.universal_occasion",
    "composer",
    "composer.dress_probability",
    "composer.outerwear_below_c",
    "composer.second_accessory_probability",
    "composer.min_outfit_items",
    "composer.fallback_min_items",
    "composer.fallback_max_items",
    "analytics",
    "analytics.rarely_worn_days",
    "analytics.frequently_worn_threshold",
    "analytics.most_worn_limit",
    "scoring",
    "scoring.top_n",
    "planner",
    "planner.horizon_days",
    "planner.min_outfits",
    "store",
    "store.snapshot_path",
];

/// Closest known key within `MAX_HINT_DISTANCE` edits.
///
/// Equal distances resolve to the alphabetically first key.
pub fn nearest_key(unknown: &str) -> Option<&'static str> {
    KNOWN_KEYS
        .iter()
        .map(|&known| (strsim::levenshtein(unknown, known), known))
        .filter(|(distance, _)| *distance <= MAX_HINT_DISTANCE)
        .min()
        .map(|(_, known)| known)
}

/// Unknown keys in raw TOML text, sorted by dotted path.
///
/// Text that is not valid TOML yields nothing here; the parse error is
/// reported by deserialization instead.
pub fn unknown_keys(raw_toml: &str) -> Vec<ConfigWarning> {
    let Ok(table) = raw_toml.parse::<toml::Table>() else {
        return Vec::new();
    };
    let mut keys = Vec::new();
    collect_keys(&table, "", &mut keys);
    keys.into_iter()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|key| ConfigWarning::UnknownKey {
            suggestion: nearest_key(&key),
            key,
        })
        .collect()
}

fn collect_keys(table: &toml::Table, prefix: &str, out: &mut Vec<String>) {
    for (name, value) in table {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        out.push(path.clone());
        if let toml::Value::Table(inner) = value {
            collect_keys(inner, &path, out);
        }
    }
}

/// Plausibility checks on a parsed config: `(errors, warnings)`.
pub fn check_ranges(config: &EngineConfig) -> (Vec<String>, Vec<ConfigWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for (key, value) in [
        ("context.winter_below_c", config.context.winter_below_c),
        ("context.summer_above_c", config.context.summer_above_c),
        ("composer.outerwear_below_c", config.composer.outerwear_below_c),
    ] {
        if !value.is_finite() {
            continue;
        }
        // Nobody dresses for temperatures outside -60..60 °C
        if !(-60.0..=60.0).contains(&value) {
            errors.push(format!("{key} = {value:.1} °C is not a temperature anyone dresses for"));
        } else if !(-20.0..=40.0).contains(&value) {
            warnings.push(ConfigWarning::Suspicious {
                key,
                detail: format!("{value:.1} °C is outside the usual -20..40 °C"),
            });
        }
    }

    let planner = &config.planner;
    if planner.min_outfits < planner.horizon_days as usize {
        warnings.push(ConfigWarning::Suspicious {
            key: "planner.min_outfits",
            detail: format!(
                "{} is below horizon_days ({}), plans may leave days empty",
                planner.min_outfits, planner.horizon_days
            ),
        });
    }
    if planner.horizon_days > 31 {
        warnings.push(ConfigWarning::Suspicious {
            key: "planner.horizon_days",
            detail: format!("{} days is longer than a month", planner.horizon_days),
        });
    }
    if config.composer.fallback_max_items > 8 {
        warnings.push(ConfigWarning::Suspicious {
            key: "composer.fallback_max_items",
            detail: format!(
                "{} items makes for a crowded outfit",
                config.composer.fallback_max_items
            ),
        });
    }

    (errors, warnings)
}
