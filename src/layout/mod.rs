//! Responsive layout resolution
//!
//! A widget is configured with an ordered list of [`LayoutConfig`] entries.
//! Each entry may carry a minimum viewport width (its breakpoint); at most
//! one entry omits it and acts as the base layout for the narrowest
//! viewports. [`LayoutResolver`] picks the active entry for the current
//! viewport width and re-evaluates it whenever the viewport is resized.
//!
//! Resolution treats the entries as media rules in descending priority: the
//! entry with the largest breakpoint that is `<=` the viewport width wins.
//! Breakpoints are inclusive, so a 700px viewport selects a `"700px"` rule.
//!
//! ```
//! use gifbox::layout::{LayoutConfig, LayoutResolver};
//!
//! let rules = vec![
//!     LayoutConfig::base(2, 110, 5),
//!     LayoutConfig::at("700px", 3, 400, 5).unwrap(),
//! ];
//! let mut resolver = LayoutResolver::new(rules, 500).unwrap();
//! assert_eq!(resolver.active().columns, 2);
//!
//! resolver.on_resize(800);
//! assert_eq!(resolver.active().columns, 3);
//! assert_eq!(resolver.component_width(), 3 * (400 + 5));
//! ```

mod error;
pub mod masonry;

pub use error::ConfigError;
pub use masonry::{MasonryPlan, Placement};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// One layout rule: column geometry applied from a viewport width upwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Minimum viewport width in pixels (`None` marks the base entry)
    #[serde(
        rename = "mq",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_breakpoint",
        deserialize_with = "deserialize_breakpoint"
    )]
    pub breakpoint_min_width: Option<u32>,
    /// Number of columns
    pub columns: u32,
    /// Width of a single item in pixels
    #[serde(rename = "imageWidth", alias = "image_width", alias = "item_width")]
    pub item_width: u32,
    /// Horizontal and vertical spacing between items in pixels
    pub gutter: u32,
}

impl LayoutConfig {
    /// Create the base entry, used when no breakpoint matches
    #[must_use]
    pub const fn base(columns: u32, item_width: u32, gutter: u32) -> Self {
        Self {
            breakpoint_min_width: None,
            columns,
            item_width,
            gutter,
        }
    }

    /// Create an entry that applies from `breakpoint` upwards
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBreakpoint`] if `breakpoint` is not a
    /// pixel width such as `"700px"` or `"700"`.
    pub fn at(
        breakpoint: &str,
        columns: u32,
        item_width: u32,
        gutter: u32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            breakpoint_min_width: Some(parse_breakpoint(breakpoint)?),
            columns,
            item_width,
            gutter,
        })
    }

    /// Total width the widget needs to lay out a full row
    #[must_use]
    pub const fn component_width(&self) -> u32 {
        self.columns
            .saturating_mul(self.item_width.saturating_add(self.gutter))
    }

    /// [`LayoutConfig::component_width`] without saturation
    #[must_use]
    pub const fn checked_component_width(&self) -> Option<u32> {
        match self.item_width.checked_add(self.gutter) {
            Some(stride) => self.columns.checked_mul(stride),
            None => None,
        }
    }

    /// Whether this rule applies to a viewport of the given width
    #[must_use]
    pub const fn matches(&self, viewport_width: u32) -> bool {
        match self.breakpoint_min_width {
            Some(min) => viewport_width >= min,
            None => true,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::base(2, 120, 5)
    }
}

/// Parse a breakpoint such as `"700px"` or `"700"` into pixels
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBreakpoint`] for anything else.
pub fn parse_breakpoint(raw: &str) -> Result<u32, ConfigError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    digits
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidBreakpoint(raw.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBreakpoint {
    Pixels(u32),
    Text(String),
}

fn deserialize_breakpoint<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawBreakpoint>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawBreakpoint::Pixels(px)) => Ok(Some(px)),
        Some(RawBreakpoint::Text(text)) => parse_breakpoint(&text)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[allow(clippy::ref_option)]
fn serialize_breakpoint<S>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(px) => serializer.serialize_str(&format!("{px}px")),
        None => serializer.serialize_none(),
    }
}

/// Validate a list of layout rules
///
/// # Errors
///
/// Returns a [`ConfigError`] if the list is empty, has more than one base
/// entry, repeats a breakpoint, or contains an entry with zero columns.
pub fn validate(configs: &[LayoutConfig]) -> Result<(), ConfigError> {
    if configs.is_empty() {
        return Err(ConfigError::EmptyLayout);
    }

    let base_entries = configs
        .iter()
        .filter(|config| config.breakpoint_min_width.is_none())
        .count();
    if base_entries > 1 {
        return Err(ConfigError::MultipleBaseEntries(base_entries));
    }

    let mut seen = HashSet::new();
    for config in configs {
        if config.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if config.checked_component_width().is_none() {
            return Err(ConfigError::Oversized {
                columns: config.columns,
                item_width: config.item_width,
                gutter: config.gutter,
            });
        }
        if let Some(min) = config.breakpoint_min_width
            && !seen.insert(min)
        {
            return Err(ConfigError::DuplicateBreakpoint(min));
        }
    }

    Ok(())
}

/// Select the rule for a viewport width without keeping any state
///
/// When no breakpoint qualifies and there is no base entry, the rule with
/// the smallest breakpoint is used.
///
/// # Errors
///
/// Returns a [`ConfigError`] if `configs` fails [`validate`].
pub fn resolve(configs: &[LayoutConfig], viewport_width: u32) -> Result<LayoutConfig, ConfigError> {
    validate(configs)?;
    let ordered = by_priority(configs);
    Ok(pick(&ordered, viewport_width))
}

/// Order rules from the largest breakpoint down, base entry last
fn by_priority(configs: &[LayoutConfig]) -> Vec<LayoutConfig> {
    let mut ordered = configs.to_vec();
    ordered.sort_by(|a, b| b.breakpoint_min_width.cmp(&a.breakpoint_min_width));
    ordered
}

fn pick(ordered: &[LayoutConfig], viewport_width: u32) -> LayoutConfig {
    ordered
        .iter()
        .find(|config| config.matches(viewport_width))
        .or_else(|| ordered.last())
        .copied()
        .unwrap_or_default()
}

/// Keeps the active layout rule in sync with the viewport width
#[derive(Debug, Clone)]
pub struct LayoutResolver {
    /// Rules in descending priority
    rules: Vec<LayoutConfig>,
    active: LayoutConfig,
    viewport_width: u32,
}

impl LayoutResolver {
    /// Create a resolver and resolve the initial viewport width
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the rules are invalid. An empty list is
    /// always rejected.
    pub fn new(configs: Vec<LayoutConfig>, viewport_width: u32) -> Result<Self, ConfigError> {
        validate(&configs)?;
        let rules = by_priority(&configs);
        let active = pick(&rules, viewport_width);
        Ok(Self {
            rules,
            active,
            viewport_width,
        })
    }

    /// Re-evaluate the active rule for a new viewport width
    ///
    /// Returns `true` if the active rule changed.
    pub fn on_resize(&mut self, viewport_width: u32) -> bool {
        self.viewport_width = viewport_width;
        let next = pick(&self.rules, viewport_width);
        let changed = next != self.active;
        if changed {
            tracing::debug!(
                viewport_width,
                columns = next.columns,
                "layout breakpoint changed"
            );
        }
        self.active = next;
        changed
    }

    /// The active rule
    #[must_use]
    pub const fn active(&self) -> &LayoutConfig {
        &self.active
    }

    /// Width needed by the active rule
    #[must_use]
    pub const fn component_width(&self) -> u32 {
        self.active.component_width()
    }

    /// Last viewport width seen
    #[must_use]
    pub const fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// All rules, largest breakpoint first
    #[must_use]
    pub fn rules(&self) -> &[LayoutConfig] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_rules() -> Vec<LayoutConfig> {
        vec![
            LayoutConfig::base(2, 110, 5),
            LayoutConfig::at("700px", 3, 400, 5).unwrap(),
        ]
    }

    #[test]
    fn test_narrow_viewport_uses_base() {
        let resolver = LayoutResolver::new(demo_rules(), 500).unwrap();
        assert_eq!(resolver.active().columns, 2);
        assert_eq!(resolver.active().item_width, 110);
    }

    #[test]
    fn test_wide_viewport_uses_breakpoint() {
        let resolver = LayoutResolver::new(demo_rules(), 800).unwrap();
        assert_eq!(resolver.active().columns, 3);
    }

    #[test]
    fn test_breakpoint_is_inclusive() {
        let resolver = LayoutResolver::new(demo_rules(), 700).unwrap();
        assert_eq!(resolver.active().columns, 3);

        let resolver = LayoutResolver::new(demo_rules(), 699).unwrap();
        assert_eq!(resolver.active().columns, 2);
    }

    #[test]
    fn test_largest_qualifying_breakpoint_wins_regardless_of_order() {
        let rules = vec![
            LayoutConfig::at("1200px", 5, 200, 4).unwrap(),
            LayoutConfig::base(1, 300, 0),
            LayoutConfig::at("600", 2, 250, 4).unwrap(),
            LayoutConfig::at("900px", 4, 220, 4).unwrap(),
        ];
        assert_eq!(resolve(&rules, 100).unwrap().columns, 1);
        assert_eq!(resolve(&rules, 600).unwrap().columns, 2);
        assert_eq!(resolve(&rules, 1000).unwrap().columns, 4);
        assert_eq!(resolve(&rules, 5000).unwrap().columns, 5);
    }

    #[test]
    fn test_resize_reports_changes() {
        let mut resolver = LayoutResolver::new(demo_rules(), 500).unwrap();
        assert!(!resolver.on_resize(600));
        assert!(resolver.on_resize(720));
        assert_eq!(resolver.active().columns, 3);
        assert!(!resolver.on_resize(1024));
        assert!(resolver.on_resize(320));
        assert_eq!(resolver.active().columns, 2);
        assert_eq!(resolver.viewport_width(), 320);
    }

    #[test]
    fn test_component_width() {
        let resolver = LayoutResolver::new(demo_rules(), 500).unwrap();
        assert_eq!(resolver.component_width(), 2 * (110 + 5));
    }

    #[test]
    fn test_empty_configuration_is_rejected() {
        let err = LayoutResolver::new(Vec::new(), 500).unwrap_err();
        assert_eq!(err, ConfigError::EmptyLayout);
        assert_eq!(err.to_string(), "empty layout configuration");
    }

    #[test]
    fn test_multiple_base_entries_rejected() {
        let rules = vec![LayoutConfig::base(2, 100, 5), LayoutConfig::base(3, 100, 5)];
        assert_eq!(
            validate(&rules).unwrap_err(),
            ConfigError::MultipleBaseEntries(2)
        );
    }

    #[test]
    fn test_duplicate_breakpoint_rejected() {
        let rules = vec![
            LayoutConfig::at("700px", 3, 100, 5).unwrap(),
            LayoutConfig::at("700", 4, 100, 5).unwrap(),
        ];
        assert_eq!(
            validate(&rules).unwrap_err(),
            ConfigError::DuplicateBreakpoint(700)
        );
    }

    #[test]
    fn test_zero_columns_rejected() {
        let rules = vec![LayoutConfig::base(0, 100, 5)];
        assert_eq!(validate(&rules).unwrap_err(), ConfigError::ZeroColumns);
    }

    #[test]
    fn test_oversized_geometry_rejected() {
        let rules = vec![LayoutConfig::base(100_000, 100_000, 5)];
        assert_eq!(
            validate(&rules).unwrap_err(),
            ConfigError::Oversized {
                columns: 100_000,
                item_width: 100_000,
                gutter: 5,
            }
        );
        assert_eq!(rules[0].checked_component_width(), None);
        assert_eq!(rules[0].component_width(), u32::MAX);

        let wide_gutter = vec![LayoutConfig::base(1, u32::MAX, 1)];
        assert!(matches!(
            validate(&wide_gutter),
            Err(ConfigError::Oversized { .. })
        ));
    }

    #[test]
    fn test_without_base_falls_back_to_smallest_breakpoint() {
        let rules = vec![
            LayoutConfig::at("900px", 4, 100, 5).unwrap(),
            LayoutConfig::at("500px", 2, 100, 5).unwrap(),
        ];
        assert_eq!(resolve(&rules, 100).unwrap().columns, 2);
    }

    #[test]
    fn test_parse_breakpoint() {
        assert_eq!(parse_breakpoint("700px"), Ok(700));
        assert_eq!(parse_breakpoint(" 320 "), Ok(320));
        assert!(matches!(
            parse_breakpoint("wide"),
            Err(ConfigError::InvalidBreakpoint(_))
        ));
        assert!(parse_breakpoint("70em").is_err());
    }

    #[test]
    fn test_deserialize_original_config_shape() {
        let json = r#"[
            { "columns": 2, "imageWidth": 110, "gutter": 5 },
            { "mq": "700px", "columns": 3, "imageWidth": 400, "gutter": 5 }
        ]"#;
        let rules: Vec<LayoutConfig> = serde_json::from_str(json).unwrap();
        assert_eq!(rules[0].breakpoint_min_width, None);
        assert_eq!(rules[1].breakpoint_min_width, Some(700));
        assert_eq!(rules[1].item_width, 400);
    }

    #[test]
    fn test_serialize_breakpoint_as_pixels() {
        let rule = LayoutConfig::at("700px", 3, 400, 5).unwrap();
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("\"mq\":\"700px\""));

        let base = serde_json::to_string(&LayoutConfig::base(2, 110, 5)).unwrap();
        assert!(!base.contains("mq"));
    }
}
