use crate::icons::IconKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One thumbnail to generate: a slug used in the file name and the icon drawn on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub icon: IconKind,
}

impl Theme {
    pub fn new(name: impl Into<String>, icon: IconKind) -> Self {
        Self {
            name: name.into(),
            icon,
        }
    }
}

const BLOG_THEMES: [(&str, IconKind); 10] = [
    ("brain-health", IconKind::Brain),
    ("pots-dysautonomia", IconKind::Heartbeat),
    ("concussion-recovery", IconKind::Head),
    ("migraine-relief", IconKind::Bolt),
    ("dizziness-vertigo", IconKind::Sync),
    ("functional-neurology", IconKind::Brain),
    ("chiropractic-care", IconKind::Spine),
    ("patient-success", IconKind::Star),
    ("wellness-tips", IconKind::Leaf),
    ("research-updates", IconKind::Book),
];

/// The built-in blog themes, in output order.
pub fn default_themes() -> Vec<Theme> {
    BLOG_THEMES
        .iter()
        .map(|&(name, icon)| Theme::new(name, icon))
        .collect()
}

/// Load a theme list from a JSON array of `{ "name": ..., "icon": ... }` objects.
///
/// Unknown icon names fall back to the brain icon rather than failing.
pub fn load_themes(path: &Path) -> Result<Vec<Theme>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme file: {}", path.display()))?;
    parse_themes(&json).with_context(|| format!("Invalid theme file: {}", path.display()))
}

fn parse_themes(json: &str) -> Result<Vec<Theme>> {
    let themes: Vec<Theme> = serde_json::from_str(json).context("Failed to parse themes")?;

    if themes.is_empty() {
        anyhow::bail!("Theme list is empty");
    }
    if let Some(theme) = themes.iter().find(|t| !is_valid_slug(&t.name)) {
        anyhow::bail!(
            "Theme name {:?} must be non-empty and use only letters, digits, '-' or '_'",
            theme.name
        );
    }

    Ok(themes)
}

// Names end up in file names, so keep them free of separators
fn is_valid_slug(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
