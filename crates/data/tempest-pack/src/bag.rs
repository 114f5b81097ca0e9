//! Content pack schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One token. The id is dotted, `kind.name` (e.g. `weapon.rope`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role_hints: Vec<String>,
}

impl Token {
    pub fn new(id: impl Into<String>, cluster: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cluster: Some(cluster.into()),
            role_hints: Vec::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.role_hints.push(hint.into());
        self
    }
}

/// Weighted link between two token ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
}

/// Prompt text for a 1-based layer number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerPrompt {
    pub layer: usize,
    pub text: String,
}

/// Final question asked after the last layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub prompt: String,
}

/// Display hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiHints {
    /// cluster name -> colour (any CSS colour string)
    #[serde(default)]
    pub cluster_colors: BTreeMap<String, String>,
}

/// A complete content pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPack {
    pub theme: String,
    pub tokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub ui_hints: UiHints,
    #[serde(default)]
    pub prompt_scaffold: Vec<LayerPrompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss: Option<Boss>,
}

impl ContentPack {
    /// Parse a pack from JSON. A pack without tokens is rejected.
    pub fn from_json(text: &str) -> Result<Self> {
        let pack: Self = serde_json::from_str(text)?;
        if pack.tokens.is_empty() {
            return Err(Error::NoTokens);
        }
        Ok(pack)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Prompt for a 1-based layer, if the scaffold has one.
    pub fn prompt_for_layer(&self, layer: usize) -> Option<&str> {
        self.prompt_scaffold
            .iter()
            .find(|p| p.layer == layer)
            .map(|p| p.text.as_str())
    }

    /// Colour mapped to a cluster name.
    pub fn color_for(&self, cluster: &str) -> Option<&str> {
        self.ui_hints.cluster_colors.get(cluster).map(String::as_str)
    }

    /// Cluster names with a colour, in sorted order.
    pub fn clusters(&self) -> Vec<&str> {
        self.ui_hints.cluster_colors.keys().map(String::as_str).collect()
    }

    /// Token by id.
    pub fn token(&self, id: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }
}
