//! Animation name table
//!
//! The keyframe names are a contract with the styling layer: the stylesheet
//! defines `@keyframes boo-disabling { ... }` and the behavior state must
//! recognize exactly that name. The table is generated from a prefix or
//! loaded from TOML:
//!
//! ```toml
//! [disabled]
//! forward = ["app-disabling"]
//! reverse = ["app-enabling"]
//!
//! [validity]
//! forward = ["app-validating"]
//! reverse = ["app-invalidating"]
//! neutral = ["app-unvalidating"]
//! ```
//!
//! Sections missing from the file keep the default `boo-` names.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RegistryError, Result};
use crate::registry::AnimationNameRegistry;

/// Default prefix for generated keyframe names
pub const DEFAULT_PREFIX: &str = "boo";

/// The behavior domains that own a set of animation names
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Active,
    Disabled,
    Focus,
    Press,
    ReadOnly,
    Validity,
}

impl BehaviorKind {
    pub const ALL: [BehaviorKind; 6] = [
        BehaviorKind::Active,
        BehaviorKind::Disabled,
        BehaviorKind::Focus,
        BehaviorKind::Press,
        BehaviorKind::ReadOnly,
        BehaviorKind::Validity,
    ];

    /// Section name used in configuration files
    pub fn key(self) -> &'static str {
        match self {
            BehaviorKind::Active => "active",
            BehaviorKind::Disabled => "disabled",
            BehaviorKind::Focus => "focus",
            BehaviorKind::Press => "press",
            BehaviorKind::ReadOnly => "read_only",
            BehaviorKind::Validity => "validity",
        }
    }
}

/// Animation names of one domain
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSet {
    pub forward: Vec<String>,
    pub reverse: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neutral: Vec<String>,
}

impl NameSet {
    fn binary(prefix: &str, forward: &str, reverse: &str) -> Self {
        Self {
            forward: vec![format!("{prefix}-{forward}")],
            reverse: vec![format!("{prefix}-{reverse}")],
            neutral: Vec::new(),
        }
    }

    /// Build a registry from this set
    pub fn registry(&self) -> std::result::Result<AnimationNameRegistry, RegistryError> {
        let mut builder = AnimationNameRegistry::builder();
        for name in &self.forward {
            builder = builder.forward(name.as_str());
        }
        for name in &self.reverse {
            builder = builder.reverse(name.as_str());
        }
        for name in &self.neutral {
            builder = builder.neutral(name.as_str());
        }
        builder.build()
    }
}

/// Keyframe names for every behavior domain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationNames {
    pub active: NameSet,
    pub disabled: NameSet,
    pub focus: NameSet,
    pub press: NameSet,
    pub read_only: NameSet,
    pub validity: NameSet,
}

impl Default for AnimationNames {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }
}

impl AnimationNames {
    /// Generate the standard names under a prefix
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            active: NameSet::binary(prefix, "activate", "deactivate"),
            disabled: NameSet::binary(prefix, "disabling", "enabling"),
            focus: NameSet::binary(prefix, "focusing", "blurring"),
            press: NameSet::binary(prefix, "pressing", "releasing"),
            read_only: NameSet::binary(prefix, "freeze", "thaw"),
            validity: NameSet {
                forward: vec![format!("{prefix}-validating")],
                reverse: vec![format!("{prefix}-invalidating")],
                neutral: vec![format!("{prefix}-unvalidating")],
            },
        }
    }

    /// Load a table from TOML, validating every section
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let names: AnimationNames = toml::from_str(source)?;
        for kind in BehaviorKind::ALL {
            names
                .registry(kind)
                .map_err(|source| ConfigError::Registry {
                    domain: kind.key().to_string(),
                    source,
                })?;
        }
        tracing::debug!("Loaded animation name table");
        Ok(names)
    }

    pub fn set(&self, kind: BehaviorKind) -> &NameSet {
        match kind {
            BehaviorKind::Active => &self.active,
            BehaviorKind::Disabled => &self.disabled,
            BehaviorKind::Focus => &self.focus,
            BehaviorKind::Press => &self.press,
            BehaviorKind::ReadOnly => &self.read_only,
            BehaviorKind::Validity => &self.validity,
        }
    }

    /// Build the registry for one domain
    pub fn registry(
        &self,
        kind: BehaviorKind,
    ) -> std::result::Result<AnimationNameRegistry, RegistryError> {
        self.set(kind).registry()
    }
}
