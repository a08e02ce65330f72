//! Injected engine configuration.
//!
//! The host builds one [`EngineConfig`] per cycle and passes it in; the engine keeps no
//! process-wide toggle state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Collector families, each behind one capability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectorId {
    Keywords,
    Modifiers,
    PrimitiveTypes,
    Literals,
    LocalElements,
    DeclaredTypes,
    InnerTypes,
    Methods,
    StaticImports,
    EnumConstants,
    Constructors,
    MemberInvocations,
    StaticFields,
    InstanceFields,
    MemberTypes,
}

impl CollectorId {
    pub const ALL: [CollectorId; 15] = [
        CollectorId::Keywords,
        CollectorId::Modifiers,
        CollectorId::PrimitiveTypes,
        CollectorId::Literals,
        CollectorId::LocalElements,
        CollectorId::DeclaredTypes,
        CollectorId::InnerTypes,
        CollectorId::Methods,
        CollectorId::StaticImports,
        CollectorId::EnumConstants,
        CollectorId::Constructors,
        CollectorId::MemberInvocations,
        CollectorId::StaticFields,
        CollectorId::InstanceFields,
        CollectorId::MemberTypes,
    ];
}

/// External on/off store for collector families.
pub trait FlagStore {
    fn is_enabled(&self, id: CollectorId) -> bool;
}

/// Snapshot of the capability flags for one cycle.
///
/// Serializes as a map with snake_case keys. Ids absent from the map are disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectorFlags {
    enabled: BTreeMap<CollectorId, bool>,
}

impl CollectorFlags {
    /// Reads every flag from `store` once.
    pub fn from_store(store: &dyn FlagStore) -> CollectorFlags {
        CollectorFlags {
            enabled: CollectorId::ALL
                .into_iter()
                .map(|id| (id, store.is_enabled(id)))
                .collect(),
        }
    }

    pub fn all_enabled() -> CollectorFlags {
        CollectorFlags {
            enabled: CollectorId::ALL.into_iter().map(|id| (id, true)).collect(),
        }
    }

    pub fn with(mut self, id: CollectorId, enabled: bool) -> CollectorFlags {
        self.enabled.insert(id, enabled);
        self
    }

    pub fn is_enabled(&self, id: CollectorId) -> bool {
        self.enabled.get(&id).copied().unwrap_or(false)
    }
}

impl Default for CollectorFlags {
    fn default() -> Self {
        CollectorFlags::all_enabled()
    }
}

impl FlagStore for CollectorFlags {
    fn is_enabled(&self, id: CollectorId) -> bool {
        CollectorFlags::is_enabled(self, id)
    }
}

/// How partially resolved overloads compare when no overload is fully resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverloadRatio {
    /// `resolved / arity` compared exactly.
    #[default]
    Exact,
    /// `resolved / arity` truncated to an integer before comparing, so every partially
    /// resolved overload scores zero.
    Truncated,
}

/// Scoring of in-scope symbols offered as call arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentWeights {
    /// Added to the name distance of a symbol whose type is assignable to the parameter
    /// type but not the same type.
    pub assignable_penalty: usize,
}

impl Default for ArgumentWeights {
    fn default() -> Self {
        ArgumentWeights {
            assignable_penalty: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub flags: CollectorFlags,
    pub ratio: OverloadRatio,
    pub weights: ArgumentWeights,
}

impl EngineConfig {
    pub fn from_store(store: &dyn FlagStore) -> EngineConfig {
        EngineConfig {
            flags: CollectorFlags::from_store(store),
            ..EngineConfig::default()
        }
    }
}
