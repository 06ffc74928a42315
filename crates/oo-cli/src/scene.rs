//! Named object scenes loaded from JSON.
//!
//! A scene file is a JSON object whose entries are named objects. The
//! reserved key `"$proto"` names another entry to use as prototype; such
//! entries are created with [`oo_core::link`], so they also carry `uber`.
//!
//! ```json
//! {
//!   "base": { "name": "base", "kind": "animal" },
//!   "dog":  { "$proto": "base", "name": "dog" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use oo_core::{link, Object};
use thiserror::Error;
use tracing::debug;

/// Key naming an entry's prototype.
pub const PROTO_KEY: &str = "$proto";

/// Errors raised while loading a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scene root must be a JSON object")]
    RootNotObject,

    #[error("entry {name} must be a JSON object")]
    EntryNotObject { name: String },

    #[error("entry {name}: $proto must be a string")]
    InvalidPrototype { name: String },

    #[error("entry {name}: unknown prototype {proto}")]
    UnknownPrototype { name: String, proto: String },

    #[error("prototype cycle through {name}")]
    CyclicPrototype { name: String },

    #[error("no object named {name}")]
    UnknownObject { name: String },
}

/// Result alias for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;

/// A set of named, possibly linked objects.
#[derive(Debug, Default)]
pub struct Scene {
    objects: BTreeMap<String, Object>,
}

impl Scene {
    /// Read and build a scene from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let json: serde_json::Value = serde_json::from_str(&text)?;
        Self::from_json(&json)
    }

    /// Build a scene, linking entries to their prototypes.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let defs = json.as_object().ok_or(SceneError::RootNotObject)?;
        let mut scene = Self::default();
        let mut building = Vec::new();
        for name in defs.keys() {
            scene.build(name, defs, &mut building)?;
        }
        debug!(objects = scene.objects.len(), "loaded scene");
        Ok(scene)
    }

    fn build(
        &mut self,
        name: &str,
        defs: &serde_json::Map<String, serde_json::Value>,
        building: &mut Vec<String>,
    ) -> Result<Object> {
        if let Some(obj) = self.objects.get(name) {
            return Ok(obj.clone());
        }
        if building.iter().any(|n| n == name) {
            return Err(SceneError::CyclicPrototype {
                name: name.to_string(),
            });
        }
        let def = defs
            .get(name)
            .and_then(|d| d.as_object())
            .ok_or_else(|| SceneError::EntryNotObject {
                name: name.to_string(),
            })?;

        building.push(name.to_string());
        let proto = match def.get(PROTO_KEY) {
            None => None,
            Some(serde_json::Value::String(proto)) => {
                if !defs.contains_key(proto) {
                    return Err(SceneError::UnknownPrototype {
                        name: name.to_string(),
                        proto: proto.clone(),
                    });
                }
                Some(self.build(proto, defs, building)?)
            }
            Some(_) => {
                return Err(SceneError::InvalidPrototype {
                    name: name.to_string(),
                })
            }
        };
        building.pop();

        let fields: serde_json::Map<String, serde_json::Value> = def
            .iter()
            .filter(|(key, _)| key.as_str() != PROTO_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let props = Object::from_json_map(&fields);
        let obj = match proto {
            Some(proto) => link(&proto, Some(&props)),
            None => props,
        };
        self.objects.insert(name.to_string(), obj.clone());
        Ok(obj)
    }

    /// Look up an object by name.
    pub fn get(&self, name: &str) -> Result<&Object> {
        self.objects.get(name).ok_or_else(|| SceneError::UnknownObject {
            name: name.to_string(),
        })
    }

    /// Name of a scene object, if it is one.
    pub fn name_of(&self, obj: &Object) -> Option<&str> {
        self.objects
            .iter()
            .find(|(_, candidate)| candidate.ptr_eq(obj))
            .map(|(name, _)| name.as_str())
    }

    /// Object names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
