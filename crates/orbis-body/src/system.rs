//! A star system: bodies stored parent-before-child and ticked in that order.

use std::fmt;

use glam::DVec2;
use hashbrown::HashMap;
use orbis_orbit::OrbitSnapshot;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::{BodyIdentity, BodySettings, CelestialBody};
use crate::error::BodyError;

/// Index of a body within its [`StarSystem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Orbit elements for [`StarSystem::add_orbiting`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSpec {
    pub periapsis: f64,
    pub start_angle: f64,
    pub eccentricity: f64,
}

/// One body's saved orbit, keyed by body name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedOrbit {
    pub body: String,
    pub orbit: OrbitSnapshot,
}

#[derive(Clone, Debug)]
struct Entry {
    body: CelestialBody,
    parent: Option<BodyId>,
}

/// Owns every body of a system.
///
/// A child can only be attached to a parent that is already present, so
/// insertion order is a valid parent-before-child update order and each
/// child's orbit is centred on its parent's position from the same tick.
#[derive(Clone, Debug)]
pub struct StarSystem {
    settings: BodySettings,
    entries: Vec<Entry>,
    by_name: HashMap<String, BodyId>,
}

impl StarSystem {
    pub fn new(settings: BodySettings) -> Self {
        Self {
            settings,
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &BodySettings {
        &self.settings
    }

    /// Add a stationary body with no parent.
    pub fn add_body(
        &mut self,
        identity: BodyIdentity,
        position: DVec2,
    ) -> Result<BodyId, BodyError> {
        self.ensure_unique(&identity.name)?;
        let body = CelestialBody::new(identity, position, &self.settings)?;
        Ok(self.push(body, None))
    }

    /// Add a body orbiting `parent`.
    pub fn add_orbiting(
        &mut self,
        identity: BodyIdentity,
        parent: BodyId,
        spec: OrbitSpec,
    ) -> Result<BodyId, BodyError> {
        self.ensure_unique(&identity.name)?;
        let (parent_position, parent_mass) = self
            .get(parent)
            .map(|p| (p.position(), p.mass()))
            .ok_or_else(|| BodyError::UnknownParent(parent.to_string()))?;

        let mut body = CelestialBody::new(identity, parent_position, &self.settings)?;
        body.enter_orbit(
            parent_position,
            spec.periapsis,
            parent_mass,
            spec.start_angle,
            spec.eccentricity,
        );
        Ok(self.push(body, Some(parent)))
    }

    fn ensure_unique(&self, name: &str) -> Result<(), BodyError> {
        if self.by_name.contains_key(name) {
            return Err(BodyError::DuplicateName(name.to_owned()));
        }
        Ok(())
    }

    fn push(&mut self, body: CelestialBody, parent: Option<BodyId>) -> BodyId {
        let id = BodyId(self.entries.len());
        self.by_name.insert(body.name().to_owned(), id);
        self.entries.push(Entry { body, parent });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.entries.get(id.0).map(|e| &e.body)
    }

    pub fn parent_of(&self, id: BodyId) -> Option<BodyId> {
        self.entries.get(id.0).and_then(|e| e.parent)
    }

    /// Bodies in parent-before-child order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (BodyId(i), &e.body))
    }

    /// Advance every body by `dt`, parents first.
    pub fn update(&mut self, dt: f64) {
        for i in 0..self.entries.len() {
            let parent_position = self.entries[i]
                .parent
                .and_then(|p| self.entries.get(p.0))
                .map(|p| p.body.position());
            let body = &mut self.entries[i].body;
            if let Some(position) = parent_position {
                body.follow_parent(position);
            }
            body.update(dt);
        }
    }

    /// Orbit scalars for every orbiting body.
    pub fn orbit_snapshots(&self) -> Vec<SavedOrbit> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let orbit = entry.body.orbit()?;
                let parent = self.entries.get(entry.parent?.0)?;
                Some(SavedOrbit {
                    body: entry.body.name().to_owned(),
                    orbit: orbit.snapshot(parent.body.name()),
                })
            })
            .collect()
    }

    /// Restore orbits saved by [`orbit_snapshots`](Self::orbit_snapshots).
    ///
    /// Every snapshot is checked before any orbit changes, so a mismatch
    /// leaves the system untouched.
    pub fn restore_orbits(&mut self, saved: &[SavedOrbit]) -> Result<(), BodyError> {
        let mut targets = Vec::with_capacity(saved.len());
        for record in saved {
            let id = self.find(&record.body).ok_or_else(|| BodyError::SnapshotMismatch {
                body: record.body.clone(),
                reason: "no body with that name".into(),
            })?;
            let parent = self
                .find(&record.orbit.parent)
                .ok_or_else(|| BodyError::UnknownParent(record.orbit.parent.clone()))?;
            if self.parent_of(id) != Some(parent) {
                return Err(BodyError::SnapshotMismatch {
                    body: record.body.clone(),
                    reason: format!("body does not orbit `{}`", record.orbit.parent),
                });
            }
            targets.push((id, parent, &record.orbit));
        }

        // Parent-before-child so children pick up restored parent positions.
        targets.sort_by_key(|(id, _, _)| *id);
        for (id, parent, snapshot) in targets {
            let parent_position = self.entries[parent.0].body.position();
            self.entries[id.0].body.restore_orbit(snapshot, parent_position);
        }
        debug!(restored = saved.len(), "restored orbits");
        Ok(())
    }
}
