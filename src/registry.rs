//! §4.10 Link resolution & zone registry (supplemented from
//! `acetimepy`'s `timezone.py::ZoneManager`/`acetz`).
//!
//! The distilled spec compresses link delegation into one line ("Links
//! delegate their era list to their target"); this module is where that
//! delegation actually happens, once, at façade-construction time, so the
//! core pipeline (§4.4-§4.8) never has to special-case `ZoneInfoKind::Link`.

use alloc::string::String;

use indexmap::IndexMap;

use crate::error::ZoneUnknown;
use crate::facade::QueryFacade;
use crate::model::{ZoneEra, ZoneInfo, ZoneInfoKind};

/// Indexes a set of [`ZoneInfo`] entries by name and resolves links.
///
/// Grounded on `acetz::ZoneManager.registry`; uses `indexmap::IndexMap`
/// (a teacher dependency, `zoneinfo_rs`'s own choice for compiled zone
/// maps) so iteration order matches registration order, which is useful for
/// reproducible diagnostics.
pub struct ZoneRegistry {
    zones: IndexMap<String, ZoneInfo>,
}

impl ZoneRegistry {
    pub fn new(zones: impl IntoIterator<Item = ZoneInfo>) -> Self {
        Self {
            zones: zones.into_iter().map(|z| (z.name.clone(), z)).collect(),
        }
    }

    /// The zone's own `ZoneInfo` entry, without following links. Mirrors
    /// `acetz.islink`/`acetz.targetname` in that both the link and its
    /// target remain individually inspectable.
    pub fn lookup(&self, name: &str) -> Option<&ZoneInfo> {
        self.zones.get(name)
    }

    /// Resolves `name` (following at most one level of [`ZoneInfoKind::Link`],
    /// matching how IANA links are always direct, never chained) to the
    /// era list that should drive the Transition Resolver, plus the display
    /// name the query façade should report (the link's own name, per
    /// `acetz.tzfullname`).
    fn resolve_eras(&self, name: &str) -> Result<(&str, &[ZoneEra]), ZoneUnknown> {
        let entry = self.zones.get(name).ok_or_else(|| ZoneUnknown {
            name: String::from(name),
        })?;
        match &entry.kind {
            ZoneInfoKind::Zone(eras) => Ok((entry.name.as_str(), eras.as_slice())),
            ZoneInfoKind::Link { target } => {
                let target_entry = self.zones.get(target.as_str()).ok_or_else(|| ZoneUnknown {
                    name: target.clone(),
                })?;
                match &target_entry.kind {
                    ZoneInfoKind::Zone(eras) => Ok((entry.name.as_str(), eras.as_slice())),
                    ZoneInfoKind::Link { .. } => Err(ZoneUnknown {
                        name: String::from(name),
                    }),
                }
            }
        }
    }

    /// The façade factory named in §6/§7: `ZoneUnknown` is raised exactly
    /// here, never inside [`QueryFacade::init_for_year`] or the lookup
    /// methods.
    pub fn resolver(&self, name: &str) -> Result<QueryFacade, ZoneUnknown> {
        let (display_name, eras) = self.resolve_eras(name)?;
        Ok(QueryFacade::build(String::from(display_name), eras.to_vec()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }
}

impl Extend<ZoneInfo> for ZoneRegistry {
    fn extend<I: IntoIterator<Item = ZoneInfo>>(&mut self, iter: I) {
        for zone in iter {
            self.zones.insert(zone.name.clone(), zone);
        }
    }
}
