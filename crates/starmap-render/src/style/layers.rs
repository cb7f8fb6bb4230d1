use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identity of one drawing pass.
///
/// Declaration order is the default z-order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayerId {
    BackgroundSolid,
    BackgroundNebulaTexture,
    BackgroundGalaxy,
    BackgroundPseudoRandomStars,
    BackgroundRifts,
    MacroBorders,
    MacroRoutes,
    GridSector,
    GridSubsector,
    GridParsec,
    NamesSubsector,
    MicroBordersFill,
    MicroBordersShade,
    MicroBordersStroke,
    MicroRoutes,
    MicroBorderExplicitLabels,
    NamesSector,
    MacroGovernmentRiftRouteNames,
    MacroCapitalsAndHomeWorlds,
    MegaGalaxyScaleLabels,
    WorldsBackground,
    WorldsForeground,
    WorldsOverlays,
    OverlayDroyneChirperWorlds,
    OverlayMinorHomeworlds,
    OverlayAncientsWorlds,
    OverlayReviewStatus,
}

impl LayerId {
    pub const ALL: [LayerId; 27] = [
        LayerId::BackgroundSolid,
        LayerId::BackgroundNebulaTexture,
        LayerId::BackgroundGalaxy,
        LayerId::BackgroundPseudoRandomStars,
        LayerId::BackgroundRifts,
        LayerId::MacroBorders,
        LayerId::MacroRoutes,
        LayerId::GridSector,
        LayerId::GridSubsector,
        LayerId::GridParsec,
        LayerId::NamesSubsector,
        LayerId::MicroBordersFill,
        LayerId::MicroBordersShade,
        LayerId::MicroBordersStroke,
        LayerId::MicroRoutes,
        LayerId::MicroBorderExplicitLabels,
        LayerId::NamesSector,
        LayerId::MacroGovernmentRiftRouteNames,
        LayerId::MacroCapitalsAndHomeWorlds,
        LayerId::MegaGalaxyScaleLabels,
        LayerId::WorldsBackground,
        LayerId::WorldsForeground,
        LayerId::WorldsOverlays,
        LayerId::OverlayDroyneChirperWorlds,
        LayerId::OverlayMinorHomeworlds,
        LayerId::OverlayAncientsWorlds,
        LayerId::OverlayReviewStatus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayerId::BackgroundSolid => "BackgroundSolid",
            LayerId::BackgroundNebulaTexture => "BackgroundNebulaTexture",
            LayerId::BackgroundGalaxy => "BackgroundGalaxy",
            LayerId::BackgroundPseudoRandomStars => "BackgroundPseudoRandomStars",
            LayerId::BackgroundRifts => "BackgroundRifts",
            LayerId::MacroBorders => "MacroBorders",
            LayerId::MacroRoutes => "MacroRoutes",
            LayerId::GridSector => "GridSector",
            LayerId::GridSubsector => "GridSubsector",
            LayerId::GridParsec => "GridParsec",
            LayerId::NamesSubsector => "NamesSubsector",
            LayerId::MicroBordersFill => "MicroBordersFill",
            LayerId::MicroBordersShade => "MicroBordersShade",
            LayerId::MicroBordersStroke => "MicroBordersStroke",
            LayerId::MicroRoutes => "MicroRoutes",
            LayerId::MicroBorderExplicitLabels => "MicroBorderExplicitLabels",
            LayerId::NamesSector => "NamesSector",
            LayerId::MacroGovernmentRiftRouteNames => "MacroGovernmentRiftRouteNames",
            LayerId::MacroCapitalsAndHomeWorlds => "MacroCapitalsAndHomeWorlds",
            LayerId::MegaGalaxyScaleLabels => "MegaGalaxyScaleLabels",
            LayerId::WorldsBackground => "WorldsBackground",
            LayerId::WorldsForeground => "WorldsForeground",
            LayerId::WorldsOverlays => "WorldsOverlays",
            LayerId::OverlayDroyneChirperWorlds => "OverlayDroyneChirperWorlds",
            LayerId::OverlayMinorHomeworlds => "OverlayMinorHomeworlds",
            LayerId::OverlayAncientsWorlds => "OverlayAncientsWorlds",
            LayerId::OverlayReviewStatus => "OverlayReviewStatus",
        }
    }
}

/// Rank table deciding pass z-order; lower ranks draw first.
///
/// Every layer must have a rank: the pipeline refuses to render with a
/// partial table instead of guessing a position.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerOrder {
    ranks: HashMap<LayerId, i32>,
}

impl Default for LayerOrder {
    /// Declaration order, ranks 0, 1, 2, ...
    fn default() -> Self {
        let ranks = LayerId::ALL
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i as i32))
            .collect();
        Self { ranks }
    }
}

impl LayerOrder {
    /// Table with no ranks at all.
    pub fn empty() -> Self {
        Self { ranks: HashMap::new() }
    }

    #[inline]
    pub fn rank(&self, id: LayerId) -> Option<i32> {
        self.ranks.get(&id).copied()
    }

    pub fn set(&mut self, id: LayerId, rank: i32) -> &mut Self {
        self.ranks.insert(id, rank);
        self
    }

    pub fn remove(&mut self, id: LayerId) -> Option<i32> {
        self.ranks.remove(&id)
    }

    /// Replaces the ranks named in `overrides`, keeping the rest.
    pub fn apply_overrides(&mut self, overrides: &HashMap<LayerId, i32>) {
        for (&id, &rank) in overrides {
            self.ranks.insert(id, rank);
        }
    }

    /// Layers with no rank, in declaration order.
    pub fn missing(&self) -> impl Iterator<Item = LayerId> + '_ {
        LayerId::ALL
            .into_iter()
            .filter(|id| !self.ranks.contains_key(id))
    }
}
