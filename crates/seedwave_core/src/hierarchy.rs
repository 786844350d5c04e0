//! Brand hierarchy fixture served under `/api/global-sync/*`.
//!
//! A read-only, literal-built view of core brands, their subnodes,
//! cross-references and thematic special sections. It never reads from or
//! writes to the catalog store. `BrandHierarchy::build()` returns the same
//! data on every call; only the timestamps differ.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::types::{BrandStatus, IntegrationTag};

// ── Node types ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialSection {
    FruitfulCrateDance,
    FruitfulSmartToys,
}

impl SpecialSection {
    pub const ALL: [SpecialSection; 2] = [Self::FruitfulCrateDance, Self::FruitfulSmartToys];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FruitfulCrateDance => "fruitful-crate-dance",
            Self::FruitfulSmartToys => "fruitful-smart-toys",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInfo {
    pub id: i64,
    pub name: String,
    pub sector_id: i64,
    pub integration: IntegrationTag,
    pub status: BrandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_section: Option<SpecialSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subnode {
    pub info: BrandInfo,
    pub parent_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreBrand {
    pub info: BrandInfo,
    pub children: Vec<Subnode>,
}

/// A node of the depth-2 brand tree. Subnodes cannot own children.
#[derive(Debug, Clone, PartialEq)]
pub enum BrandNode {
    Core(CoreBrand),
    Subnode(Subnode),
}

impl BrandNode {
    pub fn info(&self) -> &BrandInfo {
        match self {
            Self::Core(core) => &core.info,
            Self::Subnode(sub) => &sub.info,
        }
    }

    pub fn is_core(&self) -> bool {
        matches!(self, Self::Core(_))
    }
}

/// Wire shape shared by every node: `isCore`, optional `parentId` and,
/// for core brands, the `children` array.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeView<'a> {
    #[serde(flatten)]
    info: &'a BrandInfo,
    is_core: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<NodeView<'a>>>,
}

impl Subnode {
    fn view(&self) -> NodeView<'_> {
        NodeView {
            info: &self.info,
            is_core: false,
            parent_id: Some(self.parent_id),
            children: None,
        }
    }
}

impl CoreBrand {
    fn view(&self) -> NodeView<'_> {
        NodeView {
            info: &self.info,
            is_core: true,
            parent_id: None,
            children: Some(self.children.iter().map(Subnode::view).collect()),
        }
    }
}

impl Serialize for Subnode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view().serialize(serializer)
    }
}

impl Serialize for CoreBrand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view().serialize(serializer)
    }
}

impl Serialize for BrandNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Core(core) => core.serialize(serializer),
            Self::Subnode(sub) => sub.serialize(serializer),
        }
    }
}

// ── Cross references ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CrossReference {
    CoreIntegration {
        brands: Vec<String>,
        integration: IntegrationTag,
    },
    SectorBridge {
        sectors: Vec<i64>,
        description: String,
    },
    SpecialSection {
        section: SpecialSection,
        brands: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    IntegrationTier {
        tier: IntegrationTag,
        priority: u8,
        brands: u32,
    },
}

impl CrossReference {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CoreIntegration { .. } => "core-integration",
            Self::SectorBridge { .. } => "sector-bridge",
            Self::SpecialSection { .. } => "special-section",
            Self::IntegrationTier { .. } => "integration-tier",
        }
    }
}

// ── Metrics ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetrics {
    pub total_brands: usize,
    pub core_brands: usize,
    pub subnodes: usize,
    pub fruitful_crate_dance_brands: usize,
    pub special_sections: BTreeMap<SpecialSection, usize>,
    pub cross_references: usize,
    pub last_sync: DateTime<Utc>,
    /// Always 100: the fixture cannot drift from its literals.
    pub integrity_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStats<'a> {
    pub section: SpecialSection,
    pub brands: &'a [BrandNode],
    pub count: usize,
    pub core_count: usize,
    pub subnode_count: usize,
}

// ── Literal data ──────────────────────────────────────────────

struct NodeLiteral {
    id: i64,
    name: &'static str,
    sector_id: i64,
    parent_id: Option<i64>,
    integration: IntegrationTag,
    section: Option<SpecialSection>,
}

const fn node(
    id: i64,
    name: &'static str,
    sector_id: i64,
    parent_id: Option<i64>,
    integration: IntegrationTag,
    section: Option<SpecialSection>,
) -> NodeLiteral {
    NodeLiteral {
        id,
        name,
        sector_id,
        parent_id,
        integration,
        section,
    }
}

use crate::types::IntegrationTag::{FaaZone, HotStack, VaultMesh};
use self::SpecialSection::{FruitfulCrateDance, FruitfulSmartToys};

const HIERARCHY_NODES: &[NodeLiteral] = &[
    node(1, "VaultMesh Core", 1, None, VaultMesh, None),
    node(2, "AgriTech Solutions", 1, None, VaultMesh, None),
    node(3, "FinanceFlow", 2, None, FaaZone, None),
    node(4, "MineTrace Analytics", 3, None, HotStack, None),
    node(5, "SonicGrid", 4, None, VaultMesh, None),
    node(6, "PowerNode", 5, None, FaaZone, None),
    node(7, "AgriSub-Alpha", 1, Some(2), VaultMesh, None),
    node(8, "FinSub-Beta", 2, Some(3), FaaZone, None),
    node(9, "Dance Floor Analytics", 4, None, VaultMesh, Some(FruitfulCrateDance)),
    node(10, "Rhythm Sync Engine", 4, Some(9), VaultMesh, Some(FruitfulCrateDance)),
    node(11, "Beat Detection AI", 4, Some(9), FaaZone, Some(FruitfulCrateDance)),
    node(12, "Crate Movement Tracker", 4, Some(9), HotStack, Some(FruitfulCrateDance)),
];

const SMART_TOYS_NODES: &[NodeLiteral] = &[node(
    13,
    "Smart Toy Hub",
    1,
    None,
    VaultMesh,
    Some(FruitfulSmartToys),
)];

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn cross_reference_table() -> Vec<CrossReference> {
    vec![
        CrossReference::CoreIntegration {
            brands: strings(&["VaultMesh Core", "AgriTech Solutions", "SonicGrid"]),
            integration: VaultMesh,
        },
        CrossReference::CoreIntegration {
            brands: strings(&["FinanceFlow", "PowerNode"]),
            integration: FaaZone,
        },
        CrossReference::CoreIntegration {
            brands: strings(&["MineTrace Analytics"]),
            integration: HotStack,
        },
        CrossReference::SectorBridge {
            sectors: vec![1, 4],
            description: "Agriculture-Media Integration".into(),
        },
        CrossReference::SectorBridge {
            sectors: vec![2, 5],
            description: "Finance-Energy Synergy".into(),
        },
        CrossReference::SpecialSection {
            section: FruitfulCrateDance,
            brands: strings(&[
                "Dance Floor Analytics",
                "Rhythm Sync Engine",
                "Beat Detection AI",
                "Crate Movement Tracker",
            ]),
            description: None,
        },
        CrossReference::SpecialSection {
            section: FruitfulSmartToys,
            brands: strings(&["VaultMesh Core"]),
            description: Some("IoT Integration".into()),
        },
        CrossReference::IntegrationTier {
            tier: VaultMesh,
            priority: 1,
            brands: 4,
        },
        CrossReference::IntegrationTier {
            tier: FaaZone,
            priority: 2,
            brands: 3,
        },
        CrossReference::IntegrationTier {
            tier: HotStack,
            priority: 3,
            brands: 2,
        },
    ]
}

impl NodeLiteral {
    fn info(&self) -> BrandInfo {
        BrandInfo {
            id: self.id,
            name: self.name.to_string(),
            sector_id: self.sector_id,
            integration: self.integration,
            status: BrandStatus::Active,
            special_section: self.section,
        }
    }

    /// A literal as a stand-alone node, children not attached.
    fn flat(&self) -> BrandNode {
        match self.parent_id {
            None => BrandNode::Core(CoreBrand {
                info: self.info(),
                children: Vec::new(),
            }),
            Some(parent_id) => BrandNode::Subnode(Subnode {
                info: self.info(),
                parent_id,
            }),
        }
    }
}

// ── BrandHierarchy ────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct BrandHierarchy {
    sectors: BTreeMap<i64, Vec<CoreBrand>>,
    cross_references: Vec<CrossReference>,
    special_sections: BTreeMap<SpecialSection, Vec<BrandNode>>,
    built_at: DateTime<Utc>,
}

impl BrandHierarchy {
    /// Build the fixture from its literal tables.
    pub fn build() -> Self {
        let mut grouped: BTreeMap<i64, Vec<&NodeLiteral>> = BTreeMap::new();
        for lit in HIERARCHY_NODES {
            grouped.entry(lit.sector_id).or_default().push(lit);
        }

        // Subnodes whose parent is not a core brand of the same sector are dropped.
        let sectors = grouped
            .into_iter()
            .map(|(sector_id, nodes)| {
                let cores = nodes
                    .iter()
                    .filter(|lit| lit.parent_id.is_none())
                    .map(|core| CoreBrand {
                        info: core.info(),
                        children: nodes
                            .iter()
                            .filter(|sub| sub.parent_id == Some(core.id))
                            .map(|sub| Subnode {
                                info: sub.info(),
                                parent_id: core.id,
                            })
                            .collect(),
                    })
                    .collect();
                (sector_id, cores)
            })
            .collect();

        let mut special_sections = BTreeMap::new();
        special_sections.insert(
            FruitfulCrateDance,
            HIERARCHY_NODES
                .iter()
                .filter(|lit| lit.section == Some(FruitfulCrateDance))
                .map(NodeLiteral::flat)
                .collect(),
        );
        special_sections.insert(
            FruitfulSmartToys,
            SMART_TOYS_NODES.iter().map(NodeLiteral::flat).collect(),
        );

        let hierarchy = Self {
            sectors,
            cross_references: cross_reference_table(),
            special_sections,
            built_at: Utc::now(),
        };
        tracing::debug!(
            sectors = hierarchy.sectors.len(),
            cross_references = hierarchy.cross_references.len(),
            special_sections = hierarchy.special_sections.len(),
            "brand hierarchy built"
        );
        hierarchy
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Core brands across all sectors, in sector order.
    pub fn core_brands(&self) -> impl Iterator<Item = &CoreBrand> {
        self.sectors.values().flatten()
    }

    pub fn subnodes(&self) -> impl Iterator<Item = &Subnode> {
        self.core_brands().flat_map(|core| core.children.iter())
    }

    /// Every node: core brands first, then subnodes.
    pub fn all_nodes(&self) -> Vec<BrandNode> {
        self.core_brands()
            .cloned()
            .map(BrandNode::Core)
            .chain(self.subnodes().cloned().map(BrandNode::Subnode))
            .collect()
    }

    pub fn brands_in_sector(&self, sector_id: i64) -> &[CoreBrand] {
        self.sectors
            .get(&sector_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn special_section(&self, section: SpecialSection) -> &[BrandNode] {
        self.special_sections
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn special_sections(&self) -> &BTreeMap<SpecialSection, Vec<BrandNode>> {
        &self.special_sections
    }

    pub fn section_stats(&self) -> Vec<SectionStats<'_>> {
        self.special_sections
            .iter()
            .map(|(section, brands)| {
                let core_count = brands.iter().filter(|b| b.is_core()).count();
                SectionStats {
                    section: *section,
                    brands,
                    count: brands.len(),
                    core_count,
                    subnode_count: brands.len() - core_count,
                }
            })
            .collect()
    }

    /// Cross references, optionally restricted to one `type` tag.
    pub fn cross_references(&self, kind: Option<&str>) -> Vec<&CrossReference> {
        self.cross_references
            .iter()
            .filter(|r| kind.is_none_or(|k| r.kind() == k))
            .collect()
    }

    /// Case-insensitive substring search over core brands and their children.
    pub fn search(&self, query: &str) -> Vec<BrandNode> {
        let needle = query.to_lowercase();
        let hit = |info: &BrandInfo| info.name.to_lowercase().contains(&needle);

        let mut results = Vec::new();
        for core in self.core_brands() {
            if hit(&core.info) {
                results.push(BrandNode::Core(core.clone()));
            }
            for child in core.children.iter().filter(|c| hit(&c.info)) {
                results.push(BrandNode::Subnode(child.clone()));
            }
        }
        results
    }

    /// Counts stamped with the time the fixture was built.
    pub fn metrics(&self) -> SyncMetrics {
        self.metrics_at(self.built_at)
    }

    pub fn metrics_at(&self, last_sync: DateTime<Utc>) -> SyncMetrics {
        let core_brands = self.core_brands().count();
        let subnodes = self.subnodes().count();
        SyncMetrics {
            total_brands: core_brands + subnodes,
            core_brands,
            subnodes,
            fruitful_crate_dance_brands: self.special_section(FruitfulCrateDance).len(),
            special_sections: self
                .special_sections
                .iter()
                .map(|(section, brands)| (*section, brands.len()))
                .collect(),
            cross_references: self.cross_references.len(),
            last_sync,
            integrity_score: 100,
        }
    }
}
