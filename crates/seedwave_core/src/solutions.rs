//! Rule-based solution recommendations served under `/api/external/*`.
//!
//! Maps a request category onto a static catalog of brand bundles drawn from
//! the `BrandHierarchy` fixture, scores each brand with fixed deltas and
//! attaches a canned four-phase development pathway. Apart from the request
//! id and timestamps, the output depends only on the request.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SeedwaveError;
use crate::hierarchy::{BrandHierarchy, BrandNode};
use crate::types::IntegrationTag;

// ── Scoring constants ─────────────────────────────────────────

const BASE_RELEVANCE: f64 = 0.5;
const CORE_BONUS: f64 = 0.2;
const VAULTMESH_BONUS: f64 = 0.15;
const SECTOR_MATCH_BONUS: f64 = 0.3;
const HIGH_URGENCY_BONUS: f64 = 0.1;

const EMPTY_CONFIDENCE: f64 = 0.3;
const PER_RECOMMENDATION_CONFIDENCE: f64 = 0.1;
const KNOWN_CATEGORY_CONFIDENCE: f64 = 0.2;

const CORE_BASE_COST: u64 = 50_000;
const SUBNODE_BASE_COST: u64 = 25_000;

/// Category keywords and the hierarchy sector they align with.
const CATEGORY_SECTORS: &[(&str, i64)] = &[
    ("agriculture", 1),
    ("finance", 2),
    ("mining", 3),
    ("entertainment", 4),
    ("energy", 5),
];

// ── Request / response types ──────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionRequest {
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub portal_source: String,
}

impl SolutionRequest {
    pub fn validate(&self) -> Result<(), SeedwaveError> {
        if self.category.trim().is_empty() || self.portal_source.trim().is_empty() {
            return Err(SeedwaveError::InvalidInput(
                "Missing required fields: category and portalSource".into(),
            ));
        }
        Ok(())
    }

    /// The housing request the Tshwane portal sends on its dedicated route.
    pub fn housing(
        location: Option<String>,
        budget: Option<f64>,
        housing_type: Option<String>,
        urgency: Option<Urgency>,
    ) -> Self {
        Self {
            category: "housing".into(),
            location,
            budget,
            requirements: vec![housing_type.unwrap_or_else(|| "general".into())],
            urgency: Some(urgency.unwrap_or_default()),
            portal_source: "tshwane-ai".into(),
        }
    }

    fn is_high_urgency(&self) -> bool {
        self.urgency == Some(Urgency::High)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandRecommendation {
    pub brand: BrandNode,
    pub relevance_score: f64,
    pub application_areas: Vec<String>,
    pub implementation_timeframe: String,
    pub cost_estimate: String,
    pub key_benefits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionOverview {
    pub title: String,
    pub description: String,
    pub key_components: Vec<String>,
    pub expected_outcomes: Vec<String>,
    pub risk_factors: Vec<String>,
    pub success_metrics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentStep {
    pub phase: String,
    pub duration: String,
    pub requirements: Vec<String>,
    pub deliverables: Vec<String>,
    pub brands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionResponse {
    pub request_id: String,
    pub category: String,
    pub brand_recommendations: Vec<BrandRecommendation>,
    pub solution_overview: SolutionOverview,
    pub development_pathway: Vec<DevelopmentStep>,
    pub integration_tier: String,
    pub confidence_score: f64,
    pub timestamp: DateTime<Utc>,
}

/// One entry of a batch: either a response or an inline failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Processed(Box<SolutionResponse>),
    #[serde(rename_all = "camelCase")]
    Failed {
        error: String,
        original_request: serde_json::Value,
    },
}

/// Fixed-shape progress report; it does not track any real state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentStatus {
    pub request_id: String,
    pub current_phase: String,
    pub progress: u8,
    pub completed_steps: Vec<String>,
    pub next_steps: Vec<String>,
    pub estimated_completion: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl DevelopmentStatus {
    pub fn for_request(request_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            request_id: request_id.into(),
            current_phase: "Infrastructure Setup".into(),
            progress: 35,
            completed_steps: strings(&[
                "Requirement analysis completed",
                "Technical specifications approved",
                "Resource allocation confirmed",
            ]),
            next_steps: strings(&[
                "Integration framework setup",
                "Testing environment preparation",
                "Core infrastructure deployment",
            ]),
            estimated_completion: now + Duration::days(45),
            last_updated: now,
        }
    }
}

// ── Catalog ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SolutionEntry {
    pub title: &'static str,
    pub brands: &'static [&'static str],
    pub description: &'static str,
    pub applications: &'static [&'static str],
    pub timeframe: &'static str,
}

/// Catalog listing without the brand names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionSummary {
    pub category: &'static str,
    pub description: &'static str,
    pub applications: &'static [&'static str],
    pub timeframe: &'static str,
    pub brand_count: usize,
}

impl SolutionEntry {
    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            category: self.title,
            description: self.description,
            applications: self.applications,
            timeframe: self.timeframe,
            brand_count: self.brands.len(),
        }
    }
}

const CATALOG: &[(&str, &[SolutionEntry])] = &[
    (
        "housing",
        &[
            SolutionEntry {
                title: "Smart Housing Development",
                brands: &["VaultMesh Core", "PowerNode", "AgriTech Solutions"],
                description: "Comprehensive smart housing infrastructure with integrated IoT and energy management",
                applications: &["Low-cost housing", "Smart cities", "Sustainable communities"],
                timeframe: "6-18 months",
            },
            SolutionEntry {
                title: "Housing Finance Solutions",
                brands: &["FinanceFlow", "FinSub-Beta"],
                description: "Advanced financial technology for housing loans and property management",
                applications: &["Mortgage processing", "Property investment", "Rental management"],
                timeframe: "3-12 months",
            },
        ],
    ),
    (
        "energy",
        &[SolutionEntry {
            title: "Renewable Energy Infrastructure",
            brands: &["PowerNode", "VaultMesh Core"],
            description: "Grid-scale renewable energy solutions with smart distribution",
            applications: &["Solar farms", "Wind energy", "Grid optimization"],
            timeframe: "12-36 months",
        }],
    ),
    (
        "agriculture",
        &[SolutionEntry {
            title: "Smart Agriculture Systems",
            brands: &["AgriTech Solutions", "AgriSub-Alpha"],
            description: "Precision agriculture with IoT monitoring and automated systems",
            applications: &["Crop optimization", "Livestock management", "Supply chain"],
            timeframe: "6-24 months",
        }],
    ),
    (
        "mining",
        &[SolutionEntry {
            title: "Mining Analytics & Safety",
            brands: &["MineTrace Analytics"],
            description: "Advanced mining operation analytics with safety monitoring",
            applications: &["Resource extraction", "Safety compliance", "Environmental monitoring"],
            timeframe: "9-30 months",
        }],
    ),
    (
        "entertainment",
        &[SolutionEntry {
            title: "Interactive Entertainment Platforms",
            brands: &["Dance Floor Analytics", "Rhythm Sync Engine", "Beat Detection AI"],
            description: "Advanced entertainment technology for events and venues",
            applications: &["Event management", "Venue optimization", "Interactive experiences"],
            timeframe: "3-12 months",
        }],
    ),
];

/// Read-only solution catalog, constructed once at startup.
#[derive(Debug, Clone)]
pub struct SolutionCatalog {
    categories: Vec<(&'static str, &'static [SolutionEntry])>,
}

impl Default for SolutionCatalog {
    fn default() -> Self {
        Self::build()
    }
}

impl SolutionCatalog {
    pub fn build() -> Self {
        let catalog = Self {
            categories: CATALOG.to_vec(),
        };
        tracing::debug!(
            categories = catalog.categories.len(),
            "solution catalog built"
        );
        catalog
    }

    /// Category keys in catalog order.
    pub fn categories(&self) -> Vec<&'static str> {
        self.categories.iter().map(|(key, _)| *key).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static [SolutionEntry])> + '_ {
        self.categories.iter().copied()
    }

    pub fn total_solutions(&self) -> usize {
        self.categories.iter().map(|(_, entries)| entries.len()).sum()
    }

    /// Entries for a category, matched case-insensitively.
    pub fn lookup(&self, category: &str) -> Option<&'static [SolutionEntry]> {
        let key = category.to_lowercase();
        self.categories
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, entries)| *entries)
    }

    /// Produce a response with a fresh request id and timestamp.
    pub fn recommend(&self, request: &SolutionRequest, brands: &BrandHierarchy) -> SolutionResponse {
        self.recommend_with(request, brands, Uuid::new_v4().to_string(), Utc::now())
    }

    pub fn recommend_with(
        &self,
        request: &SolutionRequest,
        brands: &BrandHierarchy,
        request_id: String,
        timestamp: DateTime<Utc>,
    ) -> SolutionResponse {
        tracing::info!(
            category = %request.category,
            portal = %request.portal_source,
            "processing solution request"
        );
        let entries = self.lookup(&request.category).unwrap_or(&[]);
        let recommendations = recommend_brands(request, &brands.all_nodes(), entries);
        let confidence_score = self.confidence(request, &recommendations);

        SolutionResponse {
            request_id,
            category: request.category.clone(),
            solution_overview: overview(request, entries),
            development_pathway: development_pathway(&recommendations),
            integration_tier: integration_tier(&recommendations).to_string(),
            confidence_score,
            brand_recommendations: recommendations,
            timestamp,
        }
    }

    /// Parse, validate and process every request; failures stay inline.
    pub fn process_batch(
        &self,
        requests: Vec<serde_json::Value>,
        brands: &BrandHierarchy,
    ) -> Vec<BatchItem> {
        requests
            .into_iter()
            .map(|raw| {
                let parsed = serde_json::from_value::<SolutionRequest>(raw.clone())
                    .map_err(SeedwaveError::from)
                    .and_then(|req| {
                        // Portal source is optional per entry; only the category is needed.
                        if req.category.trim().is_empty() {
                            return Err(SeedwaveError::InvalidInput("Missing category".into()));
                        }
                        Ok(req)
                    });
                match parsed {
                    Ok(req) => BatchItem::Processed(Box::new(self.recommend(&req, brands))),
                    Err(e) => {
                        tracing::warn!(error = %e, "batch entry rejected");
                        let category = raw
                            .get("category")
                            .and_then(|c| c.as_str())
                            .unwrap_or("undefined");
                        BatchItem::Failed {
                            error: format!("Failed to process request for {category}"),
                            original_request: raw,
                        }
                    }
                }
            })
            .collect()
    }

    fn confidence(&self, request: &SolutionRequest, recs: &[BrandRecommendation]) -> f64 {
        if recs.is_empty() {
            return EMPTY_CONFIDENCE;
        }
        let mean = recs.iter().map(|r| r.relevance_score).sum::<f64>() / recs.len() as f64;
        let category_bonus = if self.lookup(&request.category).is_some() {
            KNOWN_CATEGORY_CONFIDENCE
        } else {
            0.0
        };
        (mean + recs.len() as f64 * PER_RECOMMENDATION_CONFIDENCE + category_bonus).clamp(0.0, 1.0)
    }
}

// ── Scoring ───────────────────────────────────────────────────

fn recommend_brands(
    request: &SolutionRequest,
    nodes: &[BrandNode],
    entries: &[SolutionEntry],
) -> Vec<BrandRecommendation> {
    let mut recs: Vec<BrandRecommendation> = entries
        .iter()
        .flat_map(|entry| entry.brands.iter().map(move |name| (entry, *name)))
        .filter_map(|(entry, name)| {
            let brand = nodes.iter().find(|n| n.info().name == name)?;
            Some(BrandRecommendation {
                brand: brand.clone(),
                relevance_score: relevance(request, brand),
                application_areas: strings(entry.applications),
                implementation_timeframe: entry.timeframe.to_string(),
                cost_estimate: cost_estimate(request, brand),
                key_benefits: key_benefits(request, brand),
            })
        })
        .collect();
    // Stable: ties keep catalog order.
    recs.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    recs
}

pub fn relevance(request: &SolutionRequest, brand: &BrandNode) -> f64 {
    let info = brand.info();
    let category = request.category.to_lowercase();
    let mut score = BASE_RELEVANCE;

    if brand.is_core() {
        score += CORE_BONUS;
    }
    if info.integration == IntegrationTag::VaultMesh {
        score += VAULTMESH_BONUS;
    }
    if CATEGORY_SECTORS
        .iter()
        .any(|(keyword, sector)| category.contains(keyword) && *sector == info.sector_id)
    {
        score += SECTOR_MATCH_BONUS;
    }
    if request.is_high_urgency() {
        score += HIGH_URGENCY_BONUS;
    }
    score.min(1.0)
}

pub fn cost_estimate(request: &SolutionRequest, brand: &BrandNode) -> String {
    let base = if brand.is_core() {
        CORE_BASE_COST
    } else {
        SUBNODE_BASE_COST
    };
    let low = if request.is_high_urgency() {
        base * 13 / 10
    } else {
        base
    };
    format!("${} - ${}", thousands(low), thousands(low * 2))
}

fn key_benefits(request: &SolutionRequest, brand: &BrandNode) -> Vec<String> {
    let mut benefits = strings(&[
        "Proven technology stack",
        "Scalable architecture",
        "Expert support team",
    ]);
    if brand.is_core() {
        benefits.push("Enterprise-grade reliability".into());
    }
    if brand.info().integration == IntegrationTag::VaultMesh {
        benefits.push("Advanced security features".into());
    }
    if request.is_high_urgency() {
        benefits.push("Accelerated deployment".into());
    }
    benefits
}

fn integration_tier(recs: &[BrandRecommendation]) -> &'static str {
    let count = |tag: IntegrationTag| {
        recs.iter()
            .filter(|r| r.brand.info().integration == tag)
            .count()
    };
    if count(IntegrationTag::VaultMesh) >= 2 {
        "VaultMesh™ Premium"
    } else if count(IntegrationTag::FaaZone) >= 2 {
        "FAA.ZONE™ Advanced"
    } else {
        "HotStack Standard"
    }
}

fn overview(request: &SolutionRequest, entries: &[SolutionEntry]) -> SolutionOverview {
    let description = entries.first().map(|e| e.description.to_string()).unwrap_or_else(|| {
        format!(
            "Comprehensive {} solution using integrated brand ecosystem",
            request.category
        )
    });
    SolutionOverview {
        title: format!("{} Solution Framework", request.category),
        description,
        key_components: strings(&[
            "Brand ecosystem integration",
            "Cross-platform synchronization",
            "Real-time monitoring",
            "Scalable infrastructure",
        ]),
        expected_outcomes: strings(&[
            "Improved efficiency and performance",
            "Reduced implementation time",
            "Enhanced scalability",
            "Integrated ecosystem benefits",
        ]),
        risk_factors: strings(&[
            "Integration complexity",
            "Resource availability",
            "Timeline dependencies",
        ]),
        success_metrics: strings(&[
            "Implementation timeline adherence",
            "Performance benchmarks",
            "User satisfaction scores",
            "ROI achievement",
        ]),
    }
}

fn development_pathway(recs: &[BrandRecommendation]) -> Vec<DevelopmentStep> {
    let top = |n: usize| -> Vec<String> {
        recs.iter()
            .take(n)
            .map(|r| r.brand.info().name.clone())
            .collect()
    };
    let step = |phase: &str,
                duration: &str,
                reqs: &[&str],
                deliverables: &[&str],
                brands: Vec<String>| {
        DevelopmentStep {
            phase: phase.into(),
            duration: duration.into(),
            requirements: strings(reqs),
            deliverables: strings(deliverables),
            brands,
        }
    };
    vec![
        step(
            "Planning & Assessment",
            "2-4 weeks",
            &["Requirement analysis", "Feasibility study", "Resource planning"],
            &["Project scope", "Technical specifications", "Timeline"],
            top(2),
        ),
        step(
            "Infrastructure Setup",
            "4-8 weeks",
            &["System architecture", "Integration setup", "Testing environment"],
            &["Core infrastructure", "Integration framework", "Testing protocols"],
            top(3),
        ),
        step(
            "Implementation & Testing",
            "8-16 weeks",
            &["Development execution", "Quality assurance", "Performance testing"],
            &["Working system", "Test reports", "Performance metrics"],
            top(recs.len()),
        ),
        step(
            "Deployment & Optimization",
            "2-6 weeks",
            &["Production deployment", "Performance tuning", "User training"],
            &["Live system", "Documentation", "Support framework"],
            top(2),
        ),
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `65000` → `"65,000"`.
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
