//! Report query catalog
//!
//! The report is a fixed, ordered list of sections, each a fixed, ordered
//! list of labelled queries. Every query is scoped to the configured
//! countries and excludes internal test users; the remaining terms come from
//! the reusable fragments on [`ReportFilters`] and the static enumerations
//! below.

use crate::config::ReportSettings;
use crate::domain::{Predicate, ProfileQuery, ReportQuery, CRM_ID_FIELD};

/// Biomaterial journey states, in report order
pub const BIOMATERIAL_STATES: [&str; 7] = [
    "BIOMAT_AWARE_LANDING_PAGE",
    "BIOMAT_AWARE_VIDEO",
    "BIOMAT_CONSIDER_WEBINAR",
    "BIOMAT_CONSIDER_ELEARNING",
    "BIOMAT_ENGAGE_COURSE",
    "BIOMAT_ENGAGE_PROMO",
    "BIOMAT_NONE",
];

/// Product-interest codes, in report order
pub const PRODUCT_INTERESTS: [&str; 11] = [
    "a", // XenoGrapht
    "b", // MaxGraft
    "c", // XenoFlex
    "d", // BoneCeramic
    "e", // Cerabone Plus
    "f", // Jason Membrane
    "g", // Permamem
    "h", // Mucoderm
    "j", // Emdogain (default product interest)
    "k", // Emdogain FL
    "l", // Labrida Brush
];

/// Relevant professions as (CRM code, plural label)
pub const PROFESSIONS: [(&str, &str); 3] = [
    ("01", "Dentists"),
    ("05", "General Practitioners"),
    ("06", "Hygienists"),
];

/// Tracked web properties as (label, page-view activity indicator suffix)
pub const SITES: [(&str, &str); 3] = [
    ("Shop", "EshopPageView"),
    ("AEM", "AEMPageView"),
    ("Skill", "SKILLPageView"),
];

/// Biomaterial ratio splitting "low" from "high" engagement
pub const BIO_RATIO_THRESHOLD: f64 = 0.5333;

const COUNTRY_FIELD: &str = "attributes.country";
const EXPOSED_FIELD: &str = "attributes.data.internal.cdpABExposed";
const PROFESSION_FIELD: &str = "attributes.data.crmExtended.profession";
const BIO_RATIO_FIELD: &str = "attributes.uc1.currentBioRatio";
const BIO_STATE_FIELD: &str = "attributes.uc1.BioState";
const BIO_MILESTONE_FIELD: &str = "attributes.uc1.BioMilestone";
const PRODUCT_INTEREST_FIELD: &str = "attributes.uc1.productInterest";
const PRE_JOURNEY_SEGMENT: &str = "UC1 - Pre-Journey";
const LOYAL_MILESTONE: &str = "LOYALS";

/// Reusable filter fragments
#[derive(Debug, Clone)]
pub struct ReportFilters {
    countries: Vec<String>,
    excluded_crm_ids: Vec<String>,
}

impl ReportFilters {
    pub fn new(settings: &ReportSettings) -> Self {
        Self {
            countries: settings.countries.clone(),
            excluded_crm_ids: settings.excluded_crm_ids.clone(),
        }
    }

    /// Profile lives in one of the configured countries
    pub fn country(&self) -> Predicate {
        Predicate::any(
            self.countries
                .iter()
                .map(|c| Predicate::eq(COUNTRY_FIELD, c)),
        )
    }

    /// Profile is not one of the internal test users
    pub fn excluded_users(&self) -> Predicate {
        Predicate::all(
            self.excluded_crm_ids
                .iter()
                .map(|id| Predicate::ne(CRM_ID_FIELD, id)),
        )
    }

    /// Profile was exposed to the A/B experience
    pub fn exposed() -> Predicate {
        Predicate::eq(EXPOSED_FIELD, true)
    }

    /// Profile has exactly the profession `code`
    pub fn profession(code: &str) -> Predicate {
        Predicate::eq(PROFESSION_FIELD, code)
    }

    /// Profile has any of the relevant professions
    pub fn relevant_professions() -> Predicate {
        Predicate::any(PROFESSIONS.iter().map(|(code, _)| Self::profession(code)))
    }

    /// Profile is in the pre-journey segment or already a loyal customer
    pub fn in_journey() -> Predicate {
        Predicate::any([
            Predicate::having(
                "segments",
                Predicate::eq("segments.name", PRE_JOURNEY_SEGMENT),
            ),
            Predicate::eq(BIO_MILESTONE_FIELD, LOYAL_MILESTONE),
        ])
    }

    /// Profile viewed at least one page of the site tracked by `indicator`
    pub fn page_views(indicator: &str) -> Predicate {
        Predicate::having(
            "activityIndicators",
            Predicate::eq(
                "activityIndicators.name",
                format!("Total Web Event - {indicator}"),
            ),
        )
    }

    /// CRM-id query over `terms`, with test users excluded last
    pub fn population(&self, terms: impl IntoIterator<Item = Predicate>) -> ProfileQuery {
        ProfileQuery::crm_ids(Predicate::all(terms).and(self.excluded_users()))
    }
}

/// One titled group of report queries
#[derive(Debug, Clone)]
pub struct ReportSection {
    title: String,
    queries: Vec<ReportQuery>,
}

impl ReportSection {
    pub fn new(title: impl Into<String>, queries: Vec<ReportQuery>) -> Self {
        Self {
            title: title.into(),
            queries,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Header line as it appears in the report
    pub fn header(&self) -> String {
        format!("### {}: ###", self.title)
    }

    pub fn queries(&self) -> &[ReportQuery] {
        &self.queries
    }
}

/// The full, ordered report definition
#[derive(Debug, Clone)]
pub struct ReportCatalog {
    title: String,
    sections: Vec<ReportSection>,
}

impl ReportCatalog {
    /// Assembles a catalog from explicit sections
    pub fn new(title: impl Into<String>, sections: Vec<ReportSection>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }

    /// Builds the standard UC1 report for the configured population
    pub fn build(settings: &ReportSettings) -> Self {
        let filters = ReportFilters::new(settings);
        let title = format!(
            "UC1 Report (Only {} users considered):",
            settings.countries.join(" and ")
        );

        Self::new(
            title,
            vec![
                general_section(&filters),
                state_section(&filters),
                interest_section(&filters),
                profession_section(&filters),
                site_section(&filters),
            ],
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    /// Every query in declaration order
    pub fn queries(&self) -> impl Iterator<Item = &ReportQuery> {
        self.sections.iter().flat_map(|s| s.queries().iter())
    }

    /// Sections whose title contains `needle`, ignoring case
    pub fn matching_sections(&self, needle: &str) -> Vec<&ReportSection> {
        let needle = needle.to_lowercase();
        self.sections
            .iter()
            .filter(|s| s.title().to_lowercase().contains(&needle))
            .collect()
    }
}

fn general_section(f: &ReportFilters) -> ReportSection {
    let exposed_relevant = || {
        [
            ReportFilters::exposed(),
            f.country(),
            ReportFilters::relevant_professions(),
        ]
    };

    ReportSection::new(
        "General User Stats",
        vec![
            ReportQuery::new("Total users", f.population([f.country()])),
            ReportQuery::new(
                "Users with Biomaterial Ratio",
                f.population([f.country(), Predicate::is_not_null(BIO_RATIO_FIELD)]),
            ),
            ReportQuery::new(
                "Exposed users",
                f.population([ReportFilters::exposed(), f.country()]),
            ),
            ReportQuery::new(
                "Exposed users with relevant professions from UK",
                f.population(exposed_relevant()),
            ),
            ReportQuery::new(
                format!(
                    "Exposed relevant users with biomaterial ratio less than {BIO_RATIO_THRESHOLD}"
                ),
                f.population(
                    exposed_relevant()
                        .into_iter()
                        .chain([Predicate::lt(BIO_RATIO_FIELD, BIO_RATIO_THRESHOLD)]),
                ),
            ),
            ReportQuery::new(
                format!(
                    "Exposed relevant users with biomaterial ratio {BIO_RATIO_THRESHOLD} or more"
                ),
                f.population(
                    exposed_relevant()
                        .into_iter()
                        .chain([Predicate::ge(BIO_RATIO_FIELD, BIO_RATIO_THRESHOLD)]),
                ),
            ),
            ReportQuery::new(
                "Exposed relevant users with no biomaterial ratio",
                f.population(
                    exposed_relevant()
                        .into_iter()
                        .chain([Predicate::is_null(BIO_RATIO_FIELD)]),
                ),
            ),
            ReportQuery::new(
                "Users in journey",
                f.population([f.country(), ReportFilters::in_journey()]),
            ),
        ],
    )
}

fn state_section(f: &ReportFilters) -> ReportSection {
    let queries = BIOMATERIAL_STATES
        .iter()
        .map(|state| {
            ReportQuery::new(
                format!("Users in state {state}"),
                f.population([Predicate::eq(BIO_STATE_FIELD, *state), f.country()]),
            )
        })
        .collect();

    ReportSection::new("Users per Biomaterial State", queries)
}

fn interest_section(f: &ReportFilters) -> ReportSection {
    let queries = PRODUCT_INTERESTS
        .iter()
        .map(|code| {
            ReportQuery::new(
                format!("Product {code}"),
                f.population([Predicate::eq(PRODUCT_INTEREST_FIELD, *code), f.country()]),
            )
        })
        .collect();

    ReportSection::new("Users per Biomaterial Interest", queries)
}

fn profession_section(f: &ReportFilters) -> ReportSection {
    let queries = PROFESSIONS
        .iter()
        .flat_map(|(code, label)| {
            [
                ReportQuery::new(
                    *label,
                    f.population([f.country(), ReportFilters::profession(code)]),
                ),
                ReportQuery::new(
                    format!("{label} in journey"),
                    f.population([
                        f.country(),
                        ReportFilters::profession(code),
                        ReportFilters::in_journey(),
                    ]),
                ),
            ]
        })
        .collect();

    ReportSection::new("Users professions", queries)
}

fn site_section(f: &ReportFilters) -> ReportSection {
    let queries = SITES
        .iter()
        .flat_map(|(site, indicator)| {
            [
                ReportQuery::new(
                    format!("{site}: Total"),
                    f.population([f.country(), ReportFilters::page_views(indicator)]),
                ),
                ReportQuery::new(
                    format!("{site}: In journey"),
                    f.population([
                        f.country(),
                        ReportFilters::in_journey(),
                        ReportFilters::page_views(indicator),
                    ]),
                ),
            ]
        })
        .collect();

    ReportSection::new("Users with page visits per site", queries)
}
