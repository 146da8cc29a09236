//! Cross-cutting, shared constants.
//!
//! Point values for the rule buckets and the intent mapping live here so the
//! evaluator, the combiner and their tests agree on the same numbers.
//!
//! # Score Invariants
//!
//! `MAX_RULE_SCORE + MAX_AI_SCORE == MAX_FINAL_SCORE`. The bucket maxima sum to
//! `MAX_RULE_SCORE`, and the largest intent score equals `MAX_AI_SCORE`.

pub const MAX_RULE_SCORE: u8 = 50;
pub const MAX_AI_SCORE: u8 = 50;
pub const MAX_FINAL_SCORE: u8 = MAX_RULE_SCORE + MAX_AI_SCORE;

pub const DECISION_MAKER_POINTS: u8 = 20;
pub const INFLUENCER_POINTS: u8 = 10;
pub const OTHER_ROLE_POINTS: u8 = 0;

pub const EXACT_INDUSTRY_POINTS: u8 = 20;
pub const RELATED_INDUSTRY_POINTS: u8 = 10;
pub const OTHER_INDUSTRY_POINTS: u8 = 0;

pub const COMPLETE_DATA_POINTS: u8 = 10;

pub const HIGH_INTENT_POINTS: u8 = 50;
pub const MEDIUM_INTENT_POINTS: u8 = 30;
pub const LOW_INTENT_POINTS: u8 = 10;

/// Title keywords that mark a decision maker. Checked before [`INFLUENCER_KEYWORDS`].
pub const DECISION_MAKER_KEYWORDS: &[&str] = &[
    "ceo",
    "cto",
    "cfo",
    "coo",
    "cmo",
    "cro",
    "founder",
    "co-founder",
    "cofounder",
    "president",
    "vp",
    "vice president",
    "svp",
    "evp",
    "director",
    "chief",
    "owner",
    "partner",
];

pub const INFLUENCER_KEYWORDS: &[&str] = &[
    "head of",
    "manager",
    "lead",
    "senior",
    "principal",
    "supervisor",
    "coordinator",
    "specialist",
    "architect",
];

/// Families of industry terms that count as related to each other.
pub const INDUSTRY_FAMILIES: &[&[&str]] = &[
    &[
        "software",
        "saas",
        "technology",
        "tech",
        "it",
        "information technology",
        "software development",
        "cloud",
    ],
    &[
        "fintech",
        "financial services",
        "banking",
        "finance",
        "payments",
        "cryptocurrency",
        "blockchain",
        "insurance",
    ],
    &[
        "ecommerce",
        "e-commerce",
        "retail",
        "marketplace",
        "online retail",
        "shopping",
        "d2c",
    ],
    &[
        "healthcare",
        "health",
        "medtech",
        "healthtech",
        "biotech",
        "pharma",
        "hospital",
    ],
    &["marketing", "advertising", "adtech", "martech", "agency", "media"],
];

/// Words too generic to make two industries related on their own.
pub const GENERIC_INDUSTRY_WORDS: &[&str] = &[
    "companies",
    "company",
    "business",
    "businesses",
    "services",
    "service",
    "industry",
    "industries",
    "solutions",
    "teams",
    "market",
    "mid-market",
    "enterprise",
    "enterprises",
    "startups",
    "startup",
    "firms",
];

/// Shared tokens shorter than this never count as a related-industry match.
pub const MIN_SHARED_TOKEN_LEN: usize = 4;

pub const DEFAULT_BIO_CHARS: usize = 200;
pub const DEFAULT_USE_CASES_COUNT: usize = 2;
pub const DEFAULT_VALUE_PROPS_COUNT: usize = 3;

/// Provider reasoning is cut to this many characters before it is stored.
pub const MAX_REASONING_CHARS: usize = 280;

/// Rough characters-per-token ratio used for cost estimates.
pub const CHARS_PER_TOKEN: usize = 4;

pub const GEMINI_PROVIDER_ID: &str = "gemini";
pub const OPENAI_PROVIDER_ID: &str = "openai";
