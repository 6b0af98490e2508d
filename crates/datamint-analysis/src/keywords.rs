//! Fixed keyword tables driving category, data-type, and sensitivity
//! classification. Matching is case-insensitive substring matching over
//! field names and raw content.

/// Subject-matter categories and the keywords that trigger them.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "health",
        &[
            "health",
            "medical",
            "fitness",
            "heart",
            "blood",
            "patient",
            "diagnosis",
        ],
    ),
    (
        "financial",
        &[
            "price",
            "cost",
            "payment",
            "transaction",
            "money",
            "revenue",
            "profit",
            "amount",
        ],
    ),
    (
        "location",
        &[
            "location",
            "address",
            "city",
            "country",
            "lat",
            "lng",
            "coordinates",
        ],
    ),
    (
        "ecommerce",
        &["product", "purchase", "order", "cart", "item", "customer"],
    ),
    (
        "social",
        &["social", "friend", "message", "post", "comment", "like", "share"],
    ),
    (
        "technology",
        &[
            "url", "website", "browser", "search", "visit", "click", "session", "http", "www",
        ],
    ),
];

/// Keywords whose presence raises the sensitivity score.
pub const SENSITIVE_KEYWORDS: &[&str] = &[
    "email",
    "phone",
    "address",
    "ssn",
    "credit",
    "password",
    "personal",
    "private",
    "medical",
    "health",
    "financial",
    "bank",
    "account",
    "social security",
    "passport",
    "license",
];

/// Data-type tags keyed by field-name fragments.
pub const DATA_TYPE_RULES: &[(&str, &[&str])] = &[
    ("temporal", &["date", "time", "timestamp"]),
    ("identifier", &["id", "number", "count"]),
    ("textual", &["name", "title", "description"]),
    ("numerical", &["amount", "price", "cost", "value"]),
    ("contact", &["email", "phone", "contact"]),
    ("geospatial", &["lat", "lng", "coordinate"]),
];
