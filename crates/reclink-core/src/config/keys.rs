//! Configuration property names

// Session level
pub const SCORE_MODE: &str = "score_mode";
pub const MATCHERS: &str = "matchers";
pub const BASE_SCORE: &str = "base_score";

// Every matcher entry
pub const FIELD: &str = "field";
pub const VALUE: &str = "value";
pub const MATCHER: &str = "matcher";

// Bayes
pub const HIGH: &str = "high";
pub const LOW: &str = "low";

// Fellegi-Sunter
pub const M_VALUE: &str = "m_value";
pub const U_VALUE: &str = "u_value";

// Fellegi-Sunter (required), multiply and sum (optional)
pub const THRESHOLD: &str = "threshold";

// Multiply and sum
pub const WEIGHT: &str = "weight";

// Null value handling
pub const NULL_HANDLING: &str = "null_handling";
pub const NULL_HANDLING_BOTH: &str = "null_handling_both";
