// Well-known names shared by the resolver phases

// Superclass walks stop here; every class implicitly extends it
pub const DEFAULT_TERMINAL_ROOT: &str = "java.lang.Object";

// Member names that describe initializers rather than callable methods
pub const CONSTRUCTOR_METHOD: &str = "<init>";
pub const STATIC_INITIALIZER_METHOD: &str = "<clinit>";

// Environment switches (the process-wide counterpart of manifest properties)
pub const ENV_LEGACY_WEB_METHOD: &str = "JAXWS_LEGACY_WEB_METHOD";
pub const ENV_LEGACY_WEB_METHOD_SUN: &str = "JAXWS_LEGACY_WEB_METHOD_SUN";

// First tooling release that shipped the modern exposure rules
pub const MODERN_RULES_MIN_TOOLING_VERSION: &str = "2.1.6";

// Descriptor files picked up by directory scans
pub const DESCRIPTOR_EXTENSION: &str = "toml";
