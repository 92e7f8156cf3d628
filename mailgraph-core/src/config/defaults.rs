// Single source of truth for all default values.

// --- Cache ---
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_VENDOR_PRODUCTS_TTL_SECS: u64 = 600; // 10 minutes
pub const DEFAULT_CATALOG_TTL_SECS: u64 = 3_600; // 1 hour; the catalog changes rarely
pub const DEFAULT_CACHE_SWEEP_EVERY: usize = 10;

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_OVERFETCH_FACTOR: usize = 2;
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_FALLBACK_DAY_SPAN: u32 = 30;
pub const DEFAULT_PLACEHOLDER_DISTANCE: f64 = 1.0;

// --- Ranking ---
pub const DEFAULT_PRODUCT_WEIGHT: f64 = 0.1;
pub const DEFAULT_RECENCY_MAX_BOOST: f64 = 0.2;
pub const DEFAULT_RECENCY_DECAY_PER_DAY: f64 = 0.01;
pub const DEFAULT_UNPARSED_DATE_BOOST: f64 = 0.05;

// --- Graph store ---
pub const DEFAULT_GRAPH_URI: &str = "bolt://localhost:7687";
pub const DEFAULT_GRAPH_USER: &str = "neo4j";

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1024;
pub const DEFAULT_EMBEDDING_MAX_RETRIES: u32 = 3;
pub const DEFAULT_EMBEDDING_API_KEY_ENV: &str = "MAILGRAPH_EMBED_API_KEY";

// --- Time windows ---
pub const DEFAULT_RECENT_DAY_SPAN: u32 = 30;
