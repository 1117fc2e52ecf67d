// Default dataset locations (one JSON export per year)
pub const DEFAULT_BASE_URL: &str = "https://pautapba.com.ar/data";
pub const DEFAULT_DATASETS: &[&str] = &[
    "pauta_bsas_2023.json",
    "pauta_bsas_2024.json",
    "pauta_bsas_2025.json",
];

// A four-digit year beginning with "20" embedded in a dataset file name
pub const YEAR_REGEX_PATTERN: &str = r"(20\d{2})";

// Canonical Spanish month names, December first (display/sort order)
pub const MONTHS_DESC: &[&str] = &[
    "diciembre",
    "noviembre",
    "octubre",
    "septiembre",
    "agosto",
    "julio",
    "junio",
    "mayo",
    "abril",
    "marzo",
    "febrero",
    "enero",
];

// Shown when a record carries neither outlet nor provider name
pub const OUTLET_PLACEHOLDER: &str = "—";

// Ranked listing size
pub const TOP_N: usize = 50;

// Share-token key derivation. The passphrase ships with every client of the
// original dashboard; the token resists casual tampering, nothing more.
pub const SHARE_PASSPHRASE: &[u8] = b"pauta-pba-share-v1";
pub const SHARE_SALT: &[u8] = b"pautapba.deep-link";
pub const SHARE_PBKDF2_ITERATIONS: u32 = 100_000;

// Share URL query parameters
pub const SHARE_TOKEN_PARAM: &str = "s";
pub const SHARE_LEGACY_PARAM: &str = "medio";
