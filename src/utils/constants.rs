/// Reference table column headers (taxonomic/ecological spreadsheet)
pub const REF_SCIENTIFIC_NAME: &str = "Nome científico";
pub const REF_COMMON_NAME: &str = "Nomes em Português";
pub const REF_ORDER: &str = "Nomes da Ordens";
pub const REF_FAMILY: &str = "Nome da Família";
pub const REF_HABITAT: &str = "Habitat (AVONET)";
pub const REF_TROPHIC_NICHE: &str = "Nicho trófico (AVONET)";
pub const REF_IUCN: &str = "IUCN 2021";
pub const REF_NATIONAL: &str = "MMA 2022";
pub const REF_STATE: &str = "Ameaçadas Bahia 2017";
pub const REF_NATIONAL_ENDEMIC: &str = "Endêmicas do Brasil (CBRO 2021)";
pub const REF_AF_ENDEMIC: &str = "Espécies Endêmicas da Mata Atlântica";
pub const REF_MIGRATORY: &str = "Migratórias Somenzari et al. 2017";

/// Observation log column headers (field sighting spreadsheet)
pub const OBS_SCIENTIFIC_NAME: &str = "Scientific Name";
pub const OBS_LOCATION: &str = "Location";
pub const OBS_LATITUDE: &str = "Latitude";
pub const OBS_LONGITUDE: &str = "Longitude";
pub const OBS_DATE: &str = "Date";
pub const OBS_LIST_ID: &str = "ListID";

/// Timestamp formats accepted for observation dates, tried in order
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Rendering of date ranges at the presentation boundary
pub const DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y";
pub const UNAVAILABLE_LABEL: &str = "unavailable";

/// Abundance tier boundaries (sighting counts within a view)
pub const RARE_MAX_SIGHTINGS: usize = 5;
pub const UNCOMMON_MAX_SIGHTINGS: usize = 20;

/// Map marker radius per distinct species at a site
pub const MARKER_RADIUS_SCALE: f64 = 0.5;

/// Ranking truncation for family and species charts
pub const RANKING_TOP_N: usize = 10;

/// Months in the dense seasonality series
pub const MONTHS_PER_YEAR: usize = 12;
