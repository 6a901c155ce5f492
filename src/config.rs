use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

pub const ISIGMET_API_URL: &str = "https://www.aviationweather.gov/cgi-bin/json/IsigmetJSON.php";
pub const DEFAULT_FIR_ID: &str = "KZAK";
pub const DEFAULT_FILENAME: &str = "SIGMET.XML";

/// Location of the ATOP Oakland maps below the user's documents folder.
pub const VATSYS_MAPS_PATH_RELATIVE: [&str; 4] =
    ["vatSys Files", "Profiles", "ATOP Oakland", "Maps"];
pub const VATSYS_EXEC_PATH_RELATIVE: [&str; 3] = ["vatSys", "bin", "vatSys.exe"];

static FIR_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9]{4}$").unwrap());
static COLOUR_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());

/// Attributes of the single `<Map>` element holding the SIGMET infills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapAttributes {
    pub map_type: String,
    pub name: String,
    pub priority: u32,
    pub custom_colour_name: String,
}

impl MapAttributes {
    const DEFAULT_TYPE: &'static str = "Filled";
    const DEFAULT_NAME: &'static str = "SIGMETS";
    const DEFAULT_PRIORITY: u32 = 1;
    const DEFAULT_COLOUR_NAME: &'static str = "Indigo";

    #[must_use]
    pub fn with_colour(mut self, custom_colour_name: impl Into<String>) -> Self {
        self.custom_colour_name = custom_colour_name.into();
        self
    }
}

impl Default for MapAttributes {
    fn default() -> Self {
        Self {
            map_type: Self::DEFAULT_TYPE.to_string(),
            name: Self::DEFAULT_NAME.to_string(),
            priority: Self::DEFAULT_PRIORITY,
            custom_colour_name: Self::DEFAULT_COLOUR_NAME.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigmetConfig {
    pub api_url: String,
    pub fir_id: String,
    pub filename: String,
    pub map: MapAttributes,
}

impl Default for SigmetConfig {
    fn default() -> Self {
        Self {
            api_url: ISIGMET_API_URL.to_string(),
            fir_id: DEFAULT_FIR_ID.to_string(),
            filename: DEFAULT_FILENAME.to_string(),
            map: MapAttributes::default(),
        }
    }
}

pub fn vatsys_maps_relative() -> PathBuf {
    VATSYS_MAPS_PATH_RELATIVE.iter().collect()
}

pub fn vatsys_exec_relative() -> PathBuf {
    VATSYS_EXEC_PATH_RELATIVE.iter().collect()
}

pub fn parse_fir_id(fir_id: &str) -> Result<String, String> {
    if FIR_ID_RE.is_match(fir_id) {
        Ok(fir_id.to_string())
    } else {
        Err(format!("{fir_id} is not a four letter ICAO FIR designator"))
    }
}

/// vatSys colour names are the identifiers from the profile's Colours.xml.
pub fn parse_colour_name(colour: &str) -> Result<String, String> {
    if COLOUR_NAME_RE.is_match(colour) {
        Ok(colour.to_string())
    } else {
        Err(format!("{colour} is not a valid vatSys colour name"))
    }
}
