use serde::Serialize;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Returned for any name missing from the table (New York)
pub const DEFAULT_COORDINATES: Coordinates = Coordinates::new(40.7128, -74.0060);

/// Known cities keyed by their lowercase name
static CITY_COORDINATES: &[(&str, Coordinates)] = &[
    ("new york", Coordinates::new(40.7128, -74.0060)),
    ("nyc", Coordinates::new(40.7128, -74.0060)),
    ("london", Coordinates::new(51.5074, -0.1278)),
    ("paris", Coordinates::new(48.8566, 2.3522)),
    ("tokyo", Coordinates::new(35.6762, 139.6503)),
    ("los angeles", Coordinates::new(34.0522, -118.2437)),
    ("chicago", Coordinates::new(41.8781, -87.6298)),
    ("houston", Coordinates::new(29.7604, -95.3698)),
    ("phoenix", Coordinates::new(33.4484, -112.0740)),
    ("philadelphia", Coordinates::new(39.9526, -75.1652)),
    ("san antonio", Coordinates::new(29.4241, -98.4936)),
    ("san diego", Coordinates::new(32.7157, -117.1611)),
    ("dallas", Coordinates::new(32.7767, -96.7970)),
    ("san jose", Coordinates::new(37.3382, -121.8863)),
    ("austin", Coordinates::new(30.2672, -97.7431)),
    ("jacksonville", Coordinates::new(30.3322, -81.6557)),
    ("fort worth", Coordinates::new(32.7555, -97.3308)),
    ("columbus", Coordinates::new(39.9612, -82.9988)),
    ("charlotte", Coordinates::new(35.2271, -80.8431)),
    ("seattle", Coordinates::new(47.6062, -122.3321)),
    ("denver", Coordinates::new(39.7392, -104.9903)),
    ("washington", Coordinates::new(38.9072, -77.0369)),
    ("boston", Coordinates::new(42.3601, -71.0589)),
    ("el paso", Coordinates::new(31.7619, -106.4850)),
    ("nashville", Coordinates::new(36.1627, -86.7816)),
    ("detroit", Coordinates::new(42.3314, -83.0458)),
    ("oklahoma city", Coordinates::new(35.4676, -97.5164)),
    ("portland", Coordinates::new(45.5152, -122.6784)),
    ("las vegas", Coordinates::new(36.1699, -115.1398)),
    ("memphis", Coordinates::new(35.1495, -90.0490)),
    ("louisville", Coordinates::new(38.2527, -85.7585)),
    ("baltimore", Coordinates::new(39.2904, -76.6122)),
    ("milwaukee", Coordinates::new(43.0389, -87.9065)),
    ("albuquerque", Coordinates::new(35.0844, -106.6504)),
    ("tucson", Coordinates::new(32.2226, -110.9747)),
    ("fresno", Coordinates::new(36.7378, -119.7871)),
    ("sacramento", Coordinates::new(38.5816, -121.4944)),
    ("mesa", Coordinates::new(33.4152, -111.8315)),
    ("kansas city", Coordinates::new(39.0997, -94.5786)),
    ("atlanta", Coordinates::new(33.7490, -84.3880)),
    ("long beach", Coordinates::new(33.7701, -118.1937)),
    ("colorado springs", Coordinates::new(38.8339, -104.8214)),
    ("raleigh", Coordinates::new(35.7796, -78.6382)),
    ("miami", Coordinates::new(25.7617, -80.1918)),
    ("virginia beach", Coordinates::new(36.8529, -75.9780)),
    ("omaha", Coordinates::new(41.2565, -95.9345)),
    ("oakland", Coordinates::new(37.8044, -122.2712)),
    ("minneapolis", Coordinates::new(44.9778, -93.2650)),
    ("tulsa", Coordinates::new(36.1540, -95.9928)),
    ("cleveland", Coordinates::new(41.4993, -81.6944)),
    ("wichita", Coordinates::new(37.6872, -97.3301)),
    ("arlington", Coordinates::new(32.7357, -97.1081)),
];

/// Resolves a city name to coordinates.
///
/// Matching ignores case and surrounding whitespace but is otherwise exact.
/// Unknown names resolve to [`DEFAULT_COORDINATES`].
pub fn resolve(location: &str) -> Coordinates {
    let key = location.trim().to_lowercase();
    CITY_COORDINATES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, coordinates)| *coordinates)
        .unwrap_or(DEFAULT_COORDINATES)
}

/// Title-cases a location the way it is echoed back in reports ("new york" -> "New York")
pub fn display_name(location: &str) -> String {
    let mut output = String::with_capacity(location.len());
    let mut at_word_start = true;
    for ch in location.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                output.extend(ch.to_uppercase());
            } else {
                output.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            output.push(ch);
            at_word_start = true;
        }
    }
    output
}
