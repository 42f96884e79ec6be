//! Category icon descriptor codec
//!
//! A category stores its icon and color as one string, `"<IconName>_<RRGGBB>"`
//! (no `#`). Decoding splits on the first underscore. There is no escaping:
//! an icon name that itself contains `_` does not survive a round trip.

use std::fmt;
use std::str::FromStr;

/// Glyph rendered for unknown icon names
pub const FALLBACK_ICON: &str = "FaQuestionCircle";

/// Color used when an icon was never picked
pub const UNSET_COLOR: HexColor = HexColor([0xcc, 0xcc, 0xcc]);

pub const BLACK: HexColor = HexColor([0, 0, 0]);

/// Colors offered by the category editor
pub const PALETTE: [HexColor; 10] = [
    HexColor([0x00, 0x00, 0x00]), // black
    HexColor([0x55, 0x55, 0x55]), // dark gray
    HexColor([0x23, 0xc6, 0x86]), // green
    HexColor([0xf4, 0x43, 0x36]), // red
    HexColor([0xff, 0x98, 0x00]), // orange
    HexColor([0x21, 0x96, 0xf3]), // blue
    HexColor([0x9c, 0x27, 0xb0]), // purple
    HexColor([0x00, 0x96, 0x88]), // teal
    HexColor([0xe9, 0x1e, 0x63]), // pink
    HexColor([0x79, 0x55, 0x48]), // brown
];

/// Icon names the console knows how to draw
pub const CATALOGUE: &[&str] = &[
    "FaBook", "FaGraduationCap", "FaLaptopCode", "FaBriefcase", "FaChartLine",
    "FaMicroscope", "FaUsers", "FaMapMarkerAlt", "FaTools", "FaTree",
    "FaPaintBrush", "FaAppleAlt", "FaFootballBall", "FaLightbulb", "FaGlobe",
    "FaLanguage", "FaHeadphones", "FaCamera", "FaFilm", "FaClock",
    "FaShieldAlt", "FaHeart", "FaMoneyBillWave", "FaCode", "FaRocket",
    "FaNewspaper", "FaStar", "FaCloud", "FaEnvelope", "FaCogs",
    "FaComments", "FaUserGraduate", "FaChalkboardTeacher", "FaBicycle", "FaShoppingCart",
    "FaBuilding", "FaCalculator", "FaBug", "FaCalendarAlt", "FaBus",
    "FaCar", "FaFileAlt", "FaBriefcaseMedical", "FaQuestionCircle", "FaSearch",
    "FaUtensils", "FaCloudSun", "FaWifi", "FaPlug", "FaUser",
    "FaGlasses", "FaMusic", "FaMobileAlt", "FaVideo", "FaLock",
    "FaCarBattery", "FaSeedling", "FaPlane", "FaAnchor", "FaGift",
    "FaHotel", "FaFire", "FaGavel", "FaBookOpen", "FaHeadset",
    "FaUsersCog", "FaGlobeAmericas", "FaChartPie", "FaKeyboard", "FaUniversity",
    "FaPager", "FaReceipt", "FaWind", "FaCodeBranch", "FaFutbol",
    "FaHandshake", "FaShoppingBag", "FaSmile", "FaUserTie", "FaSuitcase",
    "FaLaptop", "FaGem", "FaDatabase", "FaBell", "FaBookReader",
    "FaChalkboard", "FaHandsHelping",
];

/// Catalogue entries whose name contains `query`, case-insensitively
pub fn search(query: &str) -> Vec<&'static str> {
    let query = query.to_lowercase();
    CATALOGUE
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().contains(&query))
        .collect()
}

/// RGB color, displayed as lower-case `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(pub [u8; 3]);

impl HexColor {
    /// Hex digits without the `#`
    pub fn digits(&self) -> String {
        let [r, g, b] = self.0;
        format!("{r:02x}{g:02x}{b:02x}")
    }

    pub fn in_palette(&self) -> bool {
        PALETTE.contains(self)
    }

    /// The color itself if the editor offers it, black otherwise
    pub fn palette_or_default(self) -> Self {
        if self.in_palette() { self } else { BLACK }
    }
}

impl FromStr for HexColor {
    type Err = String;

    /// Accepts `RGB` or `RRGGBB`, with or without a leading `#`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(format!("invalid color: {s}")),
        };
        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            *channel = expanded
                .get(i * 2..i * 2 + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| format!("invalid color: {s}"))?;
        }
        Ok(HexColor(rgb))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.digits())
    }
}

/// Decoded icon descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDescriptor {
    pub name: String,
    pub color: HexColor,
}

impl IconDescriptor {
    pub fn new(name: impl Into<String>, color: HexColor) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Descriptor stored when the user never picked an icon
    pub fn unset() -> Self {
        Self::new(FALLBACK_ICON, UNSET_COLOR)
    }

    /// `"<Name>_<rrggbb>"`
    pub fn encode(&self) -> String {
        format!("{}_{}", self.name, self.color.digits())
    }

    /// Split on the first underscore
    ///
    /// Empty input decodes to `None`. A missing or unparseable color falls
    /// back to black.
    pub fn decode(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let (name, color) = match raw.split_once('_') {
            Some((name, color)) => (name, color.parse().unwrap_or(BLACK)),
            None => (raw, BLACK),
        };
        Some(Self::new(name, color))
    }

    pub fn is_known(&self) -> bool {
        CATALOGUE.contains(&self.name.as_str())
    }

    /// Name to draw, substituting the fallback glyph for unknown icons
    pub fn glyph(&self) -> &str {
        if self.is_known() { &self.name } else { FALLBACK_ICON }
    }
}

impl fmt::Display for IconDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
