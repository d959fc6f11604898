//! Tile records and their fixed icon and color sets.

use crate::error::VoxError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Icon keys a tile may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    BrainCircuit,
    BarChart3,
    Image,
    Activity,
    Settings,
    Globe,
    ShieldCheck,
    Zap,
    Box,
    Terminal,
    Cpu,
    Database,
    Cloud,
    Lock,
    Wifi,
    Radio,
}

impl Icon {
    pub const ALL: [Icon; 16] = [
        Icon::BrainCircuit,
        Icon::BarChart3,
        Icon::Image,
        Icon::Activity,
        Icon::Settings,
        Icon::Globe,
        Icon::ShieldCheck,
        Icon::Zap,
        Icon::Box,
        Icon::Terminal,
        Icon::Cpu,
        Icon::Database,
        Icon::Cloud,
        Icon::Lock,
        Icon::Wifi,
        Icon::Radio,
    ];

    /// Storage key of the icon.
    pub fn key(self) -> &'static str {
        match self {
            Icon::BrainCircuit => "BrainCircuit",
            Icon::BarChart3 => "BarChart3",
            Icon::Image => "Image",
            Icon::Activity => "Activity",
            Icon::Settings => "Settings",
            Icon::Globe => "Globe",
            Icon::ShieldCheck => "ShieldCheck",
            Icon::Zap => "Zap",
            Icon::Box => "Box",
            Icon::Terminal => "Terminal",
            Icon::Cpu => "Cpu",
            Icon::Database => "Database",
            Icon::Cloud => "Cloud",
            Icon::Lock => "Lock",
            Icon::Wifi => "Wifi",
            Icon::Radio => "Radio",
        }
    }

    /// Glyph used when rendering the tile grid in a terminal.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::BrainCircuit => "🧠",
            Icon::BarChart3 => "📊",
            Icon::Image => "🖼",
            Icon::Activity => "📈",
            Icon::Settings => "⚙",
            Icon::Globe => "🌐",
            Icon::ShieldCheck => "🛡",
            Icon::Zap => "⚡",
            Icon::Box => "📦",
            Icon::Terminal => "⌨",
            Icon::Cpu => "🖥",
            Icon::Database => "🗄",
            Icon::Cloud => "☁",
            Icon::Lock => "🔒",
            Icon::Wifi => "📶",
            Icon::Radio => "📻",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Icon {
    type Err = VoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Icon::ALL
            .iter()
            .copied()
            .find(|icon| icon.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = Icon::ALL.iter().map(|i| i.key()).collect();
                VoxError::InvalidInput(format!(
                    "Unknown icon '{}'. Expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Accent colors a tile may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    Cyan,
    Purple,
    Pink,
    Emerald,
    Blue,
    Amber,
    Indigo,
    Slate,
}

impl AccentColor {
    pub const ALL: [AccentColor; 8] = [
        AccentColor::Cyan,
        AccentColor::Purple,
        AccentColor::Pink,
        AccentColor::Emerald,
        AccentColor::Blue,
        AccentColor::Amber,
        AccentColor::Indigo,
        AccentColor::Slate,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AccentColor::Cyan => "cyan",
            AccentColor::Purple => "purple",
            AccentColor::Pink => "pink",
            AccentColor::Emerald => "emerald",
            AccentColor::Blue => "blue",
            AccentColor::Amber => "amber",
            AccentColor::Indigo => "indigo",
            AccentColor::Slate => "slate",
        }
    }

    /// The 500-shade hex value of the color.
    pub fn hex(self) -> &'static str {
        match self {
            AccentColor::Cyan => "#06b6d4",
            AccentColor::Purple => "#a855f7",
            AccentColor::Pink => "#ec4899",
            AccentColor::Emerald => "#10b981",
            AccentColor::Blue => "#3b82f6",
            AccentColor::Amber => "#f59e0b",
            AccentColor::Indigo => "#6366f1",
            AccentColor::Slate => "#64748b",
        }
    }

    /// Apply the accent to terminal text.
    pub fn paint<D>(self, value: D) -> console::StyledObject<D> {
        let styled = console::style(value);
        match self {
            AccentColor::Cyan => styled.cyan(),
            AccentColor::Purple | AccentColor::Pink => styled.magenta(),
            AccentColor::Emerald => styled.green(),
            AccentColor::Blue | AccentColor::Indigo => styled.blue(),
            AccentColor::Amber => styled.yellow(),
            AccentColor::Slate => styled.dim(),
        }
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AccentColor {
    type Err = VoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccentColor::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = AccentColor::ALL.iter().map(|c| c.key()).collect();
                VoxError::InvalidInput(format!(
                    "Unknown color '{}'. Expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// A launcher entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: Icon,
    pub color: AccentColor,
    pub route: String,
}

/// User input for a new tile.
#[derive(Debug, Clone)]
pub struct TileDraft {
    pub title: String,
    pub description: String,
    pub icon: Icon,
    pub color: AccentColor,
}

impl TileDraft {
    /// A draft with the form's default icon and color.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            icon: Icon::BrainCircuit,
            color: AccentColor::Cyan,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_color(mut self, color: AccentColor) -> Self {
        self.color = color;
        self
    }
}

/// Lowercase the title and collapse whitespace runs into `-`.
pub fn slugify(title: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex"));
    re.replace_all(title.trim(), "-").to_lowercase()
}

fn tile(id: &str, title: &str, description: &str, icon: Icon, color: AccentColor) -> TileRecord {
    TileRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon,
        color,
        route: format!("/app/{}", id),
    }
}

/// Tiles shown when nothing usable is persisted.
pub fn default_tiles() -> Vec<TileRecord> {
    vec![
        tile("ai-core", "Nexus AI", "Advanced neural processing unit interface.", Icon::BrainCircuit, AccentColor::Cyan),
        tile("analytics", "Data Vis", "Real-time market analytics and projections.", Icon::BarChart3, AccentColor::Purple),
        tile("media", "Media Hub", "Holographic asset management system.", Icon::Image, AccentColor::Pink),
        tile("system", "Sys Status", "Network topology and server health.", Icon::Activity, AccentColor::Emerald),
        tile("security", "Guardian", "Firewall and intrusion detection.", Icon::ShieldCheck, AccentColor::Blue),
        tile("power", "Energy Grid", "Power distribution monitoring.", Icon::Zap, AccentColor::Amber),
        tile("network", "Global Net", "Satellite uplink controls.", Icon::Globe, AccentColor::Indigo),
        tile("settings", "Config", "User preferences and interface settings.", Icon::Settings, AccentColor::Slate),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Deep Space Comms"), "deep-space-comms");
        assert_eq!(slugify("  Two   Spaces\tTab "), "two-spaces-tab");
        assert_eq!(slugify("Solo"), "solo");
    }

    #[test]
    fn test_icon_parsing_is_strict() {
        assert_eq!("BarChart3".parse::<Icon>().unwrap(), Icon::BarChart3);
        assert_eq!("wifi".parse::<Icon>().unwrap(), Icon::Wifi);

        let err = "Rocket".parse::<Icon>().unwrap_err();
        assert!(matches!(err, VoxError::InvalidInput(_)));
        assert!(err.to_string().contains("BrainCircuit"));
    }

    #[test]
    fn test_color_parsing_is_strict() {
        assert_eq!("Emerald".parse::<AccentColor>().unwrap(), AccentColor::Emerald);
        assert!("teal".parse::<AccentColor>().is_err());
    }

    #[test]
    fn test_record_wire_format() {
        let record = default_tiles().remove(0);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], "ai-core");
        assert_eq!(json["icon"], "BrainCircuit");
        assert_eq!(json["color"], "cyan");
        assert_eq!(json["route"], "/app/ai-core");
    }

    #[test]
    fn test_unknown_persisted_icon_is_rejected() {
        let raw = r#"{"id":"x","title":"X","description":"d","icon":"Rocket","color":"cyan","route":"/app/x"}"#;
        assert!(serde_json::from_str::<TileRecord>(raw).is_err());
    }

    #[test]
    fn test_defaults() {
        let tiles = default_tiles();
        assert_eq!(tiles.len(), 8);
        assert!(tiles.iter().all(|t| t.route == format!("/app/{}", t.id)));
    }
}
