//! Palette database - parsing, storage, and file generation

use bevy::prelude::*;
use std::fs;
use std::path::Path;

/// Ordered list of glow colors
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct PaletteDatabase {
    pub colors: Vec<Color>,
}

impl Default for PaletteDatabase {
    fn default() -> Self {
        Self::default_palette()
    }
}

impl PaletteDatabase {
    /// Load palette from file, creating default file if it doesn't exist
    pub fn load_or_create(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!("Palette file not found, creating default: {}", path);
            let defaults = Self::default_palette();
            if let Err(e) = defaults.write_to_file(path) {
                warn!("Failed to write default palette file: {}", e);
            }
            return defaults;
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                warn!("Failed to load palette from {}: {}, using defaults", path, e);
                Self::default_palette()
            }
        }
    }

    /// Write palette to file
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let mut content = String::new();
        content.push_str("# Glowpong Glow Palette\n");
        content.push_str("# =====================\n");
        content.push_str("#\n");
        content.push_str("# Format:\n");
        content.push_str("#   color: <r> <g> <b>     One entry per line (0.0-1.0), cycled in order\n");
        content.push_str("#\n");
        content.push_str("# The first color is used at startup. Each paddle return or right-side\n");
        content.push_str("# bounce advances to the next color, wrapping at the end.\n");
        content.push_str("#\n");
        content.push_str("# Blank lines and # comments are ignored.\n");
        content.push('\n');

        for color in &self.colors {
            let srgba = color.to_srgba();
            content.push_str(&format!(
                "color: {:.3} {:.3} {:.3}\n",
                srgba.red, srgba.green, srgba.blue
            ));
        }

        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    /// Parse palette data from string
    pub fn parse(content: &str) -> Self {
        let mut colors = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rgb) = line.strip_prefix("color:") {
                match Self::parse_rgb(rgb) {
                    Some((r, g, b)) => colors.push(Color::srgb(r, g, b)),
                    None => warn!("Palette line {}: bad color '{}'", line_no + 1, rgb.trim()),
                }
            } else {
                warn!("Palette line {}: unrecognized '{}'", line_no + 1, line);
            }
        }

        if colors.is_empty() {
            warn!("No palette colors parsed, using defaults");
            return Self::default_palette();
        }

        info!("Loaded {} glow colors", colors.len());
        Self { colors }
    }

    /// Parse RGB values from "r g b" string
    fn parse_rgb(s: &str) -> Option<(f32, f32, f32)> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() >= 3
            && let (Ok(r), Ok(g), Ok(b)) = (
                parts[0].parse::<f32>(),
                parts[1].parse::<f32>(),
                parts[2].parse::<f32>(),
            )
        {
            return Some((r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)));
        }
        None
    }

    /// Get color by index
    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Get number of colors
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Default palette: white, red, yellow, magenta, green, cyan, blue
    pub fn default_palette() -> Self {
        Self {
            colors: vec![
                Color::srgb(1.0, 1.0, 1.0),
                Color::srgb(1.0, 0.0, 0.0),
                Color::srgb(1.0, 1.0, 0.0),
                Color::srgb(1.0, 0.0, 1.0),
                Color::srgb(0.0, 1.0, 0.0),
                Color::srgb(0.0, 1.0, 1.0),
                Color::srgb(0.0, 0.0, 1.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_order() {
        let db = PaletteDatabase::default();
        assert_eq!(db.len(), 7);
        assert_eq!(db.get(0), Some(Color::srgb(1.0, 1.0, 1.0)));
        assert_eq!(db.get(1), Some(Color::srgb(1.0, 0.0, 0.0)));
        assert_eq!(db.get(6), Some(Color::srgb(0.0, 0.0, 1.0)));
        assert_eq!(db.get(7), None);
    }

    #[test]
    fn test_parse_skips_comments_and_bad_lines() {
        let content = "# header\n\ncolor: 1 0 0\ncolor: nope\nshade: 1 1 1\ncolor: 0 0.5 1\n";
        let db = PaletteDatabase::parse(content);
        assert_eq!(db.colors, vec![Color::srgb(1.0, 0.0, 0.0), Color::srgb(0.0, 0.5, 1.0)]);
    }

    #[test]
    fn test_parse_clamps_components() {
        let db = PaletteDatabase::parse("color: 2.0 -1.0 0.5");
        assert_eq!(db.colors, vec![Color::srgb(1.0, 0.0, 0.5)]);
    }

    #[test]
    fn test_empty_file_falls_back_to_defaults() {
        let db = PaletteDatabase::parse("# nothing here\n");
        assert_eq!(db, PaletteDatabase::default_palette());
    }

    #[test]
    fn test_written_file_parses_back() {
        let dir = std::env::temp_dir().join(format!("glowpong_palette_{}", std::process::id()));
        let path = dir.join("glow_palette.txt");
        let path = path.to_string_lossy().to_string();

        let db = PaletteDatabase::default_palette();
        db.write_to_file(&path).unwrap();
        let loaded = PaletteDatabase::load_or_create(&path);
        assert_eq!(loaded, db);

        let _ = fs::remove_dir_all(dir);
    }
}
