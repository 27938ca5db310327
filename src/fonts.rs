//! Font management for Inkpad
//!
//! The font picker offers a fixed catalogue of families. Each entry is
//! registered with egui as a named family (plus a bold variant) so that text
//! runs can be drawn in the family they were formatted with. Matching font
//! files are picked up from the user and system font directories when they
//! are installed; otherwise the family falls back to egui's built-in
//! proportional or monospace fonts.

use egui::{FontData, FontDefinitions, FontFamily, FontId, TextStyle};
use log::{debug, info};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// ─────────────────────────────────────────────────────────────────────────────
// Font Catalogue
// ─────────────────────────────────────────────────────────────────────────────

/// Generic fallback class of a font choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generic {
    SansSerif,
    Serif,
    Monospace,
}

/// An entry of the font picker.
#[derive(Debug, PartialEq, Eq)]
pub struct FontChoice {
    /// Label shown in the picker
    pub name: &'static str,
    /// CSS font-family value written into the document
    pub value: &'static str,
    pub generic: Generic,
    /// File stems (without extension) of the regular and bold faces
    regular_file: &'static str,
    bold_file: &'static str,
}

pub const FONT_CHOICES: &[FontChoice] = &[
    FontChoice {
        name: "Default",
        value: "system-ui",
        generic: Generic::SansSerif,
        regular_file: "",
        bold_file: "",
    },
    FontChoice {
        name: "Roboto",
        value: "'Roboto', sans-serif",
        generic: Generic::SansSerif,
        regular_file: "Roboto-Regular",
        bold_file: "Roboto-Bold",
    },
    FontChoice {
        name: "Open Sans",
        value: "'Open Sans', sans-serif",
        generic: Generic::SansSerif,
        regular_file: "OpenSans-Regular",
        bold_file: "OpenSans-Bold",
    },
    FontChoice {
        name: "Lato",
        value: "'Lato', sans-serif",
        generic: Generic::SansSerif,
        regular_file: "Lato-Regular",
        bold_file: "Lato-Bold",
    },
    FontChoice {
        name: "Poppins",
        value: "'Poppins', sans-serif",
        generic: Generic::SansSerif,
        regular_file: "Poppins-Regular",
        bold_file: "Poppins-Bold",
    },
    FontChoice {
        name: "Montserrat",
        value: "'Montserrat', sans-serif",
        generic: Generic::SansSerif,
        regular_file: "Montserrat-Regular",
        bold_file: "Montserrat-Bold",
    },
    FontChoice {
        name: "Source Code Pro",
        value: "'Source Code Pro', monospace",
        generic: Generic::Monospace,
        regular_file: "SourceCodePro-Regular",
        bold_file: "SourceCodePro-Bold",
    },
    FontChoice {
        name: "Playfair Display",
        value: "'Playfair Display', serif",
        generic: Generic::Serif,
        regular_file: "PlayfairDisplay-Regular",
        bold_file: "PlayfairDisplay-Bold",
    },
];

/// The "Default" entry.
pub fn default_font() -> &'static FontChoice {
    &FONT_CHOICES[0]
}

pub fn font_by_name(name: &str) -> Option<&'static FontChoice> {
    FONT_CHOICES.iter().find(|font| font.name == name)
}

/// Look up the entry whose CSS value is `value`.
pub fn font_by_value(value: &str) -> Option<&'static FontChoice> {
    FONT_CHOICES.iter().find(|font| font.value == value)
}

// ─────────────────────────────────────────────────────────────────────────────
// Family Resolution
// ─────────────────────────────────────────────────────────────────────────────

fn bold_family_name(choice: &FontChoice) -> String {
    format!("{} Bold", choice.name)
}

/// egui family for a CSS font-family value.
///
/// Unknown values and the default entry use egui's proportional family for
/// regular text.
pub fn family_for(value: Option<&str>, bold: bool) -> FontFamily {
    let choice = value.and_then(font_by_value).unwrap_or_else(default_font);
    if bold {
        FontFamily::Name(bold_family_name(choice).into())
    } else if std::ptr::eq(choice, default_font()) {
        FontFamily::Proportional
    } else {
        FontFamily::Name(choice.name.into())
    }
}

pub fn font_id_for(size: f32, value: Option<&str>, bold: bool) -> FontId {
    FontId::new(size, family_for(value, bold))
}

// ─────────────────────────────────────────────────────────────────────────────
// Font Discovery
// ─────────────────────────────────────────────────────────────────────────────

/// Installed font files keyed by lowercase file stem.
pub type FontFiles = HashMap<String, PathBuf>;

/// Directories searched for installed fonts, user directory first.
pub fn font_search_dirs() -> Vec<PathBuf> {
    let mut search = Vec::new();
    if let Some(dir) = dirs::font_dir() {
        search.push(dir);
    }
    if let Some(dir) = dirs::data_local_dir() {
        search.push(dir.join("fonts"));
    }
    for dir in [
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/Library/Fonts",
        "/System/Library/Fonts",
        "C:\\Windows\\Fonts",
    ] {
        search.push(PathBuf::from(dir));
    }
    search
}

/// Find the catalogue's font files below `search_dirs`.
///
/// The first match for a stem wins, so earlier directories take priority.
pub fn find_font_files(search_dirs: &[PathBuf]) -> FontFiles {
    let wanted: Vec<String> = FONT_CHOICES
        .iter()
        .flat_map(|font| [font.regular_file, font.bold_file])
        .filter(|stem| !stem.is_empty())
        .map(str::to_lowercase)
        .collect();

    let mut found = FontFiles::new();
    for dir in search_dirs.iter().filter(|dir| dir.is_dir()) {
        for entry in WalkDir::new(dir)
            .max_depth(5)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if !is_font_file(path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let stem = stem.to_lowercase();
            if wanted.contains(&stem) && !found.contains_key(&stem) {
                debug!("Found font file: {}", path.display());
                found.insert(stem, path.to_path_buf());
            }
        }
    }
    found
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "ttf" | "otf"))
        .unwrap_or(false)
}

// ─────────────────────────────────────────────────────────────────────────────
// Font Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Create font definitions with a named family for every catalogue entry.
///
/// Each family starts with the installed face (when present in `files`)
/// followed by egui's default chain for the entry's generic class, so every
/// family always resolves to some glyphs.
pub fn create_font_definitions(files: &FontFiles) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    let proportional = fonts
        .families
        .get(&FontFamily::Proportional)
        .cloned()
        .unwrap_or_default();
    let monospace = fonts
        .families
        .get(&FontFamily::Monospace)
        .cloned()
        .unwrap_or_default();

    let mut loaded = Vec::new();
    for choice in FONT_CHOICES {
        let fallback = match choice.generic {
            Generic::Monospace => &monospace,
            Generic::SansSerif | Generic::Serif => &proportional,
        };

        let regular = load_face(&mut fonts, files, choice.regular_file);
        let bold = load_face(&mut fonts, files, choice.bold_file);
        if regular.is_some() {
            loaded.push(choice.name);
        }

        let mut regular_chain: Vec<String> = regular.iter().cloned().collect();
        regular_chain.extend(fallback.iter().cloned());

        // Bold falls back to the regular face before the generic chain
        let mut bold_chain: Vec<String> = bold.into_iter().collect();
        bold_chain.extend(regular_chain.iter().cloned());

        fonts
            .families
            .insert(FontFamily::Name(choice.name.into()), regular_chain);
        fonts
            .families
            .insert(FontFamily::Name(bold_family_name(choice).into()), bold_chain);
    }

    if loaded.is_empty() {
        info!("No catalogue fonts installed, using built-in fallbacks");
    } else {
        info!("Loaded installed fonts: {}", loaded.join(", "));
    }

    fonts
}

/// Read the face with `stem` into `fonts`, returning its font-data key.
fn load_face(fonts: &mut FontDefinitions, files: &FontFiles, stem: &str) -> Option<String> {
    if stem.is_empty() {
        return None;
    }
    let path = files.get(&stem.to_lowercase())?;
    match fs::read(path) {
        Ok(bytes) => {
            fonts
                .font_data
                .insert(stem.to_owned(), FontData::from_owned(bytes));
            Some(stem.to_owned())
        }
        Err(e) => {
            log::warn!("Failed to read font {}: {}", path.display(), e);
            None
        }
    }
}

/// Apply fonts to an egui context.
///
/// This should be called once during application initialization.
pub fn setup_fonts(ctx: &egui::Context) {
    let files = find_font_files(&font_search_dirs());
    ctx.set_fonts(create_font_definitions(&files));

    let text_styles: BTreeMap<TextStyle, FontId> = [
        (
            TextStyle::Heading,
            FontId::new(22.0, FontFamily::Proportional),
        ),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (
            TextStyle::Monospace,
            FontId::new(13.0, FontFamily::Monospace),
        ),
        (
            TextStyle::Button,
            FontId::new(14.0, FontFamily::Proportional),
        ),
        (
            TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        ),
    ]
    .into();

    ctx.style_mut(|style| {
        style.text_styles = text_styles.clone();
    });

    info!("Configured egui text styles");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_catalogue_matches_picker_values() {
        let names: Vec<_> = FONT_CHOICES.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "Default",
                "Roboto",
                "Open Sans",
                "Lato",
                "Poppins",
                "Montserrat",
                "Source Code Pro",
                "Playfair Display"
            ]
        );
        assert_eq!(default_font().value, "system-ui");
        assert_eq!(
            font_by_name("Source Code Pro").map(|f| f.value),
            Some("'Source Code Pro', monospace")
        );
        assert!(font_by_name("Comic Sans").is_none());
    }

    #[test]
    fn test_family_for_values() {
        assert_eq!(family_for(None, false), FontFamily::Proportional);
        assert_eq!(family_for(Some("system-ui"), false), FontFamily::Proportional);
        assert_eq!(family_for(Some("unknown"), false), FontFamily::Proportional);
        assert_eq!(
            family_for(Some("'Lato', sans-serif"), false),
            FontFamily::Name("Lato".into())
        );
        assert_eq!(
            family_for(Some("'Lato', sans-serif"), true),
            FontFamily::Name("Lato Bold".into())
        );
        assert_eq!(family_for(None, true), FontFamily::Name("Default Bold".into()));
    }

    #[test]
    fn test_every_family_is_registered_without_files() {
        let fonts = create_font_definitions(&FontFiles::new());
        for choice in FONT_CHOICES {
            for bold in [false, true] {
                let family = family_for(Some(choice.value), bold);
                let chain = fonts
                    .families
                    .get(&family)
                    .unwrap_or_else(|| panic!("missing family {:?}", family));
                assert!(!chain.is_empty());
            }
        }
    }

    #[test]
    fn test_monospace_choice_falls_back_to_monospace_chain() {
        let fonts = create_font_definitions(&FontFiles::new());
        let mono = fonts.families.get(&FontFamily::Monospace).cloned();
        assert_eq!(
            fonts
                .families
                .get(&FontFamily::Name("Source Code Pro".into()))
                .cloned(),
            mono
        );
    }

    #[test]
    fn test_find_font_files_matches_stems_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("truetype").join("lato");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("Lato-Regular.TTF"), b"not really a font").unwrap();
        fs::write(nested.join("Lato-Light.ttf"), b"unused").unwrap();
        fs::write(nested.join("Roboto-Regular.txt"), b"wrong extension").unwrap();

        let found = find_font_files(&[dir.path().to_path_buf()]);
        assert_eq!(found.len(), 1);
        assert!(found.contains_key("lato-regular"));
    }

    #[test]
    fn test_find_font_files_ignores_missing_dirs() {
        let found = find_font_files(&[PathBuf::from("/definitely/not/here")]);
        assert!(found.is_empty());
    }
}
