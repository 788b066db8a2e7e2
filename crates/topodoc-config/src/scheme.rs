//! Color and branding schemes.
//!
//! A scheme is picked once per render and handed explicitly to the banner and
//! menu renderers. The set of schemes is closed.

use crate::ConfigError;

/// Named set of display attributes applied uniformly across a rendered page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScheme {
    /// Scheme name (e.g., "parchment").
    pub name: &'static str,
    /// Page body background.
    pub main_background: &'static str,
    /// Menu button background.
    pub button_color: &'static str,
    /// Banner and main content cell background.
    pub banner_background: &'static str,
    /// Menu column background.
    pub menu_background: &'static str,
    /// Border color around the menu.
    pub frame_color: &'static str,
    /// Logo image filename under `../images/`.
    pub logo_file: &'static str,
}

/// Warm beige scheme, the site default.
pub const PARCHMENT: ColorScheme = ColorScheme {
    name: "parchment",
    main_background: "#ffffff",
    button_color: "#e9d3a2",
    banner_background: "#f0e0c6",
    menu_background: "#f0e0c4",
    frame_color: "#f0e0c4",
    logo_file: "topo-banner7.png",
};

/// Pale green and cyan scheme.
pub const MODERN: ColorScheme = ColorScheme {
    name: "modern",
    main_background: "#ffffcc",
    button_color: "#cceecc",
    banner_background: "#eeffff",
    menu_background: "#eeffee",
    frame_color: "#eeffee",
    logo_file: "topo-banner3.png",
};

/// Name of the scheme used when none is configured.
pub const DEFAULT_SCHEME: &str = PARCHMENT.name;

/// All known scheme names.
pub const SCHEME_NAMES: [&str; 2] = [PARCHMENT.name, MODERN.name];

/// Look up a color scheme by name.
///
/// Names are matched exactly.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownScheme`] if `name` is not a known scheme.
pub fn get_color_scheme(name: &str) -> Result<ColorScheme, ConfigError> {
    match name {
        "parchment" => Ok(PARCHMENT),
        "modern" => Ok(MODERN),
        other => Err(ConfigError::UnknownScheme(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_known_schemes_are_fully_populated() {
        for name in SCHEME_NAMES {
            let scheme = get_color_scheme(name).unwrap();

            assert_eq!(scheme.name, name);
            for field in [
                scheme.main_background,
                scheme.button_color,
                scheme.banner_background,
                scheme.menu_background,
                scheme.frame_color,
                scheme.logo_file,
            ] {
                assert!(!field.is_empty(), "{name} has an empty field");
            }
        }
    }

    #[test]
    fn test_parchment_values() {
        let scheme = get_color_scheme("parchment").unwrap();

        assert_eq!(scheme.button_color, "#e9d3a2");
        assert_eq!(scheme.banner_background, "#f0e0c6");
        assert_eq!(scheme.logo_file, "topo-banner7.png");
    }

    #[test]
    fn test_frame_matches_menu_background() {
        for scheme in [PARCHMENT, MODERN] {
            assert_eq!(scheme.frame_color, scheme.menu_background);
        }
    }

    #[test]
    fn test_unknown_scheme() {
        let err = get_color_scheme("neon").unwrap_err();

        assert!(matches!(err, ConfigError::UnknownScheme(ref name) if name == "neon"));
        assert!(err.to_string().contains("neon"));
    }

    #[test]
    fn test_scheme_names_are_case_sensitive() {
        assert!(get_color_scheme("Parchment").is_err());
    }

    #[test]
    fn test_default_scheme_is_known() {
        assert!(get_color_scheme(DEFAULT_SCHEME).is_ok());
    }
}
