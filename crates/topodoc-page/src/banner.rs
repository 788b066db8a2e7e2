//! Section banner rendering.

use std::fmt::Write;

use topodoc_config::ColorScheme;

use crate::html::escape_html;
use crate::section::Section;

/// Background graphic behind sub-banner labels.
const SUBBANNER_BACKGROUND: &str = "../images/topo-subbanner-bg.png";

/// Render the banner for a section.
///
/// The root section gets a full-width banner with the scheme's logo. Every
/// other section, including unknown ones, gets a sub-banner showing its
/// display name over a background graphic.
#[must_use]
pub fn render_banner(section: &Section, scheme: &ColorScheme) -> String {
    let mut html = String::with_capacity(512);
    let _ = writeln!(
        html,
        "<table width=\"100%\" cellpadding=\"20\"><tr><td bgcolor=\"{}\">",
        scheme.banner_background
    );
    html.push_str("<center>\n");

    if section.is_root() {
        let _ = writeln!(
            html,
            "<img src=\"../images/{}\" align=\"middle\" width=\"497\" height=\"134\" \
             border=\"0\" alt=\"Topographica logo\">",
            escape_html(scheme.logo_file)
        );
    } else {
        let _ = writeln!(
            html,
            "<table border=\"0\" width=\"420\" height=\"113\" background=\"{SUBBANNER_BACKGROUND}\">\
             <tr><td><center>"
        );
        // Spacer nudges the label down into the graphic
        html.push_str("<font size=\"+11\"><i>&nbsp;</i></font>\n");
        let _ = writeln!(
            html,
            "<font size=\"+3\" face=\"serif\"><i>&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;{}</i></font></center>",
            escape_html(&section.display_name())
        );
        html.push_str("</td></tr></table>\n");
    }

    html.push_str("</center>\n");
    html.push_str("</td></tr></table>\n");
    html
}

#[cfg(test)]
mod tests {
    use topodoc_config::{MODERN, PARCHMENT};

    use super::*;

    #[test]
    fn test_root_banner_shows_logo() {
        let html = render_banner(&Section::new("Home"), &PARCHMENT);

        assert!(html.contains("<img src=\"../images/topo-banner7.png\""));
        assert!(html.contains("bgcolor=\"#f0e0c6\""));
        assert!(!html.contains(SUBBANNER_BACKGROUND));
    }

    #[test]
    fn test_root_banner_follows_scheme() {
        let html = render_banner(&Section::new("Home"), &MODERN);

        assert!(html.contains("topo-banner3.png"));
        assert!(html.contains("bgcolor=\"#eeffff\""));
    }

    #[test]
    fn test_sub_banner_shows_display_name() {
        let html = render_banner(&Section::new("Team_Members"), &PARCHMENT);

        assert!(html.contains("Team Members"));
        assert!(!html.contains("Team_Members"));
        assert!(html.contains(SUBBANNER_BACKGROUND));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_unknown_section_uses_sub_banner() {
        let html = render_banner(&Section::new("Screenshots"), &PARCHMENT);

        assert!(html.contains("&nbsp;Screenshots</i>"));
    }

    #[test]
    fn test_empty_section_renders_empty_label() {
        let html = render_banner(&Section::default(), &PARCHMENT);

        assert!(html.contains("&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;</i></font></center>"));
    }

    #[test]
    fn test_sub_banner_escapes_label() {
        let html = render_banner(&Section::new("R<&>D"), &PARCHMENT);

        assert!(html.contains("R&lt;&amp;&gt;D"));
    }
}
