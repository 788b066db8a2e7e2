//! Side menu rendering.

use std::fmt::Write;

use topodoc_config::ColorScheme;

use crate::html::escape_html;
use crate::section::{ROOT_SECTION, Section};

/// Link target for the site root.
pub const SITE_ROOT_HREF: &str = "../index.html";

/// One navigation link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    /// Link text.
    pub label: &'static str,
    /// Section-relative link target.
    pub href: &'static str,
}

impl MenuEntry {
    const fn new(label: &'static str, href: &'static str) -> Self {
        Self { label, href }
    }

    /// Where the rendered link points.
    ///
    /// The Home entry goes to the site root instead of its section page.
    #[must_use]
    pub fn target(&self) -> &'static str {
        if self.label == ROOT_SECTION {
            SITE_ROOT_HREF
        } else {
            self.href
        }
    }
}

/// Navigation entries in rendering order.
pub const MENU_ENTRIES: [MenuEntry; 13] = [
    MenuEntry::new("Home", "../Home/index.html"),
    MenuEntry::new("News", "../News/index.html"),
    MenuEntry::new("Downloads", "../Downloads/index.html"),
    MenuEntry::new("Tutorials", "../Tutorials/index.html"),
    MenuEntry::new("User Manual", "../User_Manual/index.html"),
    MenuEntry::new("Reference Manual", "../Reference_Manual/index.html"),
    MenuEntry::new("Developer Manual", "../Developer_Manual/index.html"),
    MenuEntry::new("Forums", "../Forums/index.html"),
    MenuEntry::new("Team Members", "../Team_Members/index.html"),
    MenuEntry::new("Future Work", "../Future_Work/index.html"),
    MenuEntry::new("FAQ", "../FAQ/index.html"),
    MenuEntry::new("Links", "../Links/index.html"),
    MenuEntry::new("Publications", "../Home/pubs.html"),
];

/// Render the navigation menu.
///
/// Output is the same for every section: the current section is not
/// highlighted.
#[must_use]
pub fn render_menu(current_section: &Section, scheme: &ColorScheme) -> String {
    tracing::trace!(section = %current_section, "Rendering menu");

    let mut html = String::with_capacity(2048);
    let _ = write!(
        html,
        "<table border=\"0\" width=\"140\"><tr><td bgcolor=\"{}\" valign=\"top\">",
        scheme.frame_color
    );
    html.push_str(
        "\n  <table border=\"0\" width=\"100%\" valign=\"top\" cellspacing=\"3\" cellpadding=\"8\">\n",
    );

    for entry in &MENU_ENTRIES {
        let _ = writeln!(
            html,
            "    <tr><td bgcolor=\"{}\"><a target=\"_top\" href=\"{}\" class=\"button\">\
             <font face=\"sans-serif\"><b>{}</b></font></a></td></tr>",
            scheme.button_color,
            escape_html(entry.target()),
            escape_html(entry.label),
        );
    }

    html.push_str("  </table>\n</td></tr></table>\n");
    html
}
