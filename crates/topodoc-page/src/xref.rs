//! Cross-references into the Reference Manual.
//!
//! The link helpers produce inline anchors for a class, a function or a whole
//! module. Fragments call them with inline directives such as
//! `<?php classref('topo.base.cf','CFProjection')?>`, which
//! [`expand_references`] replaces with the helper output.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::PageWarning;
use crate::html::escape_html;

/// Location of the generated Reference Manual relative to a section page.
const REFERENCE_MANUAL: &str = "../Reference_Manual";

/// `<?php name(args) ?>` with an optional trailing `;`.
static DIRECTIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\?php\s+([A-Za-z_]\w*)\s*\(([^()]*)\)\s*;?\s*\?>").unwrap()
});

fn link(href: &str, text: &str) -> String {
    format!(
        "<a target=\"_top\" href=\"{}\">{}</a>",
        escape_html(href),
        escape_html(text)
    )
}

/// Link to a class page: `<module>.<class>-class.html`.
#[must_use]
pub fn class_ref(module: &str, class: &str) -> String {
    link(
        &format!("{REFERENCE_MANUAL}/{module}.{class}-class.html"),
        class,
    )
}

/// Link to a function anchor on its module page: `<module>-module.html#<function>`.
#[must_use]
pub fn fn_ref(module: &str, function: &str) -> String {
    link(
        &format!("{REFERENCE_MANUAL}/{module}-module.html#{function}"),
        function,
    )
}

/// Link to a module page: `<module>-module.html`.
#[must_use]
pub fn module_ref(module: &str) -> String {
    link(&format!("{REFERENCE_MANUAL}/{module}-module.html"), module)
}

/// Fragment text with reference directives replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    /// Expanded markup.
    pub text: String,
    /// Directives that were left in place.
    pub warnings: Vec<PageWarning>,
}

/// Split a directive argument list into its quoted string literals.
///
/// Returns `None` if any argument is not a single- or double-quoted string.
fn parse_args(raw: &str) -> Option<Vec<&str>> {
    if raw.trim().is_empty() {
        return Some(Vec::new());
    }
    raw.split(',')
        .map(|arg| {
            let arg = arg.trim();
            arg.strip_prefix('\'')
                .and_then(|a| a.strip_suffix('\''))
                .or_else(|| arg.strip_prefix('"').and_then(|a| a.strip_suffix('"')))
        })
        .collect()
}

/// Evaluate one directive, or `None` if it is not a known helper call.
fn evaluate(name: &str, args: &[&str]) -> Option<String> {
    match (name, args) {
        ("classref", [module, class]) => Some(class_ref(module, class)),
        ("fnref", [module, function]) => Some(fn_ref(module, function)),
        ("moduleref", [module]) => Some(module_ref(module)),
        _ => None,
    }
}

/// Replace inline reference directives with Reference Manual links.
///
/// Recognised calls are `classref(module, class)`, `fnref(module, function)`
/// and `moduleref(module)` with quoted arguments. Any other directive is kept
/// verbatim and reported in [`Expansion::warnings`]. Text outside directives is
/// passed through untouched.
#[must_use]
pub fn expand_references(fragment: &str) -> Expansion {
    let mut warnings = Vec::new();
    let text = DIRECTIVE_PATTERN.replace_all(fragment, |caps: &Captures<'_>| {
        let name = &caps[1];
        let expanded = parse_args(&caps[2]).and_then(|args| evaluate(name, &args));
        expanded.unwrap_or_else(|| {
            let directive = caps[0].to_owned();
            tracing::warn!(directive = %directive, "Unsupported directive left as-is");
            warnings.push(PageWarning::UnsupportedDirective(directive.clone()));
            directive
        })
    });

    Expansion {
        text: text.into_owned(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_class_ref() {
        assert_eq!(
            class_ref("topo.base.cf", "CFProjection"),
            "<a target=\"_top\" href=\"../Reference_Manual/topo.base.cf.CFProjection-class.html\">CFProjection</a>"
        );
    }

    #[test]
    fn test_fn_ref() {
        assert_eq!(
            fn_ref("topo.command", "n_conns"),
            "<a target=\"_top\" href=\"../Reference_Manual/topo.command-module.html#n_conns\">n_conns</a>"
        );
    }

    #[test]
    fn test_module_ref() {
        assert_eq!(
            module_ref("topo.misc.memuse"),
            "<a target=\"_top\" href=\"../Reference_Manual/topo.misc.memuse-module.html\">topo.misc.memuse</a>"
        );
    }

    #[test]
    fn test_expand_class_directive() {
        let expansion =
            expand_references("See <?php classref('topo.base.cf','CFProjection')?> for details.");

        assert_eq!(
            expansion.text,
            format!("See {} for details.", class_ref("topo.base.cf", "CFProjection"))
        );
        assert!(expansion.warnings.is_empty());
    }

    #[test]
    fn test_expand_tolerates_spacing_quotes_and_semicolon() {
        let expansion = expand_references(
            "<?php fnref('topo.command','n_bytes') ?> and <?php moduleref( \"param\" ); ?>",
        );

        assert_eq!(
            expansion.text,
            format!("{} and {}", fn_ref("topo.command", "n_bytes"), module_ref("param"))
        );
    }

    #[test]
    fn test_expand_multiple_directives_in_order() {
        let expansion = expand_references(
            "<?php classref('param','Number')?>, <?php classref('param','Integer')?>",
        );

        assert_eq!(
            expansion.text,
            format!(
                "{}, {}",
                class_ref("param", "Number"),
                class_ref("param", "Integer")
            )
        );
    }

    #[test]
    fn test_unknown_directive_left_verbatim() {
        let source = "<?php include('../shared/trailer.php'); ?>";
        let expansion = expand_references(source);

        assert_eq!(expansion.text, source);
        assert_eq!(
            expansion.warnings,
            vec![PageWarning::UnsupportedDirective(source.to_owned())]
        );
    }

    #[test]
    fn test_wrong_arity_left_verbatim() {
        let source = "<?php classref('topo.base.cf')?>";
        let expansion = expand_references(source);

        assert_eq!(expansion.text, source);
        assert_eq!(expansion.warnings.len(), 1);
    }

    #[test]
    fn test_unquoted_argument_left_verbatim() {
        let source = "<?php moduleref($name)?>";
        let expansion = expand_references(source);

        assert_eq!(expansion.text, source);
        assert_eq!(expansion.warnings.len(), 1);
    }

    #[test]
    fn test_plain_markup_untouched() {
        let source = "<P>No directives <b>here</b>.</P>";
        let expansion = expand_references(source);

        assert_eq!(expansion.text, source);
        assert!(expansion.warnings.is_empty());
    }
}
