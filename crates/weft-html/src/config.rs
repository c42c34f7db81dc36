//! Parser configuration.

/// Settings for one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// [§ 13.2.6 The scripting flag](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for the
    /// Document with which the parser is associated when the parser was
    /// created, and "disabled" otherwise."
    ///
    /// With scripting on, `<noscript>` content is raw text; with it off,
    /// `<noscript>` in the head is parsed with the in-head-noscript rules.
    pub scripting: bool,
    /// Log every tree-construction parse error as it happens, in addition to
    /// recording it.
    pub strict: bool,
    /// Keep parse issues for the caller. When off, issues are only logged.
    pub collect_issues: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            scripting: false,
            strict: false,
            collect_issues: true,
        }
    }
}
