use std::collections::HashMap;

use starmap_engine::paint::Color;

use super::LineStyle;

/// Style override for one element class, optionally narrowed to one allegiance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRule {
    pub color: Option<Color>,
    pub style: Option<LineStyle>,
    pub width: Option<f32>,
}

/// Per-sector styling supplied with the sector data.
///
/// Rules are keyed by element class (`"border"`, `"route"`) and code. A rule
/// without a code applies to every code of its class that has no rule of its own.
#[derive(Debug, Clone, Default)]
pub struct SectorStylesheet {
    rules: HashMap<(String, Option<String>), StyleRule>,
}

impl SectorStylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, element: &str, code: Option<&str>, rule: StyleRule) -> Self {
        self.set_rule(element, code, rule);
        self
    }

    pub fn set_rule(&mut self, element: &str, code: Option<&str>, rule: StyleRule) {
        self.rules
            .insert((element.to_owned(), code.map(str::to_owned)), rule);
    }

    /// Most specific rule for `element` and `code`.
    pub fn resolve(&self, element: &str, code: &str) -> Option<&StyleRule> {
        self.rules
            .get(&(element.to_owned(), Some(code.to_owned())))
            .or_else(|| self.rules.get(&(element.to_owned(), None)))
    }
}
