use crate::model::World;

/// World attribute a [`HighlightPattern`] tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HighlightField {
    Starport,
    Size,
    Atmosphere,
    Hydrographics,
    Population,
    Government,
    Law,
    Tech,
    Importance,
    Bases,
    Allegiance,
    Remarks,
}

/// Selects worlds for the highlight overlay.
///
/// Numeric fields match when inside `[min, max]` (either bound optional).
/// Text fields match when any entry of `matches` is present.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightPattern {
    pub field: HighlightField,
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub matches: Vec<String>,
}

impl HighlightPattern {
    pub fn range(field: HighlightField, min: Option<i32>, max: Option<i32>) -> Self {
        Self { field, min, max, matches: Vec::new() }
    }

    pub fn one_of(field: HighlightField, matches: &[&str]) -> Self {
        Self {
            field,
            min: None,
            max: None,
            matches: matches.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    pub fn matches(&self, world: &World) -> bool {
        let digit = |i: usize| world.uwp.chars().nth(i).and_then(crate::model::ehex_value);
        let value = match self.field {
            HighlightField::Starport => return self.any_text(&world.starport().to_string()),
            HighlightField::Bases => {
                return self.matches.iter().any(|m| m.chars().all(|c| world.has_base(c)));
            }
            HighlightField::Allegiance => return self.any_text(&world.allegiance),
            HighlightField::Remarks => return self.matches.iter().any(|m| world.has_remark(m)),
            HighlightField::Size => digit(1),
            HighlightField::Atmosphere => digit(2),
            HighlightField::Hydrographics => digit(3),
            HighlightField::Population => digit(4),
            HighlightField::Government => digit(5),
            HighlightField::Law => digit(6),
            HighlightField::Tech => digit(8),
            HighlightField::Importance => Some(world.importance()),
        };
        let Some(v) = value else {
            return false;
        };
        self.min.is_none_or(|min| v >= min) && self.max.is_none_or(|max| v <= max)
    }

    fn any_text(&self, value: &str) -> bool {
        self.matches.iter().any(|m| m == value)
    }
}
