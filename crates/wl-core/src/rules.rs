//! Ordered title-matching rules and their interpreter.
//!
//! A rule table is built once from a static list of [`RuleSpec`]s and never
//! mutated afterwards. Evaluation always runs every exclusion rule before any
//! inclusion rule; within each phase the declared order decides, and the
//! first match wins.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::event_type::{SequenceMarker, ServiceType};

/// What a matching rule decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEffect {
    /// Forces the entry to be personal.
    Exclude,
    /// Marks the entry as work with the given service.
    Include(ServiceKind),
}

/// How an inclusion rule picks the service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Fixed(ServiceType),
    /// Timed visit: a walk if the title mentions one, otherwise a drop-in.
    TimedVisit,
}

/// Declarative rule definition.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub name: &'static str,
    pub effect: RuleEffect,
    /// Regex source. May define `minutes` and `marker` capture groups.
    pub pattern: &'static str,
}

/// Whether an entry is a billable appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
}

/// Result of running a title through the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// The deciding rule; `None` when nothing matched.
    pub rule: Option<&'static str>,
    pub service_type: ServiceType,
    pub duration: Option<u32>,
    pub marker: Option<SequenceMarker>,
}

impl Classification {
    /// No rule matched, or there was nothing to match.
    pub const UNMATCHED: Self = Self {
        category: Category::Personal,
        rule: None,
        service_type: ServiceType::Other,
        duration: None,
        marker: None,
    };

    pub const fn is_work(&self) -> bool {
        matches!(self.category, Category::Work)
    }
}

/// Minutes suffix: `Fluffy - 30`, `Max - 45 - Last`.
pub(crate) const MINUTES_PATTERN: &str = r"(?i)(?:^|\s)-\s*(?P<minutes>15|20|30|45|60)\b(?:\s*-\s*(?P<marker>start|1st|2nd|3rd|last)\b)?\s*$";

/// House-sit wording: `HS`, `house sit`, `House-sitting`, `overnight`.
/// Shared by the inclusion rule and overnight detection.
macro_rules! housesit_term {
    () => {
        r"(?:\bhs\b|house[\s\-]?sit(?:ting)?|overnight)"
    };
}

macro_rules! sequence_marker {
    () => {
        r"\s*-\s*(?P<marker>start|1st|2nd|3rd|last)\b"
    };
}

/// Any house-sit or overnight wording in a title.
pub(crate) const OVERNIGHT_PATTERN: &str = concat!("(?i)", housesit_term!());

/// House-sit wording with an optional sequence marker: `Bella HS - Last`.
pub(crate) const HOUSESIT_PATTERN: &str =
    concat!("(?i)", housesit_term!(), "(?:", sequence_marker!(), ")?");

/// House-sit wording followed by a required sequence marker.
pub(crate) const HOUSESIT_SUFFIX_PATTERN: &str =
    concat!("(?i)", housesit_term!(), sequence_marker!());

/// Meet-and-greet marker: `Meet & Greet`, `meet-n-greet`, `M&G`.
pub(crate) const MEET_GREET_PATTERN: &str =
    r"(?i)meet[\s\-]*(?:(?:and|&|n)[\s\-]*)?greet|(?:^|[\s\-])m\s*&\s*g(?:$|[\s\-])";

/// Standard rule set. Exclusions are listed first for readability; the
/// interpreter enforces that order regardless.
pub const STANDARD_RULES: &[RuleSpec] = &[
    RuleSpec {
        name: "off-day",
        effect: RuleEffect::Exclude,
        pattern: r"(?i)\b(?:off|day\s+off|pto|vacation|holiday|sick\s+day)\b",
    },
    RuleSpec {
        name: "errand",
        effect: RuleEffect::Exclude,
        pattern: r"(?i)\b(?:errands?|grocery|groceries|shopping|bank|post\s+office|pharmacy|dmv|car\s+(?:wash|service))\b",
    },
    RuleSpec {
        name: "appointment",
        effect: RuleEffect::Exclude,
        pattern: r"(?i)\b(?:doctor|dr\.?|dentist|dental|therapy|therapist|physio|chiro(?:practor)?|acupuncture|massage|haircut|hair\s+cut|salon|manicure|pedicure|eye\s+exam)\b",
    },
    RuleSpec {
        name: "chore",
        effect: RuleEffect::Exclude,
        pattern: r"(?i)\b(?:laundry|chores?|cleaning|clean\s+house|dishes|vacuum(?:ing)?|mow(?:ing)?\s+(?:the\s+)?lawn|yard\s*work)\b",
    },
    RuleSpec {
        name: "social",
        effect: RuleEffect::Exclude,
        pattern: r"(?i)\b(?:lunch|dinner|brunch|breakfast|coffee|drinks|party|birthday|wedding|date\s+night|meeting|zoom|interview|book\s+club)\b",
    },
    RuleSpec {
        name: "meet-greet",
        effect: RuleEffect::Include(ServiceKind::Fixed(ServiceType::MeetGreet)),
        pattern: MEET_GREET_PATTERN,
    },
    RuleSpec {
        name: "minutes",
        effect: RuleEffect::Include(ServiceKind::TimedVisit),
        pattern: MINUTES_PATTERN,
    },
    RuleSpec {
        name: "housesit",
        effect: RuleEffect::Include(ServiceKind::Fixed(ServiceType::Overnight)),
        pattern: HOUSESIT_PATTERN,
    },
    RuleSpec {
        name: "nail-trim",
        effect: RuleEffect::Include(ServiceKind::Fixed(ServiceType::Other)),
        pattern: r"(?i)\bnail\s*trims?\b",
    },
];

static STANDARD_TABLE: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(STANDARD_RULES).expect("standard rule patterns are valid regexes")
});

static PARENTHETICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"));

static WALK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)walk").expect("walk pattern is valid"));

/// Removes `(...)` asides, which never take part in matching.
pub fn strip_parentheticals(title: &str) -> String {
    PARENTHETICAL_RE.replace_all(title, " ").into_owned()
}

#[derive(Debug)]
struct Rule {
    name: &'static str,
    effect: RuleEffect,
    regex: Regex,
}

/// Compiled, immutable rule table.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Compiles a table from rule specs.
    pub fn new(specs: &[RuleSpec]) -> Result<Self, regex::Error> {
        let rules = specs
            .iter()
            .map(|spec| {
                Ok(Rule {
                    name: spec.name,
                    effect: spec.effect,
                    regex: Regex::new(spec.pattern)?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// The shared standard table.
    pub fn standard() -> &'static Self {
        &STANDARD_TABLE
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.exclusions().chain(self.inclusions()).map(|r| r.name)
    }

    fn exclusions(&self) -> impl Iterator<Item = &Rule> {
        self.rules
            .iter()
            .filter(|r| matches!(r.effect, RuleEffect::Exclude))
    }

    fn inclusions(&self) -> impl Iterator<Item = &Rule> {
        self.rules
            .iter()
            .filter(|r| matches!(r.effect, RuleEffect::Include(_)))
    }

    /// Classifies a title. Parenthetical asides are stripped first.
    pub fn classify(&self, title: &str) -> Classification {
        let cleaned = strip_parentheticals(title);

        if let Some(rule) = self.exclusions().find(|r| r.regex.is_match(&cleaned)) {
            tracing::trace!(title, rule = rule.name, "excluded");
            return Classification {
                rule: Some(rule.name),
                ..Classification::UNMATCHED
            };
        }

        for rule in self.inclusions() {
            let RuleEffect::Include(kind) = rule.effect else {
                continue;
            };
            let Some(caps) = rule.regex.captures(&cleaned) else {
                continue;
            };
            let service_type = match kind {
                ServiceKind::Fixed(service) => service,
                ServiceKind::TimedVisit if WALK_RE.is_match(&cleaned) => ServiceType::Walk,
                ServiceKind::TimedVisit => ServiceType::DropIn,
            };
            tracing::trace!(title, rule = rule.name, %service_type, "included");
            return Classification {
                category: Category::Work,
                rule: Some(rule.name),
                service_type,
                duration: capture_minutes(&caps),
                marker: capture_marker(&caps),
            };
        }

        Classification::UNMATCHED
    }
}

pub(crate) fn capture_minutes(caps: &Captures<'_>) -> Option<u32> {
    caps.name("minutes").and_then(|m| m.as_str().parse().ok())
}

pub(crate) fn capture_marker(caps: &Captures<'_>) -> Option<SequenceMarker> {
    caps.name("marker").and_then(|m| m.as_str().parse().ok())
}
