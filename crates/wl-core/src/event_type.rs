//! Tag enums as the single source of truth for classification strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// Generates a string-tagged enum with `Display`, `FromStr` and serde impls
/// that all agree on the same spelling.
macro_rules! define_tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [Self] = &[$( Self::$variant ),+];

            /// Canonical string form.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $tag, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ValidationError::unknown($kind, s))
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

define_tag_enum!(
    /// The billable service an appointment represents.
    ServiceType, "service type" {
        MeetGreet => "meet-greet",
        Overnight => "overnight",
        Walk => "walk",
        DropIn => "dropin",
        Other => "other",
    }
);

define_tag_enum!(
    /// Visit shape derived from the title, used for display grouping.
    EventType, "event type" {
        Overnight => "overnight",
        MeetGreet => "meet-greet",
        /// 15, 20 or 30 minute visits.
        ShortVisit => "short-visit",
        /// 45 or 60 minute visits.
        LongVisit => "long-visit",
        Walk => "walk",
        Other => "other",
    }
);

define_tag_enum!(
    /// Position of a visit within a multi-visit engagement.
    SequenceMarker, "sequence marker" {
        Start => "Start",
        First => "1st",
        Second => "2nd",
        Third => "3rd",
        Last => "Last",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for variant in ServiceType::ALL {
            let parsed: ServiceType = variant.to_string().parse().expect("should parse");
            assert_eq!(parsed, *variant);
        }
        for variant in EventType::ALL {
            let parsed: EventType = variant.to_string().parse().expect("should parse");
            assert_eq!(parsed, *variant);
        }
        for variant in SequenceMarker::ALL {
            let parsed: SequenceMarker = variant.to_string().parse().expect("should parse");
            assert_eq!(parsed, *variant);
        }
    }

    #[test]
    fn markers_parse_case_insensitively() {
        assert_eq!("last".parse::<SequenceMarker>().unwrap(), SequenceMarker::Last);
        assert_eq!("START".parse::<SequenceMarker>().unwrap(), SequenceMarker::Start);
        assert_eq!("2ND".parse::<SequenceMarker>().unwrap(), SequenceMarker::Second);
    }

    #[test]
    fn serializes_as_tag_string() {
        assert_eq!(
            serde_json::to_string(&ServiceType::DropIn).unwrap(),
            "\"dropin\""
        );
        assert_eq!(
            serde_json::to_string(&EventType::ShortVisit).unwrap(),
            "\"short-visit\""
        );
        assert_eq!(
            serde_json::to_string(&SequenceMarker::First).unwrap(),
            "\"1st\""
        );
    }

    #[test]
    fn unknown_tag_errors() {
        let err = "grooming".parse::<ServiceType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown service type: grooming");
    }
}
