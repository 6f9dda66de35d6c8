use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The wire strings double as the serde representation.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(FactStatus {
    Compliant => "compliant",
    Warning => "warning",
    NonCompliant => "non-compliant",
    Unknown => "unknown",
});

str_enum!(ProductKind {
    Physical => "physical",
    DigitalContent => "digital_content",
    DigitalService => "digital_service",
    Combined => "combined",
});

str_enum!(Audience {
    B2b => "b2b",
    B2c => "b2c",
    Mixed => "mixed",
});

impl FactStatus {
    /// Weight used when aggregating facts into a compliance score.
    pub fn score(&self) -> u32 {
        match self {
            Self::Compliant => 100,
            Self::Unknown => 75,
            Self::Warning => 50,
            Self::NonCompliant => 0,
        }
    }

    /// Coerce an arbitrary wire value; anything outside the domain is Unknown.
    pub fn coerce(s: &str) -> Self {
        s.parse().unwrap_or(Self::Unknown)
    }
}

impl Default for FactStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

impl ProductKind {
    /// Coerce an arbitrary wire value; anything outside the domain is Physical.
    pub fn coerce(s: &str) -> Self {
        s.parse().unwrap_or(Self::Physical)
    }
}

impl Default for ProductKind {
    fn default() -> Self {
        Self::Physical
    }
}

impl Audience {
    /// Coerce an arbitrary wire value; anything outside the domain is B2c.
    pub fn coerce(s: &str) -> Self {
        s.parse().unwrap_or(Self::B2c)
    }
}

impl Default for Audience {
    fn default() -> Self {
        Self::B2c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            FactStatus::Compliant,
            FactStatus::Warning,
            FactStatus::NonCompliant,
            FactStatus::Unknown,
        ] {
            assert_eq!(status.as_str().parse::<FactStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_scores_match_weights() {
        assert_eq!(FactStatus::Compliant.score(), 100);
        assert_eq!(FactStatus::Unknown.score(), 75);
        assert_eq!(FactStatus::Warning.score(), 50);
        assert_eq!(FactStatus::NonCompliant.score(), 0);
    }

    #[test]
    fn out_of_domain_status_coerces_to_unknown() {
        assert_eq!(FactStatus::coerce("totally-fine"), FactStatus::Unknown);
        assert_eq!(FactStatus::coerce(""), FactStatus::Unknown);
        assert_eq!(FactStatus::coerce("compliant"), FactStatus::Compliant);
    }

    #[test]
    fn out_of_domain_kind_coerces_to_physical() {
        assert_eq!(ProductKind::coerce("hologram"), ProductKind::Physical);
        assert_eq!(
            ProductKind::coerce("digital_service"),
            ProductKind::DigitalService
        );
    }

    #[test]
    fn out_of_domain_audience_coerces_to_b2c() {
        assert_eq!(Audience::coerce("everyone"), Audience::B2c);
        assert_eq!(Audience::coerce("b2b"), Audience::B2b);
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&FactStatus::NonCompliant).unwrap();
        assert_eq!(json, "\"non-compliant\"");
        let kind: ProductKind = serde_json::from_str("\"digital_content\"").unwrap();
        assert_eq!(kind, ProductKind::DigitalContent);
    }
}
