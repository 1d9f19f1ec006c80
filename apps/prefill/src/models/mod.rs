/// A closed set of options offered by a radio group or dropdown.
///
/// `code` is the backend wire value, `label` the text shown next to the option.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn code(self) -> &'static str;

    fn label(self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }
}

/// Declares a `Choice` enum whose serde representation is its wire code.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $code)] $variant,)+
        }

        impl $crate::models::Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }
    };
}

pub mod education;
pub mod member;

#[cfg(test)]
mod tests {
    use super::member::{MilitaryStatus, ServiceType};
    use super::*;

    #[test]
    fn test_from_code_round_trips_every_option() {
        for status in MilitaryStatus::ALL {
            assert_eq!(MilitaryStatus::from_code(status.code()), Some(*status));
        }
        assert_eq!(ServiceType::from_code("SPACE_FORCE"), None);
    }

    #[test]
    fn test_serde_uses_wire_code() {
        let json = serde_json::to_string(&ServiceType::AirForce).unwrap();
        assert_eq!(json, "\"AIR_FORCE\"");
        let parsed: ServiceType = serde_json::from_str("\"MARINE_CORPS\"").unwrap();
        assert_eq!(parsed, ServiceType::MarineCorps);
    }
}
