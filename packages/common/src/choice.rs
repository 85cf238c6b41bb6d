/// Error when parsing a choice key that is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} '{invalid}'. Valid values: {expected}")]
pub struct ParseChoiceError {
    pub kind: &'static str,
    pub invalid: String,
    pub expected: String,
}

impl ParseChoiceError {
    pub(crate) fn new<I>(kind: &'static str, invalid: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        Self {
            kind,
            invalid: invalid.to_string(),
            expected: keys.into_iter().collect::<Vec<_>>().join(", "),
        }
    }
}

/// Declares a closed choice set persisted as a `SMALLINT`.
///
/// Each variant carries its stored integer, its JSON key and its display
/// label. Mark the default variant with `#[default]`.
macro_rules! small_int_choice {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:tt, $key:tt, $label:tt;
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        #[cfg_attr(
            feature = "sea-orm",
            derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
            sea_orm(rs_type = "i16", db_type = "SmallInteger")
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $key)]
                #[cfg_attr(feature = "sea-orm", sea_orm(num_value = $value))]
                $variant,
            )+
        }

        impl $name {
            /// All possible values, in stored order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// The integer persisted in the database.
            pub fn value(self) -> i16 {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            /// The key used in JSON and query strings.
            pub fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            /// Localized human-readable label.
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            pub fn from_value(value: i16) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::choice::ParseChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| c.key() == s)
                    .ok_or_else(|| {
                        $crate::choice::ParseChoiceError::new(
                            stringify!($name),
                            s,
                            Self::ALL.iter().map(|c| c.key()),
                        )
                    })
            }
        }
    };
}

pub(crate) use small_int_choice;
