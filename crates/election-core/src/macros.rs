//! Macro generating the election error enum together with its stable codes.
//!
//! Each variant gets a `thiserror` message, a snake_case constructor taking
//! `impl Into<_>` per field, and a matching variant in the companion code
//! enum returned by `code()`.

macro_rules! define_election_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub const fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident coded as $code:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( {
                    $(
                        $(#[$field_meta:meta])*
                        $field:ident : $ty:ty
                    ),* $(,)?
                } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $( $(#[$field_meta])* $field : $ty ),* } )?,
            )*
        }

        #[doc = concat!("Stable machine-readable category of [`", stringify!($name), "`].")]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[non_exhaustive]
        #[serde(rename_all = "snake_case")]
        pub enum $code {
            $(
                #[doc = concat!("See [`", stringify!($name), "::", stringify!($variant), "`].")]
                $variant,
            )*
        }

        impl $name {
            $(
                define_election_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Stable code for this error, for adapters that must not match on
            /// message text.
            #[must_use]
            pub const fn code(&self) -> $code {
                match self {
                    $( Self::$variant { .. } => $code::$variant, )*
                }
            }
        }
    };
}

pub(crate) use define_election_error;
