//! `define_port_error!`: declares a port error enum together with one
//! snake_case constructor per variant.
//!
//! ```ignore
//! define_port_error! {
//!     /// Failures raised by a store.
//!     pub enum StoreError {
//!         /// Store offline.
//!         Offline => "store offline",
//!         /// Query failed.
//!         Query { message: String } => "query failed: {message}",
//!     }
//! }
//!
//! let err = StoreError::query("timeout");
//! ```
//!
//! Constructor arguments accept anything convertible into the field type.

macro_rules! define_port_error {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $display:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant $( { $($field: $ty),+ } )?,
            )+
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field: $ty),+ } )?);
            )+
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Build [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            #[doc = "Build [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };
}

pub(crate) use define_port_error;
