//! Message types driven by the harness.
//!
//! These are written in the shape a schema compiler emits for the codec: proto3 implicit
//! presence (default scalars are not written), `Option` for embedded messages and oneofs, and
//! open enums that keep unrecognized values.

/// Declares a proto3 open enum whose first variant is the zero default.
macro_rules! open_enum {
    (
        $(#[$doc:meta])*
        $name:ident {
            $default:ident = $default_value:literal
            $(, $variant:ident = $value:literal)* $(,)?
        }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $default,
            $($variant,)*
            /// A value the schema does not declare, kept so it survives a round trip.
            Unknown(i32),
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                match value {
                    $default_value => Self::$default,
                    $($value => Self::$variant,)*
                    other => Self::Unknown(other),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                match value {
                    $name::$default => $default_value,
                    $($name::$variant => $value,)*
                    $name::Unknown(other) => other,
                }
            }
        }
    };
}

pub mod conformance;
pub mod example;
pub mod fiz_baz;

pub use conformance::{
    ConformanceRequest, ConformanceResponse, FailureSet, Outcome, Payload, TestCategory,
    WireFormat,
};
pub use example::Example1;
