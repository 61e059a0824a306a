//! `define_port_error!`: declares a repository error enum.
//!
//! Every repository can lose its connection or fail a query, so the macro
//! always emits `Connection { message }` and `Query { message }` variants
//! whose messages are prefixed with the store name. Extra variants follow in
//! the body, each with a `thiserror` message and a snake_case constructor.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident for $store:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// Repository connection could not be established.
            #[error("{store} connection failed: {message}", store = $store)]
            Connection { message: String },
            /// Query or mutation failed during execution.
            #[error("{store} query failed: {message}", store = $store)]
            Query { message: String },
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            define_port_error!(@ctor Connection { message: String });
            define_port_error!(@ctor Query { message: String });
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Whether the store was unreachable rather than rejecting the operation.
            pub fn is_connection(&self) -> bool {
                matches!(self, Self::Connection { .. })
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum StoreError for "test store" {
            Retries { attempts: u32 } => "gave up after {attempts} attempts",
            Clash { slug: String, owner: i64 } => "slug {slug} taken for owner {owner}",
            Locked => "store is locked",
        }
    }

    #[test]
    fn shared_variants_carry_the_store_name() {
        assert_eq!(
            StoreError::connection("timeout").to_string(),
            "test store connection failed: timeout"
        );
        assert_eq!(
            StoreError::query("syntax").to_string(),
            "test store query failed: syntax"
        );
    }

    #[test]
    fn only_connection_failures_are_flagged() {
        assert!(StoreError::connection("refused").is_connection());
        assert!(!StoreError::query("syntax").is_connection());
        assert!(!StoreError::locked().is_connection());
    }

    #[test]
    fn extra_constructors_keep_field_types() {
        assert_eq!(
            StoreError::retries(5_u32).to_string(),
            "gave up after 5 attempts"
        );
        assert_eq!(
            StoreError::clash("abcd1234", 7_i64).to_string(),
            "slug abcd1234 taken for owner 7"
        );
    }
}
