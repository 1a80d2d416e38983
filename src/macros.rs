//! Macro for declaring phase enums.

/// Generate a phase enum together with its `State` implementation.
///
/// # Example
///
/// ```
/// use ledgergate::state_enum;
/// use ledgergate::core::State;
///
/// state_enum! {
///     pub enum CheckoutPhase {
///         Browsing,
///         Paying,
///         Paid,
///         Declined,
///     }
///     final: [Paid]
///     error: [Declined]
/// }
///
/// assert_eq!(CheckoutPhase::Paying.name(), "Paying");
/// assert!(CheckoutPhase::Paid.is_final());
/// assert!(CheckoutPhase::Declined.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}
