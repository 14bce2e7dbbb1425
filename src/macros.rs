//! Accessor generation macros for node enums.
//!
//! Uses `paste` for identifier concatenation.

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with typed variants
///
/// Uses paste's `:camel` modifier to convert the method name to the variant
/// name, which must also be the name of the payload type.
///
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl Node {
///     // element -> Element, text -> Text, comment -> Comment
///     impl_enum_accessors!(element, text, comment);
/// }
/// ```
#[macro_export]
macro_rules! impl_enum_accessors {
    ($($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " node"]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                pub fn [<as_ $variant>](&self) -> Option<&[<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut [<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }
            )*
        }
    };
}
