//! Crate-internal macros.

/// Declare a categorical input: a fieldless enum whose variants carry a wire
/// tag and a display label.
///
/// Generates serde renames from the tags, `ALL`/`TAGS` in declaration order,
/// and `tag()`, `label()`, `from_tag()`, `ordinal()`. Declaration order is
/// also the `Ord` order, so ordinal scales (cup sizes, dose steps) compare
/// naturally.
///
/// ```ignore
/// choice_enum! {
///     /// Smoking status
///     pub enum Smoking {
///         Never => "never", "Never smoked";
///         Current => "current", "Current smoker";
///     }
/// }
/// ```
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $tag)] $variant, )+
        }

        impl $name {
            /// Every option, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire tags, in the same order as `ALL`
            pub const TAGS: &'static [&'static str] = &[$($tag),+];

            /// Wire tag for this option
            pub fn tag(self) -> &'static str {
                match self {
                    $($name::$variant => $tag,)+
                }
            }

            /// Display label for this option
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Parse a wire tag
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $($tag => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Position in `ALL`
            pub fn ordinal(self) -> usize {
                self as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}
