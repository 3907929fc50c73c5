//! Macros for declaring typed state and event names.

/// Declare an enum whose variants stand for state or event names.
///
/// Each variant maps to its own identifier, or to an explicit string label.
/// The generated enum gets `as_str`, `ALL`, `Display`, `AsRef<str>`,
/// `From<Enum> for String` and `FromStr`, so it can be passed anywhere the
/// machine API takes a name.
///
/// # Example
///
/// ```
/// use statewire::{name_enum, Event, Machine, State};
///
/// name_enum! {
///     pub enum Light {
///         Red = "[Red]",
///         Green = "[Green]",
///     }
/// }
///
/// name_enum! {
///     enum Signal {
///         Go,
///         Halt,
///     }
/// }
///
/// let mut machine: Machine = Machine::create(
///     "light",
///     vec![State::new(Light::Red), State::new(Light::Green)],
///     vec![
///         Event::new(Signal::Go).transition(Light::Red, Light::Green),
///         Event::new(Signal::Halt).transition(Light::Green, Light::Red),
///     ],
///     None,
/// )
/// .unwrap();
///
/// machine.fire(Signal::Go).unwrap();
/// assert_eq!(machine.current_state_name(), Light::Green.as_str());
/// assert_eq!("[Red]".parse::<Light>().unwrap(), Light::Red);
/// ```
#[macro_export]
macro_rules! name_enum {
    (@label $variant:ident $label:literal) => { $label };
    (@label $variant:ident) => { stringify!($variant) };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $crate::name_enum!(@label $variant $($label)?)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl ::std::convert::From<$name> for ::std::string::String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::UnknownName;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| $crate::UnknownName { name: s.to_string() })
            }
        }
    };
}
