use std::any::{Any, TypeId};
use std::fmt::Debug;

/// An option value whose runtime type selects the destination it is bound to.
///
/// Implemented for every `'static` type that implements `Debug`, so any
/// newtype such as `struct Name(String)` can be passed as an option without
/// further ceremony. The `Debug` form is used when reporting an option that
/// has no destination.
///
/// `Box<dyn OptArg>` is itself `Any + Debug`, so call these methods through
/// the trait object (`(*boxed).type_key()`), not on the box.
pub trait OptArg: Any + Debug {
    /// The `TypeId` of the concrete option type
    fn type_key(&self) -> TypeId;

    /// The name of the concrete option type
    fn type_name(&self) -> &'static str;

    /// Converts the boxed option into a `Box<dyn Any>` for downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Debug> OptArg for T {
    fn type_key(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// The variadic list of options a function receives.
pub type Args = Vec<Box<dyn OptArg>>;

/// Builds an [`Args`] list, boxing each expression.
///
/// # Examples
///
/// ```
/// use sovran_optargs::{args, Args};
///
/// #[derive(Debug)]
/// struct Retries(u32);
///
/// let opts: Args = args![Retries(3), "label"];
/// assert_eq!(opts.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        <$crate::Args>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        <$crate::Args>::from([$(::std::boxed::Box::new($arg) as ::std::boxed::Box<dyn $crate::OptArg>),+])
    };
}
