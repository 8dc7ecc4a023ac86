use std::any::{Any, TypeId};
use std::fmt;

pub(crate) type Setter<'a> = Box<dyn FnOnce(Box<dyn Any>) + 'a>;

/// A typed slot that an option value can be written into.
///
/// A `Dest` pairs the option type it accepts with a one-shot setter that
/// borrows the caller's storage for the duration of a bind call. Nothing is
/// written unless an option of exactly that type is passed, so an unmatched
/// slot keeps whatever the caller initialized it with.
///
/// # Examples
///
/// ```
/// use sovran_optargs::{args, bind, Dest};
///
/// #[derive(Debug)]
/// struct Count(i64);
///
/// impl From<Count> for i64 {
///     fn from(c: Count) -> i64 { c.0 }
/// }
///
/// let mut count = 0i64;
/// bind(args![Count(5)], vec![Dest::via::<Count, _>(&mut count)]).unwrap();
/// assert_eq!(count, 5);
/// ```
pub struct Dest<'a> {
    type_id: TypeId,
    type_name: &'static str,
    setter: Option<Setter<'a>>,
}

impl<'a> Dest<'a> {
    /// Creates a destination accepting options of type `T`, stored as-is.
    pub fn new<T: Any>(slot: &'a mut T) -> Self {
        Self::with::<T, _>(move |value| *slot = value)
    }

    /// Creates a destination accepting options of type `T` and storing them
    /// into a slot of another type `U`.
    ///
    /// This lets a function keep plain locals (`String`, `u64`, ...) while
    /// callers pass distinct newtypes to say which parameter they mean.
    pub fn via<T, U>(slot: &'a mut U) -> Self
    where
        T: Any + Into<U>,
    {
        Self::with::<T, _>(move |value| *slot = value.into())
    }

    /// Creates a destination accepting options of type `T` that hands the
    /// value to `f`.
    pub fn with<T, F>(f: F) -> Self
    where
        T: Any,
        F: FnOnce(T) + 'a,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            setter: Some(Box::new(move |value: Box<dyn Any>| {
                if let Ok(value) = value.downcast::<T>() {
                    f(*value);
                }
            })),
        }
    }

    /// Declares a destination of type `T` that cannot be written.
    ///
    /// Binding always rejects it with
    /// [`BindError::InvalidDestination`](crate::BindError::InvalidDestination).
    /// This is what a shared reference turns into when passed to
    /// [`bind!`](crate::bind!).
    pub fn read_only<T: Any>(_slot: &'a T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            setter: None,
        }
    }

    /// The `TypeId` of the option type this destination accepts
    pub fn type_key(&self) -> TypeId {
        self.type_id
    }

    /// The name of the option type this destination accepts
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if this destination can be written
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    pub(crate) fn into_setter(self) -> Option<Setter<'a>> {
        self.setter
    }
}

impl<'a, T: Any> From<&'a mut T> for Dest<'a> {
    fn from(slot: &'a mut T) -> Self {
        Dest::new(slot)
    }
}

impl<'a, T: Any> From<&'a T> for Dest<'a> {
    fn from(slot: &'a T) -> Self {
        Dest::read_only(slot)
    }
}

impl fmt::Debug for Dest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dest")
            .field("type_name", &self.type_name)
            .field("writable", &self.is_writable())
            .finish()
    }
}
