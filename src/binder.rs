use crate::arg::Args;
use crate::dest::{Dest, Setter};
use crate::error::BindError;
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Binds each option in `args` to the destination declared for its type.
///
/// Destinations are indexed first: each must be writable and no two may
/// share a type. Options are then assigned in order; each type may appear at
/// most once and must have a destination. The first violation found aborts
/// the call, and destination errors always win over option errors since
/// indexing runs to completion before any option is looked at. Destinations
/// no option matched are left untouched.
///
/// # Errors
///
/// - `BindError::InvalidDestination` if a destination is not writable
/// - `BindError::DuplicateDestinationType` if two destinations share a type
/// - `BindError::DuplicateOptionType` if two options share a type
/// - `BindError::UnmatchedOptionType` if an option's type has no destination
///
/// No destination is written unless the whole call succeeds.
///
/// # Examples
///
/// ```
/// use sovran_optargs::{args, bind, Args, BindError, Dest};
///
/// #[derive(Debug)]
/// struct Name(String);
/// #[derive(Debug)]
/// struct Retries(u32);
///
/// fn connect(args: Args) -> Result<(String, u32), BindError> {
///     let mut name = Name(String::new());
///     let mut retries = Retries(3);
///     bind(args, vec![Dest::new(&mut name), Dest::new(&mut retries)])?;
///     Ok((name.0, retries.0))
/// }
///
/// assert_eq!(connect(args![Name("db".into())])?, ("db".to_string(), 3));
/// assert!(connect(args![5u32]).is_err());
/// # Ok::<(), BindError>(())
/// ```
pub fn bind(args: Args, dests: Vec<Dest<'_>>) -> Result<(), BindError> {
    let mut setters = index(dests).inspect_err(|err| debug!(%err, "rejected destinations"))?;
    assign(args, &mut setters).inspect_err(|err| debug!(%err, "rejected option"))?;
    trace!(untouched = setters.len(), "bind complete");
    Ok(())
}

/// Like [`bind`], but panics with the error's message on any violation.
///
/// Suits functions that treat a malformed option list as a bug at the call
/// site rather than something to recover from.
///
/// # Panics
///
/// Panics on every condition for which [`bind`] returns an error.
#[track_caller]
pub fn must_bind(args: Args, dests: Vec<Dest<'_>>) {
    if let Err(err) = bind(args, dests) {
        panic!("{}", err);
    }
}

/// Calls [`bind`](fn@crate::bind) with destinations built from references or
/// [`Dest`] values.
///
/// `&mut x` becomes a writable destination for `x`'s type, `&x` a read-only
/// one (rejected at bind time), and a `Dest` is passed through unchanged.
///
/// # Examples
///
/// ```
/// use sovran_optargs::{args, bind, Args, BindError, Dest};
///
/// #[derive(Debug, Default)]
/// struct Verbose(bool);
/// #[derive(Debug)]
/// struct Depth(usize);
///
/// impl From<Depth> for usize {
///     fn from(d: Depth) -> usize { d.0 }
/// }
///
/// fn walk(args: Args) -> Result<(bool, usize), BindError> {
///     let mut verbose = Verbose::default();
///     let mut depth = 1usize;
///     bind!(args; &mut verbose, Dest::via::<Depth, _>(&mut depth))?;
///     Ok((verbose.0, depth))
/// }
///
/// assert_eq!(walk(args![Depth(4)])?, (false, 4));
/// # Ok::<(), BindError>(())
/// ```
#[macro_export]
macro_rules! bind {
    ($args:expr; $($dest:expr),* $(,)?) => {
        $crate::bind($args, ::std::vec![$($crate::Dest::from($dest)),*])
    };
}

/// Like [`bind!`](macro@crate::bind), but panics on any violation.
#[macro_export]
macro_rules! must_bind {
    ($args:expr; $($dest:expr),* $(,)?) => {
        $crate::must_bind($args, ::std::vec![$($crate::Dest::from($dest)),*])
    };
}

fn index(dests: Vec<Dest<'_>>) -> Result<HashMap<TypeId, Setter<'_>>, BindError> {
    let mut setters = HashMap::with_capacity(dests.len());
    for (index, dest) in dests.into_iter().enumerate() {
        let type_id = dest.type_key();
        let type_name = dest.type_name();
        let Some(setter) = dest.into_setter() else {
            return Err(BindError::InvalidDestination { index, type_name });
        };
        if setters.contains_key(&type_id) {
            return Err(BindError::DuplicateDestinationType { index, type_name });
        }
        trace!(index, type_name, "indexed destination");
        setters.insert(type_id, setter);
    }
    Ok(setters)
}

fn assign(args: Args, setters: &mut HashMap<TypeId, Setter<'_>>) -> Result<(), BindError> {
    let mut seen = HashSet::with_capacity(args.len());
    let mut matched = Vec::with_capacity(args.len());
    for (index, arg) in args.into_iter().enumerate() {
        let type_id = (*arg).type_key();
        let type_name = (*arg).type_name();
        if seen.contains(&type_id) {
            return Err(BindError::DuplicateOptionType { index, type_name });
        }
        let Some(setter) = setters.remove(&type_id) else {
            return Err(BindError::UnmatchedOptionType {
                index,
                type_name,
                value: format!("{:?}", arg),
            });
        };
        seen.insert(type_id);
        matched.push((index, type_name, setter, arg));
    }

    // nothing is written until every option has found its destination
    for (index, type_name, setter, arg) in matched {
        trace!(index, type_name, "assigned option");
        setter(arg.into_any());
    }
    Ok(())
}
