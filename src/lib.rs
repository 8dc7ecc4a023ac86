//! # sovran-optargs
//!
//! Type-keyed optional arguments for Rust.
//!
//! `sovran-optargs` lets a function accept an unordered list of option values
//! and routes each one into the matching local variable purely by the value's
//! type. There are no names or positions involved: declare one distinct type per
//! optional parameter, have callers wrap values in those types, and bind them to
//! typed destinations inside the function.
//!
//! ## Key Features
//!
//! - **Type-keyed**: Options are matched to destinations by `TypeId`
//! - **Order-independent**: Callers pass options in any order
//! - **Open-ended**: Any `'static + Debug` type can be an option, no registration
//! - **Strict**: Duplicate or unknown option types are reported with index and type
//! - **Caller-owned defaults**: Untouched destinations keep their initial value
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_optargs::{args, bind, Args, BindError};
//! use std::time::Duration;
//!
//! #[derive(Debug, Default)]
//! struct Name(String);
//! #[derive(Debug, Default)]
//! struct Timeout(Duration);
//!
//! fn fetch(url: &str, args: Args) -> Result<String, BindError> {
//!     let mut name = Name::default();
//!     let mut timeout = Timeout(Duration::from_secs(30));
//!     bind!(args; &mut name, &mut timeout)?;
//!     Ok(format!("{} name:{} timeout:{:?}", url, name.0, timeout.0))
//! }
//!
//! fn main() -> Result<(), BindError> {
//!     let out = fetch("/users", args![Name("list".to_string())])?;
//!     assert_eq!(out, "/users name:list timeout:30s");
//!
//!     // order does not matter
//!     let out = fetch(
//!         "/users",
//!         args![Timeout(Duration::from_secs(1)), Name("list".to_string())],
//!     )?;
//!     assert_eq!(out, "/users name:list timeout:1s");
//!     Ok(())
//! }
//! ```
//!
//! ### Binding Into Plain Locals
//!
//! ```rust
//! use sovran_optargs::{args, must_bind, Args, Dest};
//!
//! #[derive(Debug)]
//! struct Count(i64);
//! #[derive(Debug)]
//! struct Label(String);
//!
//! impl From<Count> for i64 {
//!     fn from(c: Count) -> i64 { c.0 }
//! }
//! impl From<Label> for String {
//!     fn from(l: Label) -> String { l.0 }
//! }
//!
//! fn tally(args: Args) -> (i64, String) {
//!     let mut count = 0i64;
//!     let mut label = String::new();
//!     must_bind!(args;
//!         Dest::via::<Count, _>(&mut count),
//!         Dest::via::<Label, _>(&mut label),
//!     );
//!     (count, label)
//! }
//!
//! assert_eq!(tally(args![Count(3)]), (3, String::new()));
//! ```
//!
//! ### Error Handling
//!
//! ```rust
//! use sovran_optargs::{args, bind, BindError};
//!
//! #[derive(Debug, Default)]
//! struct Count(i32);
//!
//! let mut count = Count::default();
//! match bind!(args![Count(1), Count(2)]; &mut count) {
//!     Ok(()) => println!("bound"),
//!     Err(BindError::DuplicateOptionType { index, .. }) => assert_eq!(index, 1),
//!     Err(e) => println!("Other error: {}", e),
//! }
//!
//! let mut count = Count::default();
//! let err = bind!(args![1u8]; &mut count).unwrap_err();
//! assert_eq!(err.to_string(), "0-th arg:u8/1 has no matching param type");
//! ```

mod arg;
mod binder;
mod dest;
mod error;

pub use arg::{Args, OptArg};
pub use binder::{bind, must_bind};
pub use dest::Dest;
pub use error::BindError;
