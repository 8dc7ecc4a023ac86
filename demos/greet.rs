//! The smallest useful shape: a required message plus three optional
//! parameters, each selected by its own type.
//!
//! Run with: cargo run --example greet

use sovran_optargs::{args, must_bind, Args, Dest};

#[derive(Debug)]
struct Name(String);

#[derive(Debug)]
struct Value(String);

#[derive(Debug)]
struct Duration(std::time::Duration);

impl From<Name> for String {
    fn from(n: Name) -> String {
        n.0
    }
}

impl From<Value> for String {
    fn from(v: Value) -> String {
        v.0
    }
}

impl From<Duration> for std::time::Duration {
    fn from(d: Duration) -> std::time::Duration {
        d.0
    }
}

fn foo(msg: &str, args: Args) -> String {
    let mut name = String::new();
    let mut value = String::new();
    let mut duration = std::time::Duration::ZERO;
    must_bind!(args;
        Dest::via::<Name, _>(&mut name),
        Dest::via::<Value, _>(&mut value),
        Dest::via::<Duration, _>(&mut duration),
    );
    format!(
        "msg:{} name:{} value:{} duration:{:?}",
        msg, name, value, duration
    )
}

fn main() {
    println!("{}", foo("hello", args![Name("foo".to_string()), Duration(std::time::Duration::from_secs(1))]));
    println!("{}", foo("bare", args![]));
    println!(
        "{}",
        foo(
            "all",
            args![Value("v".to_string()), Duration(std::time::Duration::from_millis(5)), Name("n".to_string())]
        )
    );
}
