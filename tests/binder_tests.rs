use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use sovran_optargs::{args, bind, must_bind, Args, BindError, Dest};
use std::any::type_name;
use std::panic;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Count(i32);

#[derive(Debug, Clone, PartialEq)]
struct Name(String);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Deadline(DateTime<Utc>);

impl From<Count> for i32 {
    fn from(c: Count) -> i32 {
        c.0
    }
}

impl From<Name> for String {
    fn from(n: Name) -> String {
        n.0
    }
}

impl From<Deadline> for DateTime<Utc> {
    fn from(d: Deadline) -> DateTime<Utc> {
        d.0
    }
}

fn init_test_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

fn name(s: &str) -> Name {
    Name(s.to_string())
}

// Receives the three optional parameters into plain locals.
fn foo(args: Args) -> Result<(i32, String, DateTime<Utc>), BindError> {
    let mut i = 0i32;
    let mut s = String::new();
    let mut deadline = DateTime::<Utc>::default();
    bind(
        args,
        vec![
            Dest::via::<Count, _>(&mut i),
            Dest::via::<Name, _>(&mut s),
            Dest::via::<Deadline, _>(&mut deadline),
        ],
    )?;
    Ok((i, s, deadline))
}

#[test]
fn test_set_arguments() -> Result<(), BindError> {
    init_test_logging();
    let (c, n, d) = foo(args![Count(1), name("a")])?;
    assert_eq!(c, 1);
    assert_eq!(n, "a");
    assert_eq!(d, DateTime::<Utc>::default());
    assert_eq!(d.timestamp(), 0);
    Ok(())
}

#[test]
fn test_all_arguments() -> Result<(), BindError> {
    let when = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let (c, n, d) = foo(args![Deadline(when), name("b"), Count(-3)])?;
    assert_eq!((c, n, d), (-3, "b".to_string(), when));
    Ok(())
}

#[test]
fn test_order_independence() -> Result<(), BindError> {
    let when = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let orders: Vec<Args> = vec![
        args![Count(7), name("x"), Deadline(when)],
        args![Count(7), Deadline(when), name("x")],
        args![name("x"), Count(7), Deadline(when)],
        args![name("x"), Deadline(when), Count(7)],
        args![Deadline(when), Count(7), name("x")],
        args![Deadline(when), name("x"), Count(7)],
    ];

    let expected = (7, "x".to_string(), when);
    for opts in orders {
        assert_eq!(foo(opts)?, expected);
    }
    Ok(())
}

#[test]
fn test_empty_args_leave_destinations_unchanged() -> Result<(), BindError> {
    let mut count = Count(11);
    let mut label = name("keep");
    bind(args![], vec![Dest::new(&mut count), Dest::new(&mut label)])?;
    assert_eq!(count, Count(11));
    assert_eq!(label, name("keep"));

    assert_eq!(foo(args![])?, (0, String::new(), DateTime::<Utc>::default()));
    Ok(())
}

#[test]
fn test_duplicate_arg_type() {
    init_test_logging();
    let err = foo(args![Count(1), name("a"), Count(2)]).unwrap_err();
    assert_eq!(
        err,
        BindError::DuplicateOptionType {
            index: 2,
            type_name: type_name::<Count>(),
        }
    );
    assert_eq!(
        err.to_string(),
        format!("type of 2-th arg:{} is dup", type_name::<Count>())
    );
}

#[test]
fn test_unknown_arg_type() {
    let err = foo(args![1, name("a"), Count(2)]).unwrap_err();
    assert_eq!(
        err,
        BindError::UnmatchedOptionType {
            index: 0,
            type_name: "i32",
            value: "1".to_string(),
        }
    );
    assert_eq!(err.to_string(), "0-th arg:i32/1 has no matching param type");
}

#[test]
fn test_unknown_arg_reports_debug_value() {
    let mut count = Count(0);
    let err = bind(args![Count(1), name("a")], vec![Dest::new(&mut count)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "1-th arg:{}/Name(\"a\") has no matching param type",
            type_name::<Name>()
        )
    );
}

#[test]
fn test_duplicate_dest_type() {
    init_test_logging();
    let bar = |args: Args| -> Result<(), BindError> {
        let mut i = 0i32;
        let mut j = 0i32;
        let mut s = String::new();
        bind(
            args,
            vec![
                Dest::via::<Count, _>(&mut i),
                Dest::via::<Name, _>(&mut s),
                Dest::via::<Count, _>(&mut j),
            ],
        )
    };

    let err = bar(args![Count(1), name("a")]).unwrap_err();
    assert_eq!(
        err,
        BindError::DuplicateDestinationType {
            index: 2,
            type_name: type_name::<Count>(),
        }
    );
    assert_eq!(
        err.to_string(),
        format!("type of 2-th dest:&mut {} is dup", type_name::<Count>())
    );

    // reported before any option is inspected
    let err = bar(args![1u64, 1u64]).unwrap_err();
    assert!(err.is_destination_error());
    assert_eq!(err.index(), 2);
}

#[test]
fn test_invalid_dest() {
    let mut count = Count(0);
    let frozen = name("frozen");
    let err = bind(
        args![Count(5)],
        vec![Dest::new(&mut count), Dest::read_only(&frozen)],
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("1-th dest:&{} is not writable", type_name::<Name>())
    );
    assert_eq!(count, Count(0));
}

#[test]
fn test_invalid_dest_wins_over_later_duplicate() {
    let mut a = Count(0);
    let mut b = Count(0);
    let frozen = 0u8;
    let err = bind(
        args![],
        vec![
            Dest::new(&mut a),
            Dest::read_only(&frozen),
            Dest::new(&mut b),
        ],
    )
    .unwrap_err();
    assert_eq!(
        err,
        BindError::InvalidDestination {
            index: 1,
            type_name: "u8",
        }
    );
}

#[test]
fn test_subset_assignment() -> Result<(), BindError> {
    let mut flags = [false; 4];
    let mut total = 0u64;
    let mut label = name("");
    let mut ratio = 1.0f64;

    bind(
        args![9u64, 0.5f64],
        vec![
            Dest::with::<[bool; 4], _>(|v| flags = v),
            Dest::new(&mut total),
            Dest::new(&mut label),
            Dest::new(&mut ratio),
        ],
    )?;

    assert_eq!(flags, [false; 4]);
    assert_eq!(total, 9);
    assert_eq!(label, name(""));
    assert_eq!(ratio, 0.5);
    Ok(())
}

#[test]
fn test_must_bind_panic_message() {
    let result = panic::catch_unwind(|| {
        let mut s = String::new();
        must_bind(args![1, name("a"), Count(2)], vec![Dest::via::<Name, _>(&mut s)]);
    });

    let payload = result.unwrap_err();
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert_eq!(message, "0-th arg:i32/1 has no matching param type");
}

#[test]
fn test_must_bind_success() {
    let mut count = Count(0);
    must_bind(args![Count(3)], vec![Dest::new(&mut count)]);
    assert_eq!(count, Count(3));
}

#[test]
fn test_calls_are_independent() -> Result<(), BindError> {
    // each call builds its own index, so a failed call leaves no trace
    assert!(foo(args![Count(1), Count(1)]).is_err());
    assert_eq!(foo(args![Count(1)])?.0, 1);
    Ok(())
}

#[test]
fn test_failed_option_leaves_all_destinations_unchanged() {
    let failing: Vec<(Args, usize)> = vec![
        (args![Count(1), name("a"), 42u8], 2),
        (args![Count(1), name("a"), Count(2)], 2),
        (args![name("a"), 3.5f64], 1),
        (args![Count(9), Count(9)], 1),
    ];

    for (opts, failed_at) in failing {
        let mut count = Count(0);
        let mut label = name("initial");
        let err = bind(opts, vec![Dest::new(&mut count), Dest::new(&mut label)]).unwrap_err();
        assert!(!err.is_destination_error());
        assert_eq!(err.index(), failed_at);
        assert_eq!(count, Count(0));
        assert_eq!(label, name("initial"));
    }
}
