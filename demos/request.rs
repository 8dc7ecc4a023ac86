//! Demonstrates building an HTTP-style request from optional arguments,
//! including closure destinations and how each binding error is reported.
//!
//! Run with: RUST_LOG=trace cargo run --example request

use sovran_optargs::{args, bind, Args, BindError, Dest};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
enum Method {
    Get,
    Post,
}

#[derive(Debug)]
struct Header(&'static str, String);

#[derive(Debug)]
struct Body(Vec<u8>);

#[derive(Debug)]
struct Timeout(Duration);

#[derive(Debug)]
struct Retries(u8);

impl From<Timeout> for Duration {
    fn from(t: Timeout) -> Duration {
        t.0
    }
}

impl From<Retries> for u8 {
    fn from(r: Retries) -> u8 {
        r.0
    }
}

struct Request {
    method: Method,
    path: String,
    headers: BTreeMap<&'static str, String>,
    body: Vec<u8>,
    timeout: Duration,
    retries: u8,
}

fn request(path: &str, args: Args) -> Result<Request, BindError> {
    let mut method = Method::Get;
    let mut headers = BTreeMap::new();
    let mut body = Vec::new();
    let mut timeout = Duration::from_secs(10);
    let mut retries = 0u8;

    bind!(args;
        &mut method,
        Dest::with::<Header, _>(|h| {
            headers.insert(h.0, h.1);
        }),
        Dest::with::<Body, _>(|b| body = b.0),
        Dest::via::<Timeout, _>(&mut timeout),
        Dest::via::<Retries, _>(&mut retries),
    )?;

    Ok(Request {
        method,
        path: path.to_string(),
        headers,
        body,
        timeout,
        retries,
    })
}

fn main() {
    use tracing_subscriber::{fmt, EnvFilter};

    // Use RUST_LOG environment variable to control log level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let attempts: Vec<(&str, Args)> = vec![
        ("defaults", args![]),
        (
            "post",
            args![
                Method::Post,
                Body(b"{}".to_vec()),
                Header("content-type", "application/json".to_string()),
                Retries(3),
            ],
        ),
        (
            "two headers",
            args![
                Header("accept", "*/*".to_string()),
                Header("x-trace", "1".to_string()),
            ],
        ),
        ("bare number", args![Timeout(Duration::from_secs(2)), 2.5f32]),
    ];

    for (label, opts) in attempts {
        match request("/items", opts) {
            Ok(Request {
                method,
                path,
                headers,
                body,
                timeout,
                retries,
            }) => {
                println!("{}: {:?} {}", label, method, path);
                for (name, value) in &headers {
                    println!("  {}: {}", name, value);
                }
                println!(
                    "  body: {} bytes, timeout: {:?}, retries: {}",
                    body.len(),
                    timeout,
                    retries
                );
            }
            Err(BindError::DuplicateOptionType { index, type_name }) => {
                println!("{}: option {} repeats {}", label, index, type_name)
            }
            Err(e) => println!("{}: {}", label, e),
        }
    }
}
