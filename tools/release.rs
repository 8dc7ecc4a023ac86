use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::Command;
use toml_edit::{DocumentMut, Item};

type Error = Box<dyn std::error::Error>;

/// Computes the version that follows `current` for a `major`, `minor` or
/// `patch` bump. Any other request is taken as an explicit version and must
/// itself be `MAJOR.MINOR.PATCH`.
fn next_version(current: &str, bump: &str) -> Result<String, Error> {
    let (major, minor, patch) = parse_version(current)?;
    let next = match bump {
        "major" => (major + 1, 0, 0),
        "minor" => (major, minor + 1, 0),
        "patch" => (major, minor, patch + 1),
        explicit => parse_version(explicit)?,
    };
    if next <= (major, minor, patch) {
        return Err(format!("{}.{}.{} is not newer than {}", next.0, next.1, next.2, current).into());
    }
    Ok(format!("{}.{}.{}", next.0, next.1, next.2))
}

fn parse_version(version: &str) -> Result<(u64, u64, u64), Error> {
    let core = version.split(['-', '+']).next().unwrap_or_default();
    let parts = core
        .split('.')
        .map(str::parse::<u64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid version {:?}: {}", version, e))?;
    match parts.as_slice() {
        [major, minor, patch] => Ok((*major, *minor, *patch)),
        _ => Err(format!("invalid version {:?}: expected MAJOR.MINOR.PATCH", version).into()),
    }
}

fn latest_tag() -> Result<Option<String>, Error> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--abbrev=0"])
        .output()?;
    if !output.status.success() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8(output.stdout)?.trim().to_string()))
}

fn release_notes(previous_tag: Option<&str>) -> Result<String, Error> {
    let mut cmd = Command::new("git");
    cmd.args(["log", "--pretty=format:- %s"]);
    if let Some(tag) = previous_tag {
        cmd.arg(format!("{}..HEAD", tag));
    }
    Ok(String::from_utf8(cmd.output()?.stdout)?)
}

fn confirm(message: &str) -> Result<bool, io::Error> {
    print!("{} (y/n): ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn run(program: &str, args: &[&str]) -> Result<(), Error> {
    println!("Executing: {} {}", program, args.join(" "));
    let status = Command::new(program).args(args).status()?;
    if !status.success() {
        return Err(format!("{} {} failed", program, args.join(" ")).into());
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    let bump = env::args().nth(1).unwrap_or_else(|| "patch".to_string());

    let mut doc = fs::read_to_string("Cargo.toml")?.parse::<DocumentMut>()?;
    let current = doc["package"]["version"]
        .as_str()
        .ok_or("no package.version in Cargo.toml")?
        .to_string();
    let version = next_version(&current, &bump)?;

    if !confirm(&format!("Release {} -> {}?", current, version))? {
        println!("Release aborted.");
        return Ok(());
    }

    // the suite must pass on the bumped manifest before anything is tagged
    doc["package"]["version"] = Item::from(version.as_str());
    fs::write("Cargo.toml", doc.to_string())?;
    run("cargo", &["test", "--all-targets"])?;

    let previous = latest_tag()?;
    let notes = release_notes(previous.as_deref())?;
    if notes.is_empty() && !confirm("No commits since last tag. Continue?")? {
        println!("Release aborted.");
        return Ok(());
    }
    println!("Release notes:\n{}", notes);

    let tag = format!("v{}", version);
    run("git", &["add", "Cargo.toml", "Cargo.lock"])?;
    run("git", &["commit", "-m", &format!("Bump version to {}", version)])?;
    run("git", &["tag", "-a", &tag, "-m", &format!("Version {}", version)])?;
    run("git", &["push"])?;
    run("git", &["push", "--tags"])?;

    if confirm("Publish to crates.io?")? {
        run("cargo", &["publish"])?;
    }
    if confirm("Create GitHub release?")? {
        run("gh", &["release", "create", &tag, "--title", &tag, "--notes", &notes])?;
    }

    println!("Released {}", version);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_bumps() {
        assert_eq!(next_version("0.4.2", "patch").unwrap(), "0.4.3");
        assert_eq!(next_version("0.4.2", "minor").unwrap(), "0.5.0");
        assert_eq!(next_version("0.4.2", "major").unwrap(), "1.0.0");
    }

    #[test]
    fn test_explicit_version() {
        assert_eq!(next_version("0.4.2", "0.10.0").unwrap(), "0.10.0");
        assert!(next_version("0.4.2", "0.4.2").is_err());
        assert!(next_version("0.4.2", "0.3.9").is_err());
    }

    #[test]
    fn test_prerelease_suffix_ignored() {
        assert_eq!(parse_version("1.2.3-beta.1").unwrap(), (1, 2, 3));
        assert_eq!(parse_version("1.2.3+build").unwrap(), (1, 2, 3));
    }

    #[test]
    fn test_invalid_versions() {
        assert!(parse_version("1.2").is_err());
        assert!(parse_version("one.two.three").is_err());
        assert!(next_version("0.1.0", "bogus").is_err());
    }
}
