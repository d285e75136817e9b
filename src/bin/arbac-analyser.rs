//!
//! arbac-analyser CLI binary
//! -------------------------
//! Reads an ARBAC policy (from a file or stdin), checks role reachability
//! for its declared goal, and prints the verdict.
//!
//! The textual policy format and its parser are a thin, line-oriented
//! surface kept entirely in this binary: the library core never sees
//! policy text, only the validated `Reachability` value the parser
//! below produces. See `--help` for the format.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};

use arbac_analyser::config::Limits;
use arbac_analyser::driver;
use arbac_analyser::model::{ModelBuilder, Reachability, RoleId};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  \
         {program} [policy.arbac]\n  \
         {program} --explain [policy.arbac]\n  \
         {program} -h | --help\n\n\
         Zero positional arguments reads policy text from stdin; one reads it from the\n\
         named file. More than one positional argument is a usage error.\n\n\
         Flags:\n  \
         --explain      Print role/user/rule counts before and after pruning to stderr\n  \
         -h, --help     Show this help\n\n\
         Policy format (one statement per line, blank lines and '#' comments ignored):\n  \
         roles <name>, <name>, ...\n  \
         users <name>, <name>, ...\n  \
         ua <user> <role>                          (repeatable; one initial assignment per line)\n  \
         cr <admin_role> <target_role>              (repeatable; a can_revoke rule)\n  \
         ca <admin_role> : <pos,...> / <neg,...> -> <target_role>   (repeatable; a can_assign rule)\n  \
         goal <role>\n\n\
         Example:\n  \
         roles user, admin, secret\n  \
         users alice\n  \
         ua alice user\n  \
         ca admin : / -> secret\n  \
         goal secret\n\n\
         Exit codes: 0 decision printed, 1 usage error, 2 file not found, 3 parse error."
    );
}

struct Args {
    path: Option<String>,
    explain: bool,
}

fn parse_args(argv: &[String]) -> Result<Option<Args>, String> {
    let mut path = None;
    let mut explain = false;
    let mut positionals = 0;

    for arg in &argv[1..] {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--explain" => explain = true,
            other => {
                positionals += 1;
                if positionals > 1 {
                    return Err(format!(
                        "too many arguments, usage: {} [--explain] [policy.arbac]",
                        argv[0]
                    ));
                }
                path = Some(other.to_string());
            }
        }
    }

    Ok(Some(Args { path, explain }))
}

fn read_policy_text(path: &Option<String>) -> Result<String, ReadError> {
    match path {
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ReadError::Io(e.to_string()))?;
            Ok(buf)
        }
        Some(p) => fs::read_to_string(p).map_err(|_| ReadError::NotFound(p.clone())),
    }
}

enum ReadError {
    NotFound(String),
    Io(String),
}

/// Parses the line-oriented policy format described by `print_usage`
/// into a validated `Reachability` value.
fn parse_policy(text: &str) -> Result<Reachability, String> {
    let mut builder = ModelBuilder::new();
    let mut role_names = Vec::new();
    let mut user_names = Vec::new();
    let mut ua_pairs = Vec::new();
    let mut cr_lines = Vec::new();
    let mut ca_lines = Vec::new();
    let mut goal_name = None;

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let ctx = || format!("line {}: {}", lineno + 1, line);

        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| format!("{}: missing statement body", ctx()))?;
        let rest = rest.trim();

        match keyword {
            "roles" => role_names.extend(split_names(rest)),
            "users" => user_names.extend(split_names(rest)),
            "ua" => {
                let mut it = rest.split_whitespace();
                let user = it.next().ok_or_else(|| format!("{}: expected '<user> <role>'", ctx()))?;
                let role = it.next().ok_or_else(|| format!("{}: expected '<user> <role>'", ctx()))?;
                if it.next().is_some() {
                    return Err(format!("{}: unexpected extra token", ctx()));
                }
                ua_pairs.push((user.to_string(), role.to_string()));
            }
            "cr" => {
                let mut it = rest.split_whitespace();
                let admin = it.next().ok_or_else(|| format!("{}: expected '<admin> <target>'", ctx()))?;
                let target = it.next().ok_or_else(|| format!("{}: expected '<admin> <target>'", ctx()))?;
                if it.next().is_some() {
                    return Err(format!("{}: unexpected extra token", ctx()));
                }
                cr_lines.push((admin.to_string(), target.to_string()));
            }
            "ca" => {
                ca_lines.push(parse_ca(rest).map_err(|e| format!("{}: {}", ctx(), e))?);
            }
            "goal" => {
                if goal_name.is_some() {
                    return Err(format!("{}: goal declared more than once", ctx()));
                }
                if rest.is_empty() {
                    return Err(format!("{}: expected a role name", ctx()));
                }
                goal_name = Some(rest.to_string());
            }
            other => return Err(format!("{}: unrecognised statement '{}'", ctx(), other)),
        }
    }

    for name in &role_names {
        builder
            .declare_role(name)
            .map_err(|e| format!("role '{name}': {e}"))?;
    }
    for name in &user_names {
        builder
            .declare_user(name)
            .map_err(|e| format!("user '{name}': {e}"))?;
    }

    let mut initial = Vec::with_capacity(ua_pairs.len());
    for (user, role) in &ua_pairs {
        let u = builder.user_ref(user).map_err(|e| e.to_string())?;
        let r = builder.role_ref(role).map_err(|e| e.to_string())?;
        initial.push((u, r));
    }

    let mut can_revoke = Vec::with_capacity(cr_lines.len());
    for (admin, target) in &cr_lines {
        let a = builder.role_ref(admin).map_err(|e| e.to_string())?;
        let t = builder.role_ref(target).map_err(|e| e.to_string())?;
        can_revoke.push(builder.can_revoke(a, t));
    }

    let mut can_assign = Vec::with_capacity(ca_lines.len());
    for (admin, positive, negative, target) in &ca_lines {
        let a = builder.role_ref(admin).map_err(|e| e.to_string())?;
        let t = builder.role_ref(target).map_err(|e| e.to_string())?;
        let pos: Result<Vec<RoleId>, _> = positive.iter().map(|n| builder.role_ref(n)).collect();
        let neg: Result<Vec<RoleId>, _> = negative.iter().map(|n| builder.role_ref(n)).collect();
        let rule = builder
            .can_assign(a, pos.map_err(|e| e.to_string())?, neg.map_err(|e| e.to_string())?, t)
            .map_err(|e| e.to_string())?;
        can_assign.push(rule);
    }

    let goal_name = goal_name.ok_or_else(|| "missing 'goal' statement".to_string())?;
    let goal = builder.role_ref(&goal_name).map_err(|e| e.to_string())?;

    builder
        .build(initial, can_assign, can_revoke, goal)
        .map_err(|e| e.to_string())
}

fn split_names(rest: &str) -> Vec<String> {
    rest.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

type CaLine = (String, Vec<String>, Vec<String>, String);

fn parse_ca(rest: &str) -> Result<CaLine, String> {
    let (admin_and_cond, target) = rest
        .split_once("->")
        .ok_or("expected '->' before the target role")?;
    let (admin, cond) = admin_and_cond
        .split_once(':')
        .ok_or("expected ':' after the admin role")?;
    let admin = admin.trim();
    if admin.is_empty() {
        return Err("missing admin role".to_string());
    }
    let target = target.trim();
    if target.is_empty() {
        return Err("missing target role".to_string());
    }

    let (positive, negative) = match cond.split_once('/') {
        Some((pos, neg)) => (split_names(pos), split_names(neg)),
        None => (split_names(cond), Vec::new()),
    };

    Ok((admin.to_string(), positive, negative, target.to_string()))
}

fn run() -> Result<ExitCode> {
    let argv: Vec<String> = env::args().collect();

    let args = match parse_args(&argv) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage(&argv[0]);
            return Ok(ExitCode::SUCCESS);
        }
        Err(msg) => {
            eprintln!("{msg}");
            print_usage(&argv[0]);
            return Ok(ExitCode::from(1));
        }
    };

    let text = match read_policy_text(&args.path) {
        Ok(t) => t,
        Err(ReadError::NotFound(p)) => {
            eprintln!("File {p} not found");
            return Ok(ExitCode::from(2));
        }
        Err(ReadError::Io(e)) => return Err(anyhow!("failed to read policy text: {e}")),
    };

    let reach = match parse_policy(&text) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Parse error: {e}");
            return Ok(ExitCode::from(3));
        }
    };

    if args.explain {
        eprintln!("Input ARBAC\n{reach}\n");
    }

    let limits = Limits::from_env();
    let verdict = driver::decide(reach.clone(), limits).context("analysis failed")?;

    if args.explain {
        let pruned = arbac_analyser::pruner::slice(reach, limits.max_slice_iterations)
            .context("analysis failed")?;
        eprintln!("Sliced ARBAC\n{pruned}\n");
    }

    println!("{verdict}");
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
