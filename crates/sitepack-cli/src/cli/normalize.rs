//! Go-style flag normalization.
//!
//! `-dev`, `-port 8080` and `-port=8080` become `--dev`, `--port 8080` and
//! `--port=8080`. Only known long flag names are rewritten, so short flags
//! (`-v`, `-q`, `-h`) and values that start with a dash pass through.

use std::ffi::OsString;

/// Long flag names accepted with a single dash.
pub const LONG_FLAGS: &[&str] = &[
    "dev", "watch", "port", "output", "public", "ts", "config", "verbose", "quiet", "no-color",
    "help", "version",
];

/// Rewrite single-dash long flags to double-dash form.
///
/// The first element (the program name) and everything after `--` are left
/// untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        out.push(normalize_one(arg));
    }

    out
}

fn normalize_one(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    let Some(rest) = text.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }

    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    if LONG_FLAGS.contains(&name) {
        OsString::from(format!("-{text}"))
    } else {
        arg
    }
}
