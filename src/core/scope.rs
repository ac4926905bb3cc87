//! Scope classification from source file paths.
//!
//! Monorepo layout conventions decide who owns a message:
//!
//! - `.../apps/<app>/src/...` belongs to application `<app>`
//! - `.../apps/<app>/src/features/<feature>/...` also belongs to feature `<feature>`
//! - `.../packages/src/<package>/...` belongs to shared package `<package>`
//!
//! The segments may start the path or follow any prefix; when a path contains
//! the layout more than once, the innermost occurrence wins. Paths matching
//! none of these yield empty scopes, never an error. An empty name
//! (`apps//src/`) is no scope at all.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use crate::core::data::Scopes;

static APP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:.*/)?apps/([a-z\-]*)/src/").expect("valid app regex"));

static FEATURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:.*/)?apps/[a-z\-]*/src/features/([a-z\-]+)/").expect("valid feature regex")
});

static PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:.*/)?packages/src/([a-z\-]*)/").expect("valid package regex"));

fn capture(re: &Regex, path: &str) -> Option<String> {
    re.captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn normalize(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Application name owning `path`, if it lives under an `apps/<name>/src` tree.
pub fn app_scope(path: &str) -> Option<String> {
    capture(&APP_RE, &normalize(path))
}

/// Feature name within an application, if `path` lives under `src/features/<name>`.
pub fn feature_scope(path: &str) -> Option<String> {
    capture(&FEATURE_RE, &normalize(path))
}

/// Shared package name, if `path` lives under `packages/src/<name>`.
pub fn package_scope(path: &str) -> Option<String> {
    capture(&PACKAGE_RE, &normalize(path))
}

pub fn classify(path: &str) -> Scopes {
    let path = normalize(path);
    Scopes {
        app: capture(&APP_RE, &path),
        feature: capture(&FEATURE_RE, &path),
        package: capture(&PACKAGE_RE, &path),
    }
}
