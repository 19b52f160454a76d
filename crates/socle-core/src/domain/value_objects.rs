//! Domain value objects: Architecture, Database, HttpFramework, RenderEngine,
//! PlatformVariant.
//!
//! # Design
//!
//! These are pure value types: `Copy` and compared by value.
//! The pipeline never interprets the first four: they are carried on the
//! request for logging and for the CLI summary, while the template snapshot
//! decides what they mean. `PlatformVariant` is the only one with behavior
//! (it owns a build-artifact filename).
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant and its `ALL` entry
//! 2. Add the `as_str` arm and the `FromStr` arm
//! 3. Nothing else changes

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Join the canonical names of a variant list for error messages.
fn expected<T: Copy>(all: &[T], as_str: fn(&T) -> &'static str) -> String {
    all.iter().map(as_str).collect::<Vec<_>>().join(", ")
}

// ── Architecture ─────────────────────────────────────────────────────────────

/// Architecture style of the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    /// Domain-driven design.
    #[default]
    Ddd,
    Layered,
    Microservice,
    Minimal,
}

impl Architecture {
    pub const ALL: [Self; 4] = [Self::Ddd, Self::Layered, Self::Microservice, Self::Minimal];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ddd => "ddd",
            Self::Layered => "layered",
            Self::Microservice => "microservice",
            Self::Minimal => "minimal",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ddd" | "domain-driven" => Ok(Self::Ddd),
            "layered" | "layers" => Ok(Self::Layered),
            "microservice" | "microservices" => Ok(Self::Microservice),
            "minimal" | "min" => Ok(Self::Minimal),
            other => Err(DomainError::UnknownOption {
                kind: "architecture",
                value: other.to_string(),
                expected: expected(&Self::ALL, Self::as_str),
            }),
        }
    }
}

// ── Database ─────────────────────────────────────────────────────────────────

/// Database engine wired into the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    Sqlite,
    Postgres,
    Mysql,
    Mariadb,
}

impl Database {
    pub const ALL: [Self; 4] = [Self::Sqlite, Self::Postgres, Self::Mysql, Self::Mariadb];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Mariadb => "mariadb",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" => Ok(Self::Mysql),
            "mariadb" => Ok(Self::Mariadb),
            other => Err(DomainError::UnknownOption {
                kind: "database",
                value: other.to_string(),
                expected: expected(&Self::ALL, Self::as_str),
            }),
        }
    }
}

// ── HttpFramework ────────────────────────────────────────────────────────────

/// HTTP router/framework used by the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpFramework {
    #[default]
    Chi,
    Gin,
    Echo,
    Fiber,
    /// The standard library `net/http` mux.
    Stdlib,
}

impl HttpFramework {
    pub const ALL: [Self; 5] = [Self::Chi, Self::Gin, Self::Echo, Self::Fiber, Self::Stdlib];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chi => "chi",
            Self::Gin => "gin",
            Self::Echo => "echo",
            Self::Fiber => "fiber",
            Self::Stdlib => "stdlib",
        }
    }
}

impl fmt::Display for HttpFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chi" => Ok(Self::Chi),
            "gin" => Ok(Self::Gin),
            "echo" => Ok(Self::Echo),
            "fiber" => Ok(Self::Fiber),
            "stdlib" | "net/http" | "nethttp" => Ok(Self::Stdlib),
            other => Err(DomainError::UnknownOption {
                kind: "HTTP framework",
                value: other.to_string(),
                expected: expected(&Self::ALL, Self::as_str),
            }),
        }
    }
}

// ── RenderEngine ─────────────────────────────────────────────────────────────

/// Server-side template/render engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderEngine {
    #[default]
    Templ,
    /// `html/template` from the standard library.
    Html,
    Jet,
}

impl RenderEngine {
    pub const ALL: [Self; 3] = [Self::Templ, Self::Html, Self::Jet];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Templ => "templ",
            Self::Html => "html",
            Self::Jet => "jet",
        }
    }
}

impl fmt::Display for RenderEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderEngine {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "templ" => Ok(Self::Templ),
            "html" | "html/template" => Ok(Self::Html),
            "jet" => Ok(Self::Jet),
            other => Err(DomainError::UnknownOption {
                kind: "render engine",
                value: other.to_string(),
                expected: expected(&Self::ALL, Self::as_str),
            }),
        }
    }
}

// ── PlatformVariant ──────────────────────────────────────────────────────────

/// Filename every platform variant is promoted to.
pub const CANONICAL_BUILD_ARTIFACT: &str = "Makefile";

/// Host platform family a build helper file is written for.
///
/// Each variant owns exactly one file in the template snapshot. After
/// resolution only [`CANONICAL_BUILD_ARTIFACT`] remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformVariant {
    Unix,
    Windows,
}

impl PlatformVariant {
    pub const ALL: [Self; 2] = [Self::Unix, Self::Windows];

    /// The variant matching the platform this binary was compiled for.
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unix => "unix",
            Self::Windows => "windows",
        }
    }

    /// Variant-specific filename inside the template snapshot.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Unix => "Makefile.mac",
            Self::Windows => "Makefile.windows",
        }
    }
}

impl fmt::Display for PlatformVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unix" | "linux" | "mac" | "macos" => Ok(Self::Unix),
            "windows" | "win" => Ok(Self::Windows),
            other => Err(DomainError::UnknownOption {
                kind: "platform",
                value: other.to_string(),
                expected: expected(&Self::ALL, Self::as_str),
            }),
        }
    }
}
