use std::fmt;

/// Framework module fetched into every new project.
pub const FRAMEWORK_MODULE: &str = "gitlab.com/socle-framework/socle";

/// An external toolchain invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainCommand {
    program: String,
    args: Vec<String>,
}

impl ToolchainCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The commands that pull the framework and tidy the manifest, in the
    /// order they must run.
    pub fn dependency_resolution() -> [Self; 2] {
        [
            Self::new("go", ["get", FRAMEWORK_MODULE]),
            Self::new("go", ["mod", "tidy"]),
        ]
    }
}

impl fmt::Display for ToolchainCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
