use std::fmt;

/// One external-process request: a program name plus its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Wraps `inner` so it runs through `elevator` (e.g. `sudo ufw allow ssh`).
    pub fn elevated(elevator: &str, inner: Invocation) -> Self {
        let mut args = Vec::with_capacity(inner.args.len() + 1);
        args.push(inner.program);
        args.extend(inner.args);
        Self {
            program: elevator.to_string(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in self.tokens() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevation_prepends_the_elevator_and_keeps_order() {
        let inv = Invocation::elevated("sudo", Invocation::new("ufw", ["--force", "enable"]));
        assert_eq!(inv.program(), "sudo");
        assert_eq!(inv.args(), ["ufw", "--force", "enable"]);
        assert_eq!(inv.to_string(), "sudo ufw --force enable");
    }

    #[test]
    fn display_without_args_is_just_the_program() {
        assert_eq!(Invocation::new("ufw", Vec::<String>::new()).to_string(), "ufw");
    }
}
