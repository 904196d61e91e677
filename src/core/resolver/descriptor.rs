use std::fmt;

use crate::core::error::{ProxyError, ProxyResult};

/// A parsed non-vanilla runtime identifier.
///
/// The launcher writes runtimes as `<name>@<version>`; the version part is
/// mandatory for anything that is not the vanilla sentinel. The descriptor
/// only exists to build filesystem paths for one resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeDescriptor {
    /// Module base name, the part before the first `@`.
    pub name: String,
    /// The whole `<name>@<version>` identifier, used as the mod folder name.
    pub fully_qualified: String,
}

impl RuntimeDescriptor {
    /// Parse a versioned runtime identifier.
    ///
    /// # Examples
    /// ```
    /// use beryl_proxy::core::resolver::RuntimeDescriptor;
    /// let d = RuntimeDescriptor::parse("AmberCore@1.4.0").unwrap();
    /// assert_eq!(d.name, "AmberCore");
    /// ```
    pub fn parse(runtime: &str) -> ProxyResult<Self> {
        match runtime.split_once('@') {
            Some((name, _version)) => Ok(Self {
                name: name.to_string(),
                fully_qualified: runtime.to_string(),
            }),
            None => Err(ProxyError::InvalidRuntimeName(runtime.to_string())),
        }
    }

    /// Filename of the runtime module inside its mod folder.
    pub fn module_filename(&self) -> String {
        format!("{}.dll", self.name)
    }
}

impl fmt::Display for RuntimeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fully_qualified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_versioned_name() {
        let d = RuntimeDescriptor::parse("Foo@1.2.3").unwrap();
        assert_eq!(d.name, "Foo");
        assert_eq!(d.fully_qualified, "Foo@1.2.3");
        assert_eq!(d.module_filename(), "Foo.dll");
    }

    #[test]
    fn splits_on_first_at_sign() {
        let d = RuntimeDescriptor::parse("Foo@1.0.0@beta").unwrap();
        assert_eq!(d.name, "Foo");
        assert_eq!(d.fully_qualified, "Foo@1.0.0@beta");
    }

    #[test]
    fn missing_version_separator_is_rejected() {
        let err = RuntimeDescriptor::parse("Bad").unwrap_err();
        match err {
            ProxyError::InvalidRuntimeName(name) => assert_eq!(name, "Bad"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
