use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for cluster and decoration names.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// An interned name (`benzene`, `single-bond`, `aromatic`).
/// Internally a `Spur` index: 4 bytes, Copy, Eq, Hash in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name(Spur);

impl Name {
    /// Intern a string, or return the existing key if already interned.
    pub fn intern(s: &str) -> Self {
        Name(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Name of the decoration registered for aromatic rings.
    pub fn aromatic() -> Self {
        Self::intern("aromatic")
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
