//! Shared query parameter types for the heavyRAIN metadata endpoints.

use std::fmt;

/// Sort order of the records returned by the server.
///
/// All heavyRAIN listing endpoints accept an `order` parameter; the default
/// everywhere is newest-first, which is what notebooks plotting "the last N
/// hours" want.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Oldest records first.
    Asc,
    /// Newest records first (server default).
    #[default]
    Desc,
}

impl Order {
    pub(crate) fn as_param(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_formats_as_query_value() {
        assert_eq!(Order::Asc.to_string(), "asc");
        assert_eq!(Order::Desc.to_string(), "desc");
        assert_eq!(Order::default(), Order::Desc);
    }
}
