//! Shared type aliases used across the workspace.

/// Database primary-key type (BIGSERIAL).
pub type DbId = i64;

/// UTC timestamp type used for all `TIMESTAMPTZ` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Record kind for the two contact pools.
///
/// An assignment snapshots exactly one record from one of the pools; which
/// pool it came from determines where archive/recycle operations move the
/// record back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolKind {
    /// Prospective-client number pool (`clients` table).
    Client,
    /// Existing-customer pool (`customers` table).
    Customer,
}

impl PoolKind {
    /// The string stored in `assignments.kind` and `archive.entity_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            PoolKind::Client => "client",
            PoolKind::Customer => "customer",
        }
    }

    /// Parse a kind string, accepting the aliases the frontend sends
    /// (`"clients"` / `"customers"` plural forms and `"number"`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "client" | "clients" | "number" => Some(PoolKind::Client),
            "customer" | "customers" => Some(PoolKind::Customer),
            _ => None,
        }
    }
}

impl std::fmt::Display for PoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_kind_parses_frontend_aliases() {
        assert_eq!(PoolKind::parse("client"), Some(PoolKind::Client));
        assert_eq!(PoolKind::parse("clients"), Some(PoolKind::Client));
        assert_eq!(PoolKind::parse("number"), Some(PoolKind::Client));
        assert_eq!(PoolKind::parse("customers"), Some(PoolKind::Customer));
        assert_eq!(PoolKind::parse("unknown"), None);
    }

    #[test]
    fn pool_kind_round_trips_as_str() {
        for kind in [PoolKind::Client, PoolKind::Customer] {
            assert_eq!(PoolKind::parse(kind.as_str()), Some(kind));
        }
    }
}
