//! Key Namespace & Expiration Policy Tables
//!
//! Every cached data category owns a unique key prefix and a fixed TTL
//! expressing its business freshness requirement. Both tables are process-wide
//! constants; changing a TTL here is a behavioral change for every caller.

use std::time::Duration;

// == Namespace ==
/// Logical data categories sharing the store's key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Product,
    User,
    Category,
    Brand,
    Search,
    Cart,
    Order,
    Session,
    Lock,
    Counter,
}

/// All categories, in table order.
pub const ALL_NAMESPACES: [Namespace; 10] = [
    Namespace::Product,
    Namespace::User,
    Namespace::Category,
    Namespace::Brand,
    Namespace::Search,
    Namespace::Cart,
    Namespace::Order,
    Namespace::Session,
    Namespace::Lock,
    Namespace::Counter,
];

/// TTL applied by [`crate::cache::CacheManager::warm_up`] for pre-populated
/// hot data.
pub const WARM_UP_TTL: Duration = Duration::from_secs(60 * 60);

impl Namespace {
    // == Prefix Table ==
    /// The unique key prefix owned by this category.
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Product => "product:",
            Namespace::User => "user:",
            Namespace::Category => "category:",
            Namespace::Brand => "brand:",
            Namespace::Search => "search:",
            Namespace::Cart => "cart:",
            Namespace::Order => "order:",
            Namespace::Session => "session:",
            Namespace::Lock => "lock:",
            Namespace::Counter => "counter:",
        }
    }

    // == Expiration Policy Table ==
    /// Default TTL for entries in this category.
    pub fn ttl(&self) -> Duration {
        let secs = match self {
            Namespace::Product => 2 * 60 * 60,
            Namespace::User => 30 * 60,
            Namespace::Category => 60 * 60,
            Namespace::Brand => 60 * 60,
            Namespace::Search => 15 * 60,
            Namespace::Cart => 7 * 24 * 60 * 60,
            Namespace::Order => 30 * 60,
            Namespace::Session => 30 * 60,
            Namespace::Lock => 5 * 60,
            Namespace::Counter => 24 * 60 * 60,
        };
        Duration::from_secs(secs)
    }

    // == Key Builder ==
    /// Builds a fully-qualified key in this namespace.
    pub fn key<I, S>(&self, parts: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        build_key(self.prefix(), parts)
    }
}

// == Build Key ==
/// Concatenates a prefix and key parts with `:`, trimming one trailing
/// separator. Pure function, no failure mode.
pub fn build_key<I, S>(prefix: &str, parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut key = String::from(prefix);
    for part in parts {
        key.push_str(part.as_ref());
        key.push(':');
    }
    if key.ends_with(':') {
        key.pop();
    }
    key
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_build_key_trims_trailing_separator() {
        assert_eq!(build_key("product:", ["123", "detail"]), "product:123:detail");
    }

    #[test]
    fn test_build_key_single_part() {
        assert_eq!(build_key("user:", ["42"]), "user:42");
    }

    #[test]
    fn test_build_key_no_parts() {
        let empty: [&str; 0] = [];
        assert_eq!(build_key("product:", empty), "product");
    }

    #[test]
    fn test_namespace_key() {
        assert_eq!(Namespace::Search.key(["shoes", "page", "2"]), "search:shoes:page:2");
        assert_eq!(Namespace::Lock.key(["order-submit"]), "lock:order-submit");
    }

    #[test]
    fn test_prefixes_are_unique() {
        let prefixes: HashSet<&str> = ALL_NAMESPACES.iter().map(|ns| ns.prefix()).collect();
        assert_eq!(prefixes.len(), ALL_NAMESPACES.len());
    }

    #[test]
    fn test_no_prefix_is_a_prefix_of_another() {
        for a in &ALL_NAMESPACES {
            for b in &ALL_NAMESPACES {
                if a != b {
                    assert!(
                        !a.prefix().starts_with(b.prefix()),
                        "{:?} prefix overlaps {:?}",
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_policy_table_values() {
        assert_eq!(Namespace::Product.ttl(), Duration::from_secs(7200));
        assert_eq!(Namespace::Search.ttl(), Duration::from_secs(900));
        assert_eq!(Namespace::Cart.ttl(), Duration::from_secs(604_800));
        assert_eq!(Namespace::Lock.ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_every_namespace_has_positive_ttl() {
        for ns in &ALL_NAMESPACES {
            assert!(ns.ttl() > Duration::ZERO);
        }
    }
}
