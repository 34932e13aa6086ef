//! Sort direction for list queries.

use crate::enumeration::KeyedEnumeration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    Ascending,
    #[default]
    Descending,
}

impl KeyedEnumeration for Order {
    const ENUMERATIONS: &'static [Self] = &[Order::Ascending, Order::Descending];
    const TYPE_NAME: &'static str = "Order";

    fn key(&self) -> &'static str {
        match self {
            Order::Ascending => "ascending",
            Order::Descending => "descending",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_resolve_to_variants() {
        for order in Order::ENUMERATIONS {
            assert_eq!(Order::with_key(order.key()).unwrap(), *order);
        }
    }

    #[test]
    fn unknown_key_fails() {
        assert!(Order::with_key("sideways").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn default_is_descending() {
        assert_eq!(Order::default(), Order::Descending);
    }
}
