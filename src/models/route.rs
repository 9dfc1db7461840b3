//! Per-route shipment record.

use serde::{Deserialize, Serialize};

/// One shipping lane with a strictly positive final quantity.
///
/// # Examples
///
/// ```
/// use u_transport::models::RouteDetail;
///
/// let r = RouteDetail::new(0, 1, "Karachi", "Site A", 200.0, 6.0);
/// assert!((r.route_cost - 1200.0).abs() < 1e-10);
/// assert!(!r.is_dummy);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDetail {
    /// Source row index.
    pub source_index: usize,
    /// Destination column index.
    pub destination_index: usize,
    /// Source display name.
    pub source: String,
    /// Destination display name.
    pub destination: String,
    /// Quantity shipped.
    pub quantity: f64,
    /// Cost per unit.
    pub unit_cost: f64,
    /// `quantity × unit_cost`.
    pub route_cost: f64,
    /// `true` if either end is a synthetic balancing node.
    pub is_dummy: bool,
}

impl RouteDetail {
    /// Creates a route record; the extended cost is computed.
    pub fn new(
        source_index: usize,
        destination_index: usize,
        source: impl Into<String>,
        destination: impl Into<String>,
        quantity: f64,
        unit_cost: f64,
    ) -> Self {
        Self {
            source_index,
            destination_index,
            source: source.into(),
            destination: destination.into(),
            quantity,
            unit_cost,
            route_cost: quantity * unit_cost,
            is_dummy: false,
        }
    }

    /// Marks this route as touching a synthetic balancing node.
    pub fn with_dummy(mut self, is_dummy: bool) -> Self {
        self.is_dummy = is_dummy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_cost() {
        let r = RouteDetail::new(1, 2, "S", "D", 12.5, 4.0);
        assert_eq!(r.source_index, 1);
        assert_eq!(r.destination_index, 2);
        assert!((r.route_cost - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_dummy_flag() {
        let r = RouteDetail::new(0, 0, "Dummy Source", "D", 4.0, 0.0).with_dummy(true);
        assert!(r.is_dummy);
        assert_eq!(r.route_cost, 0.0);
    }
}
