use serde::{Deserialize, Serialize};

/// A loosely typed field value as it arrives from a merchant export or a
/// catalog sheet.
///
/// Spreadsheet-backed exports routinely turn postal codes and house numbers
/// into numbers (`1900`, `1900.0`), so every field accepts any scalar and is
/// coerced to text exactly once, through [`Scalar::to_text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Textual form of the value.
    ///
    /// Integral floats render without a fractional part (`1900.0` → `"1900"`).
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// Coerces an optional field to text; absent fields become the empty string.
#[must_use]
pub fn field_text(field: Option<&Scalar>) -> String {
    field.map(Scalar::to_text).unwrap_or_default()
}

/// How an order is handed over to the buyer.
///
/// Declaration order is the batch ordering: home deliveries sort before
/// pickups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentType {
    /// Delivered to the buyer's address; resolved against the locality catalog.
    #[serde(alias = "DOMICILIO")]
    HomeDelivery,
    /// Collected at a carrier branch; resolved against the branch catalog.
    #[serde(alias = "SUCURSAL")]
    Pickup,
}

impl ShipmentType {
    /// Classifies the merchant platform's free-text shipping method.
    ///
    /// Methods mentioning a pickup point ("Punto de retiro") are pickups;
    /// everything else is home delivery.
    #[must_use]
    pub fn from_shipping_method(method: &str) -> Self {
        if method.to_lowercase().contains("punto de retiro") {
            ShipmentType::Pickup
        } else {
            ShipmentType::HomeDelivery
        }
    }
}

impl std::fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShipmentType::HomeDelivery => write!(f, "home_delivery"),
            ShipmentType::Pickup => write!(f, "pickup"),
        }
    }
}

/// One order's shipping address as exported by the merchant platform.
///
/// Read-only input to the matching engine. Exports carry either a typed
/// `shipment_type` or the platform's free-text `shipping_method`; see
/// [`RawAddressRecord::effective_shipment_type`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAddressRecord {
    #[serde(default)]
    pub order_number: Option<Scalar>,
    #[serde(default)]
    pub shipment_type: Option<ShipmentType>,
    #[serde(default)]
    pub shipping_method: Option<Scalar>,
    #[serde(default)]
    pub street: Option<Scalar>,
    #[serde(default)]
    pub house_number: Option<Scalar>,
    #[serde(default)]
    pub floor: Option<Scalar>,
    #[serde(default)]
    pub locality: Option<Scalar>,
    #[serde(default)]
    pub city: Option<Scalar>,
    #[serde(default)]
    pub province: Option<Scalar>,
    #[serde(default)]
    pub postal_code: Option<Scalar>,
}

impl RawAddressRecord {
    /// An empty record of the given shipment type.
    #[must_use]
    pub fn new(shipment_type: ShipmentType) -> Self {
        Self {
            order_number: None,
            shipment_type: Some(shipment_type),
            shipping_method: None,
            street: None,
            house_number: None,
            floor: None,
            locality: None,
            city: None,
            province: None,
            postal_code: None,
        }
    }

    /// The typed shipment type when present, else the classification of
    /// `shipping_method`. A record with neither is a home delivery.
    #[must_use]
    pub fn effective_shipment_type(&self) -> ShipmentType {
        self.shipment_type.unwrap_or_else(|| {
            ShipmentType::from_shipping_method(&field_text(self.shipping_method.as_ref()))
        })
    }
}
