//! Customer checkout form

use serde::Deserialize;
use shared::error::AppError;

/// Customer/payment form posted to `/purchase/process`
///
/// Wire names keep the original API's Spanish field names for client
/// compatibility.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerForm {
    #[serde(rename = "nombre_cliente")]
    pub customer_name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "codigo_postal")]
    pub postal_code: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "metodo_pago")]
    pub payment_method: String,
    #[serde(rename = "codigo_cupon", default)]
    pub coupon_code: Option<String>,
}

impl CustomerForm {
    /// Check every required field is non-empty, collecting the missing ones
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("nombre_cliente", &self.customer_name),
            ("direccion", &self.address),
            ("ciudad", &self.city),
            ("codigo_postal", &self.postal_code),
            ("telefono", &self.phone),
            ("pais", &self.country),
            ("metodo_pago", &self.payment_method),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(AppError::validation("Missing required fields")
            .with_detail("missing", serde_json::json!(missing)))
    }

    /// Coupon code, if present and non-empty
    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}
