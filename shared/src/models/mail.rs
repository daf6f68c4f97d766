//! Mail delivery metadata

use serde::{Deserialize, Serialize};

/// Delivery metadata returned after a receipt email is dispatched
///
/// Field names follow the wire contract of the finalize endpoint
/// (`mailInfo` in the response body).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailInfo {
    pub message_id: String,
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
}
