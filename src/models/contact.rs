use serde::{Deserialize, Serialize};

/// A business enquiry submitted through the contact form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub full_name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub website: String,
    pub message: String,
}
