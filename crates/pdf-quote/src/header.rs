use crate::types::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Issuing company and quote number
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub branch: String,
    pub address: String,
    pub quote_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub name: String,
    /// National id or tax registration number
    pub tax_id: String,
    pub address: String,
    pub phone: String,
    pub country: String,
    pub province: String,
    pub district: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Header metadata printed above the quote detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteHeader {
    pub company: CompanyInfo,
    pub client: ClientInfo,
    pub vendor: VendorInfo,
    /// Bank accounts, one per line
    pub bank_accounts: String,
    pub notes: String,
}

impl Default for QuoteHeader {
    fn default() -> Self {
        Self {
            company: CompanyInfo::default(),
            client: ClientInfo::default(),
            vendor: VendorInfo::default(),
            bank_accounts: String::new(),
            notes: "—".to_string(),
        }
    }
}

impl QuoteHeader {
    /// Load header from JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Save header to JSON file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
