use crate::types::{Product, ProductId, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered product catalog, read once at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a JSON array of product records
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// First product carrying `id`
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Outcome of a catalog load that never fails outright
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    /// User-facing message when the catalog could not be read
    pub error: Option<String>,
}

pub async fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref().to_owned();

    let bytes = tokio::fs::read(&path).await?;

    // JSON parsing is CPU-bound, spawn blocking
    let catalog = tokio::task::spawn_blocking(move || Catalog::from_json(&bytes)).await??;

    log::info!(
        "Loaded {} product(s) from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Load the catalog, falling back to an empty one with a message on failure.
///
/// The rest of the quote stays usable with an empty catalog.
pub async fn load_catalog_or_empty(path: impl AsRef<Path>) -> CatalogLoad {
    let path = path.as_ref();
    match load_catalog(path).await {
        Ok(catalog) => CatalogLoad {
            catalog,
            error: None,
        },
        Err(e) => {
            log::warn!("Failed to load catalog {}: {}", path.display(), e);
            CatalogLoad {
                catalog: Catalog::default(),
                error: Some(load_error_message(path)),
            }
        }
    }
}

fn load_error_message(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("Could not load {}", name)
}
