//! Fixtures

use std::{fs, path::PathBuf};

use rusty_money::iso::{Currency, INR};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};

/// Fixture Loading Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog construction error
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Fixture
///
/// Loads named catalog data sets from a base directory, mirroring the JSON
/// resource a storefront would fetch once per page. The shipped sets are
/// priced in INR.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Currency the fixture catalogs are denominated in
    currency: &'static Currency,
}

impl Fixture {
    /// Create a fixture loader with the default base path and currency.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with a custom base path.
    #[must_use]
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            currency: INR,
        }
    }

    /// Use a different currency for loaded catalogs.
    #[must_use]
    pub fn with_currency(mut self, currency: &'static Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Load a catalog from a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the catalog cannot be
    /// built from it.
    pub fn load_catalog(&self, name: &str) -> Result<Catalog<'static>, FixtureError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.json"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(Catalog::from_json_str(&contents, self.currency)?)
    }

    /// Get the currency loaded catalogs are denominated in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rusty_money::iso::USD;
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::products::ProductId;

    use super::*;

    fn write_fixture(base: &Path, name: &str, contents: &str) -> TestResult {
        let dir = base.join("catalog");

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.json")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_the_shipped_demo_catalog() -> TestResult {
        let fixture = Fixture::new();
        let catalog = fixture.load_catalog("demo")?;

        assert!(!catalog.is_empty());
        assert_eq!(catalog.currency(), INR);

        // The demo set carries the string-id limited edition product.
        let limited = catalog.product(&ProductId::from("limited-edition-tshirt"))?;

        assert!(limited.original_price.is_some());

        Ok(())
    }

    #[test]
    fn fixture_loads_the_shipped_minimal_catalog() -> TestResult {
        let fixture = Fixture::new();
        let catalog = fixture.load_catalog("minimal")?;

        assert_eq!(catalog.len(), 3);

        Ok(())
    }

    #[test]
    fn fixture_with_custom_base_path_and_currency() -> TestResult {
        let dir = TempDir::new()?;

        write_fixture(
            dir.path(),
            "tiny",
            r#"[{"id": 1, "name": "Cap", "price": 9.99, "image": "/cap.jpg",
                "inStock": true, "category": "hats", "gender": "men"}]"#,
        )?;

        let fixture = Fixture::with_base_path(dir.path()).with_currency(USD);
        let catalog = fixture.load_catalog("tiny")?;

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.currency(), USD);

        Ok(())
    }

    #[test]
    fn fixture_missing_file_returns_io_error() {
        let fixture = Fixture::with_base_path("./does-not-exist");
        let result = fixture.load_catalog("nope");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn fixture_default_matches_new() {
        let fixture = Fixture::default();

        assert_eq!(fixture.base_path, PathBuf::from("./fixtures"));
        assert_eq!(fixture.currency, INR);
    }
}
