/// Application routes
///
/// Screens are addressed by path so that links read the same as the
/// catalog's web counterpart (`/product-detail/<id>` and so on).
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    ProductForm,
    ProductList,
    ProductDetail(String),
    Configuration,
    NotFound(String),
}

impl Route {
    /// Parse a path. Unknown paths become [`Route::NotFound`].
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let trimmed = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match trimmed {
            "/" | "" => Route::Home,
            "/product-form" => Route::ProductForm,
            "/product-list" => Route::ProductList,
            "/configuration" => Route::Configuration,
            other => match other.strip_prefix("/product-detail/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Route::ProductDetail(id.to_string())
                }
                _ => Route::NotFound(path.to_string()),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::ProductForm => "/product-form".to_string(),
            Route::ProductList => "/product-list".to_string(),
            Route::ProductDetail(id) => format!("/product-detail/{}", id),
            Route::Configuration => "/configuration".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
