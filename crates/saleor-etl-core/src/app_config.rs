use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// GraphQL endpoint of the catalog service, e.g. `http://localhost:8000/graphql/`.
    pub api_url: String,
    /// Bearer token sent in the `Authorization` header of every request.
    pub secret: String,
    pub excel_file_location: String,
    pub excel_file_name: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Maximum number of data rows (header excluded) read from the sheet.
    pub row_limit: usize,
    /// Product type every imported product is created under.
    pub product_type_name: String,
    /// Unit attached to the weight column, e.g. `"LB"`.
    pub weight_unit: String,
}

impl AppConfig {
    /// Path of the spreadsheet to import, built from `EXCEL_FILE_LOCATION`
    /// and `EXCEL_FILE_NAME`. `None` when no file name is configured.
    #[must_use]
    pub fn source_path(&self) -> Option<PathBuf> {
        self.excel_file_name
            .as_deref()
            .map(|name| PathBuf::from(&self.excel_file_location).join(name))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url)
            .field("secret", &"[redacted]")
            .field("excel_file_location", &self.excel_file_location)
            .field("excel_file_name", &self.excel_file_name)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("row_limit", &self.row_limit)
            .field("product_type_name", &self.product_type_name)
            .field("weight_unit", &self.weight_unit)
            .finish()
    }
}
