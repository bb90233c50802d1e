use crate::config::{Config, SCHEMA_VERSION};
use crate::error::{CatalogError, Result, ValidationError};
use crate::filtering::SortSpec;

/// Export formats the CLI can write
pub const EXPORT_FORMATS: [&str; 2] = ["csv", "json"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration, collecting every problem found
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_pagination(config, &mut errors);
        Self::validate_filters(config, &mut errors);
        Self::validate_sorting(config, &mut errors);
        Self::validate_export(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != SCHEMA_VERSION {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_pagination(config: &Config, errors: &mut Vec<ValidationError>) {
        let pagination = &config.pagination;

        if pagination.default_page_size == 0 {
            errors.push(ValidationError::new(
                "pagination.default_page_size",
                "Default page size must be greater than 0",
            ));
        }

        if pagination.max_page_size == 0 {
            errors.push(ValidationError::new(
                "pagination.max_page_size",
                "Max page size must be greater than 0",
            ));
        }

        if pagination.default_page_size > pagination.max_page_size {
            errors.push(ValidationError::new(
                "pagination.default_page_size",
                format!(
                    "Default page size {} exceeds max page size {}",
                    pagination.default_page_size, pagination.max_page_size
                ),
            ));
        }
    }

    fn validate_filters(config: &Config, errors: &mut Vec<ValidationError>) {
        let filters = &config.filters;

        if !filters.price_min.is_finite() || filters.price_min < 0.0 {
            errors.push(ValidationError::new(
                "filters.price_min",
                format!("Price minimum must be non-negative, got {}", filters.price_min),
            ));
        }

        if filters.price_max.is_nan() || filters.price_max < filters.price_min {
            errors.push(ValidationError::new(
                "filters.price_max",
                format!(
                    "Price maximum {} is below minimum {}",
                    filters.price_max, filters.price_min
                ),
            ));
        }
    }

    fn validate_sorting(config: &Config, errors: &mut Vec<ValidationError>) {
        // Unknown options would silently become "featured" at runtime
        let option = config.sorting.default_sort.trim().to_lowercase();
        let parsed = SortSpec::parse(&option);
        if parsed == SortSpec::Featured && option != "featured" {
            errors.push(ValidationError::new(
                "sorting.default_sort",
                format!("Unknown sort option '{}'", config.sorting.default_sort),
            ));
        }
    }

    fn validate_export(config: &Config, errors: &mut Vec<ValidationError>) {
        let format = &config.export.default_format;
        if !EXPORT_FORMATS.contains(&format.as_str()) {
            errors.push(ValidationError::new(
                "export.default_format",
                format!(
                    "Format must be one of {:?}, got '{}'",
                    EXPORT_FORMATS, format
                ),
            ));
        }
    }
}
