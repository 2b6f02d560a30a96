//! Reading converters for database values
//!
//! Large text columns (CLOBs) are not returned inline; the store hands out a
//! [`Clob`] handle and a registered [`ClobConverter`] turns it into a field
//! value.

use std::sync::Arc;

use crate::errors::{BrickstoreError, ExError, ExErrorKind, Result};

/// Handle to a large character object
///
/// Positions and lengths count characters, and positions are 1-indexed.
pub trait Clob {
    /// Number of characters in the value
    fn length(&self) -> Result<u64>;

    /// `len` characters starting at 1-indexed `pos`
    fn sub_string(&self, pos: u64, len: u32) -> Result<String>;
}

/// Converts a [`Clob`] into an in-memory string
pub trait ClobConverter: Send + Sync {
    fn convert(&self, clob: &dyn Clob) -> Result<String>;
}

pub const CLOB_CONVERSION_FAILED: &str = "Failed to convert CLOB to String.";

/// Reads the whole CLOB in one range
///
/// Zero length yields `""` without reading. Any failure, including a length
/// that does not fit a single range read, is a terminal `Conversion` error
/// wrapping the cause.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClobToStringConverter;

impl ClobToStringConverter {
    fn read(clob: &dyn Clob) -> Result<String> {
        let length = clob.length()?;
        if length == 0 {
            return Ok(String::new());
        }

        let len = u32::try_from(length).map_err(|_| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("clob_length")
                .with_message(format!("CLOB length {} exceeds a single read", length))
        })?;

        clob.sub_string(1, len)
    }
}

impl ClobConverter for ClobToStringConverter {
    fn convert(&self, clob: &dyn Clob) -> Result<String> {
        Self::read(clob).map_err(|cause| {
            ExError::new(ExErrorKind::Conversion)
                .with_op("convert_clob")
                .with_message(CLOB_CONVERSION_FAILED)
                .with_source(cause)
        })
    }
}

/// Converters registered for the mapping layer
#[derive(Clone, Default)]
pub struct CustomConversions {
    clob: Option<Arc<dyn ClobConverter>>,
}

impl CustomConversions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the converter used for CLOB columns, replacing any previous one
    pub fn add_clob_converter(&mut self, converter: Arc<dyn ClobConverter>) {
        self.clob = Some(converter);
    }

    pub fn has_clob_converter(&self) -> bool {
        self.clob.is_some()
    }

    /// Read `clob` (stored in `column`) through the registered converter
    pub fn read_clob(&self, column: &str, clob: &dyn Clob) -> Result<String> {
        match &self.clob {
            Some(converter) => converter.convert(clob),
            None => Err(BrickstoreError::MissingClobConverter {
                column: column.to_string(),
            }
            .into()),
        }
    }
}

impl std::fmt::Debug for CustomConversions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomConversions")
            .field("clob", &self.clob.is_some())
            .finish()
    }
}

/// Hook for adding converters to a [`CustomConversions`] registry
pub trait ConversionCustomizer: Send + Sync {
    fn customize(&self, conversions: &mut CustomConversions);
}

impl<F> ConversionCustomizer for F
where
    F: Fn(&mut CustomConversions) + Send + Sync,
{
    fn customize(&self, conversions: &mut CustomConversions) {
        self(conversions)
    }
}
