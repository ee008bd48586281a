//! Parameter registry for runtime configuration
//!
//! A minimal registry for storing and managing configuration parameters.
//! Entries carry a default and min/max bounds; writes outside the bounds or
//! to read-only entries are rejected. Persistence is out of scope here, the
//! `modified` flag tells an outer storage layer what needs saving.

use bitflags::bitflags;

/// Maximum number of registered parameters.
const MAX_PARAMS: usize = 64;

/// Parameter type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// 32-bit floating point parameter
    Float,
    /// 32-bit unsigned integer parameter
    Uint32,
}

/// Parameter value (union of supported types)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Float value
    Float(f32),
    /// Unsigned integer value
    Uint32(u32),
}

impl ParamValue {
    /// Get parameter type
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Float(_) => ParamType::Float,
            ParamValue::Uint32(_) => ParamType::Uint32,
        }
    }

    /// Value as f32 regardless of stored type.
    pub fn as_f32(&self) -> f32 {
        match self {
            ParamValue::Float(v) => *v,
            ParamValue::Uint32(v) => *v as f32,
        }
    }

    /// Value as u32 regardless of stored type.
    pub fn as_u32(&self) -> u32 {
        match self {
            ParamValue::Float(v) => *v as u32,
            ParamValue::Uint32(v) => *v,
        }
    }
}

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter is hidden from the ground station parameter list
        const HIDDEN = 0b0000_0001;
        /// Parameter cannot be modified at runtime
        const READ_ONLY = 0b0000_0010;
    }
}

/// Parameter metadata (definition and current value)
#[derive(Debug, Clone)]
pub struct ParamMetadata {
    /// Parameter name (max 16 characters)
    pub name: &'static str,
    /// Parameter type
    pub param_type: ParamType,
    /// Current value
    pub value: ParamValue,
    /// Default value
    pub default: ParamValue,
    /// Minimum allowed value
    pub min: ParamValue,
    /// Maximum allowed value
    pub max: ParamValue,
    /// Parameter flags
    pub flags: ParamFlags,
    /// Modified flag (true if changed since registration)
    pub modified: bool,
}

impl ParamMetadata {
    /// Create new parameter metadata with Float type
    pub const fn new_float(name: &'static str, default: f32, min: f32, max: f32) -> Self {
        Self {
            name,
            param_type: ParamType::Float,
            value: ParamValue::Float(default),
            default: ParamValue::Float(default),
            min: ParamValue::Float(min),
            max: ParamValue::Float(max),
            flags: ParamFlags::empty(),
            modified: false,
        }
    }

    /// Create new parameter metadata with Uint32 type
    pub const fn new_uint32(name: &'static str, default: u32, min: u32, max: u32) -> Self {
        Self {
            name,
            param_type: ParamType::Uint32,
            value: ParamValue::Uint32(default),
            default: ParamValue::Uint32(default),
            min: ParamValue::Uint32(min),
            max: ParamValue::Uint32(max),
            flags: ParamFlags::empty(),
            modified: false,
        }
    }

    /// Attach flags to the definition.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Validate value is within bounds
    pub fn is_valid(&self, value: ParamValue) -> bool {
        if value.param_type() != self.param_type {
            return false;
        }

        match (value, self.min, self.max) {
            (ParamValue::Float(v), ParamValue::Float(min), ParamValue::Float(max)) => {
                v >= min && v <= max
            }
            (ParamValue::Uint32(v), ParamValue::Uint32(min), ParamValue::Uint32(max)) => {
                v >= min && v <= max
            }
            _ => false,
        }
    }
}

/// Parameter registry error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Parameter not found
    NotFound,
    /// Invalid parameter value (out of bounds or wrong type)
    InvalidValue,
    /// Parameter is read-only
    ReadOnly,
    /// Parameter list full
    Full,
}

/// In-memory parameter registry
#[derive(Default)]
pub struct ParameterRegistry {
    params: heapless::Vec<ParamMetadata, MAX_PARAMS>,
}

impl ParameterRegistry {
    /// Create new empty parameter registry
    pub fn new() -> Self {
        Self {
            params: heapless::Vec::new(),
        }
    }

    /// Register a parameter
    pub fn register(&mut self, param: ParamMetadata) -> Result<(), RegistryError> {
        self.params.push(param).map_err(|_| RegistryError::Full)
    }

    /// Get parameter count
    pub fn count(&self) -> usize {
        self.params.len()
    }

    /// Get parameter by name
    pub fn get_by_name(&self, name: &str) -> Option<&ParamMetadata> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Get parameter by index
    pub fn get_by_index(&self, index: usize) -> Option<&ParamMetadata> {
        self.params.get(index)
    }

    /// Set parameter by name
    pub fn set_by_name(&mut self, name: &str, value: ParamValue) -> Result<(), RegistryError> {
        let param = self
            .params
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or(RegistryError::NotFound)?;

        if param.flags.contains(ParamFlags::READ_ONLY) {
            return Err(RegistryError::ReadOnly);
        }

        if !param.is_valid(value) {
            return Err(RegistryError::InvalidValue);
        }

        param.value = value;
        param.modified = true;
        Ok(())
    }

    /// Reset all parameters to their defaults
    pub fn reset_to_defaults(&mut self) {
        for param in self.params.iter_mut() {
            param.value = param.default;
            param.modified = false;
        }
    }

    /// Check if any parameters have been modified
    pub fn has_modified(&self) -> bool {
        self.params.iter().any(|p| p.modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_metadata_validation() {
        let param = ParamMetadata::new_float("TEST_PARAM", 10.0, 0.0, 100.0);

        assert!(param.is_valid(ParamValue::Float(50.0)));
        assert!(param.is_valid(ParamValue::Float(0.0)));
        assert!(param.is_valid(ParamValue::Float(100.0)));
        assert!(!param.is_valid(ParamValue::Float(-1.0)));
        assert!(!param.is_valid(ParamValue::Float(101.0)));
        assert!(!param.is_valid(ParamValue::Uint32(50)));
    }

    #[test]
    fn test_registry_register_and_count() {
        let mut registry = ParameterRegistry::new();

        assert!(registry
            .register(ParamMetadata::new_float("PARAM1", 1.0, 0.0, 10.0))
            .is_ok());
        assert!(registry
            .register(ParamMetadata::new_uint32("PARAM2", 5, 0, 100))
            .is_ok());
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_registry_get_by_name() {
        let mut registry = ParameterRegistry::new();
        registry
            .register(ParamMetadata::new_float("TEST", 1.0, 0.0, 10.0))
            .unwrap();

        let param = registry.get_by_name("TEST").unwrap();
        assert_eq!(param.name, "TEST");
        assert_eq!(param.value, ParamValue::Float(1.0));

        assert!(registry.get_by_name("NONEXISTENT").is_none());
    }

    #[test]
    fn test_registry_set_by_name() {
        let mut registry = ParameterRegistry::new();
        registry
            .register(ParamMetadata::new_float("TEST", 1.0, 0.0, 10.0))
            .unwrap();

        assert!(registry.set_by_name("TEST", ParamValue::Float(5.0)).is_ok());
        let param = registry.get_by_name("TEST").unwrap();
        assert_eq!(param.value, ParamValue::Float(5.0));
        assert!(param.modified);

        assert_eq!(
            registry.set_by_name("TEST", ParamValue::Float(11.0)),
            Err(RegistryError::InvalidValue)
        );
        assert_eq!(
            registry.set_by_name("NONEXISTENT", ParamValue::Float(5.0)),
            Err(RegistryError::NotFound)
        );
    }

    #[test]
    fn test_registry_read_only_rejected() {
        let mut registry = ParameterRegistry::new();
        registry
            .register(
                ParamMetadata::new_uint32("HW_REV", 2, 0, 10).with_flags(ParamFlags::READ_ONLY),
            )
            .unwrap();

        assert_eq!(
            registry.set_by_name("HW_REV", ParamValue::Uint32(3)),
            Err(RegistryError::ReadOnly)
        );
        assert_eq!(
            registry.get_by_name("HW_REV").unwrap().value,
            ParamValue::Uint32(2)
        );
    }

    #[test]
    fn test_registry_reset_to_defaults() {
        let mut registry = ParameterRegistry::new();
        registry
            .register(ParamMetadata::new_float("TEST", 1.0, 0.0, 10.0))
            .unwrap();
        registry.set_by_name("TEST", ParamValue::Float(7.0)).unwrap();
        assert!(registry.has_modified());

        registry.reset_to_defaults();
        assert!(!registry.has_modified());
        assert_eq!(
            registry.get_by_name("TEST").unwrap().value,
            ParamValue::Float(1.0)
        );
    }
}
