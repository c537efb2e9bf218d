//! # System Constants
//!
//! Conventional module names and identifiers shared by resolution and registration.

/// Sub-module scanned for component config classes (`<entry>.apps`)
pub const DISCOVERY_MODULE_NAME: &str = "apps";

/// Sub-module whose declared sub-resources are imported into the registry (`<name>.models`)
pub const RESOURCES_MODULE_NAME: &str = "models";

/// Class name of the base component configuration type
pub const BASE_CONFIG_CLASS_NAME: &str = "ComponentConfig";

/// Module that declares the base component configuration type
pub const BASE_CONFIG_MODULE: &str = "component_registry.registry";

/// Registry lifecycle operations used in structured logs
pub mod operations {
    pub const RESOLVE: &str = "component.resolve";
    pub const REGISTER: &str = "component.register";
    pub const IMPORT_SUB_RESOURCES: &str = "component.import_sub_resources";
    pub const READY: &str = "component.ready";
}
