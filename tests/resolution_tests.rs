mod common;

use common::*;
use component_registry::catalog::{Module, ModuleCatalog};
use component_registry::error::{ComponentError, ImportError};
use component_registry::registry::{resolve, ComponentConfig, ConfigClass};
use std::path::Path;
use std::sync::Arc;

#[test]
fn test_bare_package_uses_base_config() {
    let catalog = ShopCatalogBuilder::new().build();

    let config = ComponentConfig::create(&catalog, "shop").unwrap();

    assert!(config.class().is_base());
    assert_eq!(config.name(), "shop");
    assert_eq!(config.label(), "shop");
    assert_eq!(config.verbose_name(), "Shop");
    assert_eq!(config.path().unwrap(), Path::new("/srv/app/shop"));
}

#[test]
fn test_default_marked_class_wins_discovery() {
    let catalog = shop_with_default_config();

    let config = ComponentConfig::create(&catalog, "shop").unwrap();

    assert_eq!(config.class().class_name(), "ShopConfig");
    assert_eq!(config.class().qualified_name(), "shop.apps.ShopConfig");
    assert_eq!(config.to_string(), "<ShopConfig: shop>");
}

#[test]
fn test_single_eligible_class_wins_discovery() {
    let catalog = shop_with_legacy_config();

    let config = ComponentConfig::create(&catalog, "shop").unwrap();
    assert_eq!(config.class().class_name(), "ShopConfig");
}

#[test]
fn test_class_path_bypasses_discovery() {
    let catalog = ShopCatalogBuilder::new()
        .with_discovery(vec![
            ConfigClass::new("ShopConfig").with_name("shop").marked_default(true),
            ConfigClass::new("OtherShopConfig")
                .with_name("shop")
                .marked_default(true),
        ])
        .build();

    assert!(matches!(
        ComponentConfig::create(&catalog, "shop"),
        Err(ComponentError::AmbiguousDefault { .. })
    ));

    let config = ComponentConfig::create(&catalog, "shop.apps.OtherShopConfig").unwrap();
    assert_eq!(config.class().class_name(), "OtherShopConfig");
    assert_eq!(config.name(), "shop");
}

#[test]
fn test_typo_in_class_name_lists_candidates() {
    let catalog = shop_with_default_config();

    let err = ComponentConfig::create(&catalog, "shop.apps.Typo").unwrap_err();
    assert_eq!(
        err,
        ComponentError::ClassNotFound {
            module: "shop.apps".to_string(),
            class_name: "Typo".to_string(),
            candidates: vec!["LegacyShopConfig".to_string(), "ShopConfig".to_string()],
        }
    );
    assert!(err.is_resolution_error());
    assert_eq!(
        err.to_string(),
        "Module 'shop.apps' does not contain a 'Typo' class. \
         Choices are: 'LegacyShopConfig', 'ShopConfig'."
    );
}

#[test]
fn test_typo_with_only_class_lists_it() {
    let catalog = ShopCatalogBuilder::new()
        .with_discovery(vec![ConfigClass::new("ShopConfig").with_name("shop")])
        .build();

    match ComponentConfig::create(&catalog, "shop.apps.Typo").unwrap_err() {
        ComponentError::ClassNotFound { candidates, .. } => {
            assert_eq!(candidates, vec!["ShopConfig".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_ambiguous_defaults_name_candidates_alphabetically() {
    let catalog = ShopCatalogBuilder::new()
        .with_discovery(vec![
            ConfigClass::new("B").with_name("shop").marked_default(true),
            ConfigClass::new("Unmarked").with_name("shop"),
            ConfigClass::new("A").with_name("shop").marked_default(true),
        ])
        .build();

    let err = ComponentConfig::create(&catalog, "shop").unwrap_err();
    assert_eq!(
        err,
        ComponentError::AmbiguousDefault {
            module: "shop.apps".to_string(),
            candidates: vec!["A".to_string(), "B".to_string()],
        }
    );
    assert_eq!(
        err.to_string(),
        "shop.apps declares more than one default ComponentConfig: 'A', 'B'"
    );
}

#[test]
fn test_unmarked_siblings_fall_back_to_base() {
    let catalog = ShopCatalogBuilder::new()
        .with_discovery(vec![
            ConfigClass::new("FirstConfig").with_name("shop"),
            ConfigClass::new("SecondConfig").with_name("shop"),
        ])
        .build();

    let config = ComponentConfig::create(&catalog, "shop").unwrap();
    assert!(config.class().is_base());
    assert_eq!(config.name(), "shop");
}

#[test]
fn test_non_config_member_is_rejected() {
    let catalog = ShopCatalogBuilder::new()
        .with_module(Module::package("shop.helpers", "/srv/app/shop").with_object("Formatter", "class"))
        .build();

    assert_eq!(
        ComponentConfig::create(&catalog, "shop.helpers.Formatter").unwrap_err(),
        ComponentError::NotAConfigSubclass {
            entry: "shop.helpers.Formatter".to_string()
        }
    );
}

#[test]
fn test_class_without_identity_is_rejected() {
    let catalog = ShopCatalogBuilder::new()
        .with_discovery(vec![ConfigClass::new("AnonymousConfig")])
        .build();

    let err = ComponentConfig::create(&catalog, "shop.apps.AnonymousConfig").unwrap_err();
    assert_eq!(
        err,
        ComponentError::MissingIdentityAttribute {
            entry: "shop.apps.AnonymousConfig".to_string()
        }
    );
    assert_eq!(
        err.to_string(),
        "'shop.apps.AnonymousConfig' must supply a name attribute."
    );
}

#[test]
fn test_unimportable_identity_names_attribute() {
    let catalog = ShopCatalogBuilder::new()
        .with_discovery(vec![ConfigClass::new("ShopConfig").with_name("shopp")])
        .build();

    let err = ComponentConfig::create(&catalog, "shop").unwrap_err();
    assert_eq!(
        err,
        ComponentError::BadDeclaredIdentity {
            name: "shopp".to_string(),
            attribute: "shop.apps.ShopConfig.name".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "Cannot import 'shopp'. Check that 'shop.apps.ShopConfig.name' is correct."
    );
}

#[test]
fn test_reexported_class_keeps_declaring_module_in_diagnostics() {
    let core = Arc::new(ConfigClass::new("CoreConfig").declared_in("core.apps").with_name("kore"));
    let catalog = ShopCatalogBuilder::new()
        .with_module(Module::package("shop.apps", "/srv/app/shop").with_config_as("ShopConfig", core))
        .build();

    assert_eq!(
        ComponentConfig::create(&catalog, "shop").unwrap_err(),
        ComponentError::BadDeclaredIdentity {
            name: "kore".to_string(),
            attribute: "core.apps.CoreConfig.name".to_string(),
        }
    );
}

#[test]
fn test_missing_module_propagates_import_error() {
    let catalog = ModuleCatalog::new();

    let err = ComponentConfig::create(&catalog, "inventory").unwrap_err();
    assert_eq!(
        err,
        ComponentError::Import(ImportError::ModuleNotFound {
            module: "inventory".to_string()
        })
    );
    assert_eq!(err.to_string(), "No module named 'inventory'");
}

#[test]
fn test_module_path_wins_over_class_path() {
    let catalog = ModuleCatalog::new();
    catalog.declare(Module::package("shop", "/srv/app/shop"));
    catalog.declare(Module::package("shop.apps", "/srv/app/shop"));
    catalog.declare(Module::package("shop.apps.Typo", "/srv/app/shop"));

    let config = ComponentConfig::create(&catalog, "shop.apps.Typo").unwrap();
    assert!(config.class().is_base());
    assert_eq!(config.label(), "Typo");
}

#[test]
fn test_invalid_label_override_is_rejected() {
    let catalog = ShopCatalogBuilder::new()
        .with_discovery(vec![ConfigClass::new("ShopConfig")
            .with_name("shop")
            .with_label("shop-front")])
        .build();

    assert_eq!(
        ComponentConfig::create(&catalog, "shop").unwrap_err(),
        ComponentError::InvalidLabel {
            label: "shop-front".to_string()
        }
    );
}

#[test]
fn test_nested_package_derives_label_from_last_segment() {
    let catalog = ModuleCatalog::new();
    declare_package_chain(&catalog, "contrib.billing.invoices", "/srv/app");

    let config = ComponentConfig::create(&catalog, "contrib.billing.invoices").unwrap();
    assert_eq!(config.label(), "invoices");
    assert_eq!(config.verbose_name(), "Invoices");
    assert_eq!(
        config.path().unwrap(),
        Path::new("/srv/app/contrib/billing/invoices")
    );
}

#[test]
fn test_resolving_twice_yields_equal_identity() {
    let catalog = shop_with_default_config();

    let first = ComponentConfig::create(&catalog, "shop").unwrap();
    let second = ComponentConfig::create(&catalog, "shop").unwrap();

    assert_eq!(first.label(), second.label());
    assert_eq!(first.name(), second.name());
    assert_eq!(first.verbose_name(), second.verbose_name());
    assert_eq!(first.path().unwrap(), second.path().unwrap());
    assert!(catalog.import_count("shop") >= 2);
}

#[test]
fn test_resolve_returns_imported_module() {
    let catalog = shop_with_default_config();

    let resolved = resolve(&catalog, "shop.apps.ShopConfig").unwrap();
    assert_eq!(resolved.name, "shop");
    assert_eq!(resolved.module.name(), "shop");
    assert_eq!(resolved.class.class_name(), "ShopConfig");
}

#[test]
fn test_namespace_package_requires_explicit_path() {
    let catalog = ModuleCatalog::new();
    catalog.declare(Module::namespace("plugins", ["/opt/a/plugins", "/opt/b/plugins"]));

    let config = ComponentConfig::create(&catalog, "plugins").unwrap();
    let err = config.path().unwrap_err();
    assert!(matches!(err, ComponentError::UnresolvableLocation { .. }));
    assert!(err.to_string().contains("multiple filesystem locations"));
}
