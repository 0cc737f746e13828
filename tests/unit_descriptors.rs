use scoped_lifetimes::{
    key_of_trait, key_of_type, Key, Lifetime, LifetimeSamplesModule, ScopedService, ServiceCollection,
    ServiceCollectionExt,
};
use std::any::TypeId;

#[test]
fn descriptors_follow_registration_order() {
    let mut services = ServiceCollection::new().add_module(LifetimeSamplesModule).unwrap();
    services.add_singleton(5u16);

    let descriptors = services.get_service_descriptors();
    let lifetimes: Vec<_> = descriptors.iter().map(|d| d.lifetime).collect();
    assert_eq!(
        lifetimes,
        vec![Lifetime::Transient, Lifetime::Scoped, Lifetime::Singleton, Lifetime::Singleton]
    );
    assert!(descriptors[..3].iter().all(|d| d.is_trait() && d.impl_type_name.is_none()));
    assert_eq!(descriptors[3].type_name(), "u16");
    assert_eq!(descriptors[3].impl_type_name, Some("u16"));
}

#[test]
fn provider_exposes_the_same_table() {
    let services = ServiceCollection::new().add_module(LifetimeSamplesModule).unwrap();
    let before: Vec<_> = services.get_service_descriptors().iter().map(|d| d.role).collect();

    let provider = services.build();
    let after: Vec<_> = provider.service_descriptors().iter().map(|d| d.role).collect();
    assert_eq!(before, after);
    assert!(provider.is_registered(&key_of_trait::<dyn ScopedService>()));
}

#[test]
fn descriptors_serialize_without_the_key() {
    let mut services = ServiceCollection::new();
    services.add_singleton(1u8);

    let json = serde_json::to_value(services.get_service_descriptors()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "role": "u8", "lifetime": "singleton", "impl_type_name": "u8" }])
    );
}

#[test]
fn keys_compare_by_identity() {
    assert_eq!(key_of_type::<u8>(), Key::Type(TypeId::of::<u8>(), "another name"));
    assert_ne!(key_of_type::<u8>(), key_of_type::<u16>());
    assert_eq!(key_of_trait::<dyn ScopedService>(), key_of_trait::<dyn ScopedService>());
    assert_ne!(key_of_type::<u8>(), Key::Trait("u8"));
}
