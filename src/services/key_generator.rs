use crate::keys::ModuleKey;

/// Produces the registry key for a discovered module type.
///
/// The generator must be injective over the discovered set: two distinct module
/// types mapping to the same key is a registration-time
/// [`DuplicateKey`](crate::registry::RegistryError::DuplicateKey) failure.
pub trait ModuleKeyGenerator: Send + Sync {
    fn generate(&self, type_name: &str) -> ModuleKey;
}

/// Default generator: the module's fully qualified type name is its key.
///
/// Type names are unique per type by construction, so uniqueness holds with no
/// host configuration. Hosts that want shorter or stable-across-refactor keys
/// bind their own generator instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeNameKeyGenerator;

impl ModuleKeyGenerator for TypeNameKeyGenerator {
    fn generate(&self, type_name: &str) -> ModuleKey {
        ModuleKey::from(type_name)
    }
}
