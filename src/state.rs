//! Shared application state
//!
//! Los repositorios se crean una sola vez al arrancar el proceso y se
//! inyectan en un `EntityService` por colección.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::models::{Auto, Cliente, Concesionaria, Entity, Vendor};
use crate::repositories::{InMemoryRepository, Repository};
use crate::services::EntityService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub clientes: Arc<EntityService<Cliente>>,
    pub vendedores: Arc<EntityService<Vendor>>,
    pub concesionarias: Arc<EntityService<Concesionaria>>,
    pub autos: Arc<EntityService<Auto>>,
}

impl AppState {
    /// Clientes, vendedores y autos viven en memoria; las concesionarias
    /// usan el repositorio recibido.
    pub fn new(
        config: EnvironmentConfig,
        concesionarias: Arc<dyn Repository<Concesionaria>>,
    ) -> Self {
        Self {
            config,
            clientes: in_memory_service::<Cliente>(),
            vendedores: in_memory_service::<Vendor>(),
            concesionarias: Arc::new(EntityService::<Concesionaria>::new(concesionarias)),
            autos: in_memory_service::<Auto>(),
        }
    }

    /// Estado completamente en memoria, usado sin base de datos y en tests
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        let concesionarias: Arc<dyn Repository<Concesionaria>> =
            Arc::new(InMemoryRepository::<Concesionaria>::new());
        Self::new(config, concesionarias)
    }
}

fn in_memory_service<E: Entity>() -> Arc<EntityService<E>> {
    let repository: Arc<dyn Repository<E>> = Arc::new(InMemoryRepository::<E>::new());
    Arc::new(EntityService::new(repository))
}
