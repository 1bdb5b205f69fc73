//! A [`ComponentFactory`] for WebAssembly components.
//!
//! Each descriptor name maps to a compiled wasmtime [`Component`]. Loading a
//! descriptor creates a fresh [`Store`] holding a context built for that
//! descriptor and instantiates the component through a linker shared by all
//! components of the factory.

use std::collections::HashMap ;
use thiserror::Error ;
use wasmtime::{ Engine, Store };
use wasmtime::component::{ Component, Instance, Linker };

use crate::{ ComponentFactory, Descriptor };



/// Errors produced by a [`WasmFactory`].
#[derive( Debug, Error )]
pub enum WasmFactoryError {
    /// No component was registered under the descriptor's name.
    #[error( "No wasm component registered for '{0}'" )]
    MissingComponent( String ),
    /// Wasmtime failed to instantiate the component.
    #[error( "Failed to instantiate wasm component: {0}" )]
    Instantiation( wasmtime::Error ),
}

/// A live WASM component: its store and instance.
pub struct WasmInstance<Ctx: 'static> {
    pub store: Store<Ctx>,
    pub instance: Instance,
}

impl<Ctx: std::fmt::Debug + 'static> std::fmt::Debug for WasmInstance<Ctx> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "WasmInstance" )
            .field( "data", self.store.data() )
            .finish_non_exhaustive()
    }
}

/// Instantiates registered wasm components by descriptor name.
///
/// ```
/// use component_order::{ resolve, Descriptor, Engine, Component, Loader, WasmFactory };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = Engine::default();
/// let mut factory = WasmFactory::new( &engine, | descriptor: &Descriptor | descriptor.name().to_string() )
///     .with_component( "leaf", Component::new( &engine, "(component)" )?)
///     .with_component( "root", Component::new( &engine, "(component)" )?);
///
/// let leaf = Descriptor::new( "leaf" ).shared();
/// let root = Descriptor::new( "root" ).with_deps([ "leaf" ]).shared();
/// let order = resolve([ root.clone() ], [ leaf, root ], [] )?;
///
/// let loaded = Loader::new( &mut factory ).load( &order )?;
/// assert_eq!( loaded.names().collect::<Vec<_>>(), [ "leaf", "root" ]);
/// # Ok(())
/// # }
/// ```
pub struct WasmFactory<Ctx: 'static> {
    engine: Engine,
    linker: Linker<Ctx>,
    components: HashMap<String, Component>,
    #[allow( clippy::type_complexity )]
    context: Box<dyn FnMut( &Descriptor ) -> Ctx + Send>,
}

impl<Ctx: 'static> WasmFactory<Ctx> {

    /// Creates a factory with an empty linker. `context` builds the store
    /// data for each instantiated descriptor.
    pub fn new( engine: &Engine, context: impl FnMut( &Descriptor ) -> Ctx + Send + 'static ) -> Self {
        Self {
            engine: engine.clone(),
            linker: Linker::new( engine ),
            components: HashMap::new(),
            context: Box::new( context ),
        }
    }

    /// Uses `linker` for every instantiation. Host exports added to it are
    /// visible to all components.
    pub fn with_linker( mut self, linker: Linker<Ctx> ) -> Self {
        self.linker = linker ;
        self
    }

    /// Registers the component loaded for descriptors named `name`.
    pub fn with_component( mut self, name: impl Into<String>, component: Component ) -> Self {
        self.components.insert( name.into(), component );
        self
    }

    #[inline] pub fn linker_mut( &mut self ) -> &mut Linker<Ctx> { &mut self.linker }

}

impl<Ctx: 'static> ComponentFactory for WasmFactory<Ctx> {
    type Handle = WasmInstance<Ctx> ;
    type Error = WasmFactoryError ;

    fn instantiate( &mut self, descriptor: &Descriptor ) -> Result<WasmInstance<Ctx>, WasmFactoryError> {
        let component = self.components.get( descriptor.name() )
            .ok_or_else(|| WasmFactoryError::MissingComponent( descriptor.name().to_string() ))?;
        let mut store = Store::new( &self.engine, ( self.context )( descriptor ));
        let instance = self.linker.instantiate( &mut store, component )
            .map_err( WasmFactoryError::Instantiation )?;
        Ok( WasmInstance { store, instance })
    }
}
