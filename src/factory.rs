//! Host-supplied component construction.
//!
//! The loader never knows how a component object is built. It asks a
//! [`ComponentFactory`] to instantiate each descriptor in load order. Plain
//! closures are factories, and [`FactoryRegistry`] dispatches to builders
//! registered per feature.

use std::collections::HashMap ;
use thiserror::Error ;
use tracing::trace ;

use crate::Descriptor ;



/// Builds a live component from its descriptor.
///
/// Instantiation may perform blocking I/O; the loader calls it on the calling
/// thread, one descriptor at a time, and imposes no timeout.
pub trait ComponentFactory {
    /// The live component produced.
    type Handle ;
    /// Reported to the loader's error handler when instantiation fails.
    type Error: std::error::Error + 'static ;

    /// # Errors
    /// Implementation defined. The loader decides how to proceed through its
    /// error handler.
    fn instantiate( &mut self, descriptor: &Descriptor ) -> Result<Self::Handle, Self::Error> ;
}

impl<F, H, E> ComponentFactory for F
where
    F: FnMut( &Descriptor ) -> Result<H, E>,
    E: std::error::Error + 'static,
{
    type Handle = H ;
    type Error = E ;

    fn instantiate( &mut self, descriptor: &Descriptor ) -> Result<H, E> { self( descriptor ) }
}

/// Error type builders registered with a [`FactoryRegistry`] may return.
pub type BuilderError = Box<dyn std::error::Error + Send + Sync + 'static> ;

type Builder<H> = Box<dyn FnMut( &Descriptor ) -> Result<H, BuilderError> + Send> ;

/// Errors produced by a [`FactoryRegistry`].
#[derive( Debug, Error )]
pub enum FactoryError {
    /// None of the component's features has a registered builder.
    #[error( "No builder registered for component '{component}' (features: {})", features.join( ", " ))]
    NoBuilder { component: String, features: Vec<String> },
    /// The builder for the component failed.
    #[error( "Builder for feature '{feature}' failed on component '{component}': {source}" )]
    Builder { component: String, feature: String, source: BuilderError },
}

/// A [`ComponentFactory`] indexed by capability.
///
/// Builders are registered per feature. A descriptor is built by the builder
/// registered for its own name if there is one, otherwise by the builder of
/// its first other feature in sorted order.
///
/// ```
/// use component_order::{ ComponentFactory, Descriptor, FactoryRegistry };
///
/// let mut registry = FactoryRegistry::new()
///     .with_builder( "storage", | descriptor | Ok( format!( "storage backend {}", descriptor.name() )));
///
/// let sqlite = Descriptor::new( "sqlite" ).with_features([ "storage" ]);
/// assert_eq!( registry.instantiate( &sqlite ).unwrap(), "storage backend sqlite" );
/// assert!( registry.instantiate( &Descriptor::new( "ui" )).is_err() );
/// ```
pub struct FactoryRegistry<H> {
    builders: HashMap<String, Builder<H>>,
}

impl<H> FactoryRegistry<H> {

    pub fn new() -> Self { Self { builders: HashMap::new() }}

    /// Registers `builder` for components providing `feature`, replacing any
    /// previous builder for it.
    pub fn with_builder(
        mut self,
        feature: impl Into<String>,
        builder: impl FnMut( &Descriptor ) -> Result<H, BuilderError> + Send + 'static,
    ) -> Self {
        self.register( feature, builder );
        self
    }

    pub fn register(
        &mut self,
        feature: impl Into<String>,
        builder: impl FnMut( &Descriptor ) -> Result<H, BuilderError> + Send + 'static,
    ) {
        self.builders.insert( feature.into(), Box::new( builder ));
    }

    #[inline] pub fn has_builder( &self, feature: &str ) -> bool { self.builders.contains_key( feature ) }

}

impl<H> Default for FactoryRegistry<H> {
    fn default() -> Self { Self::new() }
}

impl<H> ComponentFactory for FactoryRegistry<H> {
    type Handle = H ;
    type Error = FactoryError ;

    fn instantiate( &mut self, descriptor: &Descriptor ) -> Result<H, FactoryError> {

        let feature = std::iter::once( descriptor.name() )
            .chain( descriptor.features().iter().map( String::as_str ).filter(| feature | *feature != descriptor.name() ))
            .find(| feature | self.builders.contains_key( *feature ))
            .map( str::to_string );

        let Some( feature ) = feature else {
            return Err( FactoryError::NoBuilder {
                component: descriptor.name().to_string(),
                features: descriptor.features().iter().cloned().collect(),
            });
        };
        trace!( component = descriptor.name(), feature = %feature, "Building component" );

        match self.builders.get_mut( &feature ) {
            Some( builder ) => builder( descriptor ).map_err(| source | FactoryError::Builder {
                component: descriptor.name().to_string(),
                feature,
                source,
            }),
            None => Err( FactoryError::NoBuilder {
                component: descriptor.name().to_string(),
                features: descriptor.features().iter().cloned().collect(),
            }),
        }

    }
}

impl<H> std::fmt::Debug for FactoryRegistry<H> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "FactoryRegistry" )
            .field( "features", &self.builders.keys().collect::<Vec<_>>() )
            .finish_non_exhaustive()
    }
}
