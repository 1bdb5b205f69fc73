//! Stateful facade over resolution and loading.
//!
//! A [`Host`] remembers which components it has loaded. Every resolution run
//! receives that set explicitly as its satisfied components, so repeated
//! loads only instantiate what is new.

use std::collections::BTreeSet ;
use std::sync::Arc ;
use tracing::{ debug, info };

use crate::{ Candidate, ComponentFactory, Decision, Descriptor, HostError, InstantiationError, ProviderPolicy, ResolutionError, Resolver };
use crate::loader::{ Loader, Loaded, LoadResult };



/// What a [`Host::load_with`] run loaded and moved past.
#[derive( Debug )]
pub struct LoadReport<E: std::error::Error + 'static> {
    /// Newly loaded components, in load order.
    pub loaded: Vec<String>,
    /// Failures the error handler chose to move past.
    pub failures: Vec<InstantiationError<E>>,
    /// Components left unloaded after a [`Decision::Skip`].
    pub skipped: Vec<String>,
}

/// Owns a [`ComponentFactory`] and the components it has produced.
///
/// ```
/// use std::convert::Infallible ;
/// use component_order::{ Descriptor, Host };
///
/// let core = Descriptor::new( "core" ).shared();
/// let editor = Descriptor::new( "editor" ).with_deps([ "core" ]).shared();
/// let pool = [ core.clone(), editor.clone() ];
///
/// let mut host = Host::new(| descriptor: &Descriptor | Ok::<_, Infallible>( descriptor.name().to_uppercase() ));
/// host.load([ core ], pool.clone() ).unwrap();
///
/// // "core" is already loaded, so only the editor is instantiated.
/// let loaded = host.load([ editor ], pool ).unwrap();
/// assert_eq!( loaded, [ "editor" ]);
/// assert_eq!( host.handle( "core" ).map( String::as_str ), Some( "CORE" ));
/// ```
pub struct Host<F: ComponentFactory> {
    factory: F,
    policy: ProviderPolicy,
    loaded: Vec<( Arc<Descriptor>, F::Handle )>,
}

impl<F: ComponentFactory> Host<F> {

    pub fn new( factory: F ) -> Self {
        Self { factory, policy: ProviderPolicy::default(), loaded: Vec::new() }
    }

    pub fn with_provider_policy( mut self, policy: ProviderPolicy ) -> Self {
        self.policy = policy ;
        self
    }

    /// Resolves `requested` against `available` and the loaded set without
    /// instantiating anything.
    ///
    /// # Errors
    /// See [`Resolver::select`].
    pub fn plan(
        &self,
        requested: impl IntoIterator<Item = Arc<Descriptor>>,
        available: impl IntoIterator<Item = Arc<Descriptor>>,
    ) -> Result<Vec<Candidate>, ResolutionError> {
        Resolver::new( available )
            .with_satisfied( self.loaded.iter().map(|( descriptor, _ )| Arc::clone( descriptor )))
            .with_provider_policy( self.policy )
            .resolve( requested )
    }

    /// Resolves and loads `requested`, stopping at the first failure.
    ///
    /// Returns the names of the newly loaded components, in load order.
    /// Components loaded before a failure stay loaded.
    ///
    /// # Errors
    /// - [`HostError::Resolution`] if the request cannot be resolved; nothing is loaded
    /// - [`HostError::Instantiation`] if a component fails to instantiate
    pub fn load(
        &mut self,
        requested: impl IntoIterator<Item = Arc<Descriptor>>,
        available: impl IntoIterator<Item = Arc<Descriptor>>,
    ) -> Result<Vec<String>, HostError<F::Error>> {
        let order = self.plan( requested, available )?;
        let result = Loader::new( &mut self.factory ).load( &order );
        self.record( result ).map(| report | report.loaded )
    }

    /// Resolves and loads `requested`, consulting `on_error` on failures.
    ///
    /// # Errors
    /// - [`HostError::Resolution`] if the request cannot be resolved; nothing is loaded
    /// - [`HostError::Instantiation`] if `on_error` answers [`Decision::Abort`]
    pub fn load_with(
        &mut self,
        requested: impl IntoIterator<Item = Arc<Descriptor>>,
        available: impl IntoIterator<Item = Arc<Descriptor>>,
        on_error: impl FnMut( &Descriptor, &F::Error ) -> Decision,
    ) -> Result<LoadReport<F::Error>, HostError<F::Error>> {
        let order = self.plan( requested, available )?;
        let result = Loader::new( &mut self.factory ).with_error_handler( on_error ).load( &order );
        self.record( result )
    }

    fn record( &mut self, result: LoadResult<F::Handle, F::Error> ) -> Result<LoadReport<F::Error>, HostError<F::Error>> {
        match result {
            Ok( Loaded { components, failures, skipped }) => Ok( LoadReport {
                loaded: self.adopt( components ),
                failures,
                skipped: skipped.iter().map(| descriptor | descriptor.name().to_string() ).collect(),
            }),
            Err( aborted ) => {
                self.adopt( aborted.partial.components );
                Err( HostError::Instantiation( aborted.error ))
            },
        }
    }

    /// Takes ownership of freshly loaded handles, returning their names.
    fn adopt( &mut self, components: Vec<( Arc<Descriptor>, F::Handle )> ) -> Vec<String> {
        debug!( count = components.len(), "Adopting loaded components" );
        components.into_iter()
            .map(|( descriptor, handle )| {
                info!( component = descriptor.name(), "Component loaded" );
                let name = descriptor.name().to_string();
                self.loaded.push(( descriptor, handle ));
                name
            })
            .collect()
    }

    #[inline] pub fn is_loaded( &self, name: &str ) -> bool {
        self.loaded.iter().any(| ( descriptor, _ ) | descriptor.name() == name )
    }

    /// Whether some loaded component provides `feature`.
    #[inline] pub fn provides( &self, feature: &str ) -> bool {
        self.loaded.iter().any(| ( descriptor, _ ) | descriptor.provides( feature ))
    }

    pub fn handle( &self, name: &str ) -> Option<&F::Handle> {
        self.loaded.iter()
            .find(| ( descriptor, _ ) | descriptor.name() == name )
            .map(|( _, handle )| handle )
    }

    /// Loaded components in load order.
    pub fn loaded( &self ) -> impl Iterator<Item = &Arc<Descriptor>> {
        self.loaded.iter().map(|( descriptor, _ )| descriptor )
    }

    /// Every feature provided by the loaded components.
    pub fn features( &self ) -> BTreeSet<&str> {
        self.loaded.iter()
            .flat_map(|( descriptor, _ )| descriptor.features().iter().map( String::as_str ))
            .collect()
    }

    #[inline] pub fn factory( &self ) -> &F { &self.factory }

    #[inline] pub fn factory_mut( &mut self ) -> &mut F { &mut self.factory }

}

impl<F: ComponentFactory> std::fmt::Debug for Host<F> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "Host" )
            .field( "policy", &self.policy )
            .field( "loaded", &self.loaded().map(| descriptor | descriptor.name() ).collect::<Vec<_>>() )
            .finish_non_exhaustive()
    }
}
