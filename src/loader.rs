//! Sequential loading of resolved components.
//!
//! Load order encodes correctness: a component must not be instantiated
//! before its dependencies. The [`Loader`] therefore instantiates strictly one
//! candidate at a time, in the order it is given, on the calling thread.
//!
//! When an instantiation fails, the host's error handler returns a
//! [`Decision`]:
//!
//! | Decision   | Failure recorded | Handler called again | Continues | Result  |
//! |------------|------------------|----------------------|-----------|---------|
//! | `Continue` | yes              | yes                  | yes       | success |
//! | `Silent`   | yes              | no                   | yes       | success |
//! | `Skip`     | yes              | -                    | no        | success |
//! | `Abort`    | -                | -                    | no        | failure |
//!
//! Without a handler, the first failure aborts the run.

use std::sync::Arc ;
use thiserror::Error ;
use tracing::{ debug, error, warn };

use crate::{ Candidate, ComponentFactory, Descriptor, InstantiationError };



/// What the loader does after an instantiation failure.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash )]
pub enum Decision {
    /// Record the failure and move on to the next candidate.
    Continue,
    /// Like `Continue`, but do not ask again for the rest of this run.
    Silent,
    /// Stop and leave the remaining candidates unloaded. The run succeeds.
    Skip,
    /// Stop. The run fails.
    Abort,
}

/// Outcome of a load run that was not aborted.
pub struct Loaded<H, E: std::error::Error + 'static> {
    /// Live components in the order they were instantiated.
    pub components: Vec<( Arc<Descriptor>, H )>,
    /// Failures the error handler chose to move past.
    pub failures: Vec<InstantiationError<E>>,
    /// Candidates left unprocessed after a [`Decision::Skip`].
    pub skipped: Vec<Arc<Descriptor>>,
}

impl<H, E: std::error::Error + 'static> Loaded<H, E> {

    fn new() -> Self {
        Self { components: Vec::new(), failures: Vec::new(), skipped: Vec::with_capacity( 0 ) }
    }

    /// Names of the loaded components, in load order.
    pub fn names( &self ) -> impl Iterator<Item = &str> {
        self.components.iter().map(|( descriptor, _ )| descriptor.name() )
    }

    #[inline] pub fn is_complete( &self ) -> bool { self.failures.is_empty() && self.skipped.is_empty() }

}

impl<H, E: std::error::Error + 'static> std::fmt::Debug for Loaded<H, E> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "Loaded" )
            .field( "components", &self.names().collect::<Vec<_>>() )
            .field( "failures", &self.failures )
            .field( "skipped", &self.skipped.iter().map(| descriptor | descriptor.name() ).collect::<Vec<_>>() )
            .finish()
    }
}

/// A load run stopped by [`Decision::Abort`] or by a failure without a handler.
///
/// Components instantiated before the failure stay alive in `partial`; they
/// were already handed to the host and are not rolled back.
#[derive( Error )]
#[error( "Loading aborted: {error}" )]
pub struct Aborted<H, E: std::error::Error + 'static> {
    #[source] pub error: InstantiationError<E>,
    pub partial: Loaded<H, E>,
}

impl<H, E: std::error::Error + 'static> std::fmt::Debug for Aborted<H, E> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "Aborted" )
            .field( "error", &self.error )
            .field( "partial", &self.partial )
            .finish()
    }
}

pub type LoadResult<H, E> = Result<Loaded<H, E>, Aborted<H, E>> ;

type ErrorHandler<'a, E> = Box<dyn FnMut( &Descriptor, &E ) -> Decision + 'a> ;

/// Instantiates candidates in order through a [`ComponentFactory`].
///
/// ```
/// use component_order::{ resolve, Decision, Descriptor, Loader };
///
/// let a = Descriptor::new( "a" ).shared();
/// let b = Descriptor::new( "b" ).with_deps([ "a" ]).shared();
/// let order = resolve([ b.clone() ], [ a, b ], []).unwrap();
///
/// let mut factory = | descriptor: &Descriptor | match descriptor.name() {
///     "a" => Err( std::fmt::Error ),
///     name => Ok( name.len() ),
/// };
/// let loaded = Loader::new( &mut factory )
///     .with_error_handler(| _, _ | Decision::Continue )
///     .load( &order )
///     .unwrap();
///
/// assert_eq!( loaded.names().collect::<Vec<_>>(), [ "b" ]);
/// assert_eq!( loaded.failures[ 0 ].component, "a" );
/// ```
pub struct Loader<'a, F: ComponentFactory> {
    factory: &'a mut F,
    on_error: Option<ErrorHandler<'a, F::Error>>,
}

impl<'a, F: ComponentFactory> Loader<'a, F> {

    /// A loader without an error handler: the first failure aborts.
    pub fn new( factory: &'a mut F ) -> Self {
        Self { factory, on_error: None }
    }

    /// Consulted on every instantiation failure until it answers
    /// [`Decision::Silent`].
    pub fn with_error_handler( mut self, on_error: impl FnMut( &Descriptor, &F::Error ) -> Decision + 'a ) -> Self {
        self.on_error = Some( Box::new( on_error ));
        self
    }

    /// Instantiates `ordered` front to back.
    ///
    /// # Errors
    /// Returns [`Aborted`] if the error handler answers [`Decision::Abort`], or
    /// on the first failure when no handler was supplied.
    pub fn load( &mut self, ordered: &[Candidate] ) -> LoadResult<F::Handle, F::Error> {
        self.load_descriptors( ordered.iter().map( Candidate::descriptor ))
    }

    pub(crate) fn load_descriptors<'c>(
        &mut self,
        ordered: impl IntoIterator<Item = &'c Arc<Descriptor>>,
    ) -> LoadResult<F::Handle, F::Error> {

        let mut loaded = Loaded::new();
        let mut silent = false ;
        let mut queue = ordered.into_iter();

        while let Some( descriptor ) = queue.next() {

            let source = match self.factory.instantiate( descriptor ) {
                Ok( handle ) => {
                    debug!( component = descriptor.name(), "Instantiated component" );
                    loaded.components.push(( Arc::clone( descriptor ), handle ));
                    continue ;
                },
                Err( source ) => source,
            };

            let decision = match ( self.on_error.as_mut(), silent ) {
                ( None, _ ) => Decision::Abort,
                ( Some( _ ), true ) => Decision::Continue,
                ( Some( on_error ), false ) => on_error( &**descriptor, &source ),
            };
            let failure = InstantiationError { component: descriptor.name().to_string(), source };

            match decision {
                Decision::Continue | Decision::Silent => {
                    warn!( component = descriptor.name(), error = %failure.source, ?decision, "Component failed to instantiate" );
                    silent |= decision == Decision::Silent ;
                    loaded.failures.push( failure );
                },
                Decision::Skip => {
                    warn!( component = descriptor.name(), error = %failure.source, "Component failed to instantiate, skipping the rest" );
                    loaded.failures.push( failure );
                    loaded.skipped.extend( queue.by_ref().map( Arc::clone ));
                    break ;
                },
                Decision::Abort => {
                    error!( component = descriptor.name(), error = %failure.source, "Component failed to instantiate, aborting" );
                    return Err( Aborted { error: failure, partial: loaded });
                },
            }

        }

        debug!( loaded = loaded.components.len(), failed = loaded.failures.len(), skipped = loaded.skipped.len(), "Finished loading" );
        Ok( loaded )

    }

    /// Gives the factory back.
    pub fn into_factory( self ) -> &'a mut F { self.factory }

}

/// Instantiates `ordered` through `factory`, consulting `on_error` on failures.
///
/// # Errors
/// See [`Loader::load`].
pub fn load<F: ComponentFactory>(
    ordered: &[Candidate],
    factory: &mut F,
    on_error: impl FnMut( &Descriptor, &F::Error ) -> Decision,
) -> LoadResult<F::Handle, F::Error> {
    Loader::new( factory ).with_error_handler( on_error ).load( ordered )
}
