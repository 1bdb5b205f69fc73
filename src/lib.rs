//! Deterministic load ordering for modular components.
//!
//! Components declare the **features** they provide and the features they
//! depend on. Given the components a host wants, a pool of components that
//! may satisfy their dependencies, and the components already running,
//! `component_order` computes the minimal set of components to load and an
//! order in which every component comes after everything it depends on. It
//! then instantiates them one at a time through a host supplied factory.
//!
//! # Core Concepts
//!
//! - [`Descriptor`]: A component's name, provided features and required
//! 	features. A descriptor always provides its own name.
//!
//! - [`Candidate`]: A descriptor selected during resolution, together with
//! 	why it was selected ([`RequiredBy`], the features it is required for)
//! 	and which other candidates it depends on.
//!
//! - [`Resolver`]: Selects the candidates for a request. Fails with a
//! 	[`ResolutionError`] when a feature has no provider, when two selected
//! 	components provide the same feature, or when dependencies form a cycle.
//!
//! - [`sort`]: Orders candidates so dependencies come first. Independent
//! 	components are ordered by name, so the same input always yields the
//! 	same order.
//!
//! - [`Loader`]: Instantiates an ordered list through a [`ComponentFactory`],
//! 	asking the host's error handler for a [`Decision`] whenever a single
//! 	component fails.
//!
//! - [`Host`]: Keeps the loaded components and feeds them back into each
//! 	resolution as the already satisfied set.
//!
//! Resolution never touches host state. Only loading does, so a failed
//! resolution can be retried with corrected input without rolling anything
//! back.
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible ;
//! use component_order::{ resolve, Decision, Descriptor, Loader, ResolutionError };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Dependencies name features, not components.
//! let log = Descriptor::new( "log" ).with_features([ "logging" ]).shared();
//! let store = Descriptor::new( "store" ).with_features([ "storage" ]).with_deps([ "logging" ]).shared();
//! let app = Descriptor::new( "app" ).with_deps([ "storage", "logging" ]).shared();
//! let unused = Descriptor::new( "unused" ).shared();
//!
//! let available = [ log, store, app.clone(), unused ];
//! let order = resolve([ app.clone() ], available.clone(), [] )?;
//!
//! // Only what is needed, dependencies first.
//! let names = order.iter().map(| candidate | candidate.name() ).collect::<Vec<_>>();
//! assert_eq!( names, [ "log", "store", "app" ]);
//!
//! // Instantiation is up to the host.
//! let mut factory = | descriptor: &Descriptor | Ok::<_, Infallible>( descriptor.name().len() );
//! let loaded = Loader::new( &mut factory )
//! 	.with_error_handler(| _, _ | Decision::Abort )
//! 	.load( &order )?;
//! assert!( loaded.is_complete() );
//!
//! // Missing features are reported per requiring component.
//! let broken = Descriptor::new( "broken" ).with_deps([ "network" ]).shared();
//! match resolve([ broken ], available, [] ) {
//! 	Err( err @ ResolutionError::UnresolvedDependency { .. }) => {
//! 		assert_eq!( err.missing_for( "broken" ), Some( &[ "network".to_string() ][..] ));
//! 	},
//! 	other => panic!( "unexpected: {:?}", other ),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Choosing Between Providers
//!
//! When several pool descriptors provide a feature, discovery picks one
//! according to the [`ProviderPolicy`] and never fails on the ambiguity
//! itself. A provisional provider whose features turn out to be covered by a
//! more general selected component is folded into it. Only when two selected
//! components still share a feature afterwards does resolution fail with
//! [`ResolutionError::DuplicateFeature`].
//!
//! # Feature Flags
//!
//! - `wasm` (default): [`WasmFactory`], a factory instantiating wasmtime
//! 	components, and re-exports of wasmtime's `Engine`, `Component` and
//! 	`Linker`.

mod descriptor ;
mod feature_index ;
mod candidate ;
mod error ;
mod resolver ;
mod sorter ;
mod factory ;
mod loader ;
mod host ;
#[cfg( feature = "wasm" )]
mod wasm ;

#[cfg( feature = "wasm" )]
#[doc( no_inline )]
pub use wasmtime::Engine ;
#[cfg( feature = "wasm" )]
#[doc( no_inline )]
pub use wasmtime::component::{ Component, Linker };
#[doc( no_inline )]
pub use nonempty_collections::{ NEVec, nev };

pub use descriptor::Descriptor ;
pub use feature_index::FeatureIndex ;
pub use candidate::{ Candidate, RequiredBy };
pub use error::{ ResolutionError, InstantiationError, HostError };
pub use resolver::{ Resolver, ProviderPolicy, resolve };
pub use sorter::sort ;
pub use factory::{ ComponentFactory, FactoryRegistry, FactoryError, BuilderError };
pub use loader::{ Loader, Loaded, Aborted, LoadResult, Decision, load };
pub use host::{ Host, LoadReport };
#[cfg( feature = "wasm" )]
pub use wasm::{ WasmFactory, WasmInstance, WasmFactoryError };
