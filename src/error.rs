use std::collections::BTreeMap ;
use itertools::Itertools ;
use nonempty_collections::NEVec ;
use thiserror::Error ;



/// Errors that make a resolution run fail as a whole.
///
/// Resolution never touches host state, so after any of these the caller may
/// fix its input and resolve again without rolling anything back.
#[derive( Debug, Clone, PartialEq, Eq, Error )]
pub enum ResolutionError {

    /// Required features with no provider among the requested, available or
    /// satisfied components. Keyed by the name of the requiring component.
    #[error( "Unresolved dependencies: {}", format_missing( missing ))]
    UnresolvedDependency { missing: BTreeMap<String, Vec<String>> },

    /// Features provided by more than one selected component. The resolver
    /// does not pick a winner.
    #[error( "Duplicate feature providers: {}", format_duplicates( providers ))]
    DuplicateFeature { providers: BTreeMap<String, Vec<String>> },

    /// Dependency cycles among the selected components. Each cycle starts at
    /// its lexicographically smallest member; rotations are reported once.
    #[error( "Circular dependencies: {}", format_cycles( cycles ))]
    CircularDependency { cycles: Vec<NEVec<String>> },

}

impl ResolutionError {

    /// Missing features of one requiring component, if any were reported.
    pub fn missing_for( &self, component: &str ) -> Option<&[String]> {
        match self {
            Self::UnresolvedDependency { missing } => missing.get( component ).map( Vec::as_slice ),
            _ => None,
        }
    }

}

/// Failure of a single component during loading.
///
/// Only produced after resolution succeeded; recoverable through the
/// [`Decision`]( crate::Decision ) returned by the host's error handler.
#[derive( Debug, Error )]
#[error( "Failed to instantiate component '{component}': {source}" )]
pub struct InstantiationError<E: std::error::Error + 'static> {
    pub component: String,
    pub source: E,
}

/// Everything [`Host::load`]( crate::Host::load ) can fail with.
#[derive( Debug, Error )]
pub enum HostError<E: std::error::Error + 'static> {
    #[error( transparent )] Resolution( #[from] ResolutionError ),
    #[error( transparent )] Instantiation( #[from] InstantiationError<E> ),
}

fn format_missing( missing: &BTreeMap<String, Vec<String>> ) -> String {
    missing.iter()
        .map(|( component, features )| format!( "'{}' requires [{}]", component, features.iter().join( ", " )))
        .join( "; " )
}

fn format_duplicates( providers: &BTreeMap<String, Vec<String>> ) -> String {
    providers.iter()
        .map(|( feature, names )| format!( "'{}' provided by [{}]", feature, names.iter().join( ", " )))
        .join( "; " )
}

fn format_cycles( cycles: &[NEVec<String>] ) -> String {
    cycles.iter()
        .map(| cycle | {
            let members = Vec::from( cycle.clone());
            let first = cycle.first().clone();
            members.into_iter().chain( std::iter::once( first )).join( " -> " )
        })
        .join( "; " )
}
