//! Resolution-time bookkeeping around a [`Descriptor`].
//!
//! A [`Candidate`] records why a component was selected and which other
//! selected components it depends on. Dependencies refer to other candidates
//! by name; names are unique within a resolution run.

use std::collections::BTreeSet ;
use std::sync::Arc ;

use crate::Descriptor ;



/// The reason a candidate is part of the selection.
#[derive( Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord )]
pub enum RequiredBy {
    /// Explicitly requested by the caller.
    Requested,
    /// Pulled in to satisfy a dependency of the named candidate.
    Candidate( String ),
}

impl std::fmt::Display for RequiredBy {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        match self {
            Self::Requested => write!( f, "<requested>" ),
            Self::Candidate( name ) => write!( f, "{}", name ),
        }
    }
}

/// A descriptor selected (or provisionally selected) for loading.
///
/// Only the resolver mutates candidates. Once handed to the sorter they are
/// read-only.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Candidate {
    descriptor: Arc<Descriptor>,
    pub(crate) direct_dependencies: BTreeSet<String>,
    pub(crate) all_dependencies: BTreeSet<String>,
    pub(crate) closure_computed: bool,
    pub(crate) required_by: Vec<RequiredBy>,
    pub(crate) required_for: Vec<String>,
}

impl Candidate {

    pub(crate) fn new( descriptor: Arc<Descriptor> ) -> Self {
        Self {
            descriptor,
            direct_dependencies: BTreeSet::new(),
            all_dependencies: BTreeSet::new(),
            closure_computed: false,
            required_by: Vec::new(),
            required_for: Vec::new(),
        }
    }

    pub(crate) fn requested( descriptor: Arc<Descriptor> ) -> Self {
        let mut candidate = Self::new( descriptor );
        candidate.required_by.push( RequiredBy::Requested );
        candidate
    }

    #[inline] pub fn descriptor( &self ) -> &Arc<Descriptor> { &self.descriptor }

    #[inline] pub fn name( &self ) -> &str { self.descriptor.name() }

    /// Names of the selected candidates satisfying this candidate's deps.
    /// Dependencies satisfied by already loaded components are not listed.
    #[inline] pub fn direct_dependencies( &self ) -> &BTreeSet<String> { &self.direct_dependencies }

    /// Transitive closure of [`direct_dependencies`]( Self::direct_dependencies ).
    /// Empty until the resolver has computed it.
    #[inline] pub fn all_dependencies( &self ) -> &BTreeSet<String> { &self.all_dependencies }

    /// Who needs this candidate. Never empty for a resolved candidate.
    #[inline] pub fn required_by( &self ) -> &[RequiredBy] { &self.required_by }

    /// Features this candidate was pulled in to provide.
    #[inline] pub fn required_for( &self ) -> &[String] { &self.required_for }

    #[inline] pub fn is_requested( &self ) -> bool { self.required_by.contains( &RequiredBy::Requested ) }

    /// Holds once the transitive dependencies are known.
    #[inline] pub fn dependencies_fulfilled( &self ) -> bool {
        self.direct_dependencies.is_empty() || self.closure_computed
    }

    /// Whether this candidate can stand in for `other`: everything `other`
    /// was pulled in for is also provided here.
    pub(crate) fn replaces( &self, other: &Candidate ) -> bool {
        !other.is_requested()
            && !other.required_for.is_empty()
            && other.required_for.iter().all(| feature | self.descriptor.provides( feature ))
    }

    /// Absorbs a competing candidate this one replaces.
    pub(crate) fn absorb( &mut self, other: Candidate ) {
        let own = Arc::clone( &self.descriptor );
        self.required_for.extend( other.required_for );
        self.required_by.extend( other.required_by.into_iter()
            .filter(| reason | !matches!( reason, RequiredBy::Candidate( name ) if name == own.name() )));
    }

    pub(crate) fn drop_requirer( &mut self, requirer: &str ) {
        self.required_by.retain(| reason | !matches!( reason, RequiredBy::Candidate( name ) if name == requirer ));
    }

}

impl std::fmt::Display for Candidate {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        write!( f, "{}", self.descriptor.name() )
    }
}
