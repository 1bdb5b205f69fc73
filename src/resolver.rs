//! Dependency resolution.
//!
//! The [`Resolver`] turns a list of requested descriptors into the minimal set
//! of [`Candidate`]s that has to be loaded for every requested component to
//! find its dependencies. It runs in phases:
//!
//! 1. Discovery: breadth-first walk over required features, picking one
//! 	provider per feature according to the [`ProviderPolicy`].
//! 2. Redundancy elimination: a provisional provider whose features are
//! 	covered by a more general candidate is folded into it.
//! 3. Duplicate detection: no feature may end up provided twice.
//! 4. Linking and closure: direct dependencies are bound to the surviving
//! 	candidates and their transitive closure is computed, which also detects
//! 	cycles.
//! 5. Pruning: candidates nothing requires any more are dropped.
//!
//! The result is handed to [`sort`]( crate::sort ) to obtain a load order.
//! Nothing here touches the host: resolving is always safe to retry.

use std::collections::{ BTreeMap, BTreeSet, HashSet, VecDeque };
use std::sync::Arc ;
use itertools::Itertools ;
use nonempty_collections::NEVec ;
use pipe_trait::Pipe ;
use tracing::{ debug, trace };

use crate::{ Candidate, Descriptor, FeatureIndex, ResolutionError, RequiredBy };
use crate::sorter::sort ;



/// How to pick a provider when several pool descriptors provide a feature.
///
/// Ambiguity is never an error during discovery. It only becomes one when
/// more than one provider of a feature survives redundancy elimination.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, Default )]
pub enum ProviderPolicy {
    /// The first provider in pool order. Requested descriptors come before
    /// the available pool.
    #[default] FirstInPool,
    /// A provider that was already discovered during this run, falling back
    /// to the first in pool order.
    PreferDiscovered,
}

/// Computes which components to load for a request.
///
/// The already loaded components are passed in explicitly through
/// [`with_satisfied`]( Self::with_satisfied ); they satisfy dependencies but
/// are never selected again.
///
/// ```
/// use component_order::{ Descriptor, Resolver };
///
/// let x = Descriptor::new( "x" ).with_deps([ "f1" ]).shared();
/// let y = Descriptor::new( "y" ).with_features([ "f1" ]).shared();
///
/// let order = Resolver::new([ x.clone(), y ]).resolve([ x ]).unwrap();
/// let names = order.iter().map(| candidate | candidate.name()).collect::<Vec<_>>();
/// assert_eq!( names, [ "y", "x" ]);
/// ```
#[derive( Debug, Clone, Default )]
pub struct Resolver {
    available: Vec<Arc<Descriptor>>,
    satisfied: Vec<Arc<Descriptor>>,
    policy: ProviderPolicy,
}

impl Resolver {

    /// Creates a resolver drawing transitive dependencies from `available`.
    pub fn new( available: impl IntoIterator<Item = Arc<Descriptor>> ) -> Self {
        Self {
            available: available.into_iter().collect(),
            satisfied: Vec::with_capacity( 0 ),
            policy: ProviderPolicy::default(),
        }
    }

    /// Components treated as already loaded.
    pub fn with_satisfied( mut self, satisfied: impl IntoIterator<Item = Arc<Descriptor>> ) -> Self {
        self.satisfied = satisfied.into_iter().collect();
        self
    }

    pub fn with_provider_policy( mut self, policy: ProviderPolicy ) -> Self {
        self.policy = policy ;
        self
    }

    #[inline] pub fn provider_policy( &self ) -> ProviderPolicy { self.policy }

    /// Resolves `requested` and returns the candidates in load order.
    ///
    /// # Errors
    /// See [`select`]( Self::select ).
    pub fn resolve(
        &self,
        requested: impl IntoIterator<Item = Arc<Descriptor>>,
    ) -> Result<Vec<Candidate>, ResolutionError> {
        self.select( requested )?.pipe( sort ).pipe( Ok )
    }

    /// Resolves `requested` into the minimal candidate set, without ordering it.
    ///
    /// Requested descriptors whose name is already satisfied are skipped.
    ///
    /// # Errors
    /// - [`ResolutionError::UnresolvedDependency`] if a required feature has no provider
    /// - [`ResolutionError::DuplicateFeature`] if two selected candidates provide the same feature
    /// - [`ResolutionError::CircularDependency`] if the selected candidates depend on each other in a loop
    pub fn select(
        &self,
        requested: impl IntoIterator<Item = Arc<Descriptor>>,
    ) -> Result<Vec<Candidate>, ResolutionError> {

        let requested = requested.into_iter()
            .unique_by(| descriptor | descriptor.name().to_string())
            .collect::<Vec<_>>();
        let requested_names = requested.iter()
            .map(| descriptor | descriptor.name())
            .collect::<HashSet<_>>();

        let satisfied_names = self.satisfied.iter()
            .map(| descriptor | descriptor.name())
            .collect::<HashSet<_>>();

        // Requested descriptors shadow pool entries of the same name. Satisfied
        // components are never selected again, whatever else their pool copy
        // provides.
        let pool = requested.iter()
            .chain( self.available.iter().filter(| descriptor | !requested_names.contains( descriptor.name() )))
            .filter(| descriptor | !satisfied_names.contains( descriptor.name() ))
            .collect::<Vec<_>>();
        let index = FeatureIndex::new( pool, &self.satisfied );

        let mut selection = self.discover( &index, &requested )?;
        debug!( candidates = selection.candidates.len(), "Discovered candidates" );

        selection.fold_redundant();
        selection.check_duplicates()?;
        selection.link( &index );
        selection.compute_closure()?;

        let pruned = selection.prune();
        debug!( candidates = selection.candidates.len(), pruned, "Selected candidates" );

        Ok( selection.candidates.into_values().collect() )

    }

    fn discover(
        &self,
        index: &FeatureIndex,
        requested: &[Arc<Descriptor>],
    ) -> Result<Selection, ResolutionError> {

        let mut selection = Selection::default();
        let mut queue = VecDeque::new();

        for descriptor in requested {
            if index.is_satisfied_name( descriptor.name() ) {
                debug!( component = descriptor.name(), "Requested component is already satisfied" );
                continue ;
            }
            selection.insert( Candidate::requested( Arc::clone( descriptor )));
            queue.push_back( descriptor.name().to_string() );
        }

        let mut missing = BTreeMap::<String, Vec<String>>::new();

        while let Some( name ) = queue.pop_front() {

            let Some( descriptor ) = selection.candidates.get( &name ).map(| candidate | Arc::clone( candidate.descriptor() )) else { continue };

            for feature in descriptor.deps().iter().unique() {

                if descriptor.provides( feature ) || index.is_satisfied( feature ) { continue }

                let Some( provider ) = self.pick_provider( index, &selection, feature ) else {
                    missing.entry( name.clone() ).or_default().push( feature.clone() );
                    continue ;
                };
                trace!( component = %name, feature = %feature, provider = provider.name(), "Selected provider" );

                if !selection.candidates.contains_key( provider.name() ) {
                    selection.insert( Candidate::new( Arc::clone( provider )));
                    queue.push_back( provider.name().to_string() );
                }
                if let Some( candidate ) = selection.candidates.get_mut( provider.name() ) {
                    candidate.required_for.push( feature.clone() );
                    candidate.required_by.push( RequiredBy::Candidate( name.clone() ));
                }

            }
        }

        match missing.is_empty() {
            true => Ok( selection ),
            false => Err( ResolutionError::UnresolvedDependency { missing }),
        }

    }

    fn pick_provider<'a>(
        &self,
        index: &'a FeatureIndex,
        selection: &Selection,
        feature: &str,
    ) -> Option<&'a Arc<Descriptor>> {
        let providers = index.providers( feature );
        match self.policy {
            ProviderPolicy::FirstInPool => providers.first(),
            ProviderPolicy::PreferDiscovered => providers.iter()
                .find(| provider | selection.candidates.contains_key( provider.name() ))
                .or_else(|| providers.first() ),
        }
    }

}

/// Resolves `requested` against `available`, treating `satisfied` as already
/// loaded, and returns the candidates in load order.
///
/// Shorthand for [`Resolver::new`] with [`Resolver::with_satisfied`] and the
/// default [`ProviderPolicy`].
///
/// # Errors
/// See [`Resolver::select`].
pub fn resolve(
    requested: impl IntoIterator<Item = Arc<Descriptor>>,
    available: impl IntoIterator<Item = Arc<Descriptor>>,
    satisfied: impl IntoIterator<Item = Arc<Descriptor>>,
) -> Result<Vec<Candidate>, ResolutionError> {
    Resolver::new( available ).with_satisfied( satisfied ).resolve( requested )
}

/// Candidates of one run, keyed by name, plus the order they were discovered in.
#[derive( Debug, Default )]
struct Selection {
    candidates: BTreeMap<String, Candidate>,
    discovered: Vec<String>,
}

impl Selection {

    fn insert( &mut self, candidate: Candidate ) {
        self.discovered.push( candidate.name().to_string() );
        self.candidates.insert( candidate.name().to_string(), candidate );
    }

    fn discovery_rank( &self, name: &str ) -> usize {
        self.discovered.iter().position(| discovered | discovered == name ).unwrap_or( usize::MAX )
    }

    fn fulfilled( &self, name: &str ) -> bool {
        self.candidates.get( name ).is_none_or( Candidate::dependencies_fulfilled )
    }

    fn fold_redundant( &mut self ) {
        while let Some(( redundant, survivor )) = self.find_competing() {
            trace!( redundant = %redundant, survivor = %survivor, "Folding redundant candidate" );
            self.fold( &redundant, &survivor );
            self.prune();
        }
    }

    /// Next `( redundant, survivor )` pair, scanning in discovery order.
    fn find_competing( &self ) -> Option<( String, String )> {
        let live = self.discovered.iter()
            .filter_map(| name | self.candidates.get( name ))
            .collect::<Vec<_>>();

        live.iter()
            .cartesian_product( live.iter() )
            .filter(|( redundant, survivor )| redundant.name() != survivor.name() )
            .filter(|( redundant, survivor )| survivor.replaces( redundant ))
            .find(|( redundant, survivor )| !( redundant.replaces( survivor ) && self.prefer( redundant, survivor )))
            .map(|( redundant, survivor )| ( redundant.name().to_string(), survivor.name().to_string() ))
    }

    /// Of two mutually replaceable candidates, keep the one providing more
    /// features, then the one discovered first.
    fn prefer( &self, keep: &Candidate, over: &Candidate ) -> bool {
        let ( keep_features, over_features ) = ( keep.descriptor().features().len(), over.descriptor().features().len() );
        keep_features > over_features || ( keep_features == over_features
            && self.discovery_rank( keep.name() ) < self.discovery_rank( over.name() ))
    }

    fn fold( &mut self, redundant: &str, survivor: &str ) {
        let Some( removed ) = self.candidates.remove( redundant ) else { return };
        self.discovered.retain(| name | name != redundant );
        self.candidates.values_mut().for_each(| candidate | candidate.drop_requirer( redundant ));
        if let Some( survivor ) = self.candidates.get_mut( survivor ) {
            survivor.absorb( removed );
        }
    }

    fn check_duplicates( &self ) -> Result<(), ResolutionError> {

        let providers = self.candidates.values()
            .flat_map(| candidate | candidate.descriptor().features().iter()
                .map( move | feature | ( feature.clone(), candidate.name().to_string() )))
            .into_group_map()
            .into_iter()
            .filter(|( _, names )| names.len() > 1 )
            .map(|( feature, names )| ( feature, names.into_iter().sorted().collect::<Vec<_>>() ))
            .collect::<BTreeMap<_, _>>();

        match providers.is_empty() {
            true => Ok(()),
            false => Err( ResolutionError::DuplicateFeature { providers }),
        }

    }

    /// Binds each candidate's deps to the candidate providing them.
    ///
    /// Discovery already found a provider for every dep, and folding only
    /// hands features to candidates covering them, so every lookup succeeds.
    fn link( &mut self, index: &FeatureIndex ) {

        let providers = self.candidates.values()
            .flat_map(| candidate | candidate.descriptor().features().iter()
                .map( move | feature | ( feature.clone(), candidate.name().to_string() )))
            .collect::<BTreeMap<_, _>>();

        for candidate in self.candidates.values_mut() {
            let descriptor = Arc::clone( candidate.descriptor() );
            for feature in descriptor.deps().iter().unique() {
                if descriptor.provides( feature ) || index.is_satisfied( feature ) { continue }
                let provider = providers.get( feature );
                debug_assert!( provider.is_some(), "No selected provider of '{}' for '{}'", feature, descriptor.name() );
                if let Some( provider ) = provider {
                    candidate.direct_dependencies.insert( provider.clone() );
                }
            }
        }

    }

    /// Fixpoint over candidates whose direct dependencies are all fulfilled.
    fn compute_closure( &mut self ) -> Result<(), ResolutionError> {

        let mut pending = self.candidates.values()
            .filter(| candidate | !candidate.dependencies_fulfilled() )
            .map(| candidate | candidate.name().to_string() )
            .collect::<BTreeSet<_>>();

        while !pending.is_empty() {

            let ready = pending.iter()
                .filter(| name | self.candidates.get( *name )
                    .is_some_and(| candidate | candidate.direct_dependencies.iter().all(| dep | self.fulfilled( dep ))))
                .cloned()
                .collect::<Vec<_>>();

            if ready.is_empty() {
                let cycles = self.find_cycles( &pending );
                debug!( unresolved = pending.len(), cycles = cycles.len(), "Dependency closure made no progress" );
                return Err( ResolutionError::CircularDependency { cycles });
            }

            for name in ready {
                let all = self.candidates.get( &name )
                    .map(| candidate | candidate.direct_dependencies.iter()
                        .flat_map(| dep | std::iter::once( dep ).chain( self.candidates.get( dep ).into_iter().flat_map(| dep | dep.all_dependencies.iter() )))
                        .cloned()
                        .collect::<BTreeSet<_>>())
                    .unwrap_or_default();
                if let Some( candidate ) = self.candidates.get_mut( &name ) {
                    candidate.all_dependencies = all ;
                    candidate.closure_computed = true ;
                }
                pending.remove( &name );
            }

        }

        Ok(())

    }

    /// Every elementary cycle among `unresolved`, each starting at its
    /// smallest member.
    fn find_cycles( &self, unresolved: &BTreeSet<String> ) -> Vec<NEVec<String>> {
        let mut found = BTreeSet::new();
        for start in unresolved {
            self.walk( start, start, unresolved, &mut vec![ start.clone() ], &mut found );
        }
        found.into_iter().filter_map( NEVec::try_from_vec ).collect()
    }

    /// Extends `path` through members not smaller than `start`, recording a
    /// ring whenever a dependency leads back to `start`.
    fn walk(
        &self,
        start: &str,
        name: &str,
        unresolved: &BTreeSet<String>,
        path: &mut Vec<String>,
        found: &mut BTreeSet<Vec<String>>,
    ) {

        let Some( candidate ) = self.candidates.get( name ) else { return };

        for dep in candidate.direct_dependencies.iter()
            .filter(| dep | unresolved.contains( *dep ) && dep.as_str() >= start )
        {
            if dep == start {
                found.insert( path.clone() );
            } else if !path.contains( dep ) {
                path.push( dep.clone() );
                self.walk( start, dep, unresolved, path, found );
                path.pop();
            }
        }

    }

    /// Drops candidates nothing requires, until none are left. Returns how
    /// many were dropped.
    fn prune( &mut self ) -> usize {
        let mut pruned = 0 ;
        while let Some( name ) = self.candidates.values()
            .find(| candidate | candidate.required_by.is_empty() )
            .map(| candidate | candidate.name().to_string() )
        {
            trace!( component = %name, "Pruning unneeded candidate" );
            self.candidates.remove( &name );
            self.discovered.retain(| discovered | *discovered != name );
            self.candidates.values_mut().for_each(| candidate | candidate.drop_requirer( &name ));
            pruned += 1 ;
        }
        pruned
    }

}
