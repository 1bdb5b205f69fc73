use std::collections::{ HashMap, HashSet };
use std::sync::Arc ;
use itertools::Itertools ;

use crate::Descriptor ;



/// Lookup from a feature to the descriptors providing it.
///
/// Built once per resolution run. Ambiguity is preserved: a feature provided
/// by several descriptors maps to all of them, in pool order. Features of the
/// satisfied set are kept apart since they never produce candidates.
#[derive( Debug, Clone, Default )]
pub struct FeatureIndex {
    providers: HashMap<String, Vec<Arc<Descriptor>>>,
    satisfied: HashMap<String, Arc<Descriptor>>,
    satisfied_names: HashSet<String>,
}

impl FeatureIndex {

    pub fn new<'a>(
        pool: impl IntoIterator<Item = &'a Arc<Descriptor>>,
        satisfied: impl IntoIterator<Item = &'a Arc<Descriptor>>,
    ) -> Self {

        let providers = pool.into_iter()
            .flat_map(| descriptor | descriptor.features().iter()
                .map( move | feature | ( feature.clone(), Arc::clone( descriptor ))))
            .into_group_map();

        let satisfied = satisfied.into_iter().collect::<Vec<_>>();
        let satisfied_names = satisfied.iter().map(| descriptor | descriptor.name().to_string()).collect();

        // First satisfied provider wins; the satisfied set only answers "is it there".
        let satisfied = satisfied.into_iter()
            .flat_map(| descriptor | descriptor.features().iter()
                .map( move | feature | ( feature.clone(), Arc::clone( descriptor ))))
            .rev()
            .collect();

        Self { providers, satisfied, satisfied_names }

    }

    /// Pool descriptors providing `feature`, in pool order.
    pub fn providers( &self, feature: &str ) -> &[Arc<Descriptor>] {
        self.providers.get( feature ).map( Vec::as_slice ).unwrap_or( &[] )
    }

    #[inline] pub fn is_satisfied( &self, feature: &str ) -> bool { self.satisfied.contains_key( feature ) }

    /// The already satisfied descriptor providing `feature`, if any.
    #[inline] pub fn satisfied_by( &self, feature: &str ) -> Option<&Arc<Descriptor>> { self.satisfied.get( feature ) }

    /// Whether a component with this name is already satisfied.
    #[inline] pub fn is_satisfied_name( &self, name: &str ) -> bool { self.satisfied_names.contains( name ) }

}
