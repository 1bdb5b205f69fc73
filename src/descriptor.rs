//! Component descriptors.
//!
//! A descriptor is the only thing the resolver knows about a component: its
//! name, the **features** it provides and the features it **depends** on.
//! Dependencies are always expressed in terms of features, never component
//! names, so any component providing a feature may satisfy it.

use std::collections::BTreeSet ;
use std::sync::Arc ;



/// Immutable description of a loadable component.
///
/// The component's own name is always one of its features, so depending on a
/// component by name works the same way as depending on any other feature.
///
/// ```
/// use component_order::Descriptor ;
///
/// let descriptor = Descriptor::new( "renderer" )
///     .with_features([ "draw", "present" ])
///     .with_deps([ "window" ]);
///
/// assert!( descriptor.provides( "renderer" ));
/// assert!( descriptor.provides( "draw" ));
/// assert_eq!( descriptor.deps(), [ "window".to_string() ]);
/// ```
#[derive( Debug, Clone, PartialEq, Eq, Hash )]
pub struct Descriptor {
    name: String,
    features: BTreeSet<String>,
    deps: Vec<String>,
}

impl Descriptor {

    /// Creates a descriptor providing only its own name and depending on nothing.
    pub fn new( name: impl Into<String> ) -> Self {
        let name = name.into();
        Self {
            features: BTreeSet::from([ name.clone() ]),
            name,
            deps: Vec::with_capacity( 0 ),
        }
    }

    /// Adds provided features. The implicit name feature is kept.
    pub fn with_features( mut self, features: impl IntoIterator<Item = impl Into<String>> ) -> Self {
        self.features.extend( features.into_iter().map( Into::into ));
        self
    }

    /// Appends required features, in order. Duplicates are allowed and harmless.
    pub fn with_deps( mut self, deps: impl IntoIterator<Item = impl Into<String>> ) -> Self {
        self.deps.extend( deps.into_iter().map( Into::into ));
        self
    }

    /// Wraps the descriptor for sharing between the index and candidates.
    #[inline] pub fn shared( self ) -> Arc<Self> { Arc::new( self ) }

    #[inline] pub fn name( &self ) -> &str { &self.name }

    /// Every feature this descriptor provides, its own name included.
    #[inline] pub fn features( &self ) -> &BTreeSet<String> { &self.features }

    /// Required features in declaration order.
    #[inline] pub fn deps( &self ) -> &[String] { &self.deps }

    #[inline] pub fn provides( &self, feature: &str ) -> bool { self.features.contains( feature ) }

}

impl std::fmt::Display for Descriptor {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        write!( f, "{}", self.name )
    }
}
