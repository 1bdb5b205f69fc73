#[macro_export]
macro_rules! fixtures {

    {
        requested   = [ $($requested:literal),* $(,)? ];
        $( satisfied   = [ $($satisfied:literal),* $(,)? ]; )?
        components  = [ $( $name:literal
            $( provides [ $($feature:literal),* $(,)? ] )?
            $( needs [ $($dep:literal),* $(,)? ] )?
        ),* $(,)? ];
    } => ( #[allow( dead_code )] mod fixtures {

        use std::sync::Arc ;
        use component_order::Descriptor ;

        /// Every component of the fixture, satisfied ones included, in declaration order.
        pub fn components() -> Vec<Arc<Descriptor>> { vec![ $(
            Descriptor::new( $name )
                $( .with_features( Vec::<&str>::from([ $($feature),* ])) )?
                $( .with_deps( Vec::<&str>::from([ $($dep),* ])) )?
                .shared()
        ),* ]}

        pub fn component( name: &str ) -> Arc<Descriptor> {
            components().into_iter()
                .find(| descriptor | descriptor.name() == name )
                .unwrap_or_else(|| panic!( "No fixture component named {}", name ))
        }

        pub fn requested() -> Vec<Arc<Descriptor>> { vec![ $( component( $requested ) ),* ]}

        pub fn satisfied() -> Vec<Arc<Descriptor>> { vec![ $($( component( $satisfied ) ),*)? ]}

        /// The pool: every component that is not already satisfied.
        pub fn available() -> Vec<Arc<Descriptor>> {
            let satisfied = satisfied();
            components().into_iter()
                .filter(| descriptor | !satisfied.contains( descriptor ))
                .collect()
        }

    });

}
