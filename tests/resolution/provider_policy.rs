use component_order::{ ProviderPolicy, ResolutionError, Resolver };

fixtures! {
	requested	= [ "app" ];
	components	= [
		"app" needs [ "gpu", "render" ],
		"soft-render" provides [ "render" ] needs [ "cpu-features" ],
		"vulkan" provides [ "gpu", "render" ],
	];
}

#[test]
fn resolution_provider_policy_first_in_pool() {

	let resolver = Resolver::new( fixtures::available() );
	assert_eq!( resolver.provider_policy(), ProviderPolicy::FirstInPool );

	// "soft-render" comes first in the pool and drags in a feature nobody provides.
	match resolver.resolve( fixtures::requested() ) {
		Err( err @ ResolutionError::UnresolvedDependency { .. }) => {
			assert_eq!( err.missing_for( "soft-render" ), Some( &[ "cpu-features".to_string() ][..] ));
			assert_eq!( err.missing_for( "app" ), None );
		},
		value => panic!( "Expected UnresolvedDependency, found: {:#?}", value ),
	}

}

#[test]
fn resolution_provider_policy_prefer_discovered() {

	let order = Resolver::new( fixtures::available() )
		.with_provider_policy( ProviderPolicy::PreferDiscovered )
		.resolve( fixtures::requested() )
		.unwrap();

	// "vulkan" was already selected for "gpu" and is reused for "render".
	assert_order!( order, [ "vulkan", "app" ]);
	assert_eq!( order[ 0 ].required_for(), [ "gpu".to_string(), "render".to_string() ]);

}
