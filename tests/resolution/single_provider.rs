use component_order::{ resolve, RequiredBy };

fixtures! {
	requested	= [ "X" ];
	components	= [
		"X" provides [ "x" ] needs [ "f1" ],
		"Y" provides [ "f1" ],
	];
}

#[test]
fn resolution_single_provider() {

	crate::init_tracing();

	let order = resolve( fixtures::requested(), fixtures::available(), fixtures::satisfied() ).unwrap();
	assert_order!( order, [ "Y", "X" ]);

	assert!( order[ 1 ].direct_dependencies().contains( "Y" ));
	assert_eq!( order[ 0 ].required_by(), [ RequiredBy::Candidate( "X".to_string() )]);
	assert_eq!( order[ 0 ].required_for(), [ "f1".to_string() ]);
	assert!( order[ 1 ].is_requested() );

}

#[test]
fn resolution_dependency_on_component_name() {

	let order = resolve(
		[ fixtures::component( "X" ).as_ref().clone().with_deps([ "Y" ]).shared() ],
		fixtures::available(),
		[],
	).unwrap();

	// "f1" and "Y" are both provided by the same component.
	assert_order!( order, [ "Y", "X" ]);
	assert_eq!( order[ 1 ].direct_dependencies().len(), 1 );

}
