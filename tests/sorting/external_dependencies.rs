use component_order::{ sort, Resolver };

fixtures! {
	requested	= [ "plugin" ];
	components	= [
		"plugin" needs [ "api" ],
		"api",
	];
}

#[test]
fn sorting_external_dependencies_ignored() {

	let selected = Resolver::new( fixtures::available() ).select( fixtures::requested() ).unwrap();
	assert_eq!( selected.len(), 2 );

	// Sorting only the dependant: "api" is assumed to be loaded elsewhere.
	let dependant = selected.into_iter().filter(| candidate | candidate.name() == "plugin" );
	assert_order!( sort( dependant ), [ "plugin" ]);

}
