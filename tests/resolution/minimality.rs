use std::collections::HashSet ;
use component_order::{ resolve, RequiredBy };

fixtures! {
	requested	= [ "editor", "shell" ];
	components	= [
		"editor" needs [ "buffer", "syntax" ],
		"shell" needs [ "terminal" ],
		"buffer" needs [ "alloc" ],
		"syntax" provides [ "highlight" ] needs [ "alloc" ],
		"terminal" provides [ "tty" ],
		"alloc",
		"network",
		"telemetry" needs [ "network" ],
		"spell" needs [ "buffer" ],
	];
}

#[test]
fn resolution_minimality_only_required_selected() {

	let order = resolve( fixtures::requested(), fixtures::available(), [] ).unwrap();
	assert_order!( order, [ "alloc", "terminal", "buffer", "shell", "syntax", "editor" ]);
	crate::assert_dependencies_first( &order );

	for candidate in &order {
		assert!( !candidate.required_by().is_empty(), "{} is not required by anything", candidate.name() );
	}
	assert_eq!( order[ 0 ].required_by().iter().collect::<HashSet<_>>(), HashSet::from([
		&RequiredBy::Candidate( "buffer".to_string() ),
		&RequiredBy::Candidate( "syntax".to_string() ),
	]));

}

#[test]
fn resolution_minimality_no_shared_features() {

	let order = resolve( fixtures::requested(), fixtures::available(), [] ).unwrap();

	let mut seen = HashSet::new();
	for feature in order.iter().flat_map(| candidate | candidate.descriptor().features() ) {
		assert!( seen.insert( feature ), "{} is provided twice", feature );
	}

}
